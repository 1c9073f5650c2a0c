use crate::article::ArticleMetadata;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parses a publication date written as `YYYY-MM-DD`, RFC 3339, or a plain
/// date and time. Anything else has no position in time.
pub fn published_at(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();

    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(date) {
        return Some(instant.naive_utc());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date, format).ok())
}

/// Most recent first. Undated articles go last, and equal dates fall back to
/// the slug in ascending order.
pub fn newest_first(a: &ArticleMetadata, b: &ArticleMetadata) -> Ordering {
    let by_date = match (published_at(&a.date), published_at(&b.date)) {
        (Some(date1), Some(date2)) => date2.cmp(&date1),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| a.slug.cmp(&b.slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(slug: &str, date: &str) -> ArticleMetadata {
        ArticleMetadata {
            slug: slug.to_string(),
            title: String::new(),
            description: String::new(),
            date: date.to_string(),
            category: String::new(),
            author: String::new(),
            read_time: "1 min read".to_string(),
        }
    }

    fn slugs(articles: &[ArticleMetadata]) -> Vec<&str> {
        articles.iter().map(|a| a.slug.as_str()).collect()
    }

    #[test]
    fn test_published_at_formats() {
        assert!(published_at("2024-01-01").is_some());
        assert!(published_at(" 2024-01-01 ").is_some());
        assert!(published_at("2024-01-01T10:00:00Z").is_some());
        assert!(published_at("2024-01-01T10:00:00+09:00").is_some());
        assert!(published_at("2024-01-01 10:00").is_some());
        assert!(published_at("2024-01-01 10:00:30").is_some());
        assert!(published_at("").is_none());
        assert!(published_at("last tuesday").is_none());
    }

    #[test]
    fn test_rfc3339_compares_in_utc() {
        let tokyo = published_at("2024-01-01T09:00:00+09:00").unwrap();
        let utc = published_at("2024-01-01T00:30:00Z").unwrap();
        assert!(utc > tokyo);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut articles = vec![
            meta("a", "2024-01-01"),
            meta("b", "2024-02-01"),
            meta("c", "2023-12-31"),
        ];
        articles.sort_by(newest_first);
        assert_eq!(slugs(&articles), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_equal_dates_sorted_by_slug() {
        let mut articles = vec![
            meta("zeta", "2024-01-01"),
            meta("alpha", "2024-01-01"),
            meta("mid", "2024-01-01"),
        ];
        articles.sort_by(newest_first);
        assert_eq!(slugs(&articles), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_undated_go_last() {
        let mut articles = vec![
            meta("undated", ""),
            meta("garbled", "soon"),
            meta("old", "1999-01-01"),
        ];
        articles.sort_by(newest_first);
        assert_eq!(slugs(&articles), vec!["old", "garbled", "undated"]);
    }
}
