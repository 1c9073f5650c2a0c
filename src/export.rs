use crate::article::ArticleMetadata;
use crate::catalog::Snapshot;
use crate::error::ExportError;
use crate::markdown::MarkdownRenderer;
use log::info;
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct ArticlePage<'a> {
    #[serde(flatten)]
    metadata: &'a ArticleMetadata,
    html: String,
}

/// Writes `index.json` (every article's metadata plus the category list) and
/// `articles/<slug>.json` (metadata and rendered HTML) under `dest`.
/// Returns the paths written.
pub fn export(
    snapshot: &Snapshot,
    renderer: &MarkdownRenderer,
    dest: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    let articles_dir = dest.join("articles");
    create_dir_all(&articles_dir)?;

    let mut written = vec![];
    for article in snapshot.articles() {
        let dest_path = articles_dir.join(format!("{}.json", article.slug()));
        info!("Exporting {} -> {}", article.slug(), dest_path.display());

        let page = ArticlePage {
            metadata: &article.metadata,
            html: renderer.render(&article.content),
        };
        write(&dest_path, serde_json::to_string(&page)?)?;
        written.push(dest_path);
    }

    let index_path = dest.join("index.json");
    let index = json! {
        {
            "articles": snapshot.list_all(),
            "categories": snapshot.list_categories()
        }
    };
    write(&index_path, serde_json::to_string(&index)?)?;
    written.push(index_path);

    Ok(written)
}

fn create_dir_all(path: &Path) -> Result<(), ExportError> {
    std::fs::create_dir_all(path).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: String) -> Result<(), ExportError> {
    std::fs::write(path, contents.into_bytes()).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::Article;
    use serde_json::Value;

    fn article(slug: &str, date: &str, category: &str, content: &str) -> Article {
        Article {
            metadata: ArticleMetadata {
                slug: slug.to_string(),
                title: slug.to_uppercase(),
                description: String::new(),
                date: date.to_string(),
                category: category.to_string(),
                author: "ada".to_string(),
                read_time: "1 min read".to_string(),
            },
            content: content.to_string(),
        }
    }

    #[test]
    fn test_export_writes_index_and_pages() {
        let dest = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::new(vec![
            article("a", "2024-01-01", "Search", "# A\n"),
            article("b", "2024-02-01", "Sorting", "**b**\n"),
        ]);

        let written = export(&snapshot, &MarkdownRenderer::new(), dest.path()).unwrap();
        assert_eq!(written.len(), 3);

        let index: Value =
            serde_json::from_str(&std::fs::read_to_string(dest.path().join("index.json")).unwrap())
                .unwrap();
        assert_eq!(index["articles"][0]["slug"], "b");
        assert_eq!(index["articles"][1]["slug"], "a");
        assert_eq!(index["articles"][0]["readTime"], "1 min read");
        assert_eq!(index["categories"], json!(["Search", "Sorting"]));

        let page: Value = serde_json::from_str(
            &std::fs::read_to_string(dest.path().join("articles/b.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(page["title"], "B");
        assert!(page["html"].as_str().unwrap().contains("<strong>b</strong>"));
    }

    #[test]
    fn test_export_empty_snapshot() {
        let dest = tempfile::tempdir().unwrap();
        let written = export(&Snapshot::default(), &MarkdownRenderer::new(), dest.path()).unwrap();
        assert_eq!(written, vec![dest.path().join("index.json")]);
        assert!(dest.path().join("articles").is_dir());
    }
}
