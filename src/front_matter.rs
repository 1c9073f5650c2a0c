use crate::error::SourceError;
use regex::Regex;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::path::Path;

pub const WORDS_PER_MINUTE: usize = 200;

/// Typed view of an article's front matter. Every field is optional; absent
/// and empty values fall back to defaults when the article is assembled.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    #[serde(rename = "readTime", alias = "read_time")]
    pub read_time: Option<String>,
}

/// Front matter and the markdown body that follows it.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedSource<'a> {
    pub front_matter: FrontMatter,
    pub body: &'a str,
}

#[derive(Debug)]
pub struct FrontMatterParser {
    block_regex: Regex,
}

impl FrontMatterParser {
    pub fn new() -> Result<FrontMatterParser, regex::Error> {
        let block_regex =
            Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)")?;
        Ok(FrontMatterParser { block_regex })
    }

    /// Splits `source` into front matter and body. A source without a leading
    /// `---` block has empty front matter and is all body.
    pub fn parse<'a>(&self, path: &Path, source: &'a str) -> Result<ParsedSource<'a>, SourceError> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);

        let Some(caps) = self.block_regex.captures(source) else {
            return Ok(ParsedSource {
                front_matter: FrontMatter::default(),
                body: source,
            });
        };

        let block = caps.get(1).map_or("", |m| m.as_str());
        let body_start = caps.get(0).map_or(0, |m| m.end());

        Ok(ParsedSource {
            front_matter: decode(path, block)?,
            body: &source[body_start..],
        })
    }
}

fn decode(path: &Path, block: &str) -> Result<FrontMatter, SourceError> {
    if block.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    let value: Value = serde_yaml::from_str(block).map_err(|source| SourceError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;

    let mapping = match value {
        Value::Null => return Ok(FrontMatter::default()),
        Value::Mapping(mapping) => mapping,
        _ => {
            return Err(SourceError::FrontMatterShape {
                path: path.to_path_buf(),
            })
        }
    };

    serde_yaml::from_value(Value::Mapping(stringify_scalars(mapping))).map_err(|source| {
        SourceError::FrontMatter {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Keeps string keys only and turns number and boolean values into strings,
/// so `readTime: 5` or `title: 2024` decode into string fields.
fn stringify_scalars(mapping: Mapping) -> Mapping {
    mapping
        .into_iter()
        .filter(|(key, _)| key.is_string())
        .map(|(key, value)| {
            let value = match value {
                Value::Bool(b) => Value::String(b.to_string()),
                Value::Number(n) => Value::String(n.to_string()),
                other => other,
            };
            (key, value)
        })
        .collect()
}

/// Estimated reading time for `body`, at least one minute.
pub fn read_time(body: &str) -> String {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}
