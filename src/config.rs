use std::path::PathBuf;

pub const DEFAULT_ARTICLES_DIR: &str = "articles";

/// Where a [`Catalog`](crate::Catalog) finds its article sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub articles_dir: PathBuf,
}

impl Config {
    pub fn new(articles_dir: impl Into<PathBuf>) -> Config {
        Config {
            articles_dir: articles_dir.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_ARTICLES_DIR)
    }
}
