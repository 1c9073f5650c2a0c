use serde::Serialize;

/// Everything known about an article except its body.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetadata {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub category: String,
    pub author: String,
    pub read_time: String,
}

/// A parsed article source: its metadata plus the raw markdown body.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct Article {
    #[serde(flatten)]
    pub metadata: ArticleMetadata,
    pub content: String,
}

impl Article {
    pub fn slug(&self) -> &str {
        &self.metadata.slug
    }
}
