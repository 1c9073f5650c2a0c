//! Error types for the article catalog.
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Why an article source could not be turned into an [`Article`](crate::Article).
///
/// The catalog's query API never returns these; they are kept inside
/// [`Lookup::Malformed`](crate::Lookup::Malformed) so the boundary can log them.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read article source: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid front matter in {path}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Front matter in {path} is not a key/value mapping")]
    FrontMatterShape { path: PathBuf },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommentError {
    #[error("Comment {0} not found")]
    NotFound(Uuid),
    #[error("User `{user}` does not own comment {comment}")]
    NotOwner { comment: Uuid, user: String },
    #[error("Comment body is empty")]
    EmptyBody,
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),

    #[error("Article `{0}` not found")]
    ArticleNotFound(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Renders `err` followed by each of its sources, separated by `: `.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
