//! A catalog of markdown articles with front-matter metadata, plus the
//! collaborators a content site needs around it: markdown rendering,
//! article comments, and a static JSON export.
pub mod article;
pub mod catalog;
pub mod comments;
pub mod config;
pub mod error;
pub mod export;
pub mod front_matter;
pub mod listing;
pub mod logging;
pub mod markdown;
pub mod text;

pub use article::{Article, ArticleMetadata};
pub use catalog::{Catalog, Lookup, Snapshot};
pub use comments::{Comment, CommentStore, MemoryCommentStore, Profiles, UserId};
pub use config::Config;
pub use error::{CatalogError, CatalogResult, CommentError, ExportError, SourceError};
pub use markdown::MarkdownRenderer;
