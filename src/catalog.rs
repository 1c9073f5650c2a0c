//! The article catalog: loads every markdown source in a directory and
//! answers listing, filtering, and search queries over the result.
//!
//! [`Catalog`] holds no article state. Each query rereads the directory, so
//! results always reflect the files on disk. [`Snapshot`] is the loaded,
//! immutable article set; callers that want to reuse one load across several
//! queries take a snapshot and replace it wholesale when they want fresh data.
use crate::article::{Article, ArticleMetadata};
use crate::config::Config;
use crate::error::{error_chain, CatalogResult, SourceError};
use crate::front_matter::{read_time, FrontMatterParser};
use crate::listing::newest_first;
use crate::text::{contains_folded, eq_folded, fold_case};
use log::{debug, warn};
use std::collections::BTreeSet;
use std::fs::read_dir;
use std::io::ErrorKind;
use std::path::PathBuf;

pub const SOURCE_EXTENSION: &str = ".md";

/// Outcome of resolving one identifier against the article directory.
#[derive(Debug)]
pub enum Lookup {
    Found(Article),
    NotFound,
    Malformed(SourceError),
}

impl Lookup {
    /// Collapses the lookup to the caller-facing signal: malformed sources
    /// read as missing.
    pub fn found(self) -> Option<Article> {
        match self {
            Lookup::Found(article) => Some(article),
            Lookup::NotFound | Lookup::Malformed(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct Catalog {
    dir: PathBuf,
    parser: FrontMatterParser,
}

impl Catalog {
    pub fn new(config: &Config) -> CatalogResult<Catalog> {
        Ok(Catalog {
            dir: config.articles_dir.clone(),
            parser: FrontMatterParser::new()?,
        })
    }

    /// Identifiers of every `.md` file in the article directory, sorted.
    /// A missing or unreadable directory holds no articles.
    pub fn source_identifiers(&self) -> Vec<String> {
        let entries = match read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("Article directory {} does not exist", self.dir.display());
                return vec![];
            }
            Err(err) => {
                warn!(
                    "Cannot read article directory {}: {}",
                    self.dir.display(),
                    err
                );
                return vec![];
            }
        };

        let mut ids: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let fname = entry.file_name();
                let fname = fname.to_str()?;
                let stem = fname.strip_suffix(SOURCE_EXTENSION)?;
                is_valid_stem(stem).then(|| stem.to_string())
            })
            .collect();
        ids.sort();
        ids
    }

    /// Resolves `id` (with or without the `.md` extension) to a parsed article,
    /// keeping "no such file" apart from "file exists but cannot be parsed".
    /// `id` is tried as a stem first, so `x.md` finds `x.md.md` before `x.md`.
    pub fn lookup(&self, id: &str) -> Lookup {
        for stem in candidate_stems(id) {
            match self.load(stem) {
                Lookup::NotFound => continue,
                lookup => return lookup,
            }
        }
        Lookup::NotFound
    }

    /// Parses the source whose file stem is exactly `slug`.
    fn load(&self, slug: &str) -> Lookup {
        let path = self.dir.join(format!("{}{}", slug, SOURCE_EXTENSION));

        let markdown = match std::fs::read_to_string(&path) {
            Ok(markdown) => markdown,
            Err(err) if err.kind() == ErrorKind::NotFound => return Lookup::NotFound,
            Err(source) => return Lookup::Malformed(SourceError::Read { path, source }),
        };

        match self.parser.parse(&path, &markdown) {
            Ok(parsed) => {
                let fm = parsed.front_matter;
                let read_time_label = fm
                    .read_time
                    .filter(|declared| !declared.is_empty())
                    .unwrap_or_else(|| read_time(parsed.body));

                Lookup::Found(Article {
                    metadata: ArticleMetadata {
                        slug: slug.to_string(),
                        title: fm.title.unwrap_or_default(),
                        description: fm.description.unwrap_or_default(),
                        date: fm.date.unwrap_or_default(),
                        category: fm.category.unwrap_or_default(),
                        author: fm.author.unwrap_or_default(),
                        read_time: read_time_label,
                    },
                    content: parsed.body.to_string(),
                })
            }
            Err(err) => Lookup::Malformed(err),
        }
    }

    /// The article for `id`, or `None` when it is missing or malformed.
    /// Malformed sources are logged here since callers only see absence.
    pub fn get(&self, id: &str) -> Option<Article> {
        match self.lookup(id) {
            Lookup::Malformed(err) => {
                warn!("Article `{}` is malformed: {}", id, error_chain(&err));
                None
            }
            lookup => lookup.found(),
        }
    }

    /// Loads every parseable article. Malformed sources are logged and left
    /// out without affecting the rest.
    pub fn snapshot(&self) -> Snapshot {
        let mut articles = vec![];
        for id in self.source_identifiers() {
            match self.load(&id) {
                Lookup::Found(article) => {
                    debug!("Loaded article `{}`", id);
                    articles.push(article);
                }
                Lookup::NotFound => debug!("Article `{}` vanished while loading", id),
                Lookup::Malformed(err) => {
                    warn!("Skipping malformed article `{}`: {}", id, error_chain(&err))
                }
            }
        }
        Snapshot::new(articles)
    }

    pub fn list_all(&self) -> Vec<ArticleMetadata> {
        self.snapshot().list_all()
    }

    pub fn list_by_category(&self, category: &str) -> Vec<ArticleMetadata> {
        self.snapshot().list_by_category(category)
    }

    pub fn search(&self, query: &str) -> Vec<ArticleMetadata> {
        self.snapshot().search(query)
    }

    pub fn search_page(&self, query: &str) -> Vec<ArticleMetadata> {
        self.snapshot().search_page(query)
    }

    pub fn list_categories(&self) -> Vec<String> {
        self.snapshot().list_categories()
    }
}

/// Whether `stem` names a plain, visible file directly inside the article
/// directory.
pub fn is_valid_stem(stem: &str) -> bool {
    !stem.is_empty() && !stem.starts_with('.') && !stem.contains(['/', '\\'])
}

/// Stems `id` may refer to: `id` itself, then `id` with one trailing `.md`
/// removed. Invalid stems are left out.
pub fn candidate_stems(id: &str) -> Vec<&str> {
    let mut stems = vec![];
    if is_valid_stem(id) {
        stems.push(id);
    }
    if let Some(stripped) = id.strip_suffix(SOURCE_EXTENSION) {
        if is_valid_stem(stripped) {
            stems.push(stripped);
        }
    }
    stems
}

/// A fully loaded article set, sorted newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    articles: Vec<Article>,
}

impl Snapshot {
    pub fn new(mut articles: Vec<Article>) -> Snapshot {
        articles.sort_by(|a, b| newest_first(&a.metadata, &b.metadata));
        Snapshot { articles }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Article> {
        candidate_stems(id)
            .into_iter()
            .find_map(|stem| self.articles.iter().find(|article| article.slug() == stem))
    }

    pub fn list_all(&self) -> Vec<ArticleMetadata> {
        self.filter(|_| true)
    }

    /// Articles whose category equals `category`, ignoring case.
    pub fn list_by_category(&self, category: &str) -> Vec<ArticleMetadata> {
        self.filter(|meta| eq_folded(&meta.category, category))
    }

    /// Articles whose title, description, or category contains `query`,
    /// ignoring case. The empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<ArticleMetadata> {
        let needle = fold_case(query);
        self.filter(|meta| {
            contains_folded(&meta.title, &needle)
                || contains_folded(&meta.description, &needle)
                || contains_folded(&meta.category, &needle)
        })
    }

    /// Search as a results page runs it: a blank query means no search was
    /// performed and yields nothing, otherwise the trimmed query is searched.
    /// Whitespace-only queries therefore count as blank, and surrounding
    /// whitespace never takes part in matching, unlike a plain "is the query
    /// non-empty" check that would search `" "` verbatim.
    pub fn search_page(&self, query: &str) -> Vec<ArticleMetadata> {
        let query = query.trim();
        if query.is_empty() {
            return vec![];
        }
        self.search(query)
    }

    /// Distinct categories, sorted.
    pub fn list_categories(&self) -> Vec<String> {
        self.articles
            .iter()
            .map(|article| article.metadata.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn filter(&self, keep: impl Fn(&ArticleMetadata) -> bool) -> Vec<ArticleMetadata> {
        self.articles
            .iter()
            .map(|article| &article.metadata)
            .filter(|meta| keep(meta))
            .cloned()
            .collect()
    }
}
