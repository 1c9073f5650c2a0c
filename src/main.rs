use article_catalog::config::DEFAULT_ARTICLES_DIR;
use article_catalog::{
    export, logging, ArticleMetadata, Catalog, CatalogError, CatalogResult, Config,
    MarkdownRenderer,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse and export a directory of markdown articles")]
struct Cli {
    /// Directory holding one `.md` file per article.
    #[arg(short, long, env = "ARTICLES_DIR", default_value = DEFAULT_ARTICLES_DIR)]
    articles_dir: PathBuf,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List article identifiers found in the directory.
    Ids,

    /// List articles, newest first.
    List {
        /// Only articles in this category (case-insensitive).
        #[arg(short, long)]
        category: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Search titles, descriptions, and categories.
    Search {
        query: String,

        #[arg(long)]
        json: bool,
    },

    /// List distinct categories.
    Categories,

    /// Print one article.
    Show {
        slug: String,

        /// Render the body to HTML instead of printing markdown.
        #[arg(long)]
        html: bool,
    },

    /// Write the catalog as JSON documents under DEST.
    Export { dest: PathBuf },
}

fn print_articles(articles: &[ArticleMetadata], json: bool) -> CatalogResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(articles)?);
        return Ok(());
    }
    for article in articles {
        println!(
            "{}  {:<24} {} [{}] ({})",
            article.date, article.slug, article.title, article.category, article.read_time
        );
    }
    Ok(())
}

fn run(cli: Cli) -> CatalogResult<()> {
    let catalog = Catalog::new(&Config::new(cli.articles_dir))?;

    match cli.command {
        Command::Ids => {
            for id in catalog.source_identifiers() {
                println!("{}", id);
            }
        }
        Command::List { category, json } => {
            let articles = match category {
                Some(category) => catalog.list_by_category(&category),
                None => catalog.list_all(),
            };
            print_articles(&articles, json)?;
        }
        Command::Search { query, json } => {
            let articles = catalog.search_page(&query);
            if !json {
                println!(
                    "{} {} for \"{}\"",
                    articles.len(),
                    if articles.len() == 1 { "result" } else { "results" },
                    query
                );
            }
            print_articles(&articles, json)?;
        }
        Command::Categories => {
            for category in catalog.list_categories() {
                println!("{}", category);
            }
        }
        Command::Show { slug, html } => {
            let article = catalog
                .get(&slug)
                .ok_or_else(|| CatalogError::ArticleNotFound(slug.clone()))?;
            if html {
                print!("{}", MarkdownRenderer::new().render(&article.content));
            } else {
                let meta = &article.metadata;
                println!("# {}", meta.title);
                println!("{} | {} | {} | {}", meta.author, meta.date, meta.category, meta.read_time);
                println!();
                print!("{}", article.content);
            }
        }
        Command::Export { dest } => {
            let snapshot = catalog.snapshot();
            let written = export::export(&snapshot, &MarkdownRenderer::new(), &dest)?;
            log::info!(
                "Exported {} articles ({} files) to {}",
                snapshot.len(),
                written.len(),
                dest.display()
            );
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        log::error!("{}", article_catalog::error::error_chain(&err));
        std::process::exit(1);
    }
}
