use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use spdlog::{debug, warn};

use mdx_blog::logger::configure_logger;
use mdx_blog::post::Post;
use mdx_blog::post_repository::PostRepository;
use mdx_blog::search::{MatchedField, SearchIndex};

use crate::config::open_config;

mod config;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Content directory, overrides the config
    #[arg(long)]
    content_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lists all posts, newest first
    List {
        #[arg(long)]
        json: bool,
    },
    /// Shows one post with its raw body
    Show {
        year: String,
        month: String,
        day: String,
        slug: String,
        #[arg(long)]
        json: bool,
    },
    /// Searches post titles and tags
    Search {
        query: String,
        /// Only display the first N results
        #[arg(short, long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Prints the post list as JSON, ready for a client side search
    Index,
}

fn print_post_line(post: &Post) {
    println!("{}  {}  {}", post.date, post.key().link(), post.title);
    if !post.tags.is_empty() {
        println!("{:12}tags: {}", "", post.tags.join(", "));
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => bail!("{}\nPlease run mdx-blog --help", err),
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let content_dir = args.content_dir.unwrap_or_else(|| config.paths.content_dir.clone());
    debug!("Reading posts from {}", content_dir.display());
    let repository = PostRepository::new(&content_dir);

    match args.command {
        Command::List { json } => {
            let posts = repository.list_all()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else {
                posts.iter().for_each(print_post_line);
            }
        }
        Command::Show { year, month, day, slug, json } => {
            let Some(post) = repository.get_by_slug(&year, &month, &day, &slug)? else {
                bail!("Post {}/{}/{}/{} not found in {}", year, month, day, slug, content_dir.display());
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&post)?);
            } else {
                println!("{}\n{}\n", post.title, post.formatted_date);
                print!("{}", post.content);
            }
        }
        Command::Search { query, limit, json } => {
            let posts = repository.list_all()?;
            let index = SearchIndex::build_with_options(&posts, config.search);
            let mut hits = index.search(&query);
            if let Some(limit) = limit {
                hits.truncate(limit);
            }

            if json {
                let found: Vec<&Post> = hits.iter().map(|hit| hit.post).collect();
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else if hits.is_empty() {
                println!("No results found for \"{}\"", query);
            } else {
                for hit in hits.iter() {
                    let field = match hit.field {
                        MatchedField::Title => "title".to_string(),
                        MatchedField::Tag(ref tag) => format!("tag {}", tag),
                    };
                    println!("{:.3}  {}  {}  ({})", hit.score, hit.post.key().link(), hit.post.title, field);
                }
            }
        }
        Command::Index => {
            let posts = repository.list_all()?;
            println!("{}", serde_json::to_string(&posts)?);
        }
    }

    Ok(())
}
