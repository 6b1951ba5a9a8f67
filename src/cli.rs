use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "seed-sql", about = "Crawl pages into article drafts and render seed INSERT scripts")]
pub struct Cli {
    /// Config file (default: the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Crawl URLs and add the extracted articles to the draft
    Crawl {
        #[arg(required = true)]
        urls: Vec<String>,
        /// Draft file (default: `draft_path` from the config)
        #[arg(short, long)]
        draft: Option<PathBuf>,
        /// Project the articles belong to; stored in the draft
        #[arg(short, long)]
        project_github_url: Option<String>,
    },
    /// Render the draft as one transactional INSERT script
    Article {
        #[arg(short, long)]
        draft: Option<PathBuf>,
        /// Only this article, without the transaction wrapper
        #[arg(long)]
        id: Option<u64>,
        /// Print each statement under its own header
        #[arg(long, requires = "id")]
        sections: bool,
        /// Write the script here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Also print highlight markup for techStacks and category
        #[arg(long)]
        highlight: bool,
    },
    /// Change one field of a draft article
    Edit {
        id: u64,
        /// title, summary, articleUrl, category, techStacks or content
        field: String,
        value: String,
        #[arg(short, long)]
        draft: Option<PathBuf>,
    },
    /// Delete an article from the draft
    Remove {
        id: u64,
        #[arg(short, long)]
        draft: Option<PathBuf>,
    },
    /// List draft articles with their validation warnings
    List {
        #[arg(short, long)]
        draft: Option<PathBuf>,
    },
    /// Render a project TOML file as an INSERT script
    Project {
        file: PathBuf,
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print each statement under its own header instead of one script
        #[arg(long)]
        sections: bool,
    },
    /// Print highlight markup for a field value
    Highlight {
        /// techStacks, category (article) or categories (project)
        field: String,
        value: String,
        /// Use the project form's dictionaries
        #[arg(long)]
        project: bool,
    },
    /// Show the config file location and resolved values
    Config,
}
