use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

mod app;
mod cli;
mod config;
mod draft;
mod error;
mod extract;
mod highlight;
mod lookup;
mod models;
mod services;
mod sql;
mod text;
mod validate;

use app::App;
use cli::{Cli, Command};
use config::Config;
use draft::Draft;
use error::Result;
use highlight::{dictionary_for, highlight_html};
use models::{ArticleField, ProjectRecord};
use validate::FieldErrors;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = Config::resolve_path(cli.config.as_deref());
    let config = Config::load_from(&config_path)?;

    run(cli.command, config, &config_path).await
}

async fn run(command: Command, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Command::Crawl {
            urls,
            draft,
            project_github_url,
        } => {
            let path = draft_path(&config, draft);
            let mut app = App::new(&config, Draft::load(&path)?)?;
            if let Some(url) = project_github_url {
                app.draft.project_github_url = url;
            }

            if let [url] = urls.as_slice() {
                let id = app.add_url(url).await?;
                app.draft.save(&path)?;
                println!("Added {} as {} to {:?}", url, id, path);
                return Ok(());
            }

            let report = app.add_urls(&urls).await;
            app.draft.save(&path)?;

            for (url, reason) in &report.failed {
                eprintln!("failed: {} ({})", url, reason);
            }
            println!(
                "Added {} articles to {:?} ({} failed)",
                report.added.len(),
                path,
                report.failed.len()
            );
        }

        Command::Article {
            draft,
            id,
            sections,
            out,
            highlight,
        } => {
            let app = App::new(&config, Draft::load(&draft_path(&config, draft))?)?;

            for (id, errors) in app.validate_all() {
                print_warnings(&format!("article {}", id), &errors);
            }
            if highlight {
                for article in &app.draft.articles {
                    for field in [ArticleField::TechStacks, ArticleField::Category] {
                        eprintln!(
                            "[article {}] {}: {}",
                            article.id,
                            field,
                            highlight_html(article.field(field), dictionary_for(field.as_str(), None))
                        );
                    }
                }
            }

            let sql = match id {
                Some(id) if sections => app.article_sql(id)?.sections(),
                Some(id) => app.article_sql(id)?.combined_sql,
                None => app.batch_sql(),
            };
            write_output(out.as_deref(), &sql)?;
        }

        Command::Edit {
            id,
            field,
            value,
            draft,
        } => {
            let path = draft_path(&config, draft);
            let mut app = App::new(&config, Draft::load(&path)?)?;
            let field: ArticleField = field.parse()?;

            app.update_article(id, field, value)?;
            app.draft.save(&path)?;

            let errors = validate::validate_article(app.article(id)?);
            if let Some(message) = errors.get(field.as_str()) {
                eprintln!("warning: {}: {}", field, message);
            }
        }

        Command::Remove { id, draft } => {
            let path = draft_path(&config, draft);
            let mut app = App::new(&config, Draft::load(&path)?)?;
            let removed = app.delete_article(id)?;
            app.draft.save(&path)?;
            println!("Removed {} ({})", removed.id, removed.article_url);
        }

        Command::List { draft } => {
            let draft = Draft::load(&draft_path(&config, draft))?;
            if draft.articles.is_empty() {
                println!("Draft is empty. Run 'crawl' first.");
                return Ok(());
            }
            for article in &draft.articles {
                println!(
                    "{:>16} | {:<40} | {:<8} | {}",
                    article.id,
                    text::truncate_chars(&article.title, 40),
                    article.category,
                    article.tech_stacks
                );
                print_warnings(&format!("article {}", article.id), &validate::validate_article(article));
            }
        }

        Command::Project { file, out, sections } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read project file {:?}", file))?;
            let project = ProjectRecord::from_toml(&content)?;
            let app = App::new(&config, Draft::default())?;

            print_warnings("project", &app.validate_project(&project));
            let sql = app.project_sql(&project);
            let script = if sections { sql.sections() } else { sql.combined_sql };
            write_output(out.as_deref(), &script)?;
        }

        Command::Highlight {
            field,
            value,
            project,
        } => {
            let version = project.then_some(config.project_taxonomy);
            println!("{}", highlight_html(&value, dictionary_for(&field, version)));
        }

        Command::Config => {
            println!("# {}", config_path.display());
            let content = toml::to_string_pretty(&config)?;
            println!("{}", content);
            println!(
                "# {} tech stacks, {} article categories, {} project categories",
                lookup::tech_stacks().len(),
                lookup::Taxonomy::Article.table().len(),
                lookup::Taxonomy::Project(config.project_taxonomy).table().len()
            );
        }
    }

    Ok(())
}

fn draft_path(config: &Config, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| PathBuf::from(&config.draft_path))
}

fn print_warnings(label: &str, errors: &FieldErrors) {
    for (field, message) in errors {
        eprintln!("[{}] {}: {}", label, field, message);
    }
}

fn write_output(out: Option<&Path>, sql: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, sql)?;
            tracing::info!("Wrote {} bytes to {:?}", sql.len(), path);
        }
        None => println!("{}", sql),
    }
    Ok(())
}
