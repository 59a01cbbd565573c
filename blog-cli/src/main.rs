use anyhow::{Context, Result};
use blog_core::{Document, Location, PageContext, RenderOutput, RenderStatus, Renderer};
use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;

mod config;
mod logging;
mod output;
mod source;

use config::CliConfig;
use logging::init_logging;
use source::open_source;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path or http(s) URL of posts.json
    #[arg(short, long)]
    source: Option<String>,

    /// Origin used for canonical URLs
    #[arg(long)]
    origin: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Html,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the index page
    List,

    /// Render the page of one post
    Show {
        #[arg(short, long)]
        id: Option<String>,
    },

    /// Print the structured data of one post
    Schema {
        #[arg(short, long)]
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    init_logging();

    let config = CliConfig::load(cli.source, cli.origin);
    tracing::info!("Reading posts from {}", config.source);

    let source = open_source(&config.source);
    let renderer = Renderer::new(config.site.clone());

    match &cli.command {
        Commands::List => {
            let location = Location::parse(&config.page_url("/"))
                .context("Invalid site origin")?;
            let page = PageContext::list_page(location);
            let (_, rendered) = renderer.render_page(&page, source.as_ref()).await;
            let doc = apply(&page, &rendered);

            exit_on_failure(&rendered, "Failed to load posts");
            match cli.format {
                Format::Text => output::print_list(&doc),
                Format::Html => print!("{}", doc.to_html()),
                Format::Json => print_commands(&rendered)?,
            }
        }

        Commands::Show { id } => {
            let page = detail_page(&config, id.as_deref())?;
            let (_, rendered) = renderer.render_page(&page, source.as_ref()).await;
            let doc = apply(&page, &rendered);

            exit_on_failure(&rendered, "Failed to load the post");
            match cli.format {
                Format::Json => print_commands(&rendered)?,
                Format::Html => print!("{}", doc.to_html()),
                Format::Text if rendered.status == RenderStatus::NotFound => {
                    println!("❌ {}", output::not_found_message(&doc));
                    println!("   Tip: Use 'list' command to see available posts");
                }
                Format::Text => output::print_detail(&doc),
            }
        }

        Commands::Schema { id } => {
            let page = detail_page(&config, Some(id))?;
            let (_, rendered) = renderer.render_page(&page, source.as_ref()).await;
            let doc = apply(&page, &rendered);

            exit_on_failure(&rendered, "Failed to load the post");
            match output::structured_data(&doc) {
                Some(json) => println!("{}", json),
                None => {
                    println!("❌ {}", output::not_found_message(&doc));
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn detail_page(config: &CliConfig, id: Option<&str>) -> Result<PageContext> {
    let location = Location::parse(&config.page_url(&config.site.post_page))
        .context("Invalid site origin")?;
    let location = match id {
        Some(id) => location.with_param("id", id),
        None => location,
    };
    Ok(PageContext::detail_page(location))
}

fn apply(page: &PageContext, rendered: &RenderOutput) -> Document {
    let mut doc = Document::from_page(page);
    doc.apply_all(&rendered.commands);
    doc
}

fn exit_on_failure(rendered: &RenderOutput, what: &str) {
    if let RenderStatus::Failed(reason) = &rendered.status {
        println!("❌ {}: {}", what, reason);
        std::process::exit(1);
    }
}

fn print_commands(rendered: &RenderOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(&rendered.commands)
        .context("Failed to serialize commands")?;
    println!("{}", json);
    Ok(())
}
