mod config;
mod doctor_cmd;
mod pipeline;
mod source;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use umlforge_model::GeminiProvider;
use umlforge_render::PlantUmlRenderer;

use config::Config;
use pipeline::PipelineOutcome;

#[derive(Parser)]
#[command(name = "umlforge")]
#[command(about = "umlforge — UML diagrams for source files via a hosted model")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a UML diagram for a source file
    Generate {
        /// Source file to diagram
        file: PathBuf,
        /// Model to request
        #[arg(short, long)]
        model: Option<String>,
        /// Directory to write the artifact into
        #[arg(short, long)]
        out_dir: Option<String>,
        /// Open the artifact in the platform viewer on success
        #[arg(long)]
        open: bool,
    },
    /// Check environment and rendering-tool availability
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            file,
            model,
            out_dir,
            open,
        } => {
            let config = Config {
                model: model.unwrap_or(config.model),
                out_dir: out_dir.unwrap_or(config.out_dir),
                ..config
            };
            run_generate(config, &file, open).await?;
        }
        Commands::Doctor => doctor_cmd::run(&config).await?,
    }

    Ok(())
}

async fn run_generate(config: Config, file: &Path, open: bool) -> Result<()> {
    let api_key = config
        .gemini_api_key
        .clone()
        .context("GEMINI_API_KEY is not set")?;

    let source = source::load_source(file).await?;
    info!(file = %file.display(), bytes = source.len(), "Loaded source file");

    let mut provider = GeminiProvider::new(api_key);
    if let Some(url) = &config.api_url {
        provider = provider.with_base_url(url);
    }
    let renderer = PlantUmlRenderer::new(config.renderer_config(open));

    match pipeline::run(&source, &config.model, &provider, &renderer).await? {
        PipelineOutcome::Rendered(artifact) => {
            println!("Diagram rendered: {}", artifact.path.display());
        }
        PipelineOutcome::NoDiagram => {
            println!("No UML diagram found in the model response.");
        }
        PipelineOutcome::EmptyDiagram => {
            println!("The model's diagram block was empty; nothing to render.");
        }
    }

    Ok(())
}
