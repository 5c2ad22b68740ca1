mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use page_kit_generator::Registry;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "page-kit")]
#[command(version, about = "Block-based page builder and static site generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize new page directory
    Init {
        /// Path to create page directory
        path: PathBuf,
    },

    /// Validate page configuration
    Validate {
        /// Path to page directory
        path: PathBuf,
    },

    /// List the block types that can be placed on a page
    Palette {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Preview page locally with hot reload and the editing API
    Preview {
        /// Path to page directory
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Build static site
    Build {
        /// Path to page directory
        path: PathBuf,

        /// Output directory for generated site
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let registry = Registry::builtin();
    tracing::debug!(block_types = registry.len(), "registry ready");

    match cli.command {
        Command::Init { path } => commands::init::run(path).await,
        Command::Validate { path } => commands::validate::run(path, &registry).await,
        Command::Palette { json } => commands::palette::run(&registry, json),
        Command::Preview { path, port } => commands::preview::run(path, port, registry).await,
        Command::Build { path, output } => commands::build::run(path, output, &registry).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "page-kit", &mut io::stdout());
            Ok(())
        }
    }
}
