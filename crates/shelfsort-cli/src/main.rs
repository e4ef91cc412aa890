mod run;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shelfsort-cli")]
#[command(about = "Shelfsort command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reorder every configured collection once and print the run summary
    Run {
        /// Compute orderings without writing them back to the store
        #[arg(long)]
        dry_run: bool,
        /// Positions to log per collection in dry-run mode
        #[arg(long, default_value_t = run::DEFAULT_PREVIEW)]
        preview: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("shelfsort-cli: use `run` to reorder collections (see --help)");
        return Ok(());
    };

    let config = shelfsort_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Run { dry_run, preview } => run::run_once(&config, dry_run, preview).await,
    }
}

#[cfg(test)]
mod tests;
