use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mixwise")]
#[command(about = "Cocktail matching service", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Import a catalog JSON document
    Import {
        /// Path to the catalog document
        file: String,
    },
    /// Run the data-quality checks on a catalog JSON document
    Check {
        /// Path to the catalog document
        file: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mixwise::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mixwise::observability::init_observability(
        "mixwise",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => mixwise::cli::serve(config, host, port).await,
        Commands::Migrate => mixwise::cli::migrate(&config).await,
        Commands::Import { file } => mixwise::cli::import(&config, file).await,
        Commands::Check { file } => mixwise::cli::check(file),
    }
}
