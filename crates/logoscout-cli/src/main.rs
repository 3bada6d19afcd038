use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use logoscout_scraper::{LogoFinder, LookupStrategy};

#[derive(Debug, Parser)]
#[command(name = "logoscout")]
#[command(about = "Brand logo discovery for a domain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find and rank logo candidates for a domain, printing JSON.
    Lookup {
        /// Domain to look up, with or without scheme or www prefix.
        domain: String,
        /// Candidate source strategy.
        #[arg(long, value_enum, default_value = "scrape")]
        strategy: StrategyArg,
        /// Compact single-line JSON instead of pretty-printed.
        #[arg(long)]
        compact: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Scrape the domain's homepage HTML for candidates.
    Scrape,
    /// Query external logo services without touching the site.
    Services,
}

impl From<StrategyArg> for LookupStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Scrape => LookupStrategy::Scrape,
            StrategyArg::Services => LookupStrategy::Services,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = logoscout_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Lookup {
            domain,
            strategy,
            compact,
        } => {
            let finder = LogoFinder::from_app_config(&config, strategy.into())?;
            let outcome = finder.lookup(&domain).await;

            let json = if compact {
                serde_json::to_string(&outcome)?
            } else {
                serde_json::to_string_pretty(&outcome)?
            };
            println!("{json}");

            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
