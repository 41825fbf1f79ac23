mod commands;
mod host;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BusinessArgs, IncentiveArgs, SelectArgs};

#[derive(Debug, Parser)]
#[command(name = "ptk-cli")]
#[command(about = "Patriot Thanks directory command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the business directory
    Search {
        #[command(flatten)]
        select: SelectArgs,
    },
    /// Select a business and show its resolved incentives
    Show {
        #[command(flatten)]
        select: SelectArgs,
    },
    /// Add an incentive to a business
    AddIncentive {
        #[command(flatten)]
        select: SelectArgs,
        #[command(flatten)]
        incentive: IncentiveArgs,
    },
    /// Update an existing incentive on a business
    UpdateIncentive {
        #[command(flatten)]
        select: SelectArgs,
        /// Id of the incentive to edit
        #[arg(long)]
        incentive_id: String,
        #[command(flatten)]
        incentive: IncentiveArgs,
    },
    /// Update a business record
    UpdateBusiness {
        #[command(flatten)]
        select: SelectArgs,
        #[command(flatten)]
        business: BusinessArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ptk_core::load_app_config()?;

    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::debug!(?config, "loaded configuration");

    let cli = Cli::parse();
    match &cli.command {
        Commands::Search { select } => commands::search(&config, select).await,
        Commands::Show { select } => commands::show(&config, select).await,
        Commands::AddIncentive { select, incentive } => {
            commands::add_incentive(&config, select, incentive).await
        }
        Commands::UpdateIncentive {
            select,
            incentive_id,
            incentive,
        } => commands::update_incentive(&config, select, incentive_id, incentive).await,
        Commands::UpdateBusiness { select, business } => {
            commands::update_business(&config, select, business).await
        }
    }
}
