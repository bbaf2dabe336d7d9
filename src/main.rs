use anyhow::Result;
use clap::Parser;
use salary_predictor::cli::{Cli, Commands};
use salary_predictor::config::{ServerConfig, TrainConfig};
use salary_predictor::server::PredictionServer;
use salary_predictor::trainer;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "salary_predictor=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => {
            let config = TrainConfig::from(args);
            let report = trainer::train(&config.data_path, &config.model_path)?;

            println!(
                "salary = {:.4} * experience + {:.4} (R² = {:.4}, {} samples)",
                report.model.slope(),
                report.model.intercept(),
                report.r_squared,
                report.model.n_samples()
            );
        }
        Commands::Serve(args) => {
            let server = PredictionServer::new(ServerConfig::from(args))?;
            server.run().await?;
        }
    }

    Ok(())
}
