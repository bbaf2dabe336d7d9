use crate::config::{ServerConfig, TrainConfig, DEFAULT_DATA_PATH, DEFAULT_MODEL_PATH, DEFAULT_PORT};
use clap::{Args, Parser, Subcommand};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit the salary model on a CSV dataset and save it
    Train(TrainArgs),

    /// Serve predictions from a saved model over HTTP
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// The path of the training dataset.
    /// Needs an experience and a salary column (YearsExperience and Salary are accepted too)
    #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// Where to write the fitted model
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    pub model_path: PathBuf,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// The model to load at startup. If it doesn't exist the server still starts,
    /// but /predict answers 500 until a model is trained and the server restarted
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    pub model_path: PathBuf,

    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl From<TrainArgs> for TrainConfig {
    fn from(args: TrainArgs) -> Self {
        TrainConfig {
            data_path: args.data_path,
            model_path: args.model_path,
        }
    }
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        ServerConfig::new(SocketAddr::new(args.host, args.port), args.model_path)
    }
}
