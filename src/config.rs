use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "data/salaries.csv";
pub const DEFAULT_MODEL_PATH: &str = "model/salary_model.json";
pub const DEFAULT_PORT: u16 = 5000;

/// Where the trainer reads from and writes to
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

/// Prediction server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: SocketAddr,
    pub model_path: PathBuf,
}

impl ServerConfig {
    pub fn new(address: SocketAddr, model_path: impl Into<PathBuf>) -> Self {
        Self {
            address,
            model_path: model_path.into(),
        }
    }

    pub fn with_model_path(mut self, model_path: impl Into<PathBuf>) -> Self {
        self.model_path = model_path.into();
        self
    }
}

impl Default for ServerConfig {
    /// All interfaces on port 5000
    fn default() -> Self {
        Self {
            address: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}
