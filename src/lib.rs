pub mod cli;
pub mod config;
pub mod model;
pub mod parsing;
pub mod server;
pub mod trainer;
