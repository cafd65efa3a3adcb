pub mod aggregator;
pub mod handlers;
pub mod scoring;
pub mod sources;

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
