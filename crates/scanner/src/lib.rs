pub mod config;
pub mod error;
pub mod intersect;
pub mod logger;
pub mod pipeline;
pub mod report;
pub mod spread;
pub mod store;

pub use config::ScanConfig;
pub use error::{ConfigError, ScanError, StorageError};
pub use pipeline::{Pipeline, ScanReport, Venue};
