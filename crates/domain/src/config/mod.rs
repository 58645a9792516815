//! Configuration module for dnsq
//!
//! - `root`: main configuration, file loading and CLI overrides
//! - `query`: upstream server, timeout and output format
//! - `axfr`: recursive zone transfer settings
//! - `logging`: logging settings
//! - `errors`: configuration errors

pub mod axfr;
pub mod errors;
pub mod logging;
pub mod query;
pub mod root;

pub use axfr::{AxfrConfig, TransferFailurePolicy};
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use query::{OutputFormat, QueryConfig};
pub use root::{CliOverrides, Config};
