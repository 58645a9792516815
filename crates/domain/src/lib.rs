//! dnsq Domain Layer
pub mod config;
pub mod dns_protocol;
pub mod errors;
pub mod label;
pub mod query_options;
pub mod record_type;
pub mod zone_artifacts;
pub mod zone_record;

pub use config::{CliOverrides, Config, ConfigError, TransferFailurePolicy};
pub use dns_protocol::{DnsProtocol, Endpoint};
pub use errors::DomainError;
pub use label::Label;
pub use query_options::{DnsClass, QueryOptions};
pub use record_type::RecordType;
pub use zone_record::ZoneRecord;
