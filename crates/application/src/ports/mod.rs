pub mod dns_query;
pub mod zone_store;
pub mod zone_transfer;

pub use dns_query::{DnsQueryPort, QueryAnswer};
pub use zone_store::ZoneStore;
pub use zone_transfer::{EnvelopeStream, TransferEnvelope, ZoneTransferSource};
