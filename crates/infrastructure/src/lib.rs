//! dnsq Infrastructure Layer
pub mod dns;
pub mod zone_store;
