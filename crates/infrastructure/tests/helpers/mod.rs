#![allow(unused_imports)]
pub mod axfr_server_mock;
pub mod dns_server_mock;
pub mod wire;

pub use axfr_server_mock::{MockAxfrServer, Reply};
pub use dns_server_mock::MockDnsServer;
pub use wire::WireRecord;
