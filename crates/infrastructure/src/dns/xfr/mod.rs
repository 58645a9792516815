//! AXFR (RFC 5936) client side.

pub mod client;
mod session;

pub use client::AxfrClient;
