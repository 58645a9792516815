//! On-disk output of recursive transfers.

pub mod fs;

pub use fs::FsZoneStore;
