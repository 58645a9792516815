pub mod config;
pub mod logging;
pub mod resolv;

pub use config::load_config;
pub use logging::init_logging;
pub use resolv::infer_server;
