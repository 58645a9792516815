pub mod forwarding;
pub mod transport;
pub mod upstream;
pub mod xfr;

pub use upstream::UpstreamQueryClient;
pub use xfr::AxfrClient;
