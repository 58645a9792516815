pub mod resolve;

pub use resolve::{QueryRequest, ResolveQueryUseCase};
