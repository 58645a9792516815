pub mod queries;
pub mod zone_transfer;

pub use queries::{QueryRequest, ResolveQueryUseCase};
pub use zone_transfer::{
    FailedZone, RecursiveTransferReport, RecursiveTransferUseCase, TransferZoneUseCase,
};
