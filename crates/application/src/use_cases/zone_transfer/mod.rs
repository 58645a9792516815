pub mod recursive_transfer;
pub mod transfer_zone;

pub use recursive_transfer::{FailedZone, RecursiveTransferReport, RecursiveTransferUseCase};
pub use transfer_zone::TransferZoneUseCase;
