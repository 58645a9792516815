use dnsq_application::use_cases::{
    RecursiveTransferUseCase, ResolveQueryUseCase, TransferZoneUseCase,
};
use dnsq_domain::Config;
use dnsq_infrastructure::dns::{AxfrClient, UpstreamQueryClient};
use dnsq_infrastructure::zone_store::FsZoneStore;
use std::sync::Arc;
use std::time::Duration;

/// Use cases wired to their infrastructure adapters.
pub struct UseCases {
    pub resolve: ResolveQueryUseCase,
    pub transfer_zone: TransferZoneUseCase,
    pub recursive_transfer: RecursiveTransferUseCase,
}

impl UseCases {
    pub fn new(config: &Config) -> Self {
        let axfr = Arc::new(AxfrClient::new(Duration::from_millis(
            config.query.timeout_ms,
        )));
        let store = Arc::new(FsZoneStore::new(&config.axfr.output_root));

        Self {
            resolve: ResolveQueryUseCase::new(Arc::new(UpstreamQueryClient::new())),
            transfer_zone: TransferZoneUseCase::new(axfr.clone()),
            recursive_transfer: RecursiveTransferUseCase::new(
                TransferZoneUseCase::new(axfr),
                store,
                config.axfr.on_failure,
            ),
        }
    }
}
