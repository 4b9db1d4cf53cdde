use crate::domain::model::{BookingDraft, ReservationReceipt, ServiceCatalog};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Outbound seam to the reservation backend. Exactly one call may be in
/// flight per wizard instance; the engine enforces that.
#[async_trait]
pub trait ReservationGateway: Send + Sync {
    async fn create_reservation(&self, draft: &BookingDraft) -> Result<ReservationReceipt>;
}

/// Source of the service price catalog. The backend copy is
/// authoritative; `ServiceCatalog::default_catalog` is the offline
/// fallback.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<ServiceCatalog>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn redirect_delay_seconds(&self) -> u64;
    fn auth_token(&self) -> Option<&str>;
}
