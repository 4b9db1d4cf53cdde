pub mod engine;
pub mod view;
pub mod wizard;

pub use crate::domain::model::{BookingDraft, ReservationReceipt, ServiceCatalog, ServiceEntry};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, ReservationGateway};
pub use crate::utils::error::Result;
