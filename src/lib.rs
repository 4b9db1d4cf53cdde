pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::toml_config::TomlConfig;

pub use crate::adapters::http::ApiClient;
pub use crate::core::engine::BookingEngine;
pub use crate::core::wizard::{BookingForm, Prefill, Step, Wizard, WizardState};
pub use crate::domain::model::{
    BookingDraft, ReservationReceipt, ServiceCatalog, ServiceEntry,
};
pub use crate::utils::error::{BookingError, Result};
