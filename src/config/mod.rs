pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_REDIRECT_DELAY_SECONDS: u64 = 2;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "grooming-booking")]
#[command(about = "Interactive booking client for the grooming salon backend")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    /// Pause before showing the confirmation view after a successful
    /// submission.
    #[arg(long, default_value_t = DEFAULT_REDIRECT_DELAY_SECONDS)]
    pub redirect_delay_seconds: u64,

    /// Bearer token for the session. When absent the client prompts for
    /// login credentials instead.
    #[arg(long)]
    pub token: Option<String>,

    /// Load settings from a TOML file instead of the flags above.
    #[arg(long)]
    pub config: Option<String>,

    /// Quick-booking prefill: pet name.
    #[arg(long)]
    pub pet_name: Option<String>,

    /// Quick-booking prefill: preselected service id.
    #[arg(long)]
    pub service: Option<String>,

    /// Quick-booking prefill: booking date (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn redirect_delay_seconds(&self) -> u64 {
        self.redirect_delay_seconds
    }

    fn auth_token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base_url", &self.api_base_url)?;
        validation::validate_positive_integer("timeout_seconds", self.timeout_seconds as usize, 1)?;
        Ok(())
    }
}
