use crate::config::{DEFAULT_REDIRECT_DELAY_SECONDS, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub booking: Option<BookingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    pub redirect_delay_seconds: Option<u64>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` placeholders with environment values. Unset
    /// variables keep the placeholder so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn redirect_delay_seconds(&self) -> u64 {
        self.booking
            .as_ref()
            .and_then(|b| b.redirect_delay_seconds)
            .unwrap_or(DEFAULT_REDIRECT_DELAY_SECONDS)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        &self.api.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds()
    }

    fn redirect_delay_seconds(&self) -> u64 {
        self.redirect_delay_seconds()
    }

    fn auth_token(&self) -> Option<&str> {
        self.api.token.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_positive_integer(
            "api.timeout_seconds",
            self.timeout_seconds() as usize,
            1,
        )?;
        if let Some(token) = &self.api.token {
            if token.starts_with("${") {
                return Err(BookingError::InvalidConfigValueError {
                    field: "api.token".to_string(),
                    value: token.clone(),
                    reason: "environment variable is not set".to_string(),
                });
            }
        }
        Ok(())
    }
}
