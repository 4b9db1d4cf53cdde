use crate::domain::model::{BookingDraft, ReservationReceipt, ServiceCatalog, ServiceEntry};
use crate::domain::ports::{CatalogSource, ConfigProvider, ReservationGateway};
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Thin reqwest wrapper over the salon backend. Attaches the bearer
/// credential (when the session has one) to every request; the client
/// performs no authentication logic of its own.
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            timeout: Duration::from_secs(timeout_seconds),
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let mut api = Self::new(config.api_base_url(), config.timeout_seconds());
        if let Some(token) = config.auth_token() {
            api.set_token(token);
        }
        api
    }

    pub fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn apply_headers(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request = request
            .header("Content-Type", "application/json")
            .timeout(self.timeout);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        request
    }

    async fn handle(&self, response: reqwest::Response) -> Result<serde_json::Value> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(BookingError::RequestRejectedError {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    message
                },
            })
        }
    }

    pub async fn get(&self, endpoint: &str) -> Result<serde_json::Value> {
        let url = self.url(endpoint);
        tracing::debug!("GET {}", url);
        let request = self.apply_headers(self.client.get(&url));
        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());
        self.handle(response).await
    }

    pub async fn post<B: Serialize + Sync>(&self, endpoint: &str, body: &B) -> Result<serde_json::Value> {
        let url = self.url(endpoint);
        tracing::debug!("POST {}", url);
        let request = self.apply_headers(self.client.post(&url)).json(body);
        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());
        self.handle(response).await
    }
}

#[async_trait]
impl ReservationGateway for ApiClient {
    async fn create_reservation(&self, draft: &BookingDraft) -> Result<ReservationReceipt> {
        let body = self.post("/reservations", draft).await?;
        Ok(ReservationReceipt { body })
    }
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn fetch_catalog(&self) -> Result<ServiceCatalog> {
        let body = self.get("/services").await?;
        let entries: Vec<ServiceEntry> = serde_json::from_value(body)?;
        Ok(ServiceCatalog::new(entries))
    }
}
