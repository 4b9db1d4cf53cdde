use crate::adapters::http::ApiClient;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation;
use serde::{Deserialize, Serialize};

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SessionInfo {
    pub token: String,
    #[serde(default)]
    pub user: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: String,
}

impl RegisterRequest {
    pub fn new(name: &str, last_name: &str, email: &str, phone: &str, password: &str) -> Self {
        Self {
            name: name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            password: password.to_string(),
            role: "USER".to_string(),
        }
    }
}

fn validate_password(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(BookingError::InvalidFieldError {
            field: "password".to_string(),
            reason: format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
        });
    }
    Ok(())
}

/// Authenticate against `/auth/login` and store the bearer token on the
/// client so every following request carries it.
pub async fn login(client: &mut ApiClient, email: &str, password: &str) -> Result<SessionInfo> {
    validation::validate_email("email", email)?;
    validate_password(password)?;

    let body = client
        .post("/auth/login", &LoginRequest { email, password })
        .await?;
    let session: SessionInfo = serde_json::from_value(body)?;
    client.set_token(&session.token);
    tracing::info!("logged in as {}", email);
    Ok(session)
}

/// Create an account via `/auth/register`. Does not log in; the caller
/// follows up with `login` once the account exists.
pub async fn register(client: &ApiClient, request: &RegisterRequest) -> Result<serde_json::Value> {
    validation::validate_non_empty("name", &request.name)?;
    validation::validate_non_empty("last name", &request.last_name)?;
    validation::validate_email("email", &request.email)?;
    validation::validate_phone("phone", &request.phone)?;
    validate_password(&request.password)?;

    client.post("/auth/register", request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_login_stores_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/auth/login")
                .json_body(serde_json::json!({
                    "email": "maria@example.com",
                    "password": "hunter22"
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "token": "jwt-abc",
                    "user": {"role": "USER"}
                }));
        });

        let mut client = ApiClient::new(&server.url(""), 10);
        let session = login(&mut client, "maria@example.com", "hunter22")
            .await
            .unwrap();

        mock.assert();
        assert_eq!(session.token, "jwt-abc");
        assert!(client.has_token());
    }

    #[tokio::test]
    async fn test_login_rejects_invalid_input_without_request() {
        let server = MockServer::start();
        let mut client = ApiClient::new(&server.url(""), 10);

        assert!(login(&mut client, "not-an-email", "hunter22").await.is_err());
        assert!(login(&mut client, "maria@example.com", "short").await.is_err());
        assert!(!client.has_token());
    }

    #[tokio::test]
    async fn test_register_sends_user_role() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/auth/register")
                .json_body_partial(r#"{"role": "USER", "lastName": "Lopez"}"#);
            then.status(201)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": 7}));
        });

        let client = ApiClient::new(&server.url(""), 10);
        let request = RegisterRequest::new(
            "Maria",
            "Lopez",
            "maria@example.com",
            "555-123-4567",
            "hunter22",
        );
        register(&client, &request).await.unwrap();
        mock.assert();
    }
}
