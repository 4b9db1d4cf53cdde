use chrono::NaiveDate;
use grooming_booking::adapters::{auth, http::ApiClient};
use grooming_booking::core::engine::BookingEngine;
use grooming_booking::core::wizard::Wizard;
use grooming_booking::domain::ports::CatalogSource;
use grooming_booking::ServiceCatalog;
use httpmock::prelude::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
}

#[tokio::test]
async fn test_login_token_is_attached_to_following_requests() {
    let server = MockServer::start();

    let login_mock = server.mock(|when, then| {
        when.method(POST).path("/auth/login");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "token": "session-jwt-123",
                "user": {"name": "Maria", "role": "USER"}
            }));
    });

    let catalog_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/services")
            .header("authorization", "Bearer session-jwt-123");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"id": "bath", "label": "Bath & Brush", "price": 25.99}
            ]));
    });

    let reservation_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/reservations")
            .header("authorization", "Bearer session-jwt-123");
        then.status(201)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": 1}));
    });

    let mut api = ApiClient::new(&server.url(""), 10);
    auth::login(&mut api, "maria@example.com", "hunter22")
        .await
        .unwrap();

    let catalog = api.fetch_catalog().await.unwrap();

    let mut wizard = Wizard::new(catalog);
    wizard.form.customer_name = "Maria Lopez".to_string();
    wizard.form.customer_email = "maria@example.com".to_string();
    wizard.form.customer_phone = "555-123-4567".to_string();
    wizard.form.pet_name = "Rex".to_string();
    wizard.form.pet_species = "dog".to_string();
    wizard.form.pet_breed = "Beagle".to_string();
    wizard.form.pet_age = "3 years".to_string();
    wizard.form.pet_weight = "12.5".to_string();
    wizard.form.pet_gender = "male".to_string();
    wizard.toggle_service("bath").unwrap();
    wizard.form.booking_date = "2026-08-31".to_string();
    wizard.form.booking_time = "10:30".to_string();
    for _ in 0..4 {
        wizard.advance(today()).unwrap();
    }

    let engine = BookingEngine::new(api);
    engine.submit(&mut wizard, today()).await.unwrap();

    login_mock.assert();
    catalog_mock.assert();
    reservation_mock.assert();
}

#[tokio::test]
async fn test_rejected_login_leaves_client_anonymous() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/auth/login");
        then.status(401).body("bad credentials");
    });

    let mut api = ApiClient::new(&server.url(""), 10);
    let err = auth::login(&mut api, "maria@example.com", "wrongpass")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("401"));
    assert!(!api.has_token());
}

#[tokio::test]
async fn test_preconfigured_token_works_without_login() {
    let server = MockServer::start();
    let catalog_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/services")
            .header("authorization", "Bearer preconfigured-token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([]));
    });

    let mut api = ApiClient::new(&server.url(""), 10);
    api.set_token("preconfigured-token");
    let catalog = api.fetch_catalog().await.unwrap();

    catalog_mock.assert();
    assert!(catalog.entries.is_empty());
    // An empty backend catalog is what the built-in fallback is for.
    assert_eq!(ServiceCatalog::default_catalog().entries.len(), 5);
}
