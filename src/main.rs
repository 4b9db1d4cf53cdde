use clap::Parser;
use grooming_booking::adapters::{auth, http::ApiClient};
use grooming_booking::app::interactive::InteractiveBooking;
use grooming_booking::config::toml_config::TomlConfig;
use grooming_booking::core::engine::BookingEngine;
use grooming_booking::core::wizard::{Prefill, Wizard};
use grooming_booking::domain::ports::CatalogSource;
use grooming_booking::utils::{logger, validation::Validate};
use grooming_booking::{CliConfig, ServiceCatalog};
use std::io::{BufRead, Write};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting grooming-booking client");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let (mut api, redirect_delay) = match &cli.config {
        Some(path) => {
            let config = match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Failed to load config file {}: {}", path, e);
                    eprintln!("❌ {}", e.user_friendly_message());
                    std::process::exit(1);
                }
            };
            if let Err(e) = config.validate() {
                tracing::error!("Configuration validation failed: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(1);
            }
            let delay = config.redirect_delay_seconds();
            (ApiClient::from_config(&config), delay)
        }
        None => {
            if let Err(e) = cli.validate() {
                tracing::error!("Configuration validation failed: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(1);
            }
            (ApiClient::from_config(&cli), cli.redirect_delay_seconds)
        }
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    if !api.has_token() {
        if let Err(e) = prompt_login(&mut api, &stdin, &stdout).await {
            tracing::warn!("login failed: {}", e);
            eprintln!("⚠️  Continuing without a session; the backend may reject the booking.");
        }
    }

    // The server catalog is authoritative; fall back to the built-in
    // price list only when it cannot be reached.
    let catalog = match api.fetch_catalog().await {
        Ok(catalog) => {
            tracing::info!("Loaded {} services from the backend", catalog.entries.len());
            catalog
        }
        Err(e) => {
            tracing::warn!("Could not fetch the service catalog: {}", e);
            tracing::warn!("Using the built-in price list; prices may be out of date");
            ServiceCatalog::default_catalog()
        }
    };

    let prefill = Prefill {
        pet_name: cli.pet_name.clone(),
        service: cli.service.clone(),
        date: cli.date.clone(),
    };
    let mut wizard = Wizard::with_prefill(catalog, prefill);
    let engine = BookingEngine::new(api);

    let today = chrono::Local::now().date_naive();
    let mut session = InteractiveBooking::new(stdin.lock(), stdout.lock(), today);

    match session
        .run(&mut wizard, &engine, Duration::from_secs(redirect_delay))
        .await
    {
        Ok(()) => {
            tracing::info!("✅ Reservation created");
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Booking session failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    }
}

async fn prompt_login(
    api: &mut ApiClient,
    stdin: &std::io::Stdin,
    stdout: &std::io::Stdout,
) -> grooming_booking::Result<()> {
    let mut out = stdout.lock();
    write!(out, "Email: ")?;
    out.flush()?;
    let mut email = String::new();
    stdin.lock().read_line(&mut email)?;
    write!(out, "Password: ")?;
    out.flush()?;
    let mut password = String::new();
    stdin.lock().read_line(&mut password)?;
    drop(out);

    let session = auth::login(api, email.trim(), password.trim()).await?;
    tracing::debug!("session user: {}", session.user);
    Ok(())
}
