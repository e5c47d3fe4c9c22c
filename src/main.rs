//! Application entry point
//!
//! `tutorials` with no arguments (or `tutorials serve`) runs the HTTP server.
//! The `seed` and `migrate-categories` subcommands run one administrative job
//! against the configured database file and exit.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use tutorials::config::{Config, DEFAULT_LOG_FILTER};
use tutorials::database::TutorialStore;
use tutorials::migrate::migrate_categories;
use tutorials::route::{create_app, with_client};
use tutorials::seed::{seed_if_empty, seed_tutorials};
use tutorials::state::AppState;
use tutorials::weather::WeatherClient;

#[derive(Parser)]
#[command(name = "tutorials")]
#[command(about = "Tutorial catalog API server and admin commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Delete every tutorial and insert the sample catalog")]
    Seed,

    #[command(about = "Rewrite stored category names to category ids")]
    MigrateCategories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    match Cli::parse().command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Seed => seed(&config),
        Command::MigrateCategories => migrate(&config),
    }
}

/// Opens the store, seeds it when empty and serves until SIGINT/SIGTERM
async fn serve(config: Config) -> anyhow::Result<()> {
    let store = TutorialStore::open(&config.database_url)
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    let seeded = seed_if_empty(&store).context("Failed to seed database")?;
    if seeded > 0 {
        tracing::info!(seeded, "seeded empty database");
    }

    let state = AppState {
        store,
        weather: WeatherClient::new(&config.weather_base_url, &config.weather_api_key),
    };

    let mut app = create_app(state);
    if let Some(dist) = config.client_dist() {
        tracing::info!(path = %dist.display(), "serving client");
        app = with_client(app, dist);
    }
    let app = app
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("server running at http://localhost:{}", config.port);
    tracing::info!("using database: {}", config.database_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

fn seed(config: &Config) -> anyhow::Result<()> {
    let store = TutorialStore::open(&config.database_url)
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    println!("Clearing existing tutorials...");
    let removed = store.clear()?;
    println!("Removed {removed} existing tutorials.");

    println!("Seeding new tutorials...");
    store.insert_many(&seed_tutorials())?;
    println!("Successfully seeded {} tutorials!", store.count()?);

    Ok(())
}

fn migrate(config: &Config) -> anyhow::Result<()> {
    println!("Running category migration command...");

    let result = TutorialStore::open(&config.database_url).and_then(|store| {
        println!("Starting category migration from names to IDs...");
        migrate_categories(&store)
    });

    let changes = match result {
        Ok(changes) => changes,
        Err(err) => {
            println!("Error during category migration: {err}");
            return Err(err.into());
        }
    };

    for change in &changes {
        println!(
            "Updating tutorial '{}': '{}' -> '{}'",
            change.title, change.from, change.to
        );
    }
    if changes.is_empty() {
        println!("No tutorials needed category updates.");
    } else {
        println!(
            "Successfully updated {} tutorials with category IDs.",
            changes.len()
        );
    }
    println!("Category migration completed successfully!");

    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, stopping server");
}
