//! Mealtrack server
//!
//! Serves the meal pages over HTTP.
//!
//! # Configuration
//!
//! Environment variables:
//! - `MEALTRACK_PORT`: Port to listen on (default: 8080)
//! - `MEALTRACK_DATABASE_PATH`: SQLite file (default: ~/.local/share/mealtrack/meals.db)
//! - `MEALTRACK_CONFIG`: Path to config file (default: ~/.config/mealtrack/config.yaml)
//!
//! # Config File Format
//!
//! ```yaml
//! database_path: /var/lib/mealtrack/meals.db
//! port: 8080
//! ```

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mealtrack::config::Config;
use mealtrack::db::{init_db, MealRepository};
use mealtrack::web::{app, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mealtrack=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::load(None) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Database: {}", config.database_path.display());

    let pool = match init_db(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState {
        repo: MealRepository::new(pool),
    };
    let app = app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
