mod config;
mod error;
mod flows;
mod handlers;
mod models;
mod services;
mod session;
mod state;

use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App, HttpServer};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use config::Config;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {e}");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let app_state = AppState::from_config(&config).map_err(|e| {
        error!("Failed to build HTTP client: {e}");
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    let app_state = web::Data::new(app_state);

    info!(port = config.port, backend = %config.backend_url, "Starting restaurant admin gateway");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .wrap(Cors::permissive())
            .app_data(app_state.clone())
            .configure(handlers::routes)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
