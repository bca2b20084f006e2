use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub backend_url: String,
    pub identity_base_url: String,
    pub identity_api_key: String,
    pub federated_request_uri: String,
    pub image_hosting_url: String,
    pub image_hosting_key: String,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    pub admin_emails: Vec<String>,
    pub max_image_bytes: usize,
    pub upstream_timeout: Option<Duration>,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Ok(Self {
            port: try_load("PORT", "8080")?,
            backend_url: try_load::<String>("BACKEND_URL", "http://localhost:6001")?
                .trim_end_matches('/')
                .to_string(),
            identity_base_url: try_load::<String>(
                "IDENTITY_BASE_URL",
                "https://identitytoolkit.googleapis.com/v1",
            )?
            .trim_end_matches('/')
            .to_string(),
            identity_api_key: secret("IDENTITY_API_KEY")?,
            federated_request_uri: try_load("FEDERATED_REQUEST_URI", "http://localhost")?,
            image_hosting_url: try_load("IMAGE_HOSTING_URL", "https://api.imgbb.com/1/upload")?,
            image_hosting_key: secret("IMAGE_HOSTING_KEY")?,
            jwt_secret: secret("JWT_SECRET")?,
            session_ttl_hours: try_load("SESSION_TTL_HOURS", "1")?,
            admin_emails: var("ADMIN_EMAILS")
                .map(|list| list.split(',').map(|e| e.trim().to_string()).filter(|e| !e.is_empty()).collect())
                .unwrap_or_else(|| {
                    warn!("ADMIN_EMAILS not set, no account can add menu items");
                    Vec::new()
                }),
            max_image_bytes: try_load("MAX_IMAGE_BYTES", "33554432")?,
            upstream_timeout: optional::<u64>("UPSTREAM_TIMEOUT_SECS")?.map(Duration::from_secs),
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            AppError::Config(format!("invalid {key}: {e}"))
        })
}

fn optional<T: FromStr>(key: &str) -> Result<Option<T>, AppError>
where
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| AppError::Config(format!("invalid {key}: {e}"))),
        None => Ok(None),
    }
}

fn secret(key: &str) -> Result<String, AppError> {
    var(key).ok_or_else(|| {
        warn!("Required secret {key} is missing");
        AppError::Config(format!("{key} must be set"))
    })
}
