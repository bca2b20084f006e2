pub mod auth;
pub mod menu;

use actix_web::{web, HttpResponse};
use serde_json::json;

pub async fn main() -> HttpResponse {
    HttpResponse::Ok().body("restaurant admin gateway is running")
}

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(main))
        .route("/health", web::get().to(health_check))
        .route("/api/auth/signup", web::post().to(auth::signup))
        .route("/api/auth/login", web::post().to(auth::login))
        .route("/api/auth/signup/google", web::post().to(auth::signup_with_google))
        .route("/api/menu/categories", web::get().to(menu::list_categories))
        .route("/api/menu", web::post().to(menu::add_menu_item));
}
