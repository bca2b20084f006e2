use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;
use serde_json::json;
use tracing::{info, warn};

use crate::error::AppError;
use crate::flows::{MenuFlow, Submission};
use crate::models::{Category, ImageFile, MenuForm, MenuFormView};
use crate::session::AdminSession;
use crate::state::AppState;

pub async fn list_categories() -> HttpResponse {
    let categories: Vec<_> = Category::ALL
        .iter()
        .map(|c| json!({ "value": c.as_str(), "label": c.label() }))
        .collect();
    HttpResponse::Ok().json(json!({ "categories": categories }))
}

const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

fn malformed(e: actix_multipart::MultipartError) -> AppError {
    warn!(error = %e, "malformed menu upload");
    AppError::BadRequest(format!("unreadable multipart body: {}", e))
}

/// Buffers one part, refusing anything past `limit` bytes.
async fn read_field(field: &mut actix_multipart::Field, name: &str, limit: usize) -> Result<Vec<u8>, AppError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        if data.len() + chunk.len() > limit {
            warn!(field = name, limit, "menu form field too large");
            return Err(AppError::PayloadTooLarge {
                field: name.to_string(),
                limit,
            });
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

/// Collects the add-menu form. Only the first file sent as `image` is kept.
async fn read_menu_form(mut payload: Multipart, max_image_bytes: usize) -> Result<MenuForm, AppError> {
    let mut form = MenuForm::default();

    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        let name = field.name().to_string();

        if name == "image" {
            let file_name = field
                .content_disposition()
                .get_filename()
                .unwrap_or("image")
                .to_string();
            let content_type = field
                .content_type()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let bytes = read_field(&mut field, &name, max_image_bytes).await?;
            if form.image.is_none() && !bytes.is_empty() {
                form.image = Some(ImageFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            continue;
        }

        let raw = read_field(&mut field, &name, MAX_TEXT_FIELD_BYTES).await?;
        let value = String::from_utf8(raw)
            .map_err(|_| AppError::BadRequest(format!("field '{}' is not valid UTF-8", name)))?;
        match name.as_str() {
            "name" => form.name = value,
            "category" => form.category = value,
            "price" => form.price = value,
            "recipe" => form.recipe = value,
            other => warn!(field = other, "ignoring unknown menu form field"),
        }
    }

    Ok(form)
}

pub async fn add_menu_item(
    AdminSession(session): AdminSession,
    payload: Multipart,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!(admin = %session.claims.sub, "menu item submitted");
    let form = read_menu_form(payload, state.max_image_bytes).await?;
    let mut submission = Submission::new(form);
    let flow = MenuFlow::new(state.images.as_ref(), state.backend.as_ref());
    let notification = flow.submit(&mut submission, &session.token).await?;

    let body = json!({
        "notification": notification,
        "state": submission.state(),
        "form": MenuFormView::from(submission.values()),
    });

    if notification.is_success() {
        Ok(HttpResponse::Created().json(body))
    } else {
        Ok(HttpResponse::BadGateway().json(body))
    }
}
