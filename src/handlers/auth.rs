use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::AppError;
use crate::flows::{SignInFlow, SignupFlow, SignupOutcome};
use crate::models::{GoogleSignupRequest, LoginForm, SignupForm};
use crate::session::Role;
use crate::state::AppState;

/// Fresh registrations always get a plain user session; admin rights only come from sign-in.
fn signed_up(outcome: SignupOutcome, state: &AppState) -> Result<HttpResponse, AppError> {
    let token = state.sessions.issue(&outcome.user.email, Role::User)?;
    Ok(HttpResponse::Created().json(json!({
        "message": outcome.alert,
        "user": outcome.user,
        "redirect_to": outcome.redirect_to,
        "token": token
    })))
}

pub async fn signup(
    data: web::Json<SignupForm>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let form = data.into_inner();
    let flow = SignupFlow::new(state.identity.as_ref(), state.backend.as_ref());
    let outcome = flow.sign_up(&form).await?;
    signed_up(outcome, &state)
}

pub async fn signup_with_google(
    data: web::Json<GoogleSignupRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let request = data.into_inner();
    let flow = SignupFlow::new(state.identity.as_ref(), state.backend.as_ref());
    let outcome = flow.sign_up_with_google(&request).await?;
    signed_up(outcome, &state)
}

pub async fn login(
    data: web::Json<LoginForm>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let form = data.into_inner();
    let account = SignInFlow::new(state.identity.as_ref()).sign_in(&form).await?;
    let role = state.sessions.role_for(&account.email);
    let token = state.sessions.issue(&account.email, role)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Login successful",
        "user": { "email": account.email, "role": role },
        "token": token
    })))
}
