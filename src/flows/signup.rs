use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, UpstreamError};
use crate::models::{GoogleSignupRequest, SignupForm, UserRecord};
use crate::services::{BackendApi, IdentityProvider, RequestAuth};

pub const SIGNUP_ALERT: &str = "Signin successful!";

#[derive(Debug, Clone, PartialEq)]
pub struct SignupOutcome {
    pub user: UserRecord,
    pub alert: &'static str,
    pub redirect_to: String,
}

/// Only same-site paths are honored as a post-signup destination.
pub fn redirect_target(from: Option<&str>) -> String {
    match from {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/".to_string(),
    }
}

fn upstream(stage: &'static str) -> impl FnOnce(UpstreamError) -> AppError {
    move |source| {
        error!(stage, error = %source, "signup step failed");
        AppError::Upstream { stage, source }
    }
}

pub struct SignupFlow<'a> {
    identity: &'a dyn IdentityProvider,
    backend: &'a dyn BackendApi,
}

impl<'a> SignupFlow<'a> {
    pub fn new(identity: &'a dyn IdentityProvider, backend: &'a dyn BackendApi) -> Self {
        Self { identity, backend }
    }

    /// Create account, then profile, then backend record. Each step waits on
    /// the previous one and nothing is undone when a later step fails.
    pub async fn sign_up(&self, form: &SignupForm) -> Result<SignupOutcome, AppError> {
        form.validate()?;
        let attempt = Uuid::new_v4();
        info!(%attempt, email = %form.email, "signup started");

        let account = self
            .identity
            .create_account(&form.email, &form.password)
            .await
            .map_err(upstream("create account"))?;
        info!(%attempt, uid = %account.uid, "account created");

        if let Err(e) = self
            .identity
            .update_profile(&account, &form.name, form.photo_url.as_deref())
            .await
        {
            warn!(%attempt, uid = %account.uid, "account exists without a backend record");
            return Err(upstream("update profile")(e));
        }

        let user = UserRecord {
            name: form.name.clone(),
            email: form.email.clone(),
        };
        self.register(&user).await?;
        info!(%attempt, "signup completed");

        Ok(SignupOutcome {
            user,
            alert: SIGNUP_ALERT,
            redirect_to: redirect_target(form.from.as_deref()),
        })
    }

    /// "Register with Google": federated sign-in, then straight to the backend.
    /// There is no profile update on this path, unlike [`SignupFlow::sign_up`].
    pub async fn sign_up_with_google(&self, request: &GoogleSignupRequest) -> Result<SignupOutcome, AppError> {
        request.validate()?;
        let attempt = Uuid::new_v4();
        info!(%attempt, "federated signup started");

        let account = self
            .identity
            .federated_sign_in(&request.id_token)
            .await
            .map_err(upstream("federated sign-in"))?;

        let name = account.display_name.clone().unwrap_or_else(|| {
            warn!(%attempt, uid = %account.uid, "federated account has no display name");
            String::new()
        });
        let user = UserRecord {
            name,
            email: account.email.clone(),
        };
        self.register(&user).await?;
        info!(%attempt, "federated signup completed");

        Ok(SignupOutcome {
            user,
            alert: SIGNUP_ALERT,
            redirect_to: redirect_target(request.from.as_deref()),
        })
    }

    async fn register(&self, user: &UserRecord) -> Result<(), AppError> {
        self.backend
            .create_user(user, &RequestAuth::Public)
            .await
            .map_err(upstream("register user"))
    }
}
