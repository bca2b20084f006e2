use tracing::{error, info};
use validator::Validate;

use crate::error::{AppError, UpstreamError};
use crate::models::{AuthResult, LoginForm};
use crate::services::IdentityProvider;

pub struct SignInFlow<'a> {
    identity: &'a dyn IdentityProvider,
}

impl<'a> SignInFlow<'a> {
    pub fn new(identity: &'a dyn IdentityProvider) -> Self {
        Self { identity }
    }

    /// Password sign-in for existing accounts; the email it returns is provider-verified.
    pub async fn sign_in(&self, form: &LoginForm) -> Result<AuthResult, AppError> {
        form.validate()?;
        let account = self
            .identity
            .sign_in(&form.email, &form.password)
            .await
            .map_err(|source| {
                error!(error = %source, "sign-in failed");
                match source {
                    UpstreamError::Rejected { .. } => AppError::Unauthorized("Invalid credentials".to_string()),
                    source => AppError::Upstream { stage: "sign in", source },
                }
            })?;
        info!(uid = %account.uid, "signed in");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::MockIdentity;

    #[tokio::test]
    async fn empty_password_never_reaches_provider() {
        let identity = MockIdentity::default();
        let form = LoginForm {
            email: "chef@example.com".to_string(),
            password: String::new(),
        };
        let result = SignInFlow::new(&identity).sign_in(&form).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(identity.log.calls().is_empty());
    }

    #[tokio::test]
    async fn provider_rejection_means_bad_credentials() {
        let identity = MockIdentity {
            fail_sign_in: true,
            ..Default::default()
        };
        let form = LoginForm {
            email: "chef@example.com".to_string(),
            password: "wrong".to_string(),
        };
        let result = SignInFlow::new(&identity).sign_in(&form).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
        assert_eq!(identity.log.calls(), vec!["sign_in"]);
    }
}
