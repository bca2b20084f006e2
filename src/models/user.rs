use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1, message = "Name is required"))]
    #[serde(default)]
    pub name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "photoURL", alias = "photo_url")]
    pub photo_url: Option<String>,
    /// Path the user was trying to reach before being sent to signup.
    #[serde(default)]
    pub from: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GoogleSignupRequest {
    #[validate(length(min = 1, message = "Google credential is required"))]
    #[serde(default)]
    pub id_token: String,
    #[serde(default)]
    pub from: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Email is required"))]
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[serde(default)]
    pub password: String,
}

/// What the identity provider hands back for an account. Only read, never kept.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthResult {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: String,
    pub id_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
}
