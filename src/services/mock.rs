use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{BackendApi, IdentityProvider, ImageHost, RequestAuth};
use crate::error::UpstreamError;
use crate::models::{AuthResult, HostedImage, ImageFile, MenuItem, UserRecord};

/// Ordered record of every collaborator call made during a test.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn push(&self, call: &str) {
        self.0.lock().unwrap().push(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }
}

fn rejected(service: &'static str) -> UpstreamError {
    UpstreamError::Rejected {
        service,
        message: "mock failure".to_string(),
    }
}

#[derive(Default)]
pub struct MockIdentity {
    pub log: CallLog,
    pub fail_create: bool,
    pub fail_sign_in: bool,
    pub fail_update: bool,
    pub fail_federated: bool,
    pub federated_display_name: Option<String>,
    pub profile_updates: Mutex<Vec<(String, Option<String>)>>,
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    async fn create_account(&self, email: &str, _password: &str) -> Result<AuthResult, UpstreamError> {
        self.log.push("create_account");
        if self.fail_create {
            return Err(rejected("identity provider"));
        }
        Ok(AuthResult {
            uid: "uid-1".to_string(),
            display_name: None,
            email: email.to_string(),
            id_token: "provider-token".to_string(),
        })
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<AuthResult, UpstreamError> {
        self.log.push("sign_in");
        if self.fail_sign_in {
            return Err(rejected("identity provider"));
        }
        Ok(AuthResult {
            uid: "uid-signin".to_string(),
            display_name: None,
            email: email.to_string(),
            id_token: "provider-token".to_string(),
        })
    }

    async fn update_profile(
        &self,
        _account: &AuthResult,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<(), UpstreamError> {
        self.log.push("update_profile");
        if self.fail_update {
            return Err(rejected("identity provider"));
        }
        self.profile_updates
            .lock()
            .unwrap()
            .push((display_name.to_string(), photo_url.map(str::to_string)));
        Ok(())
    }

    async fn federated_sign_in(&self, _google_id_token: &str) -> Result<AuthResult, UpstreamError> {
        self.log.push("federated_sign_in");
        if self.fail_federated {
            return Err(rejected("identity provider"));
        }
        Ok(AuthResult {
            uid: "uid-google".to_string(),
            display_name: self.federated_display_name.clone(),
            email: "grace@example.com".to_string(),
            id_token: "provider-token".to_string(),
        })
    }
}

pub struct MockImageHost {
    pub log: CallLog,
    pub success: bool,
    pub fail_transport: bool,
    pub display_url: String,
}

impl MockImageHost {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            success: true,
            fail_transport: false,
            display_url: "https://i.ibb.co/abc/pizza.jpg".to_string(),
        }
    }
}

#[async_trait]
impl ImageHost for MockImageHost {
    async fn upload(&self, _image: &ImageFile) -> Result<HostedImage, UpstreamError> {
        self.log.push("upload");
        if self.fail_transport {
            return Err(rejected("image host"));
        }
        let body = serde_json::json!({
            "success": self.success,
            "data": { "display_url": self.display_url },
        });
        Ok(serde_json::from_value(body).unwrap())
    }
}

#[derive(Default)]
pub struct MockBackend {
    pub log: CallLog,
    pub fail_users: bool,
    pub fail_menu: bool,
    pub users: Mutex<Vec<(UserRecord, RequestAuth)>>,
    pub menu_items: Mutex<Vec<(MenuItem, RequestAuth)>>,
}

#[async_trait]
impl BackendApi for MockBackend {
    async fn create_user(&self, user: &UserRecord, auth: &RequestAuth) -> Result<(), UpstreamError> {
        self.log.push("create_user");
        if self.fail_users {
            return Err(rejected("backend"));
        }
        self.users.lock().unwrap().push((user.clone(), auth.clone()));
        Ok(())
    }

    async fn create_menu_item(&self, item: &MenuItem, auth: &RequestAuth) -> Result<(), UpstreamError> {
        self.log.push("create_menu_item");
        if self.fail_menu {
            return Err(rejected("backend"));
        }
        self.menu_items.lock().unwrap().push((item.clone(), auth.clone()));
        Ok(())
    }
}
