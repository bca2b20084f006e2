use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use super::submission::{Notification, Submission};
use crate::error::{AppError, UpstreamError};
use crate::models::menu::parse_price;
use crate::models::{Category, MenuForm, MenuItem};
use crate::services::{BackendApi, ImageHost, RequestAuth};

pub const MENU_SUCCESS_TITLE: &str = "Your Item is inserted successfully!";

pub struct MenuFlow<'a> {
    images: &'a dyn ImageHost,
    backend: &'a dyn BackendApi,
}

impl<'a> MenuFlow<'a> {
    pub fn new(images: &'a dyn ImageHost, backend: &'a dyn BackendApi) -> Self {
        Self { images, backend }
    }

    /// Validates, uploads the image, then posts the item with the admin's session.
    ///
    /// Only validation problems come back as `Err`. Every upstream failure is
    /// logged and turned into the generic error notification, leaving the
    /// form as it was.
    pub async fn submit(
        &self,
        submission: &mut Submission<MenuForm>,
        session_token: &str,
    ) -> Result<Notification, AppError> {
        submission.values().validate()?;
        submission.begin()?;
        let attempt = Uuid::new_v4();
        info!(%attempt, name = %submission.values().name, "menu submission started");

        match self.upload_and_post(submission.values(), session_token).await {
            Ok(item) => {
                info!(%attempt, image = %item.image, "menu item created");
                submission.succeed(true);
                Ok(Notification::success(MENU_SUCCESS_TITLE))
            }
            Err(e) => {
                error!(%attempt, error = %e, "error adding menu item");
                submission.fail();
                Ok(Notification::generic_error())
            }
        }
    }

    async fn upload_and_post(&self, form: &MenuForm, session_token: &str) -> Result<MenuItem, UpstreamError> {
        let image = form.image.as_ref().ok_or(UpstreamError::ImageUploadFailed)?;
        let hosted = self.images.upload(image).await?;
        let display_url = hosted.display_url().ok_or(UpstreamError::ImageUploadFailed)?;

        let item = build_item(form, display_url).ok_or(UpstreamError::ImageUploadFailed)?;
        self.backend
            .create_menu_item(&item, &RequestAuth::Bearer(session_token.to_string()))
            .await?;
        Ok(item)
    }
}

/// `None` only for a form that skipped validation.
fn build_item(form: &MenuForm, display_url: &str) -> Option<MenuItem> {
    Some(MenuItem {
        name: form.name.clone(),
        category: form.category.parse::<Category>().ok()?,
        price: parse_price(&form.price)?,
        recipe: form.recipe.clone(),
        image: display_url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::submission::{NotificationKind, SubmissionState};
    use crate::models::ImageFile;
    use crate::services::mock::{CallLog, MockBackend, MockImageHost};

    fn pizza(price: &str) -> MenuForm {
        MenuForm {
            name: "Margherita".to_string(),
            category: "pizza".to_string(),
            price: price.to_string(),
            recipe: "Tomato, mozzarella, basil".to_string(),
            image: Some(ImageFile {
                file_name: "pizza.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                bytes: vec![0xff, 0xd8, 0xff],
            }),
        }
    }

    fn collaborators() -> (CallLog, MockImageHost, MockBackend) {
        let log = CallLog::default();
        let images = MockImageHost::new(log.clone());
        let backend = MockBackend {
            log: log.clone(),
            ..Default::default()
        };
        (log, images, backend)
    }

    #[tokio::test]
    async fn successful_submission_posts_hosted_url_and_clears_form() {
        let (log, images, backend) = collaborators();
        let mut submission = Submission::new(pizza("12.50"));
        let notification = MenuFlow::new(&images, &backend)
            .submit(&mut submission, "admin-token")
            .await
            .unwrap();

        assert_eq!(log.calls(), vec!["upload", "create_menu_item"]);
        let items = backend.menu_items.lock().unwrap();
        let (item, auth) = &items[0];
        assert_eq!(item.image, images.display_url);
        assert_eq!(item.price, 12.5);
        assert_eq!(item.category, Category::Pizza);
        assert_eq!(*auth, RequestAuth::Bearer("admin-token".to_string()));

        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.title, MENU_SUCCESS_TITLE);
        assert_eq!(notification.auto_dismiss_ms, Some(1500));
        assert_eq!(submission.state(), SubmissionState::Success);
        assert_eq!(submission.values(), &MenuForm::default());
    }

    #[tokio::test]
    async fn rejected_upload_never_reaches_backend() {
        let (log, mut images, backend) = collaborators();
        images.success = false;
        let mut submission = Submission::new(pizza("9.99"));
        let notification = MenuFlow::new(&images, &backend)
            .submit(&mut submission, "admin-token")
            .await
            .unwrap();

        assert_eq!(log.count("create_menu_item"), 0);
        assert_eq!(notification, Notification::generic_error());
        assert_eq!(submission.state(), SubmissionState::Failed);
        assert_eq!(submission.values(), &pizza("9.99"));
    }

    #[tokio::test]
    async fn upload_transport_error_gives_generic_notification() {
        let (log, mut images, backend) = collaborators();
        images.fail_transport = true;
        let mut submission = Submission::new(pizza("9.99"));
        let notification = MenuFlow::new(&images, &backend)
            .submit(&mut submission, "admin-token")
            .await
            .unwrap();

        assert_eq!(log.calls(), vec!["upload"]);
        assert!(!notification.is_success());
    }

    #[tokio::test]
    async fn backend_failure_keeps_form_values() {
        let (_log, images, mut backend) = collaborators();
        backend.fail_menu = true;
        let mut submission = Submission::new(pizza("9.99"));
        let notification = MenuFlow::new(&images, &backend)
            .submit(&mut submission, "admin-token")
            .await
            .unwrap();

        assert_eq!(notification, Notification::generic_error());
        assert_eq!(submission.values(), &pizza("9.99"));
    }

    #[tokio::test]
    async fn invalid_form_makes_no_calls() {
        let (log, images, backend) = collaborators();
        let mut submission = Submission::new(MenuForm {
            price: "cheap".to_string(),
            ..pizza("1")
        });
        let result = MenuFlow::new(&images, &backend)
            .submit(&mut submission, "admin-token")
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(log.calls().is_empty());
        assert_eq!(submission.state(), SubmissionState::Idle);
    }
}
