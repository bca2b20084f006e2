use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Submitting,
    Success,
    Failed,
}

/// A form's values plus where its submission stands.
///
/// `Idle -> Submitting -> {Success, Failed} -> Idle`. Values are only ever
/// cleared on success, and only when the caller asks for it.
#[derive(Debug, Clone)]
pub struct Submission<T> {
    values: T,
    state: SubmissionState,
}

impl<T: Default> Submission<T> {
    pub fn new(values: T) -> Self {
        Self {
            values,
            state: SubmissionState::Idle,
        }
    }

    pub fn values(&self) -> &T {
        &self.values
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn begin(&mut self) -> Result<(), AppError> {
        match self.state {
            SubmissionState::Idle => {
                self.state = SubmissionState::Submitting;
                Ok(())
            }
            _ => Err(AppError::Busy),
        }
    }

    pub fn succeed(&mut self, reset: bool) {
        debug_assert_eq!(self.state, SubmissionState::Submitting);
        if reset {
            self.values = T::default();
        }
        self.state = SubmissionState::Success;
    }

    pub fn fail(&mut self) {
        debug_assert_eq!(self.state, SubmissionState::Submitting);
        self.state = SubmissionState::Failed;
    }

    #[cfg(test)]
    pub fn acknowledge(&mut self) {
        if matches!(self.state, SubmissionState::Success | SubmissionState::Failed) {
            self.state = SubmissionState::Idle;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// What the UI pops up once a submission settles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_dismiss_ms: Option<u64>,
}

pub const AUTO_DISMISS_MS: u64 = 1500;

impl Notification {
    pub fn success(title: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.to_string(),
            text: None,
            auto_dismiss_ms: Some(AUTO_DISMISS_MS),
        }
    }

    pub fn generic_error() -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Oops...".to_string(),
            text: Some("Something went wrong! Please try again.".to_string()),
            auto_dismiss_ms: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}
