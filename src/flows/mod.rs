pub mod menu;
pub mod signin;
pub mod signup;
pub mod submission;

pub use menu::MenuFlow;
pub use signin::SignInFlow;
pub use signup::{SignupFlow, SignupOutcome};
pub use submission::Submission;
