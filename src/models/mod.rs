pub mod menu;
pub mod user;

pub use menu::{Category, HostedImage, ImageFile, MenuForm, MenuFormView, MenuItem};
pub use user::{AuthResult, GoogleSignupRequest, LoginForm, SignupForm, UserRecord};
