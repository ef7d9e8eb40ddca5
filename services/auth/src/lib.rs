//! Authentication for the photo gallery client
//!
//! Login, registration, session check and logout against the backend's
//! identity endpoints, plus the session accessors other controllers use.

pub mod controller;
pub mod identity;
pub mod models;
pub mod session;
pub mod validation;

pub use controller::{
    AuthController, AuthSettings, AuthTab, LoginForm, Page, Redirect, RegisterForm,
    RegisterOutcome,
};
pub use identity::IdentityClient;
pub use session::SessionManager;
