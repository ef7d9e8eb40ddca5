//! Authentication models

pub mod session;
pub mod user;

// Re-export for convenience
pub use session::{SessionToken, SignupOutcome, SignupResponse};
pub use user::{Credentials, UserProfile};
