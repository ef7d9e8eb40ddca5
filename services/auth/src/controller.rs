//! Login and registration controller
//!
//! Holds the state the login page shows: the active tab, the status notice
//! and whether each form is waiting on the backend.

use std::time::Duration;

use common::{GalleryError, GalleryResult, Notice};
use tracing::{debug, error, info, warn};

use crate::identity::IdentityClient;
use crate::models::{Credentials, SignupOutcome};
use crate::session::SessionManager;
use crate::validation::{validate_login, validate_registration};

/// Pages a controller can send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Gallery,
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Page::Login => "login.html",
            Page::Gallery => "index.html",
        }
    }
}

/// Navigation requested by an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub page: Page,
    /// Delay that lets the success notice render first
    pub after: Duration,
}

impl Redirect {
    pub fn now(page: Page) -> Self {
        Redirect {
            page,
            after: Duration::ZERO,
        }
    }
}

/// Which form is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTab {
    Login,
    Register,
}

/// Timing of the post-success redirects
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub login_redirect_delay: Duration,
    pub register_redirect_delay: Duration,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            login_redirect_delay: Duration::from_millis(1000),
            register_redirect_delay: Duration::from_millis(1500),
        }
    }
}

impl AuthSettings {
    /// Create AuthSettings from environment variables
    ///
    /// # Environment Variables
    /// - `AUTH_LOGIN_REDIRECT_MS`: delay after login (default: 1000)
    /// - `AUTH_REGISTER_REDIRECT_MS`: delay after registration (default: 1500)
    pub fn from_env() -> Self {
        let login_redirect_ms = std::env::var("AUTH_LOGIN_REDIRECT_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .unwrap_or(1000);

        let register_redirect_ms = std::env::var("AUTH_REGISTER_REDIRECT_MS")
            .unwrap_or_else(|_| "1500".to_string())
            .parse()
            .unwrap_or(1500);

        AuthSettings {
            login_redirect_delay: Duration::from_millis(login_redirect_ms),
            register_redirect_delay: Duration::from_millis(register_redirect_ms),
        }
    }
}

/// Login form input
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form input
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl RegisterForm {
    pub fn reset(&mut self) {
        *self = RegisterForm::default();
    }
}

/// Result of a successful registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Account usable; session persisted
    Redirect(Redirect),
    /// Account waits for email confirmation; nothing persisted
    ConfirmationPending,
}

/// Controller behind the login page
pub struct AuthController {
    identity: IdentityClient,
    sessions: SessionManager,
    settings: AuthSettings,
    tab: AuthTab,
    notice: Option<Notice>,
    login_busy: bool,
    register_busy: bool,
}

impl AuthController {
    pub fn new(identity: IdentityClient, sessions: SessionManager, settings: AuthSettings) -> Self {
        Self {
            identity,
            sessions,
            settings,
            tab: AuthTab::Login,
            notice: None,
            login_busy: false,
            register_busy: false,
        }
    }

    pub fn tab(&self) -> AuthTab {
        self.tab
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_login_busy(&self) -> bool {
        self.login_busy
    }

    pub fn is_register_busy(&self) -> bool {
        self.register_busy
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Show the other form and clear any notice
    pub fn switch_tab(&mut self, tab: AuthTab) {
        self.tab = tab;
        self.notice = None;
    }

    /// Redirect to the gallery if the stored token still resolves to a user
    pub async fn check_session(&mut self) -> Option<Redirect> {
        let Some(token) = self.sessions.access_token() else {
            debug!("No stored session");
            return None;
        };

        match self.identity.current_user(&token).await {
            Ok(user) => {
                info!("Active session for user: {}", user.id);
                Some(Redirect::now(Page::Gallery))
            }
            Err(e) => {
                debug!("Stored session not usable: {}", e);
                None
            }
        }
    }

    /// Sign in with email and password
    pub async fn login(&mut self, form: &LoginForm) -> GalleryResult<Redirect> {
        let email = form.email.trim();

        if let Err(message) = validate_login(email, &form.password) {
            return Err(self.fail(GalleryError::Validation(message)));
        }

        self.login_busy = true;
        self.notice = None;

        let credentials = Credentials {
            email: email.to_string(),
            password: form.password.clone(),
        };

        let result = match self.identity.password_grant(&credentials).await {
            Ok(token) => self.sessions.save(&token),
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            error!("Login failed: {}", e);
            self.login_busy = false;
            return Err(self.fail(e));
        }

        self.notice = Some(Notice::success("Signed in! Redirecting..."));
        Ok(Redirect {
            page: Page::Gallery,
            after: self.settings.login_redirect_delay,
        })
    }

    /// Create an account; clears the form when email confirmation is pending
    pub async fn register(&mut self, form: &mut RegisterForm) -> GalleryResult<RegisterOutcome> {
        let email = form.email.trim().to_string();

        if let Err(message) = validate_registration(&email, &form.password, &form.password_confirm)
        {
            return Err(self.fail(GalleryError::Validation(message)));
        }

        self.register_busy = true;
        self.notice = None;

        let credentials = Credentials {
            email,
            password: form.password.clone(),
        };

        let response = match self.identity.signup(&credentials).await {
            Ok(response) => response,
            Err(e) => {
                error!("Registration failed: {}", e);
                self.register_busy = false;
                return Err(self.fail(e));
            }
        };

        match response.into_outcome() {
            SignupOutcome::PendingConfirmation => {
                info!("Account created, waiting for email confirmation");
                self.notice = Some(Notice::success(
                    "Account created! Check your email to confirm your account.",
                ));
                self.register_busy = false;
                form.reset();
                Ok(RegisterOutcome::ConfirmationPending)
            }
            SignupOutcome::Session(token) => {
                if let Err(e) = self.sessions.save(&token) {
                    error!("Failed to persist session: {}", e);
                    self.register_busy = false;
                    return Err(self.fail(e));
                }

                self.notice = Some(Notice::success("Account created! Redirecting..."));
                Ok(RegisterOutcome::Redirect(Redirect {
                    page: Page::Gallery,
                    after: self.settings.register_redirect_delay,
                }))
            }
        }
    }

    /// Sign out; the local session is cleared even if the backend call fails
    pub async fn logout(&mut self) -> Redirect {
        if let Some(token) = self.sessions.access_token() {
            if let Err(e) = self.identity.logout(&token).await {
                warn!("Logout request failed, clearing session anyway: {}", e);
            }
        }

        if let Err(e) = self.sessions.clear() {
            error!("Failed to clear session: {}", e);
        }

        Redirect::now(Page::Login)
    }

    fn fail(&mut self, err: GalleryError) -> GalleryError {
        self.notice = Some(Notice::from_error(&err));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_page_paths() {
        assert_eq!(Page::Login.path(), "login.html");
        assert_eq!(Page::Gallery.path(), "index.html");
        assert_eq!(Redirect::now(Page::Login).after, Duration::ZERO);
    }

    #[test]
    #[serial]
    fn test_settings_from_env() {
        unsafe {
            std::env::remove_var("AUTH_LOGIN_REDIRECT_MS");
            std::env::set_var("AUTH_REGISTER_REDIRECT_MS", "0");
        }

        let settings = AuthSettings::from_env();
        assert_eq!(settings.login_redirect_delay, Duration::from_millis(1000));
        assert_eq!(settings.register_redirect_delay, Duration::ZERO);

        unsafe {
            std::env::remove_var("AUTH_REGISTER_REDIRECT_MS");
        }
    }

    #[test]
    fn test_register_form_reset() {
        let mut form = RegisterForm {
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
            password_confirm: "secret".to_string(),
        };
        form.reset();
        assert!(form.email.is_empty() && form.password.is_empty() && form.password_confirm.is_empty());
    }
}
