use std::sync::Arc;

use anyhow::Result;
use auth::{
    AuthController, AuthSettings, IdentityClient, LoginForm, RegisterForm, RegisterOutcome,
    SessionManager,
};
use common::storage::{FileStore, StorageConfig};
use clap::{Parser, Subcommand};
use common::{BackendClient, BackendConfig, telemetry};
use tracing::info;

/// Sign in, sign up and manage the stored gallery session
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Show the stored session, if it is still valid
    Status,
    /// Sign in with email and password
    Login { email: String, password: String },
    /// Create an account
    Register {
        email: String,
        password: String,
        password_confirm: String,
    },
    /// Sign out and clear the stored session
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init();

    let backend = BackendConfig::load()?;
    let store = FileStore::new(&StorageConfig::from_env());
    let sessions = SessionManager::new(Arc::new(store));
    let identity = IdentityClient::new(BackendClient::new(backend));
    let mut controller = AuthController::new(identity, sessions, AuthSettings::from_env());

    match args.command {
        Command::Status => match controller.check_session().await {
            Some(redirect) => {
                let email = controller
                    .sessions()
                    .current_user()
                    .and_then(|user| user.email)
                    .unwrap_or_default();
                info!("Signed in as {}; continue to {}", email, redirect.page.path());
            }
            None => info!("No active session"),
        },
        Command::Login { email, password } => {
            let form = LoginForm { email, password };
            let result = controller.login(&form).await;
            report(&controller);
            let redirect = result?;
            info!(
                "Continue to {} in {:?}",
                redirect.page.path(),
                redirect.after
            );
        }
        Command::Register {
            email,
            password,
            password_confirm,
        } => {
            let mut form = RegisterForm {
                email,
                password,
                password_confirm,
            };
            let result = controller.register(&mut form).await;
            report(&controller);
            if let RegisterOutcome::Redirect(redirect) = result? {
                info!(
                    "Continue to {} in {:?}",
                    redirect.page.path(),
                    redirect.after
                );
            }
        }
        Command::Logout => {
            let redirect = controller.logout().await;
            info!("Signed out; continue to {}", redirect.page.path());
        }
    }

    Ok(())
}

fn report(controller: &AuthController) {
    if let Some(notice) = controller.notice() {
        if notice.is_error() {
            tracing::error!("{}", notice.text);
        } else {
            info!("{}", notice.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_each_command() {
        let args = Args::try_parse_from(["auth", "status"]).unwrap();
        assert_eq!(args.command, Command::Status);

        let args = Args::try_parse_from(["auth", "login", "ana@example.com", "secret"]).unwrap();
        assert_eq!(
            args.command,
            Command::Login {
                email: "ana@example.com".to_string(),
                password: "secret".to_string(),
            }
        );

        let args =
            Args::try_parse_from(["auth", "register", "ana@example.com", "secret", "secret"])
                .unwrap();
        assert!(matches!(args.command, Command::Register { .. }));

        let args = Args::try_parse_from(["auth", "logout"]).unwrap();
        assert_eq!(args.command, Command::Logout);
    }

    #[test]
    fn test_rejects_unknown_or_incomplete_commands() {
        assert!(Args::try_parse_from(["auth"]).is_err());
        assert!(Args::try_parse_from(["auth", "bogus"]).is_err());
        assert!(Args::try_parse_from(["auth", "login", "ana@example.com"]).is_err());
        assert!(Args::try_parse_from(["auth", "logout", "extra"]).is_err());
    }
}
