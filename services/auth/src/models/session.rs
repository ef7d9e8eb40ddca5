//! Session token model and signup responses

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserProfile;

/// Token bundle returned by the token endpoint and persisted locally
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Expiry as a unix timestamp in seconds
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// Lifetime in seconds at issue time
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Body of a signup response
///
/// With auto-confirmation the backend returns a full token bundle. When
/// email confirmation is required it returns either `{ "user": {...} }`
/// without a confirmation timestamp or the bare user object.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    /// Present when the body is a bare user object
    #[serde(default)]
    pub id: Option<Uuid>,
}

/// What a successful signup means for the client
#[derive(Debug, Clone, PartialEq)]
pub enum SignupOutcome {
    /// The account is usable right away
    Session(SessionToken),
    /// The account must be confirmed by email first
    PendingConfirmation,
}

impl SignupResponse {
    pub fn into_outcome(self) -> SignupOutcome {
        if let Some(user) = &self.user {
            if !user.is_confirmed() {
                return SignupOutcome::PendingConfirmation;
            }
        }

        match self.access_token {
            Some(access_token) if !access_token.is_empty() => {
                SignupOutcome::Session(SessionToken {
                    access_token,
                    refresh_token: self.refresh_token,
                    expires_at: self.expires_at,
                    expires_in: self.expires_in,
                    token_type: self.token_type,
                    user: self.user,
                })
            }
            _ => SignupOutcome::PendingConfirmation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const USER_ID: &str = "8d1f8a9e-2c55-4f0e-9a53-0f3f2b7c1d11";

    #[test]
    fn test_unconfirmed_user_is_pending() {
        let response: SignupResponse = serde_json::from_value(json!({
            "user": { "id": USER_ID, "email": "ana@example.com", "confirmed_at": null }
        }))
        .unwrap();

        assert_eq!(response.into_outcome(), SignupOutcome::PendingConfirmation);
    }

    #[test]
    fn test_bare_user_object_is_pending() {
        let response: SignupResponse = serde_json::from_value(json!({
            "id": USER_ID, "email": "ana@example.com", "role": "authenticated"
        }))
        .unwrap();

        assert_eq!(response.id.map(|id| id.to_string()), Some(USER_ID.to_string()));
        assert_eq!(response.into_outcome(), SignupOutcome::PendingConfirmation);
    }

    #[test]
    fn test_confirmed_signup_yields_session() {
        let response: SignupResponse = serde_json::from_value(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "expires_at": 1_900_000_000,
            "expires_in": 3600,
            "token_type": "bearer",
            "user": {
                "id": USER_ID,
                "email": "ana@example.com",
                "confirmed_at": "2024-01-01T00:00:00Z",
                "aud": "authenticated"
            }
        }))
        .unwrap();

        let SignupOutcome::Session(token) = response.into_outcome() else {
            panic!("expected a session");
        };
        assert_eq!(token.access_token, "access-1");
        assert_eq!(token.expires_in, Some(3600));

        let user = token.user.unwrap();
        assert_eq!(user.extra.get("aud"), Some(&json!("authenticated")));
    }
}
