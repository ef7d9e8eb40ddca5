//! Calls to the backend's identity endpoints

use common::{BackendClient, GalleryResult};
use reqwest::Method;
use tracing::info;

use crate::models::{Credentials, SessionToken, SignupResponse, UserProfile};

/// Client for `/auth/v1/*`
#[derive(Clone)]
pub struct IdentityClient {
    client: BackendClient,
}

impl IdentityClient {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Resolve the user behind an access token
    pub async fn current_user(&self, access_token: &str) -> GalleryResult<UserProfile> {
        let request = self
            .client
            .request(Method::GET, "/auth/v1/user")
            .bearer_auth(access_token);

        self.client
            .send_json(request, "Failed to verify the session")
            .await
    }

    /// Exchange email and password for a token bundle
    pub async fn password_grant(&self, credentials: &Credentials) -> GalleryResult<SessionToken> {
        info!("Login attempt for user: {}", credentials.email);

        let request = self
            .client
            .request(Method::POST, "/auth/v1/token?grant_type=password")
            .json(credentials);

        self.client.send_json(request, "Login failed").await
    }

    /// Create an account
    pub async fn signup(&self, credentials: &Credentials) -> GalleryResult<SignupResponse> {
        info!("Signup attempt for user: {}", credentials.email);

        let request = self
            .client
            .request(Method::POST, "/auth/v1/signup")
            .json(credentials);

        self.client
            .send_json(request, "Failed to create the account")
            .await
    }

    /// Invalidate an access token
    pub async fn logout(&self, access_token: &str) -> GalleryResult<()> {
        let request = self
            .client
            .request(Method::POST, "/auth/v1/logout")
            .bearer_auth(access_token);

        self.client.send_empty(request, "Logout failed").await
    }
}
