//! Account and authentication calls

use reqwest::Method;

use crate::{
    error::AppResult,
    models::{AuthResponse, LoginRequest, RegisterRequest, User},
};

use super::ApiClient;

impl ApiClient {
    /// Register a new user
    pub async fn register_user(&self, request: &RegisterRequest) -> AppResult<AuthResponse> {
        let builder = self
            .request(Method::POST, "/users/register", None)
            .json(request);

        let auth: AuthResponse = self
            .send(builder)
            .await
            .inspect_err(|e| tracing::error!("Registration error: {}", e))?;

        tracing::info!("Registered user {}", auth.user.id);
        Ok(auth)
    }

    /// Log in an existing user
    pub async fn login_user(&self, request: &LoginRequest) -> AppResult<AuthResponse> {
        let builder = self.request(Method::POST, "/users/login", None).json(request);

        let auth: AuthResponse = self
            .send(builder)
            .await
            .inspect_err(|e| tracing::error!("Login error: {}", e))?;

        tracing::info!("User {} logged in", auth.user.id);
        Ok(auth)
    }

    /// Fetch the profile the token belongs to
    pub async fn fetch_current_user(&self, token: &str) -> AppResult<User> {
        let builder = self.request(Method::GET, "/users/me", Some(token));
        self.send(builder)
            .await
            .inspect_err(|e| tracing::error!("Get current user error: {}", e))
    }
}
