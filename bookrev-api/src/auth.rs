//! Login and registration against the auth endpoints

use bookrev_core::Role;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Result, ReviewClient};

/// Request body for login and registration
#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
    role: &'a str,
}

/// Successful login response
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

impl ReviewClient {
    /// Log in and return the bearer token issued by the service
    ///
    /// The caller persists the token; this client instance is not updated.
    pub async fn login(&self, email: &str, password: &str, role: Role) -> Result<String> {
        debug!(email, role = role.as_str(), "Logging in");

        let response = self
            .http
            .post(self.endpoint("/api/auth/login"))
            .json(&AuthRequest {
                email,
                password,
                role: role.as_str(),
            })
            .send()
            .await?;

        let response = self.check_response(response).await?;
        let body: LoginResponse = response.json().await?;

        info!(email, "Login successful");
        Ok(body.token)
    }

    /// Register a new account
    pub async fn register(&self, email: &str, password: &str, role: Role) -> Result<()> {
        debug!(email, role = role.as_str(), "Registering");

        let response = self
            .http
            .post(self.endpoint("/api/auth/register"))
            .json(&AuthRequest {
                email,
                password,
                role: role.as_str(),
            })
            .send()
            .await?;

        self.check_response(response).await?;

        info!(email, "Registration successful");
        Ok(())
    }
}
