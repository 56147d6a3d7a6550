//! User model and authentication payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::reservation::Reservation;

/// User profile as returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    pub email: String,
    /// Present on `GET /users/me`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<Reservation>>,
}

impl User {
    /// Name to greet the user with, falling back to the email
    pub fn display_name(&self) -> &str {
        if self.firstname.is_empty() {
            &self.email
        } else {
            &self.firstname
        }
    }
}

/// Login request body
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Registration request body
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct RegisterRequest {
    pub firstname: String,
    pub lastname: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Response of both login and registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}
