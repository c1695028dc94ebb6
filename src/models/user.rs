use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A user as returned by the API. The password hash never leaves the store
/// layer.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Minimal user reference embedded in task views (owner and assignees).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, FromRow)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
}

/// Payload for editing the authenticated user's own profile. All fields are
/// optional; changing the password requires the current one alongside the
/// new one.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: Option<String>,
    pub password: Option<String>,
    #[validate(
        length(
            min = 8,
            max = 16,
            message = "Password must be at least 8 characters long and less than 16 characters long"
        ),
        custom = "crate::auth::validate_password_strength"
    )]
    pub new_password: Option<String>,
}
