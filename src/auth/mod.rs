pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

lazy_static! {
    static ref UPPERCASE_RE: regex::Regex = regex::Regex::new(r"[A-Z]").unwrap();
    static ref LOWERCASE_RE: regex::Regex = regex::Regex::new(r"[a-z]").unwrap();
    static ref DIGIT_RE: regex::Regex = regex::Regex::new(r"[0-9]").unwrap();
    static ref SPECIAL_RE: regex::Regex = regex::Regex::new(r"[@$!%*?&]").unwrap();
}

/// Checks the signup password policy: at least one uppercase letter, one
/// lowercase letter, one digit, and one of `@ $ ! % * ? &`. Length bounds
/// are enforced separately by the field's `length` rule.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let failed = if !UPPERCASE_RE.is_match(password) {
        Some("Password must contain at least one uppercase letter")
    } else if !LOWERCASE_RE.is_match(password) {
        Some("Password must contain at least one lowercase letter")
    } else if !DIGIT_RE.is_match(password) {
        Some("Password must contain at least one number")
    } else if !SPECIAL_RE.is_match(password) {
        Some("Password must contain at least one special character (@, $, !, %, *, ?, &)")
    } else {
        None
    };

    match failed {
        Some(message) => {
            let mut error = ValidationError::new("password_strength");
            error.message = Some(message.into());
            Err(error)
        }
        None => Ok(()),
    }
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    /// User's password; only the length is checked here, the hash comparison
    /// decides the rest.
    #[validate(length(
        min = 8,
        max = 16,
        message = "Password must be at least 8 characters long and less than 16 characters long"
    ))]
    pub password: String,
}

/// Represents the payload for a new user signup request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name for the new account.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Email address for the new account; unique across users.
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    /// Password for the new account: 8–16 characters with the character
    /// classes checked by `validate_password_strength`.
    #[validate(
        length(
            min = 8,
            max = 16,
            message = "Password must be at least 8 characters long and less than 16 characters long"
        ),
        custom = "validate_password_strength"
    )]
    pub password: String,
}

/// Response structure after successful authentication (login or signup).
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// The JWT for session authentication.
    pub token: String,
    /// The unique identifier of the authenticated user.
    pub user_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "Password123!".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let invalid_email_login = LoginRequest {
            email: "testexample.com".to_string(),
            password: "Password123!".to_string(),
        };
        assert!(invalid_email_login.validate().is_err());

        let short_password_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "123".to_string(),
        };
        assert!(short_password_login.validate().is_err());
    }

    #[test]
    fn test_signup_request_validation() {
        let valid = SignupRequest {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password: "Password1!".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_name = SignupRequest {
            name: "".to_string(),
            email: "test@example.com".to_string(),
            password: "Password1!".to_string(),
        };
        assert!(empty_name.validate().is_err());

        let too_long = SignupRequest {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password: "Password1!Password1!".to_string(),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_password_strength_rules() {
        assert!(validate_password_strength("Password1!").is_ok());
        assert!(validate_password_strength("password1!").is_err()); // no uppercase
        assert!(validate_password_strength("PASSWORD1!").is_err()); // no lowercase
        assert!(validate_password_strength("Password!!").is_err()); // no digit
        assert!(validate_password_strength("Password11").is_err()); // no special
    }
}
