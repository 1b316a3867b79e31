//! Field validators for the sign-in form
//!
//! Validators are pure and run on every keystroke. An error is displayed
//! inline next to the field; it never blocks typing.

use thiserror::Error;

/// Minimum username length
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Maximum avatar size in bytes (5 MiB)
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Punctuation allowed in usernames besides ASCII letters and digits
const USERNAME_PUNCTUATION: [char; 3] = ['_', '.', '-'];

/// Result of running a field validator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldCheck {
    pub valid: bool,
    pub error_message: Option<String>,
}

impl FieldCheck {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error_message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error_message: Some(message.into()),
        }
    }
}

/// Reasons a username is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("Username is Invalid")]
    TooShort { min: usize, actual: usize },
    #[error("Username is Invalid")]
    TooLong { max: usize, actual: usize },
    #[error("Username is Invalid")]
    InvalidCharacters { invalid: Vec<char> },
}

/// Reasons an avatar file is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvatarError {
    #[error("Only image files are allowed")]
    NotAnImage { content_type: String },
    #[error("File size should be less than 5MB")]
    TooLarge { max: usize, actual: usize },
    #[error("Could not read the selected file")]
    Unreadable { reason: String },
}

/// Checks a username against the format rule.
///
/// The empty string is accepted without an error: emptiness is enforced by
/// the field being required, not by the validator.
pub fn check_username(value: &str) -> Result<(), UsernameError> {
    if value.is_empty() {
        return Ok(());
    }

    let invalid: Vec<char> = value
        .chars()
        .filter(|c| !c.is_ascii_alphanumeric() && !USERNAME_PUNCTUATION.contains(c))
        .collect();
    if !invalid.is_empty() {
        return Err(UsernameError::InvalidCharacters { invalid });
    }

    // Only ASCII survives the character check, so len() is the char count
    let length = value.len();
    if length < MIN_USERNAME_LENGTH {
        return Err(UsernameError::TooShort {
            min: MIN_USERNAME_LENGTH,
            actual: length,
        });
    }
    if length > MAX_USERNAME_LENGTH {
        return Err(UsernameError::TooLong {
            max: MAX_USERNAME_LENGTH,
            actual: length,
        });
    }

    Ok(())
}

/// Username validator in the `{valid, error_message}` shape the form uses
pub fn validate_username(value: &str) -> FieldCheck {
    match check_username(value) {
        Ok(()) => FieldCheck::ok(),
        Err(err) => FieldCheck::invalid(err.to_string()),
    }
}

/// Checks that a selected avatar file is an image no larger than 5 MiB
pub fn validate_avatar(content_type: &str, size: usize) -> Result<(), AvatarError> {
    if !content_type.starts_with("image/") {
        return Err(AvatarError::NotAnImage {
            content_type: content_type.to_string(),
        });
    }
    if size > MAX_AVATAR_BYTES {
        return Err(AvatarError::TooLarge {
            max: MAX_AVATAR_BYTES,
            actual: size,
        });
    }
    Ok(())
}
