//! Contact form submission and its result envelope.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub const MAX_NAME_CHARS: usize = 50;
pub const MAX_MESSAGE_CHARS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Reasons a submission is refused before it reaches the backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    #[error("이름을 입력해주세요.")]
    MissingName,
    #[error("이름은 50자 이하로 입력해주세요.")]
    NameTooLong,
    #[error("올바른 이메일 주소를 입력해주세요.")]
    InvalidEmail,
    #[error("문의 내용을 입력해주세요.")]
    MissingMessage,
    #[error("문의 내용은 5000자 이하로 입력해주세요.")]
    MessageTooLong,
}

impl ContactFormData {
    /// Trimmed copy of the submission, validated.
    pub fn validated(&self) -> Result<Self, ContactValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() {
            return Err(ContactValidationError::MissingName);
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(ContactValidationError::NameTooLong);
        }
        if !EMAIL_PATTERN.is_match(email) {
            return Err(ContactValidationError::InvalidEmail);
        }
        if message.is_empty() {
            return Err(ContactValidationError::MissingMessage);
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(ContactValidationError::MessageTooLong);
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

impl ContactResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
