//! Wire types shared by the client and the console.

use serde::{Deserialize, Serialize};

use crate::ApiError;

/// A named secret as served by the backend.
///
/// List responses omit `value`; detail responses carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Secret {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The value, or the empty string when the backend sent none.
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Description, treating an empty string as absent.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// Payload for creating a secret. Unlike [`Secret`], the value is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSecret {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewSecret {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<NewSecret> for Secret {
    fn from(secret: NewSecret) -> Self {
        Self {
            name: secret.name,
            value: Some(secret.value),
            description: secret.description,
        }
    }
}

/// Check that a name can be addressed as a backend path.
///
/// Names are sent with their `/` separators literal, so a `.` or `..` part
/// would be resolved away by the HTTP stack and address some other secret.
pub fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.is_empty() || name.split('/').any(|part| part == "." || part == "..") {
        return Err(ApiError::InvalidName);
    }
    Ok(())
}
