use crate::core::domain::error::ValidationError;

/// A validated Proxmox username (without the realm suffix).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PveUsername(String);

impl PveUsername {
    /// Creates a new username after validation.
    pub fn new(username: impl Into<String>) -> Result<Self, ValidationError> {
        let username = username.into();
        validate_username(&username)?;
        Ok(Self(username))
    }

    /// Creates a new username without validation.
    #[allow(unused)]
    pub(crate) fn new_unchecked(username: String) -> Self {
        Self(username)
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a username.
pub(crate) fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::Field {
            field: "username".to_string(),
            message: "Username cannot be empty".to_string(),
        });
    }
    if username.contains('@') {
        return Err(ValidationError::Format(
            "Username must not include the realm; configure the realm separately".to_string(),
        ));
    }
    Ok(())
}
