use crate::core::domain::error::ValidationError;

/// A Proxmox CSRF prevention token, required on state-changing requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PveCsrfToken(String);

impl PveCsrfToken {
    /// Creates a new token after validating its format.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        validate_csrf_token(&token)?;
        Ok(Self(token))
    }

    /// Creates a new token without validation.
    #[allow(unused)]
    pub(crate) fn new_unchecked(token: String) -> Self {
        Self(token)
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates the format of a CSRF token string (`<timestamp>:<signature>`).
pub(crate) fn validate_csrf_token(token: &str) -> Result<(), ValidationError> {
    if token.is_empty() {
        return Err(ValidationError::Field {
            field: "csrf_token".to_string(),
            message: "CSRF token cannot be empty".to_string(),
        });
    }
    if token.split(':').count() != 2 {
        return Err(ValidationError::Format(
            "Invalid CSRF token format: expected '<timestamp>:<signature>'".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_csrf_token() {
        assert!(validate_csrf_token("4EEC61E2:abc123").is_ok());
        assert!(validate_csrf_token("").is_err());
        assert!(validate_csrf_token("missing-separator").is_err());
    }
}
