use crate::core::domain::error::ValidationError;

/// A validated Proxmox authentication realm (e.g. "pam", "pve").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PveRealm(String);

impl PveRealm {
    /// Creates a new realm after validation.
    pub fn new(realm: impl Into<String>) -> Result<Self, ValidationError> {
        let realm = realm.into();
        validate_realm(&realm)?;
        Ok(Self(realm))
    }

    /// Creates a new realm without validation.
    #[allow(unused)]
    pub(crate) fn new_unchecked(realm: String) -> Self {
        Self(realm)
    }

    /// Returns the realm as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a realm identifier.
pub(crate) fn validate_realm(realm: &str) -> Result<(), ValidationError> {
    if realm.is_empty() {
        return Err(ValidationError::Field {
            field: "realm".to_string(),
            message: "Realm cannot be empty".to_string(),
        });
    }
    if !realm
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::Format(
            "Realm can only contain alphanumeric characters, hyphens and underscores".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_realm() {
        assert!(validate_realm("pam").is_ok());
        assert!(validate_realm("pve").is_ok());
        assert!(validate_realm("").is_err());
        assert!(validate_realm("bad realm").is_err());
    }
}
