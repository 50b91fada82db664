use crate::core::domain::error::ValidationError;

/// A validated Proxmox host address (hostname or IP).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PveHost(String);

impl PveHost {
    /// Creates a new host after validating it against RFC 1035 label rules.
    pub fn new(host: impl Into<String>) -> Result<Self, ValidationError> {
        let host = host.into();
        validate_host(&host)?;
        Ok(Self(host))
    }

    /// Creates a new host without validation.
    #[allow(unused)]
    pub(crate) fn new_unchecked(host: String) -> Self {
        Self(host)
    }

    /// Returns the host as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a hostname or IP address.
pub(crate) fn validate_host(host: &str) -> Result<(), ValidationError> {
    if host.is_empty() {
        return Err(ValidationError::Field {
            field: "host".to_string(),
            message: "Host cannot be empty".to_string(),
        });
    }
    if host.len() > 253 {
        return Err(ValidationError::Format(
            "Host length exceeds maximum of 253 characters".to_string(),
        ));
    }
    for label in host.split('.') {
        if label.is_empty() || label.len() > 63 {
            return Err(ValidationError::Format(
                "Label must be between 1 and 63 characters".to_string(),
            ));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ValidationError::Format(
                "Label can only contain alphanumeric characters and hyphens".to_string(),
            ));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(ValidationError::Format(
                "Label cannot start or end with hyphen".to_string(),
            ));
        }
    }
    Ok(())
}
