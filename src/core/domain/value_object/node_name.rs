use crate::core::domain::error::ValidationError;

/// A validated Proxmox node name (the host instance being monitored).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeName(String);

impl NodeName {
    /// The default node name on a fresh Proxmox install.
    pub const DEFAULT: &'static str = "pve";

    /// Creates a new node name after validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_node_name(&name)?;
        Ok(Self(name))
    }

    /// Creates a new node name without validation.
    #[allow(unused)]
    pub(crate) fn new_unchecked(name: String) -> Self {
        Self(name)
    }

    /// Returns the node name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a node name. Node names are single DNS labels.
pub(crate) fn validate_node_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Field {
            field: "node".to_string(),
            message: "Node name cannot be empty".to_string(),
        });
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::Format(
            "Node name can only contain alphanumeric characters and hyphens".to_string(),
        ));
    }
    Ok(())
}
