use crate::core::domain::error::ValidationError;

/// A validated Proxmox port number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PvePort(u16);

impl PvePort {
    /// The default Proxmox VE management port.
    pub const DEFAULT: u16 = 8006;

    /// Creates a new port after validation.
    pub fn new(port: u16) -> Result<Self, ValidationError> {
        validate_port(port)?;
        Ok(Self(port))
    }

    /// Creates a new port without validation.
    #[allow(unused)]
    pub(crate) fn new_unchecked(port: u16) -> Self {
        Self(port)
    }

    /// Returns the port number.
    #[must_use]
    pub fn get(&self) -> u16 {
        self.0
    }
}

/// Validates a port number.
pub(crate) fn validate_port(port: u16) -> Result<(), ValidationError> {
    if port == 0 {
        return Err(ValidationError::Field {
            field: "port".to_string(),
            message: "Port cannot be 0".to_string(),
        });
    }
    // All ports 1-65535 are valid.
    Ok(())
}
