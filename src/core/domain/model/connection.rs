use crate::core::domain::{
    error::{PveResult, ValidationError},
    value_object::{PveHost, PvePassword, PvePort, PveRealm, PveUsername},
};
use url::Url;

/// The validated connection parameters for one Proxmox VE endpoint.
///
/// Exclusively owned by whichever component composes the client; the display
/// layer never sees it.
#[derive(Debug, Clone)]
pub struct PveConnection {
    host: PveHost,
    port: PvePort,
    username: PveUsername,
    password: PvePassword,
    realm: PveRealm,
    verify_ssl: bool,
    base_url: Url,
}

impl PveConnection {
    /// Creates a new builder for connection configuration.
    pub fn builder() -> PveConnectionBuilder {
        PveConnectionBuilder::default()
    }

    /// Creates a connection with an explicit base URL, bypassing the
    /// https://host:port construction. Used by tests against mock servers.
    #[allow(unused)]
    pub(crate) fn new_unchecked(
        host: PveHost,
        port: PvePort,
        username: PveUsername,
        password: PvePassword,
        realm: PveRealm,
        verify_ssl: bool,
        base_url: Url,
    ) -> Self {
        Self {
            host,
            port,
            username,
            password,
            realm,
            verify_ssl,
            base_url,
        }
    }

    pub fn host(&self) -> &PveHost {
        &self.host
    }

    pub fn port(&self) -> PvePort {
        self.port
    }

    pub fn username(&self) -> &PveUsername {
        &self.username
    }

    pub fn password(&self) -> &PvePassword {
        &self.password
    }

    pub fn realm(&self) -> &PveRealm {
        &self.realm
    }

    /// Whether TLS certificates are verified. Off by default because most
    /// Proxmox installs ship a self-signed certificate.
    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// The `https://host:port` base the API paths are joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the full URL for an `api2/json` path.
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/api2/json/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Builder for [`PveConnection`] configuration.
#[derive(Debug, Default)]
pub struct PveConnectionBuilder {
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    realm: Option<String>,
    verify_ssl: bool,
}

impl PveConnectionBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        realm: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self.realm = Some(realm.into());
        self
    }

    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// Validates every field and assembles the connection.
    pub fn build(self) -> PveResult<PveConnection> {
        let host = PveHost::new(self.host.ok_or_else(|| missing("host"))?)?;
        let port = PvePort::new(self.port.unwrap_or(PvePort::DEFAULT))?;
        let username = PveUsername::new(self.username.ok_or_else(|| missing("username"))?)?;
        let password = PvePassword::new(self.password.ok_or_else(|| missing("password"))?)?;
        let realm = PveRealm::new(self.realm.ok_or_else(|| missing("realm"))?)?;

        let base_url = Url::parse(&format!("https://{}:{}", host.as_str(), port.get()))
            .map_err(|e| ValidationError::Format(format!("Invalid base URL: {}", e)))?;

        Ok(PveConnection {
            host,
            port,
            username,
            password,
            realm,
            verify_ssl: self.verify_ssl,
            base_url,
        })
    }
}

fn missing(field: &str) -> ValidationError {
    ValidationError::Field {
        field: field.to_string(),
        message: format!("{} is required", field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_assembles_base_url() {
        let connection = PveConnection::builder()
            .host("192.168.1.182")
            .port(8006)
            .credentials("root", "secret", "pam")
            .build()
            .unwrap();

        assert_eq!(connection.base_url().as_str(), "https://192.168.1.182:8006/");
        assert!(!connection.verify_ssl());
    }

    #[test]
    fn test_builder_default_port() {
        let connection = PveConnection::builder()
            .host("pve.lab")
            .credentials("root", "secret", "pam")
            .build()
            .unwrap();

        assert_eq!(connection.port().get(), 8006);
    }

    #[test]
    fn test_builder_missing_host_fails() {
        let result = PveConnection::builder()
            .credentials("root", "secret", "pam")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_api_url_join() {
        let connection = PveConnection::builder()
            .host("pve.lab")
            .credentials("root", "secret", "pam")
            .build()
            .unwrap();

        assert_eq!(
            connection.api_url("/nodes/pve/status"),
            "https://pve.lab:8006/api2/json/nodes/pve/status"
        );
        assert_eq!(
            connection.api_url("version"),
            "https://pve.lab:8006/api2/json/version"
        );
    }
}
