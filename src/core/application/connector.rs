//! Startup connection management: bounded retry, then connected or failed.
//!
//! The retry policy lives here and only here; once a session exists, poll
//! and action calls are single-shot and never reconnect automatically.

use crate::{
    auth::application::service::login_service::LoginService,
    core::domain::{
        error::{PveError, PveResult},
        model::PveConnection,
    },
    core::infrastructure::api_client::ApiClient,
};
use std::time::Duration;

/// How many login attempts one sequence makes before giving up.
pub const MAX_ATTEMPTS: u32 = 3;
/// Fixed delay between attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Whether the backend was reachable at startup, and if not, why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionState {
    pub is_connected: bool,
    pub last_error: Option<String>,
}

impl ConnectionState {
    pub fn connected() -> Self {
        Self {
            is_connected: true,
            last_error: None,
        }
    }

    pub fn failed(error: &PveError) -> Self {
        Self {
            is_connected: false,
            last_error: Some(error.to_string()),
        }
    }
}

/// Runs one bounded connection sequence: up to `attempts` logins spaced
/// `delay` apart, each validated with a `GET /version` probe.
///
/// Returns the authenticated client on the first success, or the last
/// error once the attempts are exhausted.
pub async fn connect_with_retry(
    connection: &PveConnection,
    attempts: u32,
    delay: Duration,
) -> PveResult<ApiClient> {
    let service = LoginService::new(ApiClient::REQUEST_TIMEOUT);
    let mut last_error = PveError::Connection("no connection attempts made".to_string());

    for attempt in 1..=attempts.max(1) {
        match try_connect(&service, connection).await {
            Ok(client) => {
                tracing::info!(
                    host = connection.host().as_str(),
                    attempt,
                    "connected to Proxmox host"
                );
                return Ok(client);
            }
            Err(e) => {
                tracing::error!(
                    host = connection.host().as_str(),
                    attempt,
                    max_attempts = attempts,
                    error = %e,
                    "connection attempt failed"
                );
                last_error = e;
                if attempt < attempts {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
    Err(last_error)
}

async fn try_connect(service: &LoginService, connection: &PveConnection) -> PveResult<ApiClient> {
    let session = service.execute(connection).await?;
    let client = ApiClient::new(connection.clone(), session)?;
    // Probe with one lightweight call so a bad node/proxy fails at startup,
    // not on the first poll tick.
    client.version().await?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::value_object::{
        PveHost, PvePassword, PvePort, PveRealm, PveUsername,
    };
    use url::Url;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_test_connection(server_url: &str) -> PveConnection {
        PveConnection::new_unchecked(
            PveHost::new_unchecked(server_url.trim_start_matches("http://").to_string()),
            PvePort::new_unchecked(8006),
            PveUsername::new_unchecked("testuser".to_string()),
            PvePassword::new_unchecked("testpass".to_string()),
            PveRealm::new_unchecked("pam".to_string()),
            false,
            Url::parse(server_url).unwrap(),
        )
    }

    fn login_ok() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "ticket": "PVE:testuser@pam:4EEC61E2::sig",
                "CSRFPreventionToken": "4EEC61E2:abc123"
            }
        }))
    }

    fn version_ok() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "version": "8.2.4" }
        }))
    }

    #[tokio::test]
    async fn test_connects_on_first_attempt() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api2/json/access/ticket"))
            .respond_with(login_ok())
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api2/json/version"))
            .respond_with(version_ok())
            .mount(&mock_server)
            .await;

        let connection = create_test_connection(&mock_server.uri());
        let client = connect_with_retry(&connection, MAX_ATTEMPTS, Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(client.connection().host().as_str(), connection.host().as_str());
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let mock_server = MockServer::start().await;

        // First login attempt hits a 503, second succeeds.
        Mock::given(method("POST"))
            .and(path("/api2/json/access/ticket"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api2/json/access/ticket"))
            .respond_with(login_ok())
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api2/json/version"))
            .respond_with(version_ok())
            .mount(&mock_server)
            .await;

        let connection = create_test_connection(&mock_server.uri());
        let result = connect_with_retry(&connection, MAX_ATTEMPTS, Duration::ZERO).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_exhausts_attempts_and_reports_last_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api2/json/access/ticket"))
            .respond_with(ResponseTemplate::new(401))
            .expect(3)
            .mount(&mock_server)
            .await;

        let connection = create_test_connection(&mock_server.uri());
        let result = connect_with_retry(&connection, MAX_ATTEMPTS, Duration::ZERO).await;
        let err = result.unwrap_err();
        assert!(matches!(err, PveError::Authentication(_)));

        let state = ConnectionState::failed(&err);
        assert!(!state.is_connected);
        assert!(state.last_error.unwrap().contains("authentication"));
    }

    #[tokio::test]
    async fn test_probe_failure_counts_as_failed_attempt() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api2/json/access/ticket"))
            .respond_with(login_ok())
            .mount(&mock_server)
            .await;
        // Login works but the probe never does.
        Mock::given(method("GET"))
            .and(path("/api2/json/version"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(3)
            .mount(&mock_server)
            .await;

        let connection = create_test_connection(&mock_server.uri());
        let result = connect_with_retry(&connection, MAX_ATTEMPTS, Duration::ZERO).await;
        assert!(matches!(result, Err(PveError::Api { status: 500, .. })));
    }
}
