//! HTTP client for the `api2/json` management endpoints used by the dashboard.

use crate::core::domain::{
    error::{PveError, PveResult},
    model::{GuestAction, GuestKind, GuestRecord, NodeStatus, PveConnection, Session},
    value_object::NodeName,
};
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Every `api2/json` response wraps its payload in a `data` field.
#[derive(Deserialize)]
struct ApiEnvelope<T> {
    data: T,
}

/// Version information from `GET /version`, used as the connectivity probe.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    #[serde(default)]
    pub release: Option<String>,
}

/// Authenticated client for one Proxmox VE endpoint.
///
/// Adds the `PVEAuthCookie` and `CSRFPreventionToken` headers to every
/// request. Calls are single-shot: no internal retry, no ticket refresh;
/// failures surface to the caller, which decides whether to log-and-skip
/// (poll) or to show the operator (action).
#[derive(Debug)]
pub struct ApiClient {
    http_client: Client,
    connection: PveConnection,
    session: Session,
}

impl ApiClient {
    /// Default per-request timeout. Matches the session timeout the
    /// original management clients use.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new `ApiClient` from an established session.
    ///
    /// # Errors
    /// Returns `PveError::Connection` if the HTTP client cannot be built.
    pub fn new(connection: PveConnection, session: Session) -> PveResult<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(!connection.verify_ssl())
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PveError::Connection(e.to_string()))?;

        Ok(Self {
            http_client,
            connection,
            session,
        })
    }

    /// Returns a reference to the underlying connection details.
    pub fn connection(&self) -> &PveConnection {
        &self.connection
    }

    /// Lightweight connectivity probe: `GET /version`.
    pub async fn version(&self) -> PveResult<VersionInfo> {
        self.get("version").await
    }

    /// Fetches aggregate metrics for a node: `GET /nodes/{node}/status`.
    pub async fn node_status(&self, node: &NodeName) -> PveResult<NodeStatus> {
        self.get(&format!("nodes/{}/status", node.as_str())).await
    }

    /// Lists the guests of one kind on a node, in server order.
    pub async fn list_guests(
        &self,
        node: &NodeName,
        kind: GuestKind,
    ) -> PveResult<Vec<GuestRecord>> {
        self.get(&format!("nodes/{}/{}", node.as_str(), kind.path_segment()))
            .await
    }

    /// Issues a lifecycle action against a guest:
    /// `POST /nodes/{node}/{qemu|lxc}/{vmid}/status/{action}`.
    ///
    /// The backend applies the transition asynchronously; success here only
    /// means the task was accepted.
    pub async fn guest_action(
        &self,
        node: &NodeName,
        kind: GuestKind,
        vmid: u32,
        action: GuestAction,
    ) -> PveResult<()> {
        let path = format!(
            "nodes/{}/{}/{}/status/{}",
            node.as_str(),
            kind.path_segment(),
            vmid,
            action.endpoint()
        );
        // The action endpoints return the UPID of the spawned task.
        let upid: Option<String> = self.execute(Method::POST, &path).await?;
        if let Some(upid) = upid {
            tracing::debug!(%upid, vmid, %action, "guest action accepted");
        }
        Ok(())
    }

    async fn get<T>(&self, path: &str) -> PveResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.execute(Method::GET, path).await
    }

    async fn execute<T>(&self, method: Method, path: &str) -> PveResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.connection.api_url(path);
        let response = self
            .http_client
            .request(method, &url)
            .header("Cookie", self.session.ticket().as_cookie_header())
            .header("CSRFPreventionToken", self.session.csrf_token().as_str())
            .send()
            .await
            .map_err(|e| PveError::Connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(PveError::Authentication(
                "Session ticket rejected".to_string(),
            ));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(PveError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<ApiEnvelope<T>>()
            .await
            .map(|envelope| envelope.data)
            .map_err(|e| PveError::Connection(format!("Failed to parse response: {}", e)))
    }
}
