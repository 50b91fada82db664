use crate::{
    auth::application::{
        request::login_request::LoginRequest, response::login_response::LoginResponse,
    },
    core::domain::{
        error::{PveError, PveResult, ValidationError},
        model::{PveConnection, Session},
        value_object::{PveCsrfToken, PveTicket},
    },
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, StatusCode,
};
use std::time::Duration;

/// Establishes an authenticated session against `access/ticket`.
pub struct LoginService {
    default_headers: HeaderMap,
    timeout: Duration,
}

impl LoginService {
    pub fn new(timeout: Duration) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            default_headers,
            timeout,
        }
    }

    pub async fn execute(&self, connection: &PveConnection) -> PveResult<Session> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(!connection.verify_ssl())
            .timeout(self.timeout)
            .build()
            .map_err(|e| PveError::Connection(e.to_string()))?;

        let url = connection.api_url("access/ticket");
        let request = self.build_login_request(connection);
        let response = self.send_request(&http_client, &url, &request).await?;

        match response.status() {
            StatusCode::OK => self.handle_successful_login(response).await,
            StatusCode::UNAUTHORIZED => Err(PveError::Authentication(
                "Invalid credentials provided".to_string(),
            )),
            StatusCode::BAD_REQUEST => Err(PveError::Validation(ValidationError::Format(
                "Invalid login request format".to_string(),
            ))),
            StatusCode::NOT_FOUND => Err(PveError::Connection(
                "Login endpoint not found".to_string(),
            )),
            StatusCode::SERVICE_UNAVAILABLE => Err(PveError::Connection(
                "Proxmox service is currently unavailable".to_string(),
            )),
            status => Err(PveError::Connection(format!(
                "Unexpected response status: {}",
                status
            ))),
        }
    }

    fn build_login_request(&self, connection: &PveConnection) -> LoginRequest {
        LoginRequest {
            username: connection.username().as_str().to_string(),
            password: connection.password().as_str().to_string(),
            realm: connection.realm().as_str().to_string(),
        }
    }

    async fn send_request(
        &self,
        client: &Client,
        url: &str,
        request: &LoginRequest,
    ) -> PveResult<reqwest::Response> {
        client
            .post(url)
            .headers(self.default_headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| PveError::Connection(e.to_string()))
    }

    async fn handle_successful_login(&self, response: reqwest::Response) -> PveResult<Session> {
        let login_response = response
            .json::<LoginResponse>()
            .await
            .map_err(|e| PveError::Connection(format!("Failed to parse login response: {}", e)))?;

        let ticket = PveTicket::new(login_response.data.ticket)?;
        let csrf_token = PveCsrfToken::new(login_response.data.csrf_token)?;

        Ok(Session::new(ticket, csrf_token))
    }
}
