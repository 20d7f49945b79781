use std::time::Duration;

use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use tokio::time::timeout;

use crate::util::error::CallError;

pub mod body;

pub use body::Body;

/// Port the Vixen web server listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 8888;
/// Deadline for one exchange, covering connection and full response receipt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Query parameters or form fields of one request.
pub type Fields<'a> = &'a [(&'a str, String)];

/// Where the device lives and how long a single call may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl SessionConfig {
    pub fn new(host: &str) -> Self {
        SessionConfig {
            host: host.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The base address, e.g. `http://192.168.1.20:8888`.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/**
The transport session towards one Vixen web server.

Owns the single HTTP client used for every call, bound to the base address and
the default form content type. Each exchange runs under one deadline and its
body is normalized into a [`Body`].

Two levels of API are offered:
- [`Session::try_get`] / [`Session::try_post`] return the classified [`CallError`].
- [`Session::get`] / [`Session::post`] log the failure once and return `None`.
 */
#[derive(Debug)]
pub struct Session {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Result<Self, CallError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(CallError::Transport)?;

        Ok(Session {
            base_url: config.base_url(),
            client,
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for a path relative to the base address.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn try_get(&self, url: &str, params: Option<Fields<'_>>) -> Result<Body, CallError> {
        if url.is_empty() {
            return Err(CallError::InvalidUrl);
        }
        let mut request = self.client.get(url);
        if let Some(params) = params {
            request = request.query(params);
        }
        self.exchange(request).await
    }

    pub async fn try_post(
        &self,
        url: &str,
        params: Option<Fields<'_>>,
        payload: Option<Fields<'_>>,
    ) -> Result<Body, CallError> {
        if url.is_empty() {
            return Err(CallError::InvalidUrl);
        }
        let mut request = self.client.post(url);
        if let Some(params) = params {
            request = request.query(params);
        }
        if let Some(payload) = payload {
            request = request.form(payload);
        }
        self.exchange(request).await
    }

    /// Makes a GET request, logging and swallowing any failure.
    pub async fn get(&self, url: &str, params: Option<Fields<'_>>) -> Option<Body> {
        match self.try_get(url, params).await {
            Ok(body) => Some(body),
            Err(err) => {
                error!("Error fetching Vixen data: {}", err);
                None
            }
        }
    }

    /// Makes a POST request, logging and swallowing any failure.
    pub async fn post(
        &self,
        url: &str,
        params: Option<Fields<'_>>,
        payload: Option<Fields<'_>>,
    ) -> Option<Body> {
        match self.try_post(url, params, payload).await {
            Ok(body) => Some(body),
            Err(err) => {
                error!("Error posting Vixen data: {}", err);
                None
            }
        }
    }

    /// Releases the HTTP client. The session cannot be used afterwards.
    pub fn close(self) {
        debug!("Closing vixen lights api session.");
        drop(self.client);
    }

    async fn exchange(&self, request: RequestBuilder) -> Result<Body, CallError> {
        match timeout(self.timeout, receive(request)).await {
            Ok(result) => result,
            Err(_) => Err(CallError::Timeout(self.timeout)),
        }
    }
}

/// Sends the request and reads the whole body.
async fn receive(request: RequestBuilder) -> Result<Body, CallError> {
    let response = request.send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(CallError::Status(status));
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.contains(JSON_CONTENT_TYPE));
    let text = response.text().await?;
    Body::decode(text, is_json)
}
