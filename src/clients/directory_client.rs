use crate::app_config::DirectoryConfig;
use crate::core::record_aggregator::strip_array_fencing;
use crate::errors::TransportError;
use log::{debug, info};
use reqwest::blocking::{Client, Response};
use serde_json::Value;
use std::time::Duration;

/// Source of the raw camera list for an account.
pub trait AccountDirectoryClient {
    /// Blocking fetch of the camera list body, unmodified.
    fn fetch_camera_list_raw(&self, account_id: u64) -> Result<String, TransportError>;
}

/// Talks to the account directory REST API over HTTP.
pub struct HttpDirectoryClient {
    base_url: String,
    client: Client,
}

impl HttpDirectoryClient {
    pub fn new(config: &DirectoryConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TransportError::ClientSetup(e.to_string()))?;
        Ok(HttpDirectoryClient {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Looks up the numeric account id for `username`.
    ///
    /// The directory answers unknown names with `userid` 0. Any password field
    /// in the response is ignored.
    pub fn resolve_account_id(&self, username: &str) -> Result<u64, TransportError> {
        let url = format!("{}/Accounts/getbyusername", self.base_url);
        info!("Resolving account '{}' via {}", username, url);
        let body = self.get_text(&url, &[("username", username.to_string())])?;

        let account: Value = serde_json::from_str(&strip_array_fencing(&body)).map_err(|e| {
            TransportError::InvalidResponse { url: url.clone(), details: e.to_string() }
        })?;
        let user_id = account
            .get("userid")
            .and_then(Value::as_u64)
            .ok_or_else(|| TransportError::InvalidResponse {
                url: url.clone(),
                details: "missing or non-integer 'userid'".to_string(),
            })?;

        if user_id == 0 {
            return Err(TransportError::UnknownAccount { username: username.to_string() });
        }
        debug!("Account '{}' resolved to userid {}", username, user_id);
        Ok(user_id)
    }

    fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, TransportError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| classify_send_error(url, e))?;
        read_success_body(url, response)
    }
}

impl AccountDirectoryClient for HttpDirectoryClient {
    fn fetch_camera_list_raw(&self, account_id: u64) -> Result<String, TransportError> {
        let url = format!("{}/Cameras/findall", self.base_url);
        info!("Fetching camera list for account {} from {}", account_id, url);
        let body = self.get_text(&url, &[("userid", account_id.to_string())])?;
        debug!("Received {} byte camera list body", body.len());
        Ok(body)
    }
}

fn classify_send_error(url: &str, e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout { url: url.to_string() }
    } else {
        TransportError::Connection { url: url.to_string(), details: e.to_string() }
    }
}

fn read_success_body(url: &str, response: Response) -> Result<String, TransportError> {
    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status { url: url.to_string(), status: status.as_u16() });
    }
    response.text().map_err(|e| {
        if e.is_timeout() {
            TransportError::Timeout { url: url.to_string() }
        } else {
            TransportError::Body { url: url.to_string(), details: e.to_string() }
        }
    })
}
