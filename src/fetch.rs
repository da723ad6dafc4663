//! Blocking HTTP access for the enrichment preprocessors.
//! Wraps reqwest's blocking client with the status handling the external
//! lookups need: quota refusals surface as a dedicated rate-limit error so
//! callers can truncate softly instead of aborting the run.

use crate::constants::USER_AGENT;
use crate::error::{Error, Result};
use reqwest::blocking::Response;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client shared by all network-facing preprocessors.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

impl HttpClient {
    /// Creates a client with the application User-Agent and a 60 second
    /// request timeout bounding every network call.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self { client })
    }

    /// Fetches a URL and deserializes the JSON response body.
    ///
    /// # Errors
    /// * `Error::RateLimited` on a 403 or 429 response
    /// * `Error::Http` on transport failures, other error statuses, or a
    ///   body that does not match `T`
    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        Ok(self.get(url)?.json()?)
    }

    /// Fetches a URL and returns the raw response body.
    pub fn get_text(&self, url: &str) -> Result<String> {
        Ok(self.get(url)?.text()?)
    }

    fn get(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send()?;
        match response.status() {
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                Err(Error::RateLimited { url: url.to_string() })
            }
            _ => Ok(response.error_for_status()?),
        }
    }
}
