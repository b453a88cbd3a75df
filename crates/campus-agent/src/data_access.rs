//! Data-access capability.
//!
//! `get(path, params)` against the campus REST backend. The backend wraps
//! every list in a `{"success": bool, "data": [...]}` envelope; anything
//! else (transport error, timeout, non-2xx, `success: false`, missing
//! `data`) is a failure and sends the executor to the fixture tier.

use crate::error::DataAccessError;
use async_trait::async_trait;
use campus_shared::{QueryParams, Record};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait DataAccess: Send + Sync {
    /// Fetch the record list for a logical path
    async fn get(&self, path: &str, params: &QueryParams) -> Result<Vec<Record>, DataAccessError>;
}

/// Live HTTP client
pub struct HttpDataAccess {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDataAccess {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DataAccessError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl DataAccess for HttpDataAccess {
    async fn get(&self, path: &str, params: &QueryParams) -> Result<Vec<Record>, DataAccessError> {
        let url = self.url(path);
        debug!(%url, ?params, "GET");

        let resp = self.client.get(&url).query(params).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DataAccessError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body: Value = resp.json().await?;
        parse_envelope(path, body)
    }
}

/// Unwrap the `{success, data}` envelope
pub fn parse_envelope(path: &str, body: Value) -> Result<Vec<Record>, DataAccessError> {
    let malformed = |reason: &str| DataAccessError::MalformedBody {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let Value::Object(mut obj) = body else {
        return Err(malformed("body is not an object"));
    };
    match obj.get("success").and_then(Value::as_bool) {
        Some(true) => {}
        Some(false) => return Err(DataAccessError::Unsuccessful(path.to_string())),
        None => return Err(malformed("missing success flag")),
    }
    match obj.remove("data") {
        Some(Value::Array(records)) => Ok(records),
        Some(_) => Err(malformed("data is not a list")),
        None => Err(malformed("missing data")),
    }
}

/// Live tier that always fails, so every call is served from fixtures
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineDataAccess;

#[async_trait]
impl DataAccess for OfflineDataAccess {
    async fn get(&self, _path: &str, _params: &QueryParams) -> Result<Vec<Record>, DataAccessError> {
        Err(DataAccessError::Offline)
    }
}
