//! Backend abstraction.
//!
//! # Responsibilities
//! - Name the fixed set of backends (blue, green)
//! - Map each backend to its base URL
//! - Validate every base URL once, at startup

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::config::{BackendsConfig, ValidationError};

/// Identifier of one of the two backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendId {
    Blue,
    Green,
}

impl BackendId {
    /// Every backend, in selection order.
    pub const ALL: [BackendId; 2] = [BackendId::Blue, BackendId::Green];

    /// Lowercase name used in logs, metrics labels and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            BackendId::Blue => "blue",
            BackendId::Green => "green",
        }
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse and check a backend base URL.
pub fn parse_base_url(backend: BackendId, raw: &str) -> Result<Url, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidBackendUrl {
        backend,
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

/// Immutable lookup table from backend identifier to base URL.
#[derive(Debug, Clone)]
pub struct BackendTable {
    blue: Url,
    green: Url,
}

impl BackendTable {
    /// Build the table from configuration, failing on the first bad URL.
    pub fn from_config(config: &BackendsConfig) -> Result<Self, ValidationError> {
        Ok(Self {
            blue: parse_base_url(BackendId::Blue, &config.blue_url)?,
            green: parse_base_url(BackendId::Green, &config.green_url)?,
        })
    }

    /// Base URL of a backend.
    pub fn base_url(&self, id: BackendId) -> &Url {
        match id {
            BackendId::Blue => &self.blue,
            BackendId::Green => &self.green,
        }
    }

    /// Target URL for forwarding `choice` to a backend.
    pub fn target_url(&self, id: BackendId, choice: &str) -> Url {
        let mut url = self.base_url(id).clone();
        url.query_pairs_mut().clear().append_pair("choice", choice);
        url
    }
}
