use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::AppError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Gateway connection settings, as read from a YAML vars file or the command line.
/// Every field is optional here; `resolve` checks that the required ones are set.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ConnectionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "string_or_number", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

// `version: 1` and `version: "1"` are both common in vars files
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Version {
        Number(u64),
        Text(String),
    }

    Ok(Option::<Version>::deserialize(deserializer)?.map(|v| match v {
        Version::Number(n) => n.to_string(),
        Version::Text(s) => s,
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            other => Err(AppError::Config(format!(
                "Invalid protocol '{}'. Must be one of: http, https",
                other
            ))),
        }
    }

    fn scheme(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

/// Validated connection details
#[derive(Debug, Clone)]
pub struct Connection {
    pub base_url: Url,
    pub api_url: Url,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

impl ConnectionSettings {
    pub fn from_yaml_file(path: &Path) -> Result<Self, AppError> {
        let yml = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&yml)
            .map_err(|e| AppError::Config(format!("Invalid settings file {}: {}", path.display(), e)))
    }

    /// Values set in `overrides` win over values in `self`
    pub fn merge(self, overrides: ConnectionSettings) -> Self {
        Self {
            protocol: overrides.protocol.or(self.protocol),
            domain: overrides.domain.or(self.domain),
            version: overrides.version.or(self.version),
            username: overrides.username.or(self.username),
            password: overrides.password.or(self.password),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
        }
    }

    pub fn resolve(self) -> Result<Connection, AppError> {
        let protocol = Protocol::parse(self.protocol.as_deref().unwrap_or("https"))?;
        let domain = required(self.domain, "domain")?;
        let version = required(self.version, "version")?;
        let username = required(self.username, "username")?;
        let password = required(self.password, "password")?;

        let base_url = Url::parse(&format!("{}://{}", protocol.scheme(), domain.trim_end_matches('/')))
            .map_err(|e| AppError::Config(format!("Invalid domain '{}': {}", domain, e)))?;
        let api_url = base_url
            .join(&format!("api/v{}/", version))
            .map_err(|e| AppError::Config(format!("Invalid version '{}': {}", version, e)))?;

        Ok(Connection {
            base_url,
            api_url,
            username,
            password,
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("Missing required setting: {}", name)))
}
