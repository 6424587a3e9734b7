// Gateway client - session handling and dispatch of resolved requests

use reqwest::StatusCode;
use serde::Serialize;
use url::Url;

use crate::{
    config::Connection,
    domain::{ApiCatalog, PathParams, QueryParams, RequestResolver, ResolvedRequest, Verb},
    error::AppError,
};

/// One logical call: a resource, an action and the caller's parameters
#[derive(Debug, Clone)]
pub struct GatewayCall {
    pub resource: String,
    pub verb: Verb,
    pub path_params: PathParams,
    pub query_params: QueryParams,
}

/// Result of a dispatched (or mocked) call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvokeOutcome {
    pub status: u16,
    pub changed: bool,
    pub json: serde_json::Value,
}

impl InvokeOutcome {
    pub fn is_failure(&self) -> bool {
        self.status >= 400
    }
}

pub struct GatewayClient {
    http: reqwest::Client,
    connection: Connection,
}

impl GatewayClient {
    pub fn new(connection: Connection) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(connection.timeout)
            .build()
            .map_err(|e| AppError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, connection })
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Start a cookie session
    pub async fn login(&self) -> Result<(), AppError> {
        let url = join(&self.connection.base_url, "rest_login")?;
        let response = self
            .http
            .post(url)
            .form(&[
                ("username", self.connection.username.as_str()),
                ("password", self.connection.password.as_str()),
            ])
            .send()
            .await?;

        if response.status().is_client_error() || response.status().is_server_error() {
            return Err(AppError::Http(format!("Login failed with status {}", response.status())));
        }
        tracing::debug!(user = %self.connection.username, "logged in");
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        let url = join(&self.connection.base_url, "logout")?;
        self.http.get(url).send().await?;
        tracing::debug!("logged out");
        Ok(())
    }

    /// Download the specification document published by the gateway
    pub async fn fetch_spec(&self) -> Result<serde_json::Value, AppError> {
        let url = join(&self.connection.api_url, "gateway_api.json/")?;
        tracing::info!(%url, "downloading API specification");

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::Http(format!(
                "Specification download returned status {}",
                response.status()
            )));
        }
        Ok(response.json().await?)
    }

    /// Resolve and dispatch one call.
    ///
    /// Resolution happens before any network traffic; a resolution error never
    /// opens a session. Once logged in, logout runs whether or not the request
    /// succeeded. In check mode mutating calls are resolved but not sent.
    pub async fn invoke(
        &self,
        catalog: &ApiCatalog,
        call: &GatewayCall,
        check_mode: bool,
    ) -> Result<InvokeOutcome, AppError> {
        let request = RequestResolver::resolve_in(
            catalog,
            &call.resource,
            call.verb,
            &call.path_params,
            &call.query_params,
        )?;

        if check_mode && !call.verb.is_read() {
            tracing::info!(resource = %call.resource, path = %request.path, "check mode, request not sent");
            return Ok(mocked_outcome(&call.resource, call.verb));
        }

        self.login().await?;
        let result = self.send(&request).await;
        if let Err(e) = self.logout().await {
            tracing::warn!(error = %e, "logout failed");
        }

        let (status, json) = result?;
        Ok(InvokeOutcome {
            status: status.as_u16(),
            changed: !check_mode && (status == StatusCode::CREATED || status == StatusCode::NO_CONTENT),
            json,
        })
    }

    async fn send(&self, request: &ResolvedRequest) -> Result<(StatusCode, serde_json::Value), AppError> {
        let url = join(&self.connection.api_url, &request.path)?;
        tracing::info!(method = %request.verb.method(), %url, "sending request");

        let response = self
            .http
            .request(request.verb.method(), url)
            .json(&request.query)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let json = if text.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
        };

        Ok((status, json))
    }
}

/// Response reported for a mutating call in check mode
pub fn mocked_outcome(resource: &str, verb: Verb) -> InvokeOutcome {
    let status = match verb {
        Verb::Post => StatusCode::CREATED,
        _ => StatusCode::NO_CONTENT,
    };

    InvokeOutcome {
        status: status.as_u16(),
        changed: false,
        json: serde_json::json!({ "message": format!("No changes made to {}", resource) }),
    }
}

fn join(base: &Url, path: &str) -> Result<Url, AppError> {
    base.join(path)
        .map_err(|e| AppError::Http(format!("Invalid request URL '{}{}': {}", base, path, e)))
}
