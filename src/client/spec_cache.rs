// Local cache of the gateway API specification

use std::path::{Path, PathBuf};

use super::gateway::GatewayClient;
use crate::{
    config::{catalog_from_value, load_catalog, SpecFormat},
    domain::ApiCatalog,
    error::{AppError, SpecResultExt},
};

pub const DEFAULT_SPEC_FILE: &str = "gateway_api.json";

pub struct SpecCache {
    path: PathBuf,
}

impl SpecCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached document if present
    pub fn load(&self) -> Result<Option<ApiCatalog>, AppError> {
        if !self.path.is_file() {
            return Ok(None);
        }
        tracing::debug!(path = %self.path.display(), "using cached API specification");
        load_catalog(&self.path).map(Some)
    }

    /// Use the cache, or download the document and cache it.
    ///
    /// A downloaded document is only written once it parses.
    pub async fn load_or_fetch(&self, client: &GatewayClient) -> Result<ApiCatalog, AppError> {
        if let Some(catalog) = self.load()? {
            return Ok(catalog);
        }

        let document = client.fetch_spec().await?;
        let catalog = catalog_from_value(document.clone())?;

        let content = match SpecFormat::from_path(&self.path) {
            SpecFormat::Json => serde_json::to_string(&document).spec_err("Could not serialize")?,
            SpecFormat::Yaml => serde_yaml::to_string(&document).spec_err("Could not serialize")?,
        };
        tokio::fs::write(&self.path, content).await?;
        tracing::info!(path = %self.path.display(), "cached API specification");

        Ok(catalog)
    }
}

impl Default for SpecCache {
    fn default() -> Self {
        Self::new(DEFAULT_SPEC_FILE)
    }
}
