extern crate clap;

pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;

use cli::CliRequest;
use client::{GatewayCall, GatewayClient, InvokeOutcome, SpecCache};
use config::ConnectionSettings;
use error::AppError;

/// Run one call end to end: settings, specification, resolution, dispatch
pub async fn run(request: CliRequest) -> Result<InvokeOutcome, AppError> {
    let file_settings = match &request.config_file {
        Some(path) => ConnectionSettings::from_yaml_file(path)?,
        None => ConnectionSettings::default(),
    };
    let connection = file_settings.merge(request.settings).resolve()?;
    let client = GatewayClient::new(connection)?;

    let catalog = SpecCache::new(&request.spec_file)
        .load_or_fetch(&client)
        .await?;

    let call = GatewayCall {
        resource: request.resource,
        verb: request.verb,
        path_params: request.path_params,
        query_params: request.query_params,
    };

    client.invoke(&catalog, &call, request.check_mode).await
}
