// Command line surface: argument definitions and conversion of caller input

use clap::{Arg, ArgAction, ArgMatches};
use std::path::PathBuf;

use crate::{
    client::DEFAULT_SPEC_FILE,
    config::ConnectionSettings,
    domain::{PathParams, PathValue, QueryParams, QueryValue, Verb},
    error::AppError,
};

/// Everything needed for one invocation
#[derive(Debug, Clone)]
pub struct CliRequest {
    pub config_file: Option<PathBuf>,
    pub settings: ConnectionSettings,
    pub resource: String,
    pub verb: Verb,
    pub path_params: PathParams,
    pub query_params: QueryParams,
    pub spec_file: PathBuf,
    pub check_mode: bool,
}

pub fn command() -> clap::Command {
    clap::Command::new("restgate")
        .about("Resolve and send a REST call against the gateway API specification")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("CONFIG")
                .help("Path to a YAML file with connection settings"),
        )
        .arg(
            Arg::new("protocol")
                .long("protocol")
                .value_name("PROTOCOL")
                .help("http or https (default https)"),
        )
        .arg(
            Arg::new("domain")
                .long("domain")
                .value_name("DOMAIN")
                .help("Host name or IP address of the gateway"),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .value_name("VERSION")
                .help("Gateway REST API version"),
        )
        .arg(
            Arg::new("username")
                .short('u')
                .long("username")
                .value_name("USERNAME")
                .help("API user name"),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .value_name("PASSWORD")
                .env("RESTGATE_PASSWORD")
                .hide_env_values(true)
                .help("API user password"),
        )
        .arg(
            Arg::new("resource")
                .short('r')
                .long("resource")
                .value_name("RESOURCE")
                .required(true)
                .help("Resource name from the API specification"),
        )
        .arg(
            Arg::new("action")
                .short('a')
                .long("action")
                .value_name("ACTION")
                .required(true)
                .help("get, getall, post, put, patch or delete"),
        )
        .arg(
            Arg::new("resource_path")
                .long("resource-path")
                .value_name("JSON")
                .default_value("[]")
                .help("Ordered path parameters, e.g. '[{\"zone\": [\"com\", \"example\"]}]'"),
        )
        .arg(
            Arg::new("json_data")
                .long("json-data")
                .value_name("JSON")
                .default_value("{}")
                .help("Query/body parameters as a JSON object"),
        )
        .arg(
            Arg::new("spec")
                .short('s')
                .long("spec")
                .value_name("SPEC")
                .default_value(DEFAULT_SPEC_FILE)
                .help("Cached API specification; downloaded when missing"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .action(ArgAction::SetTrue)
                .help("Resolve mutating calls without sending them"),
        )
}

pub fn parse_matches(matches: &ArgMatches) -> Result<CliRequest, AppError> {
    let get = |name: &str| matches.get_one::<String>(name).cloned();

    let verb = get("action")
        .unwrap_or_default()
        .parse::<Verb>()
        .map_err(AppError::Config)?;

    Ok(CliRequest {
        config_file: get("config").map(PathBuf::from),
        settings: ConnectionSettings {
            protocol: get("protocol"),
            domain: get("domain"),
            version: get("version"),
            username: get("username"),
            password: get("password"),
            timeout_secs: None,
        },
        resource: get("resource").unwrap_or_default(),
        verb,
        path_params: parse_resource_path(&get("resource_path").unwrap_or_else(|| "[]".to_string()))?,
        query_params: parse_json_data(&get("json_data").unwrap_or_else(|| "{}".to_string()))?,
        spec_file: PathBuf::from(get("spec").unwrap_or_else(|| DEFAULT_SPEC_FILE.to_string())),
        check_mode: matches.get_flag("check"),
    })
}

/// Parse `[{"name": value}, ...]` into ordered path parameters.
///
/// A value is a scalar or a non-empty list of scalars. Numbers and booleans are
/// used in their textual form.
pub fn parse_resource_path(json: &str) -> Result<PathParams, AppError> {
    let entries: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(json)
        .map_err(|e| AppError::Config(format!("resource_path must be a list of objects: {}", e)))?;

    let mut params = PathParams::new();
    for entry in entries {
        for (name, value) in entry {
            let value = match value {
                serde_json::Value::Array(items) => {
                    if items.is_empty() {
                        return Err(AppError::Config(format!(
                            "Path parameter '{}' has an empty list",
                            name
                        )));
                    }
                    let items = items
                        .iter()
                        .map(|item| scalar_text(&name, item))
                        .collect::<Result<Vec<_>, _>>()?;
                    PathValue::List(items)
                }
                other => PathValue::Scalar(scalar_text(&name, &other)?),
            };
            params.push(name, value);
        }
    }

    Ok(params)
}

fn scalar_text(name: &str, value: &serde_json::Value) -> Result<String, AppError> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(AppError::Config(format!(
            "Path parameter '{}' must be a string, number or list, got {}",
            name, other
        ))),
    }
}

/// Parse the flat query/body object. `null` values are dropped.
pub fn parse_json_data(json: &str) -> Result<QueryParams, AppError> {
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| AppError::Config(format!("json_data must be an object: {}", e)))?;

    Ok(object
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::Bool(b) => QueryValue::Boolean(b),
                serde_json::Value::String(s) => QueryValue::Text(s),
                serde_json::Value::Number(n) if n.is_i64() => {
                    QueryValue::Integer(n.as_i64().unwrap_or_default())
                }
                other => QueryValue::Structured(other),
            };
            (key, value)
        })
        .collect())
}
