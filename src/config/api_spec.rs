// Loading the gateway API specification into an ApiCatalog

use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use crate::{
    domain::{
        template::TemplateParser, ApiCatalog, ParamLocation, ParamSpec, ParamType,
        ResourceDefinition, TemplateDefinition,
    },
    error::{AppError, SpecResultExt},
};

/// Serialization format of a specification document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    /// YAML for `.yml`/`.yaml` files, JSON otherwise
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                SpecFormat::Yaml
            }
            _ => SpecFormat::Json,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawAction {
    #[serde(default)]
    query_parameters: BTreeMap<String, RawParam>,
    // Kept as a JSON map so templates stay in document order
    #[serde(default)]
    path_parameters: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawParam {
    name: Option<String>,
    #[serde(rename = "type")]
    param_type: Option<String>,
    #[serde(default, deserialize_with = "bool_or_string")]
    required: bool,
    #[serde(rename = "in")]
    location: Option<String>,
}

// Gateway documents write `required` as either `true` or `"true"`
fn bool_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(flag) => flag,
        Flag::Text(text) => text.trim().eq_ignore_ascii_case("true"),
    })
}

/// Read a specification file from disk
pub fn load_catalog(path: &Path) -> Result<ApiCatalog, AppError> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog(&content, SpecFormat::from_path(path))
}

/// Parse a `{"resources": {...}}` document, or a bare resources map
pub fn parse_catalog(content: &str, format: SpecFormat) -> Result<ApiCatalog, AppError> {
    let document: serde_json::Value = match format {
        SpecFormat::Json => serde_json::from_str(content).spec_err("Could not parse JSON")?,
        SpecFormat::Yaml => serde_yaml::from_str(content).spec_err("Could not parse YAML")?,
    };
    catalog_from_value(document)
}

/// Build a catalog from an already-parsed document
pub fn catalog_from_value(mut document: serde_json::Value) -> Result<ApiCatalog, AppError> {
    let resources_value = if document.get("resources").is_some() {
        document["resources"].take()
    } else {
        document
    };

    let raw: HashMap<String, HashMap<String, RawAction>> =
        serde_json::from_value(resources_value).spec_err("Unexpected document layout")?;

    let mut resources = HashMap::new();
    for (resource, actions) in raw {
        let mut definitions = HashMap::new();
        for (action, raw_action) in actions {
            let definition = build_definition(&resource, &action, raw_action)?;
            definitions.insert(action, definition);
        }
        resources.insert(resource, definitions);
    }

    tracing::debug!(resources = resources.len(), "loaded API specification");
    Ok(ApiCatalog::new(resources))
}

fn build_definition(
    resource: &str,
    action: &str,
    raw: RawAction,
) -> Result<ResourceDefinition, AppError> {
    let query_parameters = raw
        .query_parameters
        .into_iter()
        .map(|(key, param)| {
            let spec = param_spec(&key, param, ParamLocation::Query);
            (key, spec)
        })
        .collect();

    let mut path_templates = Vec::with_capacity(raw.path_parameters.len());
    for (raw_template, params_value) in raw.path_parameters {
        let template = TemplateParser::parse(&raw_template)
            .spec_err(&format!("Bad path template '{}' in {}.{}", raw_template, resource, action))?;

        let raw_params: BTreeMap<String, RawParam> = serde_json::from_value(params_value)
            .spec_err(&format!("Bad path parameters for '{}'", raw_template))?;
        let parameters: BTreeMap<String, ParamSpec> = raw_params
            .into_iter()
            .map(|(key, param)| {
                let spec = param_spec(&key, param, ParamLocation::Path);
                (key, spec)
            })
            .collect();

        let declared: BTreeSet<&str> = parameters.keys().map(String::as_str).collect();
        let placeholders: BTreeSet<&str> = template.placeholders().into_iter().collect();
        if declared != placeholders {
            tracing::warn!(
                resource,
                action,
                template = raw_template.as_str(),
                "declared path parameters differ from template placeholders; template can never match"
            );
        }

        path_templates.push(TemplateDefinition {
            template,
            parameters,
        });
    }

    Ok(ResourceDefinition {
        query_parameters,
        path_templates,
    })
}

fn param_spec(key: &str, raw: RawParam, section: ParamLocation) -> ParamSpec {
    let location = match raw.location.as_deref() {
        Some(location) if location.eq_ignore_ascii_case("path") => ParamLocation::Path,
        Some(_) => ParamLocation::Query,
        None => section,
    };

    ParamSpec {
        name: raw.name.unwrap_or_else(|| key.to_string()),
        param_type: raw
            .param_type
            .as_deref()
            .map_or(ParamType::String, ParamType::from_name),
        required: raw.required,
        location,
    }
}
