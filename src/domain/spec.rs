// Typed model of the API specification

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::template::PathTemplate;
use super::verb::Verb;
use crate::error::ResolutionError;

/// Declared semantic type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Boolean,
}

impl ParamType {
    /// Unrecognized type names are treated as strings
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" => ParamType::Integer,
            "boolean" | "bool" => ParamType::Boolean,
            _ => ParamType::String,
        }
    }
}

/// Where a parameter is sent. Body parameters travel with query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Query,
    Path,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub param_type: ParamType,
    pub required: bool,
    pub location: ParamLocation,
}

/// One declared path template and the path parameters it accepts
#[derive(Debug, Clone)]
pub struct TemplateDefinition {
    pub template: PathTemplate,
    pub parameters: BTreeMap<String, ParamSpec>,
}

impl TemplateDefinition {
    /// Declared parameter names
    pub fn parameter_names(&self) -> BTreeSet<&str> {
        self.parameters.keys().map(String::as_str).collect()
    }
}

/// Query and path parameters of one resource action
#[derive(Debug, Clone, Default)]
pub struct ResourceDefinition {
    pub query_parameters: BTreeMap<String, ParamSpec>,
    /// Templates in declaration order
    pub path_templates: Vec<TemplateDefinition>,
}

/// Every resource action of a loaded specification. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct ApiCatalog {
    resources: HashMap<String, HashMap<String, ResourceDefinition>>,
}

impl ApiCatalog {
    pub fn new(resources: HashMap<String, HashMap<String, ResourceDefinition>>) -> Self {
        let resources = resources
            .into_iter()
            .map(|(name, actions)| {
                let actions = actions
                    .into_iter()
                    .map(|(action, def)| (action.to_lowercase(), def))
                    .collect();
                (name.to_lowercase(), actions)
            })
            .collect();
        Self { resources }
    }

    /// Resource names, sorted
    pub fn resource_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.resources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up the definition used for `verb` on `resource`.
    ///
    /// `getall` shares the `get` definition. `patch` uses the `put` definition
    /// when the document declares no `patch` action.
    pub fn definition(&self, resource: &str, verb: Verb) -> Result<&ResourceDefinition, ResolutionError> {
        let action = verb.spec_action();
        self.resources
            .get(&resource.to_lowercase())
            .and_then(|actions| {
                actions.get(action).or_else(|| match verb {
                    Verb::Patch => actions.get(Verb::Put.spec_action()),
                    _ => None,
                })
            })
            .ok_or_else(|| ResolutionError::SpecLookup {
                resource: resource.to_string(),
                action: action.to_string(),
            })
    }
}
