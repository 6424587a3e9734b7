// Request resolution: query coercion, template matching and candidate selection

use std::collections::BTreeMap;

use super::matcher::{RejectReason, TemplateMatcher};
use super::params::{PathParams, QueryParams, QueryValue};
use super::query::QueryParameterCoercer;
use super::selector::CandidateSelector;
use super::spec::{ApiCatalog, ResourceDefinition};
use super::verb::Verb;
use crate::error::ResolutionError;

/// A concrete request: one relative path and the typed parameters to send with it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub verb: Verb,
    /// Template the path was built from
    pub template: String,
    /// Relative path, e.g. `R1/a/R2/b/`
    pub path: String,
    pub query: BTreeMap<String, QueryValue>,
}

pub struct RequestResolver;

impl RequestResolver {
    /// Look up `resource` in the catalog and resolve against its definition
    pub fn resolve_in(
        catalog: &ApiCatalog,
        resource: &str,
        verb: Verb,
        path_params: &PathParams,
        query_params: &QueryParams,
    ) -> Result<ResolvedRequest, ResolutionError> {
        let definition = catalog.definition(resource, verb)?;
        Self::resolve(resource, definition, path_params, query_params, verb)
    }

    /// Resolve one request. Nothing is returned unless every stage succeeds.
    pub fn resolve(
        resource: &str,
        definition: &ResourceDefinition,
        path_params: &PathParams,
        query_params: &QueryParams,
        verb: Verb,
    ) -> Result<ResolvedRequest, ResolutionError> {
        let query = QueryParameterCoercer::coerce(definition, query_params)?;

        let report = TemplateMatcher::match_templates(definition, path_params);
        tracing::debug!(
            resource,
            candidates = report.candidates.len(),
            rejected = report.rejections.len(),
            "matched path templates"
        );

        if report.candidates.is_empty() {
            let misordered = report.order_rejections();
            if !misordered.is_empty() {
                return Err(ResolutionError::ParameterOrder {
                    resource: resource.to_string(),
                    given: path_params.names().iter().map(|n| n.to_string()).collect(),
                    templates: misordered.iter().map(|t| t.to_string()).collect(),
                });
            }
            let reason = match report.value_rejection() {
                Some(RejectReason::EmptyList) => "a list path parameter has no elements".to_string(),
                Some(RejectReason::DotSegment) => {
                    "'.' and '..' are not valid path parameter values".to_string()
                }
                _ => format!(
                    "no path accepts parameters [{}]",
                    path_params.names().join(", ")
                ),
            };
            return Err(ResolutionError::PathNotFound {
                resource: resource.to_string(),
                reason,
            });
        }

        let selected = CandidateSelector::select(
            resource,
            report.candidates,
            verb,
            verb.is_collection_request(),
        )?;

        let rendered = selected.template.render(&selected.substitutions).ok_or_else(|| {
            ResolutionError::PathNotFound {
                resource: resource.to_string(),
                reason: format!("'{}' has an unfilled placeholder", selected.template_str()),
            }
        })?;

        let trimmed = rendered.trim_matches('/');
        let path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("{}/", trimmed)
        };

        tracing::debug!(resource, template = selected.template_str(), path = %path, "resolved request path");

        Ok(ResolvedRequest {
            verb,
            template: selected.template_str().to_string(),
            path,
            query,
        })
    }
}
