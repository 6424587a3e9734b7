// Matching caller path parameters against declared path templates

use std::collections::{BTreeSet, HashMap};

use super::params::{PathParams, PathValue};
use super::spec::{ResourceDefinition, TemplateDefinition};
use super::template::PathTemplate;

/// A template that accepted the caller's parameters, with escaped substitutions
#[derive(Debug, Clone)]
pub struct CandidateMatch<'a> {
    pub template: &'a PathTemplate,
    pub substitutions: HashMap<String, String>,
}

impl CandidateMatch<'_> {
    pub fn template_str(&self) -> &str {
        self.template.as_str()
    }

    pub fn is_item_path(&self) -> bool {
        self.template.is_item_path()
    }
}

/// Why a template was not a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Declared parameter names differ from the caller's names
    NameSetMismatch,
    /// Placeholders appear in a different order than the caller's parameters
    OrderMismatch,
    /// A declared parameter has no placeholder, or a placeholder is undeclared
    MissingPlaceholder,
    /// A list value was given but the placeholder has no `/segment/` in front of it
    ListExpansionUnsupported,
    /// A list value with no elements
    EmptyList,
    /// A value of `.` or `..`, which URL resolution would collapse
    DotSegment,
}

impl RejectReason {
    /// True when the caller's value, not the template, caused the rejection
    pub fn is_value_error(&self) -> bool {
        matches!(self, RejectReason::EmptyList | RejectReason::DotSegment)
    }
}

#[derive(Debug, Clone)]
pub struct Rejection<'a> {
    pub template: &'a PathTemplate,
    pub reason: RejectReason,
}

/// Outcome of matching one definition
#[derive(Debug, Clone, Default)]
pub struct MatchReport<'a> {
    pub candidates: Vec<CandidateMatch<'a>>,
    pub rejections: Vec<Rejection<'a>>,
}

impl MatchReport<'_> {
    /// Templates that had the caller's exact name set but the wrong placeholder order
    pub fn order_rejections(&self) -> Vec<&str> {
        self.rejections
            .iter()
            .filter(|r| r.reason == RejectReason::OrderMismatch)
            .map(|r| r.template.as_str())
            .collect()
    }

    /// First rejection caused by a bad parameter value
    pub fn value_rejection(&self) -> Option<RejectReason> {
        self.rejections
            .iter()
            .map(|r| r.reason)
            .find(RejectReason::is_value_error)
    }
}

pub struct TemplateMatcher;

impl TemplateMatcher {
    /// Find every template compatible with the caller's parameter names and order
    pub fn match_templates<'a>(
        definition: &'a ResourceDefinition,
        params: &PathParams,
    ) -> MatchReport<'a> {
        let given: BTreeSet<&str> = params.names().into_iter().collect();
        let mut report = MatchReport::default();

        for declared in &definition.path_templates {
            match Self::match_one(declared, &given, params) {
                Ok(substitutions) => report.candidates.push(CandidateMatch {
                    template: &declared.template,
                    substitutions,
                }),
                Err(reason) => {
                    tracing::debug!(template = declared.template.as_str(), ?reason, "template rejected");
                    report.rejections.push(Rejection {
                        template: &declared.template,
                        reason,
                    });
                }
            }
        }

        report
    }

    fn match_one(
        declared: &TemplateDefinition,
        given: &BTreeSet<&str>,
        params: &PathParams,
    ) -> Result<HashMap<String, String>, RejectReason> {
        if declared.parameter_names() != *given {
            return Err(RejectReason::NameSetMismatch);
        }

        let template = &declared.template;
        if template.placeholders().len() != given.len() {
            return Err(RejectReason::MissingPlaceholder);
        }

        let mut substitutions = HashMap::new();
        let mut last_position: Option<usize> = None;

        for (name, value) in params.iter() {
            let position = template
                .position_of(name)
                .ok_or(RejectReason::MissingPlaceholder)?;
            if last_position.is_some_and(|last| position <= last) {
                return Err(RejectReason::OrderMismatch);
            }
            last_position = Some(position);

            let substitution = match value {
                PathValue::Scalar(scalar) => {
                    if is_dot_segment(scalar) {
                        return Err(RejectReason::DotSegment);
                    }
                    escape_segment(scalar)
                }
                PathValue::List(items) => {
                    if items.is_empty() {
                        return Err(RejectReason::EmptyList);
                    }
                    if items.iter().any(|item| is_dot_segment(item)) {
                        return Err(RejectReason::DotSegment);
                    }
                    let segment = template
                        .segment_before(position)
                        .ok_or(RejectReason::ListExpansionUnsupported)?;
                    expand_list(segment, items)
                }
            };
            substitutions.insert(name.to_string(), substitution);
        }

        Ok(substitutions)
    }
}

/// Percent-encode one path segment. Everything outside the RFC 3986 unreserved set
/// is escaped, `/` included.
pub fn escape_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// `.`, `..` and their `%2e` spellings. URL joining removes these segments.
fn is_dot_segment(value: &str) -> bool {
    let normalized = value.to_ascii_lowercase().replace("%2e", ".");
    normalized == "." || normalized == ".."
}

/// `zone` + `[a, b, c]` becomes `a/zone/b/zone/c`
fn expand_list(segment: &str, items: &[String]) -> String {
    let mut expanded = String::new();

    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            expanded.push('/');
            expanded.push_str(segment);
            expanded.push('/');
        }
        expanded.push_str(&escape_segment(item));
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::spec::{ParamLocation, ParamSpec, ParamType};
    use crate::domain::template::TemplateParser;
    use std::collections::BTreeMap;

    fn definition(templates: &[(&str, &[&str])]) -> ResourceDefinition {
        let path_templates = templates
            .iter()
            .map(|(raw, names)| {
                let parameters: BTreeMap<String, ParamSpec> = names
                    .iter()
                    .map(|name| {
                        (
                            name.to_string(),
                            ParamSpec {
                                name: name.to_string(),
                                param_type: ParamType::String,
                                required: true,
                                location: ParamLocation::Path,
                            },
                        )
                    })
                    .collect();
                TemplateDefinition {
                    template: TemplateParser::parse(raw).unwrap(),
                    parameters,
                }
            })
            .collect();

        ResourceDefinition {
            query_parameters: BTreeMap::new(),
            path_templates,
        }
    }

    fn candidate_templates<'a>(report: &'a MatchReport<'a>) -> Vec<&'a str> {
        report.candidates.iter().map(|c| c.template_str()).collect()
    }

    #[test]
    fn test_name_set_must_match_exactly() {
        let def = definition(&[
            ("/R1/{p1}/", &["p1"]),
            ("/R1/{p1}/R2/{p2}/", &["p1", "p2"]),
        ]);
        let params = PathParams::new().with("p1", "x");

        let report = TemplateMatcher::match_templates(&def, &params);
        assert_eq!(candidate_templates(&report), vec!["/R1/{p1}/"]);
        assert_eq!(report.rejections.len(), 1);
        assert_eq!(report.rejections[0].reason, RejectReason::NameSetMismatch);
    }

    #[test]
    fn test_reverse_order_is_rejected() {
        let def = definition(&[
            ("/R1/{p1}/R2/{p2}/", &["p1", "p2"]),
            ("/R2/{p2}/R1/{p1}/", &["p1", "p2"]),
        ]);
        let params = PathParams::new().with("p2", "b").with("p1", "a");

        let report = TemplateMatcher::match_templates(&def, &params);
        assert_eq!(candidate_templates(&report), vec!["/R2/{p2}/R1/{p1}/"]);
        assert_eq!(report.order_rejections(), vec!["/R1/{p1}/R2/{p2}/"]);
    }

    #[test]
    fn test_empty_params_match_only_static_templates() {
        let def = definition(&[("/zones/", &[]), ("/zones/{zone}/", &["zone"])]);

        let report = TemplateMatcher::match_templates(&def, &PathParams::new());
        assert_eq!(candidate_templates(&report), vec!["/zones/"]);
        assert!(report.candidates[0].substitutions.is_empty());
    }

    #[test]
    fn test_scalar_values_are_escaped() {
        let def = definition(&[("/zone/{zone}/", &["zone"])]);
        let params = PathParams::new().with("zone", "my zone/1");

        let report = TemplateMatcher::match_templates(&def, &params);
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].substitutions["zone"], "my%20zone%2F1");
    }

    #[test]
    fn test_list_value_expands_segment() {
        let def = definition(&[("/zone/{zone}/", &["zone"])]);
        let params = PathParams::new().with("zone", vec!["a", "b", "c"]);

        let report = TemplateMatcher::match_templates(&def, &params);
        assert_eq!(report.candidates[0].substitutions["zone"], "a/zone/b/zone/c");
    }

    #[test]
    fn test_single_element_list_is_first_element() {
        let def = definition(&[("/zone/{zone}/", &["zone"])]);
        let params = PathParams::new().with("zone", vec!["only one"]);

        let report = TemplateMatcher::match_templates(&def, &params);
        assert_eq!(report.candidates[0].substitutions["zone"], "only%20one");
    }

    #[test]
    fn test_list_without_segment_is_rejected() {
        let def = definition(&[("/{zone}/", &["zone"])]);
        let params = PathParams::new().with("zone", vec!["a", "b"]);

        let report = TemplateMatcher::match_templates(&def, &params);
        assert!(report.candidates.is_empty());
        assert_eq!(report.rejections[0].reason, RejectReason::ListExpansionUnsupported);
    }

    #[test]
    fn test_declared_parameter_without_placeholder_is_rejected() {
        let def = definition(&[("/R1/{p1}/", &["p1", "p3"])]);
        let params = PathParams::new().with("p1", "a").with("p3", "c");

        let report = TemplateMatcher::match_templates(&def, &params);
        assert!(report.candidates.is_empty());
        assert_eq!(report.rejections[0].reason, RejectReason::MissingPlaceholder);
    }

    #[test]
    fn test_dot_segment_values_are_rejected() {
        let def = definition(&[("/zone/{zone}/", &["zone"])]);

        for value in [".", "..", "%2e", "%2E%2e", ".%2E"] {
            let params = PathParams::new().with("zone", value);
            let report = TemplateMatcher::match_templates(&def, &params);
            assert!(report.candidates.is_empty(), "{} was accepted", value);
            assert_eq!(report.value_rejection(), Some(RejectReason::DotSegment));
        }

        let params = PathParams::new().with("zone", vec!["com", ".."]);
        let report = TemplateMatcher::match_templates(&def, &params);
        assert!(report.candidates.is_empty());
        assert_eq!(report.rejections[0].reason, RejectReason::DotSegment);
    }

    #[test]
    fn test_dots_inside_a_value_are_allowed() {
        let def = definition(&[("/zone/{zone}/", &["zone"])]);
        let params = PathParams::new().with("zone", "example.com");

        let report = TemplateMatcher::match_templates(&def, &params);
        assert_eq!(report.candidates[0].substitutions["zone"], "example.com");
        assert_eq!(report.value_rejection(), None);
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let def = definition(&[("/zone/{zone}/", &["zone"])]);
        let params = PathParams::new().with("zone", Vec::<&str>::new());

        let report = TemplateMatcher::match_templates(&def, &params);
        assert!(report.candidates.is_empty());
        assert_eq!(report.value_rejection(), Some(RejectReason::EmptyList));
    }

    #[test]
    fn test_escape_segment_unreserved_passthrough() {
        assert_eq!(escape_segment("abc-_.~123"), "abc-_.~123");
        assert_eq!(escape_segment("a&b=c"), "a%26b%3Dc");
    }
}
