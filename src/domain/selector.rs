// Narrowing matched templates down to exactly one

use super::matcher::CandidateMatch;
use super::verb::{PathPolicy, Verb};
use crate::error::ResolutionError;

pub struct CandidateSelector;

impl CandidateSelector {
    /// Apply the verb's end-of-path policy and require a unique survivor
    pub fn select<'a>(
        resource: &str,
        candidates: Vec<CandidateMatch<'a>>,
        verb: Verb,
        is_collection_request: bool,
    ) -> Result<CandidateMatch<'a>, ResolutionError> {
        let policy = PathPolicy::for_request(verb, is_collection_request);
        let matched = candidates.len();

        let mut remaining: Vec<CandidateMatch<'a>> = candidates
            .into_iter()
            .filter(|candidate| match policy {
                PathPolicy::Collection => !candidate.is_item_path(),
                PathPolicy::Item => candidate.is_item_path(),
                PathPolicy::Any => true,
            })
            .collect();

        tracing::debug!(resource, %verb, ?policy, matched, remaining = remaining.len(), "filtered candidates");

        match remaining.len() {
            0 => Err(ResolutionError::PathNotFound {
                resource: resource.to_string(),
                reason: match policy {
                    PathPolicy::Collection => format!(
                        "{} matching path(s), none of them a collection path",
                        matched
                    ),
                    PathPolicy::Item => format!(
                        "{} matching path(s), none of them addresses a single item",
                        matched
                    ),
                    PathPolicy::Any => "no matching paths".to_string(),
                },
            }),
            1 => Ok(remaining.remove(0)),
            _ => Err(ResolutionError::AmbiguousPath {
                resource: resource.to_string(),
                templates: remaining
                    .iter()
                    .map(|candidate| candidate.template_str().to_string())
                    .collect(),
            }),
        }
    }
}
