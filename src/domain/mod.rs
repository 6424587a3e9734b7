// Domain model and resolution engine
//
// Everything under this module is synchronous and free of I/O. The catalog is
// read-only once built and can be shared across threads.

pub mod matcher;
pub mod params;
pub mod query;
pub mod resolver;
pub mod selector;
pub mod spec;
pub mod template;
pub mod verb;

pub use matcher::{CandidateMatch, MatchReport, RejectReason, TemplateMatcher};
pub use params::{PathParams, PathValue, QueryParams, QueryValue};
pub use query::QueryParameterCoercer;
pub use resolver::{RequestResolver, ResolvedRequest};
pub use selector::CandidateSelector;
pub use spec::{ApiCatalog, ParamLocation, ParamSpec, ParamType, ResourceDefinition, TemplateDefinition};
pub use verb::{PathPolicy, Verb};
