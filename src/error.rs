// Error handling for restgate

use std::fmt;

/// Why a request could not be resolved to exactly one path.
///
/// Every variant is raised before any network call is made.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionError {
    /// Resource or action missing from the API specification
    SpecLookup { resource: String, action: String },
    /// No template survived matching, or none survived verb filtering
    PathNotFound { resource: String, reason: String },
    /// More than one template survived verb filtering
    AmbiguousPath { resource: String, templates: Vec<String> },
    /// Templates with the right parameter names exist, but none in the given order
    ParameterOrder { resource: String, given: Vec<String>, templates: Vec<String> },
    /// A declared integer query parameter could not be parsed
    TypeCoercion { parameter: String, value: String },
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionError::SpecLookup { resource, action } => {
                write!(f, "No '{}' action defined for resource '{}'", action, resource)
            }
            ResolutionError::PathNotFound { resource, reason } => write!(
                f,
                "Provided parameters do not match any valid paths for '{}': {}",
                resource, reason
            ),
            ResolutionError::AmbiguousPath { resource, templates } => write!(
                f,
                "Provided parameters match more than one path for '{}': {}",
                resource,
                templates.join(", ")
            ),
            ResolutionError::ParameterOrder { resource, given, templates } => write!(
                f,
                "Path parameter order [{}] does not match any path for '{}' (candidates: {})",
                given.join(", "),
                resource,
                templates.join(", ")
            ),
            ResolutionError::TypeCoercion { parameter, value } => write!(
                f,
                "Query parameter '{}' expects an integer but got '{}'",
                parameter, value
            ),
        }
    }
}

impl std::error::Error for ResolutionError {}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    Resolution(ResolutionError),
    Config(String),
    Spec(String),
    Http(String),
    Io(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Resolution(err) => write!(f, "Resolution error: {}", err),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Spec(msg) => write!(f, "Invalid API specification: {}", msg),
            AppError::Http(msg) => write!(f, "HTTP error: {}", msg),
            AppError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Resolution(err) => Some(err),
            AppError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResolutionError> for AppError {
    fn from(err: ResolutionError) -> Self {
        AppError::Resolution(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Http(err.to_string())
    }
}

// Extension trait for spec parsing result handling
pub trait SpecResultExt<T> {
    /// Convert parse errors to AppError::Spec with the given prefix
    fn spec_err(self, what: &str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> SpecResultExt<T> for Result<T, E> {
    fn spec_err(self, what: &str) -> Result<T, AppError> {
        self.map_err(|e| AppError::Spec(format!("{}: {}", what, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_path_lists_templates() {
        let err = ResolutionError::AmbiguousPath {
            resource: "zone".to_string(),
            templates: vec!["/a/{x}/".to_string(), "/b/{x}/".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("more than one path"));
        assert!(msg.contains("/a/{x}/, /b/{x}/"));
    }

    #[test]
    fn test_resolution_error_converts_to_app_error() {
        let err: AppError = ResolutionError::TypeCoercion {
            parameter: "count".to_string(),
            value: "ten".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Resolution(ResolutionError::TypeCoercion { .. })));
        assert!(err.to_string().starts_with("Resolution error:"));
    }

    #[test]
    fn test_spec_err_prefixes_message() {
        let result: Result<(), String> = Err("boom".to_string());
        let err = result.spec_err("Could not parse spec").unwrap_err();
        assert_eq!(err.to_string(), "Invalid API specification: Could not parse spec: boom");
    }
}
