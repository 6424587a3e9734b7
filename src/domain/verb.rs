use std::fmt;
use std::str::FromStr;

/// Action requested by the caller. `GetAll` is a read that selects collection paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    GetAll,
    Post,
    Put,
    Patch,
    Delete,
}

/// How the selector narrows candidates for a verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPolicy {
    /// Keep only templates ending in a static segment
    Collection,
    /// Keep only templates ending in a placeholder
    Item,
    /// No end-of-path filtering
    Any,
}

impl Verb {
    /// HTTP method sent on the wire
    pub fn method(&self) -> reqwest::Method {
        match self {
            Verb::Get | Verb::GetAll => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
            Verb::Patch => reqwest::Method::PATCH,
            Verb::Delete => reqwest::Method::DELETE,
        }
    }

    /// Action key used in the API specification
    pub fn spec_action(&self) -> &'static str {
        match self {
            Verb::Get | Verb::GetAll => "get",
            Verb::Post => "post",
            Verb::Put => "put",
            Verb::Patch => "patch",
            Verb::Delete => "delete",
        }
    }

    pub fn is_collection_request(&self) -> bool {
        matches!(self, Verb::GetAll)
    }

    pub fn is_read(&self) -> bool {
        matches!(self, Verb::Get | Verb::GetAll)
    }
}

impl PathPolicy {
    /// Collection filtering applies only to reads that explicitly asked for a collection
    pub fn for_request(verb: Verb, is_collection_request: bool) -> Self {
        match verb {
            Verb::Get | Verb::GetAll if is_collection_request => PathPolicy::Collection,
            Verb::Post => PathPolicy::Any,
            _ => PathPolicy::Item,
        }
    }
}

impl FromStr for Verb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(Verb::Get),
            "getall" => Ok(Verb::GetAll),
            "post" => Ok(Verb::Post),
            "put" => Ok(Verb::Put),
            "patch" => Ok(Verb::Patch),
            "delete" => Ok(Verb::Delete),
            other => Err(format!(
                "Unknown action '{}'. Must be one of: get, getall, post, put, patch, delete",
                other
            )),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::GetAll => write!(f, "getall"),
            other => write!(f, "{}", other.spec_action()),
        }
    }
}
