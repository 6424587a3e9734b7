// Caller-supplied parameter values

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value of one path parameter
#[derive(Debug, Clone, PartialEq)]
pub enum PathValue {
    Scalar(String),
    /// Non-empty; each extra element repeats the segment in front of the placeholder
    List(Vec<String>),
}

impl From<&str> for PathValue {
    fn from(value: &str) -> Self {
        PathValue::Scalar(value.to_string())
    }
}

impl From<String> for PathValue {
    fn from(value: String) -> Self {
        PathValue::Scalar(value)
    }
}

impl From<Vec<&str>> for PathValue {
    fn from(values: Vec<&str>) -> Self {
        PathValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Path parameters in the order the caller gave them.
///
/// The order is significant: it must match the left-to-right placeholder order of
/// the template that gets picked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathParams {
    entries: Vec<(String, PathValue)>,
}

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. A repeated name replaces the earlier value in place.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<PathValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<PathValue>) -> Self {
        self.push(name, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A query or body value, either raw text from the caller or already typed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Boolean(bool),
    Integer(i64),
    Text(String),
    Structured(serde_json::Value),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Boolean(value)
    }
}

pub type QueryParams = HashMap<String, QueryValue>;
