// Coercing caller query values to their declared types

use std::collections::BTreeMap;

use super::params::{QueryParams, QueryValue};
use super::spec::{ParamType, ResourceDefinition};
use crate::error::ResolutionError;

pub struct QueryParameterCoercer;

impl QueryParameterCoercer {
    /// Typed values for every declared query parameter the caller supplied.
    ///
    /// Declared but absent parameters are left out; undeclared keys are ignored.
    pub fn coerce(
        definition: &ResourceDefinition,
        supplied: &QueryParams,
    ) -> Result<BTreeMap<String, QueryValue>, ResolutionError> {
        let mut coerced = BTreeMap::new();

        for (name, spec) in &definition.query_parameters {
            let Some(value) = supplied.get(name) else {
                continue;
            };
            let value = match spec.param_type {
                ParamType::Boolean => coerce_boolean(value),
                ParamType::Integer => coerce_integer(name, value)?,
                ParamType::String => value.clone(),
            };
            coerced.insert(name.clone(), value);
        }

        Ok(coerced)
    }
}

fn coerce_boolean(value: &QueryValue) -> QueryValue {
    match value {
        QueryValue::Text(text) => QueryValue::Boolean(text.eq_ignore_ascii_case("true")),
        other => other.clone(),
    }
}

fn coerce_integer(name: &str, value: &QueryValue) -> Result<QueryValue, ResolutionError> {
    match value {
        QueryValue::Text(text) => text
            .trim()
            .parse::<i64>()
            .map(QueryValue::Integer)
            .map_err(|_| ResolutionError::TypeCoercion {
                parameter: name.to_string(),
                value: text.clone(),
            }),
        QueryValue::Integer(n) => Ok(QueryValue::Integer(*n)),
        QueryValue::Boolean(b) => Ok(QueryValue::Integer(i64::from(*b))),
        QueryValue::Structured(other) => Err(ResolutionError::TypeCoercion {
            parameter: name.to_string(),
            value: other.to_string(),
        }),
    }
}
