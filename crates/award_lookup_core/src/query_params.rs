use std::str::FromStr;

use serde_json::{Map, Value};

pub const MOVIE_QUERY_PARAMS_SCHEMA: &str = "MovieQueryParams";
pub const UNCONSTRAINED_SCHEMA: &str = "none";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("query parameters are missing")]
    Missing,
    #[error("query parameter '{0}' is required")]
    Required(&'static str),
    #[error("query parameter '{name}' must be {expected}")]
    InvalidType {
        name: &'static str,
        expected: &'static str,
    },
}

/// Query string shape that unlocks the cast listing.
///
/// Values arrive as strings from the HTTP layer, so primitives are coerced:
/// `movieId=12` is accepted as an integer, and numeric or boolean names are
/// accepted as strings. Unknown parameters are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQueryParams {
    pub movie_id: u64,
    pub actor_name: Option<String>,
    pub role_name: Option<String>,
}

impl MovieQueryParams {
    pub fn from_query(params: &Map<String, Value>) -> Result<Self, ValidationError> {
        let movie_id = match params.get("movieId") {
            Some(value) => coerce_integer(value, "movieId")?,
            None => return Err(ValidationError::Required("movieId")),
        };

        Ok(Self {
            movie_id,
            actor_name: optional_string(params, "actorName")?,
            role_name: optional_string(params, "roleName")?,
        })
    }
}

fn coerce_integer(value: &Value, name: &'static str) -> Result<u64, ValidationError> {
    let invalid = || ValidationError::InvalidType {
        name,
        expected: "an integer",
    };
    match value {
        Value::Number(number) => number.as_u64().ok_or_else(invalid),
        Value::String(raw) => raw.trim().parse::<u64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn optional_string(
    params: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<String>, ValidationError> {
    match params.get(name) {
        None => Ok(None),
        Some(Value::String(raw)) => Ok(Some(raw.clone())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(Value::Null) => Ok(Some(String::new())),
        Some(_) => Err(ValidationError::InvalidType {
            name,
            expected: "a string",
        }),
    }
}

/// Decides whether a request's query parameters unlock the cast listing.
pub trait QueryParamsValidator: Send + Sync {
    fn is_valid(&self, params: Option<&Map<String, Value>>) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MovieQueryParamsValidator;

impl QueryParamsValidator for MovieQueryParamsValidator {
    fn is_valid(&self, params: Option<&Map<String, Value>>) -> bool {
        params
            .ok_or(ValidationError::Missing)
            .and_then(MovieQueryParams::from_query)
            .is_ok()
    }
}

/// Accepts everything, including absent query parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconstrainedValidator;

impl QueryParamsValidator for UnconstrainedValidator {
    fn is_valid(&self, _params: Option<&Map<String, Value>>) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryParamsSchema {
    #[default]
    MovieQueryParams,
    Unconstrained,
}

impl QueryParamsSchema {
    pub fn validator(self) -> Box<dyn QueryParamsValidator> {
        match self {
            Self::MovieQueryParams => Box::new(MovieQueryParamsValidator),
            Self::Unconstrained => Box::new(UnconstrainedValidator),
        }
    }
}

impl FromStr for QueryParamsSchema {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            MOVIE_QUERY_PARAMS_SCHEMA => Ok(Self::MovieQueryParams),
            value if value.eq_ignore_ascii_case(UNCONSTRAINED_SCHEMA) => Ok(Self::Unconstrained),
            other => Err(format!(
                "Unsupported query params schema '{other}' (expected {MOVIE_QUERY_PARAMS_SCHEMA} or {UNCONSTRAINED_SCHEMA})"
            )),
        }
    }
}
