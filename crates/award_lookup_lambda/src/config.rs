use award_lookup_core::query_params::QueryParamsSchema;

pub const AWARDS_TABLE_NAME_VAR: &str = "AWARDS_TABLE_NAME";
pub const CAST_TABLE_NAME_VAR: &str = "CAST_TABLE_NAME";
pub const REGION_VAR: &str = "REGION";
pub const QUERY_PARAMS_SCHEMA_VAR: &str = "QUERY_PARAMS_SCHEMA";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
    #[error("{name} is invalid: {message}")]
    Invalid { name: &'static str, message: String },
}

impl ConfigError {
    fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            message: message.into(),
        }
    }
}

/// Process configuration, read once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub awards_table: String,
    pub cast_table: String,
    pub region: Option<String>,
    pub query_params_schema: QueryParamsSchema,
}

impl HandlerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let optional = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let query_params_schema = optional(QUERY_PARAMS_SCHEMA_VAR)
            .map(|raw| raw.parse::<QueryParamsSchema>())
            .transpose()
            .map_err(|message| ConfigError::invalid(QUERY_PARAMS_SCHEMA_VAR, message))?
            .unwrap_or_default();

        Ok(Self {
            awards_table: required(AWARDS_TABLE_NAME_VAR)?,
            cast_table: required(CAST_TABLE_NAME_VAR)?,
            region: optional(REGION_VAR),
            query_params_schema,
        })
    }
}
