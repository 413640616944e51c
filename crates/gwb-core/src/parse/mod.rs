pub mod operation;
pub mod parameter;
pub mod schema;

use crate::error::ParseError;
use schema::ApiSchema;

/// Parse an API schema from YAML.
pub fn from_yaml(input: &str) -> Result<ApiSchema, ParseError> {
    Ok(serde_yaml_ng::from_str(input)?)
}

/// Parse an API schema from JSON.
pub fn from_json(input: &str) -> Result<ApiSchema, ParseError> {
    Ok(serde_json::from_str(input)?)
}
