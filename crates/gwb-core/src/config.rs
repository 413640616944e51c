use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Build configuration loaded from `.gwb.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// API schema document (YAML or JSON). An absent file means the service
    /// has no custom API surface and there is nothing to build.
    pub schema: String,

    /// Base template, copied verbatim to `output` before declarations are
    /// appended.
    pub template: String,

    /// Built template location.
    pub output: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            schema: "schema.yml".to_string(),
            template: "iac/src/api-gateway.yml".to_string(),
            output: "iac/build/api-gateway.yml".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".gwb.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<BuildConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: BuildConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# gwb configuration
schema: schema.yml                  # API schema (YAML or JSON)
template: iac/src/api-gateway.yml   # base template, copied before appends
output: iac/build/api-gateway.yml   # built template
"#
}

/// Generate a starter base template for `gwb init`.
///
/// The `Resources:` block stays open: generated declarations are appended
/// nested under it.
pub fn default_template_content() -> &'static str {
    r#"AWSTemplateFormatVersion: '2010-09-09'
Description: API Gateway endpoints
Parameters:
  ApiGatewayStackName:
    Type: String
    Description: Stack exporting the gateway and root resource ids
  TargetDomain:
    Type: String
    Description: Backend domain proxied by the generated methods
Resources:
"#
}
