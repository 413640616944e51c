use indexmap::IndexMap;
use serde::Serialize;

use gwb_core::parse::operation::HttpVerb;

use super::reference;
use crate::{CfnResource, Declaration, DeclarationBody, DeclarationKind, ImportValue};

/// VTL template reflecting the request origin into the preflight response.
/// The `\n` sequences are part of the payload, not line breaks.
const ORIGIN_REFLECTION: &str = "#set($origin = $input.params(\"Origin\"))\\n#if($origin == \"\") #set($origin = $input.params(\"origin\")) #end\\n#set($context.responseOverride.header.Access-Control-Allow-Origin = $origin)";

const ALLOWED_HEADERS: &str =
    "'Content-Type,Accept,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token'";

/// Input for one CORS preflight declaration.
#[derive(Debug, Clone)]
pub struct CorsInput<'a> {
    pub method_name: &'a str,
    pub resource_name: &'a str,

    /// Verbs actually defined on the path, in processing order.
    pub allowed_verbs: &'a [HttpVerb],
}

#[derive(Debug, Clone, Serialize)]
pub struct CorsProperties {
    #[serde(rename = "ApiKeyRequired")]
    pub api_key_required: &'static str,

    #[serde(rename = "HttpMethod")]
    pub http_method: &'static str,

    #[serde(rename = "AuthorizationType")]
    pub authorization_type: &'static str,

    #[serde(rename = "Integration")]
    pub integration: CorsIntegration,

    #[serde(rename = "MethodResponses")]
    pub method_responses: Vec<MethodResponse>,

    #[serde(rename = "ResourceId")]
    pub resource_id: String,

    #[serde(rename = "RestApiId")]
    pub rest_api_id: ImportValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorsIntegration {
    #[serde(rename = "Type")]
    pub integration_type: &'static str,

    #[serde(rename = "IntegrationResponses")]
    pub integration_responses: Vec<IntegrationResponse>,

    #[serde(rename = "RequestTemplates")]
    pub request_templates: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntegrationResponse {
    #[serde(rename = "StatusCode")]
    pub status_code: &'static str,

    #[serde(rename = "ResponseTemplates")]
    pub response_templates: IndexMap<String, String>,

    #[serde(rename = "ResponseParameters")]
    pub response_parameters: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodResponse {
    #[serde(rename = "ResponseModels")]
    pub response_models: IndexMap<String, String>,

    #[serde(rename = "ResponseParameters")]
    pub response_parameters: IndexMap<String, bool>,

    #[serde(rename = "StatusCode")]
    pub status_code: &'static str,
}

/// Emit the preflight declaration for one path: a MOCK integration
/// answering OPTIONS with the verbs the path actually defines.
pub fn emit_cors(input: &CorsInput<'_>) -> Declaration {
    let mut response_parameters = IndexMap::new();
    response_parameters.insert(
        "method.response.header.Access-Control-Allow-Headers".to_string(),
        ALLOWED_HEADERS.to_string(),
    );
    response_parameters.insert(
        "method.response.header.Access-Control-Allow-Methods".to_string(),
        allow_methods_value(input.allowed_verbs),
    );
    response_parameters.insert(
        "method.response.header.Access-Control-Allow-Origin".to_string(),
        "'*'".to_string(),
    );
    response_parameters.insert(
        "method.response.header.Access-Control-Allow-Credentials".to_string(),
        "'true'".to_string(),
    );

    let mut response_templates = IndexMap::new();
    response_templates.insert("application/json".to_string(), ORIGIN_REFLECTION.to_string());

    let mut request_templates = IndexMap::new();
    request_templates.insert(
        "application/json".to_string(),
        "{\"statusCode\": 200}".to_string(),
    );

    let mut response_models = IndexMap::new();
    response_models.insert("application/json".to_string(), "Empty".to_string());

    let mut exposed_headers = IndexMap::new();
    for header in [
        "method.response.header.Access-Control-Allow-Headers",
        "method.response.header.Access-Control-Allow-Methods",
        "method.response.header.Access-Control-Allow-Origin",
        "method.response.header.Access-Control-Allow-Credentials",
    ] {
        exposed_headers.insert(header.to_string(), true);
    }

    Declaration {
        logical_id: input.method_name.to_string(),
        kind: DeclarationKind::Cors,
        body: DeclarationBody::Cors(CfnResource {
            resource_type: "AWS::ApiGateway::Method",
            properties: CorsProperties {
                api_key_required: "false",
                http_method: "OPTIONS",
                authorization_type: "NONE",
                integration: CorsIntegration {
                    integration_type: "MOCK",
                    integration_responses: vec![IntegrationResponse {
                        status_code: "200",
                        response_templates,
                        response_parameters,
                    }],
                    request_templates,
                },
                method_responses: vec![MethodResponse {
                    response_models,
                    response_parameters: exposed_headers,
                    status_code: "200",
                }],
                resource_id: reference(input.resource_name),
                rest_api_id: ImportValue::api_id(),
            },
        }),
    }
}

/// `'OPTIONS,GET,POST'`: the synthetic preflight verb plus every verb the
/// path defines, uppercased.
fn allow_methods_value(allowed: &[HttpVerb]) -> String {
    let mut methods = vec!["OPTIONS"];
    methods.extend(allowed.iter().map(|verb| verb.as_upper()));
    format!("'{}'", methods.join(","))
}
