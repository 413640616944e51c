use indexmap::IndexMap;
use serde::Serialize;

use gwb_core::parse::operation::HttpVerb;
use gwb_core::parse::parameter::Parameter;

use super::reference;
use crate::{CfnResource, Declaration, DeclarationBody, DeclarationKind, ImportValue};

/// Input for one gateway method declaration.
#[derive(Debug, Clone)]
pub struct MethodInput<'a> {
    pub api_path: &'a str,
    pub verb: HttpVerb,
    pub method_name: &'a str,
    pub resource_name: &'a str,
    pub needs_authentication: bool,
    pub parameters: &'a [Parameter],
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodProperties {
    #[serde(rename = "ApiKeyRequired")]
    pub api_key_required: &'static str,

    #[serde(rename = "HttpMethod")]
    pub http_method: &'static str,

    #[serde(rename = "AuthorizationType")]
    pub authorization_type: &'static str,

    #[serde(rename = "Integration")]
    pub integration: Integration,

    #[serde(rename = "RequestParameters", skip_serializing_if = "Option::is_none")]
    pub request_parameters: Option<IndexMap<String, bool>>,

    #[serde(rename = "ResourceId")]
    pub resource_id: String,

    #[serde(rename = "RestApiId")]
    pub rest_api_id: ImportValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct Integration {
    #[serde(rename = "IntegrationHttpMethod")]
    pub integration_http_method: &'static str,

    #[serde(rename = "Type")]
    pub integration_type: &'static str,

    #[serde(rename = "Uri")]
    pub uri: String,

    #[serde(rename = "RequestParameters", skip_serializing_if = "Option::is_none")]
    pub request_parameters: Option<IndexMap<String, String>>,
}

/// Emit the declaration for one verb on one path.
pub fn emit_method(input: &MethodInput<'_>) -> Declaration {
    Declaration {
        logical_id: input.method_name.to_string(),
        kind: DeclarationKind::Method,
        body: DeclarationBody::Method(CfnResource {
            resource_type: "AWS::ApiGateway::Method",
            properties: MethodProperties {
                api_key_required: if input.needs_authentication { "true" } else { "false" },
                http_method: input.verb.as_upper(),
                authorization_type: "NONE",
                integration: Integration {
                    integration_http_method: input.verb.as_upper(),
                    integration_type: "HTTP_PROXY",
                    uri: format!("!Sub '${{TargetDomain}}/api{}'", input.api_path),
                    request_parameters: integration_parameters(input.parameters),
                },
                request_parameters: request_parameters(input.parameters),
                resource_id: reference(input.resource_name),
                rest_api_id: ImportValue::api_id(),
            },
        }),
    }
}

/// `method.request.<loc>.<name>` → required flag, for every mappable
/// parameter. `None` when nothing maps, so the block is omitted instead of
/// emitted empty.
fn request_parameters(parameters: &[Parameter]) -> Option<IndexMap<String, bool>> {
    let map: IndexMap<String, bool> = parameters
        .iter()
        .filter_map(|p| {
            let segment = p.gateway_segment()?;
            Some((format!("method.request.{segment}.{}", p.name), p.required))
        })
        .collect();

    (!map.is_empty()).then_some(map)
}

/// `integration.request.<loc>.<name>` → pass-through from the request-side
/// key.
fn integration_parameters(parameters: &[Parameter]) -> Option<IndexMap<String, String>> {
    let map: IndexMap<String, String> = parameters
        .iter()
        .filter_map(|p| {
            let segment = p.gateway_segment()?;
            Some((
                format!("integration.request.{segment}.{}", p.name),
                format!("method.request.{segment}.{}", p.name),
            ))
        })
        .collect();

    (!map.is_empty()).then_some(map)
}
