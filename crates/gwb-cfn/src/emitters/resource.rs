use serde::Serialize;

use super::reference;
use crate::{CfnResource, Declaration, DeclarationBody, DeclarationKind, ImportValue};

/// Input for one gateway resource declaration.
#[derive(Debug, Clone)]
pub struct ResourceInput<'a> {
    pub resource_name: &'a str,

    /// Logical id of the parent resource, or `None` when the parent is the
    /// gateway root.
    pub parent_resource_name: Option<&'a str>,

    /// Literal path segment, braces intact (`{sessionId}` stays as-is).
    pub path_part: &'a str,
}

/// `ParentId` is either a reference to a generated resource or the imported
/// gateway root.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ParentId {
    Resource(String),
    Root(ImportValue),
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceProperties {
    #[serde(rename = "ParentId")]
    pub parent_id: ParentId,

    #[serde(rename = "PathPart")]
    pub path_part: String,

    #[serde(rename = "RestApiId")]
    pub rest_api_id: ImportValue,
}

/// Emit the declaration for one path segment.
pub fn emit_resource(input: &ResourceInput<'_>) -> Declaration {
    let parent_id = match input.parent_resource_name {
        Some(parent) => ParentId::Resource(reference(parent)),
        None => ParentId::Root(ImportValue::root_resource_id()),
    };

    Declaration {
        logical_id: input.resource_name.to_string(),
        kind: DeclarationKind::Resource,
        body: DeclarationBody::Resource(CfnResource {
            resource_type: "AWS::ApiGateway::Resource",
            properties: ResourceProperties {
                parent_id,
                path_part: input.path_part.to_string(),
                rest_api_id: ImportValue::api_id(),
            },
        }),
    }
}
