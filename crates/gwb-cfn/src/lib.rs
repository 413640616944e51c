pub mod builder;
pub mod emitters;
pub mod error;
pub mod pipeline;

use indexmap::IndexMap;
use serde::Serialize;

/// Kind of generated declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Resource,
    Method,
    Cors,
}

/// A CloudFormation resource body: a `Type` tag plus its `Properties`.
#[derive(Debug, Clone, Serialize)]
pub struct CfnResource<P> {
    #[serde(rename = "Type")]
    pub resource_type: &'static str,

    #[serde(rename = "Properties")]
    pub properties: P,
}

/// Body of a generated declaration.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DeclarationBody {
    Resource(CfnResource<emitters::resource::ResourceProperties>),
    Method(CfnResource<emitters::method::MethodProperties>),
    Cors(CfnResource<emitters::cors::CorsProperties>),
}

/// One generated declaration, keyed in the output by its logical id.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub logical_id: String,
    pub kind: DeclarationKind,
    pub body: DeclarationBody,
}

impl Declaration {
    /// Serialize this declaration as a standalone `logical id → body` YAML
    /// mapping fragment. Fragments are serialized independently and
    /// concatenated into the output, never merged into one document.
    pub fn to_fragment(&self) -> Result<String, serde_yaml_ng::Error> {
        let mut doc: IndexMap<&str, &DeclarationBody> = IndexMap::with_capacity(1);
        doc.insert(self.logical_id.as_str(), &self.body);
        serde_yaml_ng::to_string(&doc)
    }
}

/// An `Fn::ImportValue` intrinsic. The `!Sub` payload is opaque to the
/// generator; it only has to survive serialization verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct ImportValue {
    #[serde(rename = "Fn::ImportValue")]
    pub import: String,
}

impl ImportValue {
    /// Gateway id exported by the gateway stack.
    pub fn api_id() -> Self {
        Self {
            import: "!Sub '${ApiGatewayStackName}-ApiGatewayId'".to_string(),
        }
    }

    /// Root resource id exported by the gateway stack, the parent sentinel
    /// for first-level resources.
    pub fn root_resource_id() -> Self {
        Self {
            import: "!Sub '${ApiGatewayStackName}-ApiGatewayRootResourceId'".to_string(),
        }
    }
}
