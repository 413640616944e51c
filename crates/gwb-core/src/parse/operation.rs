use std::fmt;

use serde::Deserialize;

use super::parameter::Parameter;

/// HTTP verbs a path definition may bind, plus the synthetic `Options` verb
/// used to name CORS preflight declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl HttpVerb {
    /// Verbs a schema may define on a path, in processing order.
    pub const SUPPORTED: [HttpVerb; 5] = [
        HttpVerb::Get,
        HttpVerb::Post,
        HttpVerb::Put,
        HttpVerb::Patch,
        HttpVerb::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpVerb::Get => "get",
            HttpVerb::Post => "post",
            HttpVerb::Put => "put",
            HttpVerb::Patch => "patch",
            HttpVerb::Delete => "delete",
            HttpVerb::Options => "options",
        }
    }

    pub fn as_upper(self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation bound to a verb on a path.
///
/// Schemas carry much more per operation (responses, descriptions, …); only
/// the fields the generator consumes are modeled, everything else is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Operation {
    /// Security requirements. Only presence matters here: a non-empty list
    /// turns on API-key enforcement for the generated method.
    #[serde(default)]
    pub security: Vec<serde_yaml_ng::Value>,

    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Operation {
    /// Whether the gateway should enforce an API key for this operation.
    pub fn needs_authentication(&self) -> bool {
        !self.security.is_empty()
    }
}

/// Definition of a single path: one optional operation per supported verb
/// plus the cross-origin opt-in flag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub post: Option<Operation>,
    pub put: Option<Operation>,
    pub patch: Option<Operation>,
    pub delete: Option<Operation>,

    /// Emit an OPTIONS preflight declaration for this path.
    #[serde(rename = "x-allow-cors", default)]
    pub allow_cors: bool,
}

impl PathItem {
    pub fn operation(&self, verb: HttpVerb) -> Option<&Operation> {
        match verb {
            HttpVerb::Get => self.get.as_ref(),
            HttpVerb::Post => self.post.as_ref(),
            HttpVerb::Put => self.put.as_ref(),
            HttpVerb::Patch => self.patch.as_ref(),
            HttpVerb::Delete => self.delete.as_ref(),
            HttpVerb::Options => None,
        }
    }

    /// Verbs actually defined on this path, in processing order.
    pub fn defined_verbs(&self) -> Vec<HttpVerb> {
        HttpVerb::SUPPORTED
            .into_iter()
            .filter(|verb| self.operation(*verb).is_some())
            .collect()
    }
}
