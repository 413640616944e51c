use serde::Deserialize;

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,

    /// Any location this generator does not know about.
    #[serde(other)]
    Other,
}

impl ParameterLocation {
    /// Gateway request-mapping segment for this location. Only `path`
    /// parameters are forwarded today; everything else is dropped.
    pub fn gateway_segment(self) -> Option<&'static str> {
        match self {
            ParameterLocation::Path => Some("path"),
            _ => None,
        }
    }
}

/// A declared operation parameter.
///
/// A parameter missing its name or location still deserializes; it just
/// never maps to a gateway location.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "in")]
    pub location: Option<ParameterLocation>,

    #[serde(default)]
    pub required: bool,
}

impl Parameter {
    /// Mapping segment if this parameter is usable in a gateway mapping: it
    /// must carry a name and a recognized location.
    pub fn gateway_segment(&self) -> Option<&'static str> {
        if self.name.is_empty() {
            return None;
        }
        self.location?.gateway_segment()
    }
}
