//! Logical-name derivation for generated gateway declarations.

use crate::parse::operation::HttpVerb;

/// Prefix for gateway resource logical ids.
pub const RESOURCE_PREFIX: &str = "ApiGatewayResource";

/// Prefix for gateway method logical ids.
pub const METHOD_PREFIX: &str = "ApiGatewayMethod";

/// Derive the logical id of the resource declaration for `path`.
///
/// `/session/{sessionId}` → `ApiGatewayResourceSessionSessionId`. The same
/// id comes out whether the path carries a leading slash or not, so
/// accumulated sub-paths and full schema paths agree.
pub fn resource_name(path: &str) -> String {
    format!("{RESOURCE_PREFIX}{}", camelize(path))
}

/// Derive the logical id of the method declaration for `verb` on `path`.
///
/// (`/session`, `get`) → `ApiGatewayMethodSessionGet`. `Options` is a valid
/// synthetic verb here; CORS preflight declarations are named with it.
pub fn method_name(path: &str, verb: HttpVerb) -> String {
    format!("{METHOD_PREFIX}{}{}", camelize(path), capitalize(verb.as_str()))
}

/// Strip path-template braces, split on separators, capitalize each segment
/// and concatenate. Inner casing is preserved: `{userId}` contributes
/// `UserId`, not `Userid`. Empty segments (leading slash, root path)
/// contribute nothing.
fn camelize(path: &str) -> String {
    let stripped: String = path.chars().filter(|c| !matches!(c, '{' | '}')).collect();
    stripped.split(['/', '_', '-']).map(capitalize).collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
