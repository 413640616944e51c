use indexmap::IndexMap;
use serde::Deserialize;

use super::operation::PathItem;

/// Top-level API schema: a mapping from URL path template to its definition.
///
/// `paths` keeps the schema's own key order, which is the order paths are
/// processed in. Order decides which path first declares a shared ancestor
/// resource, not the correctness of the result.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiSchema {
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}
