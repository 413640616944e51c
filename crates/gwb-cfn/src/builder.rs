use std::collections::HashSet;

use gwb_core::naming;
use gwb_core::parse::operation::{HttpVerb, PathItem};
use gwb_core::parse::schema::ApiSchema;

use crate::Declaration;
use crate::emitters::cors::{CorsInput, emit_cors};
use crate::emitters::method::{MethodInput, emit_method};
use crate::emitters::resource::{ResourceInput, emit_resource};

/// Walks an API schema and produces gateway declarations in dependency
/// order.
///
/// The builder owns the per-invocation dedup state: a resource shared by
/// several paths is declared exactly once, by whichever path reaches it
/// first. A fresh builder starts clean, so repeated builds never bleed
/// state into each other.
#[derive(Debug, Default)]
pub struct DeclarationBuilder {
    created_resources: HashSet<String>,
    created_methods: HashSet<String>,
}

impl DeclarationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate every declaration for `schema`, in emission order.
    pub fn build(&mut self, schema: &ApiSchema) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        for (path, item) in &schema.paths {
            self.build_path(&mut declarations, path, item);
        }
        declarations
    }

    fn build_path(&mut self, out: &mut Vec<Declaration>, path: &str, item: &PathItem) {
        self.build_resources(out, path);
        self.build_methods(out, path, item);
    }

    /// Emit the not-yet-declared ancestor chain for `path`, parents first.
    ///
    /// Walking prefixes shortest-first is what guarantees a parent is
    /// always declared before anything that references it: a shared prefix
    /// either gets declared right here or was already declared by an
    /// earlier path.
    fn build_resources(&mut self, out: &mut Vec<Declaration>, path: &str) {
        let mut parts: Vec<&str> = Vec::new();

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let parent_path = parts.join("/");
            parts.push(segment);
            let resource_path = parts.join("/");

            let resource_name = naming::resource_name(&resource_path);
            if !self.created_resources.insert(resource_name.clone()) {
                // Shared prefix, declared by an earlier path.
                continue;
            }

            let parent_resource_name =
                (!parent_path.is_empty()).then(|| naming::resource_name(&parent_path));

            log::debug!("declaring resource {resource_name}");
            out.push(emit_resource(&ResourceInput {
                resource_name: &resource_name,
                parent_resource_name: parent_resource_name.as_deref(),
                path_part: segment,
            }));
        }
    }

    /// Emit one method declaration per defined verb, plus the preflight
    /// declaration when the path opts into CORS. Methods are never
    /// deduplicated; (path, verb) is unique because schema paths are
    /// unique keys.
    fn build_methods(&mut self, out: &mut Vec<Declaration>, path: &str, item: &PathItem) {
        let resource_name = naming::resource_name(path);
        let mut allowed_verbs = Vec::new();

        for verb in HttpVerb::SUPPORTED {
            let Some(operation) = item.operation(verb) else {
                continue;
            };

            let method_name = naming::method_name(path, verb);
            log::debug!("declaring method {method_name}");
            out.push(emit_method(&MethodInput {
                api_path: path,
                verb,
                method_name: &method_name,
                resource_name: &resource_name,
                needs_authentication: operation.needs_authentication(),
                parameters: &operation.parameters,
            }));
            self.created_methods.insert(method_name);

            if item.allow_cors {
                allowed_verbs.push(verb);
            }
        }

        if item.allow_cors {
            let method_name = naming::method_name(path, HttpVerb::Options);
            log::debug!("declaring preflight {method_name}");
            out.push(emit_cors(&CorsInput {
                method_name: &method_name,
                resource_name: &resource_name,
                allowed_verbs: &allowed_verbs,
            }));
            self.created_methods.insert(method_name);
        }
    }

    /// Resource logical ids declared so far.
    pub fn created_resources(&self) -> &HashSet<String> {
        &self.created_resources
    }

    /// Method logical ids declared so far, preflight ones included.
    pub fn created_methods(&self) -> &HashSet<String> {
        &self.created_methods
    }
}
