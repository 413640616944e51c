pub mod cors;
pub mod method;
pub mod resource;

/// Build a `!Ref` intrinsic pointing at another declaration. Carried as an
/// opaque string payload, like every other intrinsic.
pub(crate) fn reference(logical_id: &str) -> String {
    format!("!Ref {logical_id}")
}
