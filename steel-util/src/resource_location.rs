/// Namespace that vanilla registry keys live in.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Removes a leading `minecraft:` from a registry key. Keys in any other namespace are returned
/// untouched; comparison is case-sensitive.
#[must_use]
pub fn strip_default_namespace(key: &str) -> &str {
    key.strip_prefix(DEFAULT_NAMESPACE)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(key)
}
