//! Unification of candidate shapes against the type registry

use tracing::debug;

use super::config::InferenceConfig;
use super::naming;
use super::registry::TypeRegistry;
use super::types::Shape;

/// Decide whether a candidate shape matches an existing registry entry,
/// widen the entry with previously-unseen fields, or fork a new qualified
/// name on conflict. Returns the canonical name the shape ended up under.
///
/// Matching consults the field-name intersection only: two shapes conflict
/// when any field present in both carries non-equivalent descriptors.
/// Fields unique to either side are merged in, which is how optional
/// fields observed in only some samples accumulate. The outcome depends
/// only on the set of fields, never on iteration order, and merging the
/// same candidate twice leaves the registry unchanged.
pub fn resolve_or_register(
    raw_name: &str,
    parent_scope: &str,
    candidate: Shape,
    registry: &mut TypeRegistry,
    config: &InferenceConfig,
) -> String {
    let renamed = match config.renames.get(raw_name) {
        Some(replacement) => {
            debug!(from = raw_name, to = %replacement, "rename override applied");
            replacement.as_str()
        }
        None => raw_name,
    };
    let key = naming::normalize(renamed, &config.package_scope);

    // Direct hit, or an entry previously forked under a parent qualifier
    // whose last segment is this key. Keys are scanned in sorted order.
    let existing_key = if registry.contains(&key) {
        Some(key.clone())
    } else {
        registry
            .keys()
            .find(|k| k.rsplit('.').next() == Some(key.as_str()))
            .map(str::to_string)
    };

    let Some(existing_key) = existing_key else {
        debug!(key = %key, "registering new type");
        registry.put(key.clone(), candidate);
        return key;
    };

    if let Some(existing) = registry.get(&existing_key) {
        if !existing.compatible_with(&candidate) {
            let forked = format!("{}.{}", naming::normalize(parent_scope, ""), key);
            debug!(key = %existing_key, forked = %forked, "shape conflict, forking");
            registry.put(forked.clone(), candidate);
            return forked;
        }
    }

    if let Some(existing) = registry.get_mut(&existing_key) {
        existing.widen_from(&candidate);
    }
    existing_key
}
