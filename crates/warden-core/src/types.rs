//! Shared collection aliases.

/// FxHash-backed map, used wherever key order does not matter.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// FxHash-backed set.
pub type FxHashSet<T> = rustc_hash::FxHashSet<T>;
