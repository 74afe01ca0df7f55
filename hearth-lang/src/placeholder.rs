//! Placeholder cache
//!
//! Each language document carries a `%token%` replacement map derived from
//! its reserved placeholder section. The map is marked stale whenever the
//! document (re)loads and is lazily rebuilt on the next lookup. Rebuild is
//! a pure function of the document contents, so concurrent rebuilds are
//! harmless: the last writer wins with an identical result.

use hearth_config::YamlDocument;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Lazily rebuilt `%token%` -> value map for one document.
pub struct PlaceholderCache {
    stale: AtomicBool,
    map: RwLock<BTreeMap<String, String>>,
}

impl PlaceholderCache {
    /// New cache, stale until the first rebuild.
    pub fn new() -> Self {
        Self {
            stale: AtomicBool::new(true),
            map: RwLock::new(BTreeMap::new()),
        }
    }

    /// Whether the map needs a rebuild before use.
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    /// Mark the map stale; the next lookup rebuilds it.
    pub fn mark_stale(&self) {
        self.stale.store(true, Ordering::Release);
    }

    /// Rebuild from the document's placeholder section: every immediate
    /// child key `k` with a string value `v` registers `%k%` -> `v`. An
    /// absent section leaves the map empty.
    pub fn rebuild(&self, doc: &YamlDocument, section: &str) {
        let mut next = BTreeMap::new();
        for key in doc.section_keys(section) {
            if let Some(value) = doc.get_string(&format!("{section}.{key}")) {
                next.insert(format!("%{key}%"), value);
            }
        }
        *self.map.write() = next;
        self.stale.store(false, Ordering::Release);
    }

    /// Sequential literal replacement of every token, in deterministic
    /// (lexicographic) token order.
    pub fn apply(&self, input: &str) -> String {
        let map = self.map.read();
        let mut out = input.to_owned();
        for (token, value) in map.iter() {
            out = out.replace(token.as_str(), value);
        }
        out
    }

    /// Snapshot of the current map.
    pub fn replacements(&self) -> BTreeMap<String, String> {
        self.map.read().clone()
    }
}

impl Default for PlaceholderCache {
    fn default() -> Self {
        Self::new()
    }
}
