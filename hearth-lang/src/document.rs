//! Language documents
//!
//! A [`LangDocument`] is a [`YamlDocument`] with one extra capability: a
//! placeholder cache fed from the document's reserved placeholder section
//! (default path `placeholders`). Loading marks the cache stale; the next
//! string lookup rebuilds it.

use crate::placeholder::PlaceholderCache;
use hearth_config::{HostContext, Result, YamlDocument};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

/// Default dotted path of the reserved placeholder section.
pub const DEFAULT_PLACEHOLDER_PATH: &str = "placeholders";

/// A language resource file: a YAML document plus a placeholder cache.
pub struct LangDocument {
    doc: YamlDocument,
    placeholders: PlaceholderCache,
    placeholder_path: RwLock<String>,
}

impl LangDocument {
    /// Create a language document backed by `rel` beneath the data
    /// directory, with `rel` also naming the bundled default resource.
    pub fn new(ctx: Arc<HostContext>, rel: impl AsRef<Path>) -> Self {
        let rel = rel.as_ref();
        Self::with_source(ctx, rel, rel)
    }

    /// Create a language document with a distinct bundled-resource path.
    pub fn with_source(
        ctx: Arc<HostContext>,
        source: impl AsRef<Path>,
        dest: impl AsRef<Path>,
    ) -> Self {
        Self {
            doc: YamlDocument::with_source(ctx, source, dest),
            placeholders: PlaceholderCache::new(),
            placeholder_path: RwLock::new(DEFAULT_PLACEHOLDER_PATH.to_owned()),
        }
    }

    /// Load the backing file. Always marks the placeholder cache stale,
    /// even when the load fails and the previous tree is kept.
    pub fn load(&self, verbose: bool) -> Result<()> {
        self.placeholders.mark_stale();
        self.doc.load(verbose)
    }

    /// Save the backing file.
    pub fn save(&self, verbose: bool) -> Result<()> {
        self.doc.save(verbose)
    }

    /// Rebuild the placeholder cache from the current document contents.
    pub fn rebuild_placeholders(&self) {
        let section = self.placeholder_path.read().clone();
        self.placeholders.rebuild(&self.doc, &section);
    }

    /// The placeholder cache.
    pub fn placeholders(&self) -> &PlaceholderCache {
        &self.placeholders
    }

    /// Dotted path of the reserved placeholder section.
    pub fn placeholder_path(&self) -> String {
        self.placeholder_path.read().clone()
    }

    /// Change the reserved placeholder section path and mark the cache
    /// stale so the next lookup rebuilds from the new section.
    pub fn set_placeholder_path(&self, path: impl Into<String>) {
        *self.placeholder_path.write() = path.into();
        self.placeholders.mark_stale();
    }

    /// The underlying YAML document.
    pub fn inner(&self) -> &YamlDocument {
        &self.doc
    }

    pub fn name(&self) -> &str {
        self.doc.name()
    }

    pub fn path(&self) -> &Path {
        self.doc.path()
    }

    pub fn get_string(&self, path: &str) -> Option<String> {
        self.doc.get_string(path)
    }

    pub fn set(&self, path: &str, value: impl Into<serde_yaml::Value>) {
        self.doc.set(path, value)
    }
}

impl std::fmt::Debug for LangDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LangDocument")
            .field("name", &self.doc.name())
            .field("path", &self.doc.path())
            .finish_non_exhaustive()
    }
}
