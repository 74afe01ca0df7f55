//! Config registry
//!
//! Owns a name-to-document mapping with first-wins registration, bulk
//! load/save, directory-scan registration and a shutdown flush. All
//! structural mutation serializes on one mutex per registry instance.

use crate::context::HostContext;
use crate::document::YamlDocument;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Registry of named configuration documents.
pub struct ConfigRegistry {
    ctx: Arc<HostContext>,
    extension: String,
    entries: Mutex<Vec<(String, Arc<YamlDocument>)>>,
}

impl ConfigRegistry {
    pub fn new(ctx: Arc<HostContext>) -> Self {
        Self {
            ctx,
            extension: "yml".to_owned(),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Change the file extension recognized by directory scans.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Register a document under a logical name.
    ///
    /// First-wins: when the name is already taken the existing document is
    /// returned untouched. A newly inserted document is silently loaded so
    /// its file exists and the tree is populated.
    pub fn register(&self, name: impl Into<String>, doc: YamlDocument) -> Arc<YamlDocument> {
        self.register_inner(name.into(), doc).0
    }

    fn register_inner(&self, name: String, doc: YamlDocument) -> (Arc<YamlDocument>, bool) {
        let (doc, inserted) = {
            let mut entries = self.entries.lock();
            match entries.iter().find(|(n, _)| *n == name) {
                Some((_, existing)) => (existing.clone(), false),
                None => {
                    let doc = Arc::new(doc);
                    entries.push((name, doc.clone()));
                    (doc, true)
                }
            }
        };
        if inserted {
            let _ = doc.load(false);
        }
        (doc, inserted)
    }

    /// Exact lookup by registration name.
    pub fn get(&self, name: &str) -> Option<Arc<YamlDocument>> {
        self.entries
            .lock()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, doc)| doc.clone())
    }

    /// Linear scan comparing the documents' display names
    /// case-insensitively. Registration names are not consulted.
    pub fn find(&self, name: &str) -> Option<Arc<YamlDocument>> {
        self.entries
            .lock()
            .iter()
            .find(|(_, doc)| doc.name().eq_ignore_ascii_case(name))
            .map(|(_, doc)| doc.clone())
    }

    /// Load every registered document. One document's failure does not
    /// abort the rest; failures are logged at the document.
    pub fn load_all(&self, verbose: bool) {
        for doc in self.documents() {
            let _ = doc.load(verbose);
        }
    }

    /// Save every registered document. One document's failure does not
    /// abort the rest; failures are logged at the document.
    pub fn save_all(&self, verbose: bool) {
        for doc in self.documents() {
            let _ = doc.save(verbose);
        }
    }

    /// Register one document per recognized file directly under
    /// `data_dir/rel_dir`, named by file stem. Non-recursive; other
    /// extensions and subdirectories are skipped.
    ///
    /// Returns only the entries newly added by this call. A missing or
    /// unreadable directory logs a warning and yields nothing.
    pub fn register_directory(
        &self,
        rel_dir: impl AsRef<Path>,
    ) -> Vec<(String, Arc<YamlDocument>)> {
        let rel_dir = rel_dir.as_ref();
        let mut added = Vec::new();
        for rel in scan_directory(&self.ctx, rel_dir, &self.extension) {
            let Some(stem) = rel.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let (doc, inserted) =
                self.register_inner(stem.clone(), YamlDocument::new(self.ctx.clone(), &rel));
            if inserted {
                added.push((stem, doc));
            }
        }
        added
    }

    /// Flush hook for host teardown: silently save everything, then log a
    /// single summary line. No-op when the registry is empty.
    pub fn shutdown(&self) {
        let count = self.len();
        if count == 0 {
            return;
        }
        self.save_all(false);
        info!(count, "saved configs on shutdown");
    }

    /// Snapshot of the registered documents, in registration order.
    pub fn documents(&self) -> Vec<Arc<YamlDocument>> {
        self.entries
            .lock()
            .iter()
            .map(|(_, doc)| doc.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

/// Non-recursive scan for regular files with the given extension, returned
/// as paths relative to the data directory (sorted for determinism).
pub fn scan_directory(
    ctx: &HostContext,
    rel_dir: &Path,
    extension: &str,
) -> Vec<std::path::PathBuf> {
    let dir = ctx.resolve(rel_dir);
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "directory unavailable");
            return Vec::new();
        }
    };
    let mut files: Vec<std::path::PathBuf> = entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case(extension))
                .unwrap_or(false)
        })
        .filter_map(|path| Some(rel_dir.join(path.file_name()?)))
        .collect();
    files.sort();
    files
}
