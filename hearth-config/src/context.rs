//! Host environment handle
//!
//! The host runtime supplies a data directory for on-disk documents and a
//! source for bundled default resources. Both are captured in a
//! [`HostContext`] constructed once at process start and injected into every
//! registry that needs it.

use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Read access to default resources bundled with the host plugin.
///
/// When a document's backing file does not yet exist on disk, the registry
/// copies the same-named bundled resource to the destination; if the source
/// has no such resource, an empty file is created instead.
pub trait ResourceSource: Send + Sync {
    /// Returns the raw bytes of the bundled resource at `rel`, if present.
    fn open(&self, rel: &Path) -> Option<Vec<u8>>;
}

/// A source with no bundled resources.
#[derive(Debug, Default)]
pub struct NoResources;

impl ResourceSource for NoResources {
    fn open(&self, _rel: &Path) -> Option<Vec<u8>> {
        None
    }
}

/// Bundled resources unpacked beneath a directory on disk.
#[derive(Debug)]
pub struct DirResources(pub PathBuf);

impl ResourceSource for DirResources {
    fn open(&self, rel: &Path) -> Option<Vec<u8>> {
        std::fs::read(self.0.join(rel)).ok()
    }
}

static CONTEXT: OnceCell<Arc<HostContext>> = OnceCell::new();

/// Handle to the host environment.
pub struct HostContext {
    data_dir: PathBuf,
    resources: Box<dyn ResourceSource>,
}

impl HostContext {
    /// Create a standalone context.
    ///
    /// Prefer [`HostContext::init`] for the process-wide handle; standalone
    /// contexts are for embedding multiple isolated roots (and tests).
    pub fn new(
        data_dir: impl Into<PathBuf>,
        resources: Box<dyn ResourceSource>,
    ) -> Arc<HostContext> {
        Arc::new(HostContext {
            data_dir: data_dir.into(),
            resources,
        })
    }

    /// Initialize the process-wide context.
    ///
    /// Idempotent: if a context was already initialized, the existing handle
    /// is returned and the arguments are dropped.
    pub fn init(
        data_dir: impl Into<PathBuf>,
        resources: Box<dyn ResourceSource>,
    ) -> Arc<HostContext> {
        CONTEXT
            .get_or_init(|| HostContext::new(data_dir, resources))
            .clone()
    }

    /// Returns the process-wide context.
    ///
    /// # Panics
    ///
    /// Panics if [`HostContext::init`] has not been called. Accessing the
    /// context before initialization is a programmer error, not a runtime
    /// condition.
    pub fn current() -> Arc<HostContext> {
        match Self::try_current() {
            Some(ctx) => ctx,
            None => panic!("HostContext has not been initialized; call HostContext::init first"),
        }
    }

    /// Returns the process-wide context, or `None` before initialization.
    pub fn try_current() -> Option<Arc<HostContext>> {
        CONTEXT.get().cloned()
    }

    /// The host data directory all relative document paths resolve under.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Resolve a path beneath the data directory.
    ///
    /// Paths already under the data directory pass through unchanged.
    pub fn resolve(&self, rel: impl AsRef<Path>) -> PathBuf {
        let rel = rel.as_ref();
        if rel.starts_with(&self.data_dir) {
            rel.to_path_buf()
        } else {
            self.data_dir.join(rel)
        }
    }

    /// Read a bundled default resource.
    pub fn resource(&self, rel: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.resources.open(rel.as_ref())
    }
}

impl std::fmt::Debug for HostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContext")
            .field("data_dir", &self.data_dir)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_joins_relative_paths() {
        let ctx = HostContext::new("/srv/plugin", Box::new(NoResources));
        assert_eq!(
            ctx.resolve("lang/en.yml"),
            PathBuf::from("/srv/plugin/lang/en.yml")
        );
    }

    #[test]
    fn resolve_passes_through_data_dir_paths() {
        let ctx = HostContext::new("/srv/plugin", Box::new(NoResources));
        assert_eq!(
            ctx.resolve("/srv/plugin/config.yml"),
            PathBuf::from("/srv/plugin/config.yml")
        );
    }

    #[test]
    fn init_is_idempotent() {
        let first = HostContext::init("/srv/one", Box::new(NoResources));
        let second = HostContext::init("/srv/two", Box::new(NoResources));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.data_dir(), Path::new("/srv/one"));
    }

    #[test]
    fn dir_resources_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.yml"), "a: 1\n").unwrap();
        let source = DirResources(dir.path().to_path_buf());
        assert_eq!(
            source.open(Path::new("default.yml")),
            Some(b"a: 1\n".to_vec())
        );
        assert_eq!(source.open(Path::new("missing.yml")), None);
    }
}
