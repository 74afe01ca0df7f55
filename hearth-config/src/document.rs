//! YAML-backed documents
//!
//! A [`YamlDocument`] is an in-memory key-value tree addressed by dotted
//! paths and backed by a file beneath the host data directory. Loading and
//! saving never propagate file-level failures to bulk callers; they are
//! logged where they occur and the previous in-memory (load) or on-disk
//! (save) state is kept.

use crate::context::HostContext;
use crate::error::{ConfigError, Result};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// An in-memory YAML mapping backed by a file on disk.
///
/// Documents are shared as `Arc<YamlDocument>`; the tree itself sits behind
/// an `RwLock`, so concurrent readers do not block each other while a load
/// replaces the tree.
pub struct YamlDocument {
    name: String,
    source_path: PathBuf,
    dest_path: PathBuf,
    ctx: Arc<HostContext>,
    root: RwLock<Value>,
}

impl YamlDocument {
    /// Create a document whose bundled-resource path and destination path
    /// are the same relative path beneath the data directory.
    pub fn new(ctx: Arc<HostContext>, rel: impl AsRef<Path>) -> Self {
        let rel = rel.as_ref();
        Self::with_source(ctx, rel, rel)
    }

    /// Create a document with a distinct bundled-resource path.
    ///
    /// `source` is the relative path of the default resource inside the host
    /// bundle; `dest` is resolved beneath the data directory.
    pub fn with_source(
        ctx: Arc<HostContext>,
        source: impl AsRef<Path>,
        dest: impl AsRef<Path>,
    ) -> Self {
        let dest = dest.as_ref();
        let name = dest
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            source_path: source.as_ref().to_path_buf(),
            dest_path: ctx.resolve(dest),
            ctx,
            root: RwLock::new(Value::Mapping(Mapping::new())),
        }
    }

    /// Display name of the document: the destination file stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path of the backing file.
    pub fn path(&self) -> &Path {
        &self.dest_path
    }

    /// Create the backing file if it does not exist yet, copying the
    /// same-named bundled resource when one is available and writing an
    /// empty file otherwise.
    pub fn ensure_file(&self) -> Result<()> {
        if self.dest_path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.dest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        match self.ctx.resource(&self.source_path) {
            Some(bytes) => fs::write(&self.dest_path, bytes)?,
            None => fs::write(&self.dest_path, [])?,
        }
        Ok(())
    }

    /// Load the backing file, replacing the in-memory tree.
    ///
    /// A parse or I/O failure is logged and leaves the previous in-memory
    /// state untouched. The error is still returned for single-document
    /// callers; bulk operations discard it.
    pub fn load(&self, verbose: bool) -> Result<()> {
        match self.try_load() {
            Ok(()) => {
                if verbose {
                    info!(name = %self.name, "loaded data");
                }
                Ok(())
            }
            Err(e) => {
                warn!(name = %self.name, "error loading data");
                error!(name = %self.name, error = %e, "load failed");
                Err(e)
            }
        }
    }

    fn try_load(&self) -> Result<()> {
        self.ensure_file()?;
        let text = fs::read_to_string(&self.dest_path)?;
        let parsed: Value = serde_yaml::from_str(&text)?;
        let tree = match parsed {
            // An empty or comment-only file parses to null.
            Value::Null => Value::Mapping(Mapping::new()),
            other => other,
        };
        *self.root.write() = tree;
        Ok(())
    }

    /// Save the in-memory tree to the backing file.
    ///
    /// A failure is logged and leaves the on-disk file unchanged.
    pub fn save(&self, verbose: bool) -> Result<()> {
        match self.try_save() {
            Ok(()) => {
                if verbose {
                    info!(name = %self.name, "saved data");
                }
                Ok(())
            }
            Err(e) => {
                warn!(name = %self.name, "error saving data");
                error!(name = %self.name, error = %e, "save failed");
                Err(e)
            }
        }
    }

    fn try_save(&self) -> Result<()> {
        if let Some(parent) = self.dest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_yaml::to_string(&*self.root.read())?;
        fs::write(&self.dest_path, text)?;
        Ok(())
    }

    /// Insert every dotted key from the bundled default resource that is
    /// absent from the current tree, preserving existing values.
    pub fn merge_defaults(&self) -> Result<()> {
        let Some(bytes) = self.ctx.resource(&self.source_path) else {
            return Ok(());
        };
        let text = String::from_utf8_lossy(&bytes);
        let defaults: Value = serde_yaml::from_str(&text)?;
        let mut root = self.root.write();
        merge_missing(&mut root, &defaults);
        Ok(())
    }

    /// Get a clone of the value at a dotted path.
    pub fn get(&self, path: &str) -> Option<Value> {
        lookup(&self.root.read(), path).cloned()
    }

    /// Get the string value at a dotted path.
    pub fn get_string(&self, path: &str) -> Option<String> {
        let root = self.root.read();
        lookup(&root, path)?.as_str().map(str::to_owned)
    }

    /// Get the boolean value at a dotted path.
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        lookup(&self.root.read(), path)?.as_bool()
    }

    /// Get the integer value at a dotted path.
    pub fn get_i64(&self, path: &str) -> Option<i64> {
        lookup(&self.root.read(), path)?.as_i64()
    }

    /// Get the float value at a dotted path.
    pub fn get_f64(&self, path: &str) -> Option<f64> {
        lookup(&self.root.read(), path)?.as_f64()
    }

    /// Deserialize the value at a dotted path into a typed value.
    ///
    /// Errors with [`ConfigError::KeyNotFound`] when the path is absent and
    /// [`ConfigError::Yaml`] when the value does not fit `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self
            .get(path)
            .ok_or_else(|| ConfigError::KeyNotFound(path.to_owned()))?;
        Ok(serde_yaml::from_value(value)?)
    }

    /// Like [`get_string`](Self::get_string) but distinguishing a missing
    /// key from a non-string value.
    pub fn require_string(&self, path: &str) -> Result<String> {
        let root = self.root.read();
        let node = lookup(&root, path).ok_or_else(|| ConfigError::KeyNotFound(path.to_owned()))?;
        node.as_str()
            .map(str::to_owned)
            .ok_or_else(|| ConfigError::WrongType {
                path: path.to_owned(),
                expected: "string",
            })
    }

    /// Whether any value exists at a dotted path.
    pub fn contains(&self, path: &str) -> bool {
        lookup(&self.root.read(), path).is_some()
    }

    /// Immediate string keys of the mapping at a dotted path,
    /// non-recursive. Empty when the path is absent or not a mapping.
    pub fn section_keys(&self, path: &str) -> Vec<String> {
        let root = self.root.read();
        let node = if path.is_empty() {
            Some(&*root)
        } else {
            lookup(&root, path)
        };
        match node.and_then(Value::as_mapping) {
            Some(map) => map
                .keys()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Set the value at a dotted path, creating intermediate mappings.
    ///
    /// Non-mapping intermediates are replaced by mappings.
    pub fn set(&self, path: &str, value: impl Into<Value>) {
        let mut root = self.root.write();
        let mut parts: Vec<&str> = path.split('.').collect();
        let Some(last) = parts.pop() else {
            return;
        };
        let mut node: &mut Value = &mut root;
        for seg in parts {
            let map = ensure_mapping(node);
            node = map
                .entry(Value::String(seg.to_owned()))
                .or_insert_with(|| Value::Mapping(Mapping::new()));
        }
        ensure_mapping(node).insert(Value::String(last.to_owned()), value.into());
    }

    /// Remove the value at a dotted path. Returns the removed value.
    pub fn remove(&self, path: &str) -> Option<Value> {
        let mut root = self.root.write();
        let (parent_path, key) = match path.rsplit_once('.') {
            Some((parent, key)) => (Some(parent), key),
            None => (None, path),
        };
        let node = match parent_path {
            Some(parent) => lookup_mut(&mut root, parent)?,
            None => &mut root,
        };
        node.as_mapping_mut()?.remove(Value::String(key.to_owned()))
    }
}

impl std::fmt::Debug for YamlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YamlDocument")
            .field("name", &self.name)
            .field("path", &self.dest_path)
            .finish_non_exhaustive()
    }
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = root;
    for seg in path.split('.') {
        node = node.get(seg)?;
    }
    Some(node)
}

fn lookup_mut<'a>(root: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    let mut node = root;
    for seg in path.split('.') {
        node = node.get_mut(seg)?;
    }
    Some(node)
}

fn ensure_mapping(node: &mut Value) -> &mut Mapping {
    if !node.is_mapping() {
        *node = Value::Mapping(Mapping::new());
    }
    match node {
        Value::Mapping(map) => map,
        _ => unreachable!(),
    }
}

fn merge_missing(dst: &mut Value, src: &Value) {
    if !dst.is_mapping() && src.is_mapping() {
        *dst = Value::Mapping(Mapping::new());
    }
    if let (Value::Mapping(dmap), Value::Mapping(smap)) = (dst, src) {
        for (key, value) in smap {
            match dmap.get_mut(key) {
                Some(existing) if existing.is_mapping() && value.is_mapping() => {
                    merge_missing(existing, value);
                }
                Some(_) => {}
                None => {
                    dmap.insert(key.clone(), value.clone());
                }
            }
        }
    }
}
