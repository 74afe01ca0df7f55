//! Language registry
//!
//! Owns the locale-to-document map, the default locale and the global
//! replacer map, and implements the lookup pipeline: select a document by
//! locale fallback, read the key, apply global replacements, lazily rebuild
//! the document's placeholder map, apply it, return the string.
//!
//! Several locale tags may share one document; bulk load/save deduplicate
//! by document identity so each backing file sees exactly one I/O pass.

use crate::document::LangDocument;
use crate::index::tags_for_language;
use crate::locale::Locale;
use hearth_config::{HostContext, scan_directory};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

struct LangState {
    locale_map: HashMap<Locale, Arc<LangDocument>>,
    /// Locale tags in first-bind order; keeps the "any document" fallback
    /// deterministic within a process run.
    order: Vec<Locale>,
    default_locale: Locale,
}

impl LangState {
    fn bind(&mut self, locale: Locale, doc: &Arc<LangDocument>) -> bool {
        if self.locale_map.contains_key(&locale) {
            return false;
        }
        self.locale_map.insert(locale.clone(), doc.clone());
        self.order.push(locale);
        true
    }

    fn unique_documents(&self) -> Vec<Arc<LangDocument>> {
        let mut docs: Vec<Arc<LangDocument>> = Vec::new();
        for locale in &self.order {
            if let Some(doc) = self.locale_map.get(locale) {
                if !docs.iter().any(|seen| Arc::ptr_eq(seen, doc)) {
                    docs.push(doc.clone());
                }
            }
        }
        docs
    }
}

/// Registry of per-locale language documents.
pub struct LangRegistry {
    ctx: Arc<HostContext>,
    extension: String,
    inner: Mutex<LangState>,
    global: RwLock<BTreeMap<String, String>>,
}

impl LangRegistry {
    pub fn new(ctx: Arc<HostContext>) -> Self {
        Self {
            ctx,
            extension: "yml".to_owned(),
            inner: Mutex::new(LangState {
                locale_map: HashMap::new(),
                order: Vec::new(),
                default_locale: Locale::en(),
            }),
            global: RwLock::new(BTreeMap::new()),
        }
    }

    /// Change the file extension recognized by directory scans.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Register a literal token replaced in every resolved string,
    /// regardless of locale, before any per-document placeholders.
    pub fn replace_global(&self, token: impl Into<String>, value: impl Into<String>) {
        self.global.write().insert(token.into(), value.into());
    }

    /// Snapshot of the global replacer map.
    pub fn global_replacements(&self) -> BTreeMap<String, String> {
        self.global.read().clone()
    }

    /// Bind a document to one or more locale tags, first-wins per tag, then
    /// silently load it once.
    ///
    /// An already-bound tag keeps its existing document; only
    /// [`set_default_locale`](Self::set_default_locale) rebinds.
    pub fn add_language(&self, doc: Arc<LangDocument>, locale: Locale, extra: &[Locale]) {
        {
            let mut state = self.inner.lock();
            state.bind(locale, &doc);
            for tag in extra {
                state.bind(tag.clone(), &doc);
            }
        }
        let _ = doc.load(false);
    }

    /// Bind a document to every known locale of one or more language codes.
    ///
    /// Each code expands through the locale index; an unrecognized code
    /// logs a warning and is skipped, never an error. The document is
    /// silently loaded once when at least one code was recognized.
    pub fn add_language_by_code(&self, doc: Arc<LangDocument>, code: &str, extra: &[&str]) {
        let mut recognized = false;
        {
            let mut state = self.inner.lock();
            for code in std::iter::once(code).chain(extra.iter().copied()) {
                let Some(tags) = tags_for_language(code) else {
                    warn!(code, "no locale known for language code");
                    continue;
                };
                recognized = true;
                for tag in tags {
                    state.bind(tag.clone(), &doc);
                }
            }
        }
        if recognized {
            let _ = doc.load(false);
        }
    }

    /// Scan `data_dir/rel_dir` for language files; each recognized file's
    /// stem is taken as a language code and one shared document is bound to
    /// every tag of that code. Files whose stem is not a known language
    /// code log a warning and are skipped, as is a missing directory.
    ///
    /// Returns the `(code, document)` pairs created by this call.
    pub fn add_all_from_directory(
        &self,
        rel_dir: impl AsRef<Path>,
    ) -> Vec<(String, Arc<LangDocument>)> {
        let rel_dir = rel_dir.as_ref();
        let mut added = Vec::new();
        for rel in scan_directory(&self.ctx, rel_dir, &self.extension) {
            let Some(stem) = rel.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            if tags_for_language(&stem).is_none() {
                warn!(file = %rel.display(), "no locale known for language file");
                continue;
            }
            let doc = Arc::new(LangDocument::new(self.ctx.clone(), &rel));
            self.add_language_by_code(doc.clone(), &stem, &[]);
            added.push((stem, doc));
        }
        added
    }

    /// Bind `locale` to `doc` unconditionally (this path overwrites any
    /// existing binding), make it the default locale, and silently load.
    pub fn set_default_locale(&self, locale: Locale, doc: Arc<LangDocument>) {
        {
            let mut state = self.inner.lock();
            if state.locale_map.insert(locale.clone(), doc.clone()).is_none() {
                state.order.push(locale.clone());
            }
            state.default_locale = locale;
        }
        let _ = doc.load(false);
    }

    /// Change the default locale without touching any binding.
    pub fn set_default_locale_only(&self, locale: Locale) {
        self.inner.lock().default_locale = locale;
    }

    /// The current default locale.
    pub fn default_locale(&self) -> Locale {
        self.inner.lock().default_locale.clone()
    }

    /// The document bound to the default locale, if any.
    pub fn default_document(&self) -> Option<Arc<LangDocument>> {
        let state = self.inner.lock();
        state.locale_map.get(&state.default_locale).cloned()
    }

    /// The document bound to a locale tag, if any.
    pub fn get(&self, locale: &Locale) -> Option<Arc<LangDocument>> {
        self.inner.lock().locale_map.get(locale).cloned()
    }

    /// Case-insensitive scan over the documents' display names.
    pub fn find_by_file_name(&self, name: &str) -> Option<Arc<LangDocument>> {
        self.inner
            .lock()
            .unique_documents()
            .into_iter()
            .find(|doc| doc.name().eq_ignore_ascii_case(name))
    }

    /// All bound locale tags, in first-bind order.
    pub fn locales(&self) -> Vec<Locale> {
        self.inner.lock().order.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().locale_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().locale_map.is_empty()
    }

    /// Load every underlying document exactly once, no matter how many
    /// tags share it. Failures are logged per document and do not abort
    /// the rest. Warns when the default locale has no binding.
    pub fn load_all(&self, verbose: bool) {
        let (docs, default_bound, empty) = {
            let state = self.inner.lock();
            (
                state.unique_documents(),
                state.locale_map.contains_key(&state.default_locale),
                state.locale_map.is_empty(),
            )
        };
        for doc in docs {
            let _ = doc.load(verbose);
        }
        if !empty && !default_bound {
            warn!("no language file bound to the default locale");
        }
    }

    /// Save every underlying document exactly once, no matter how many
    /// tags share it. Failures are logged per document and do not abort
    /// the rest.
    pub fn save_all(&self, verbose: bool) {
        let docs = self.inner.lock().unique_documents();
        for doc in docs {
            let _ = doc.save(verbose);
        }
    }

    /// Flush hook for host teardown: silently save everything, then log a
    /// single summary line. No-op when the registry is empty.
    pub fn shutdown(&self) {
        let docs = self.inner.lock().unique_documents();
        if docs.is_empty() {
            return;
        }
        for doc in &docs {
            let _ = doc.save(false);
        }
        info!(count = docs.len(), "saved language files on shutdown");
    }

    /// Resolve `key` to a string for the requested locale.
    ///
    /// Document selection: the requested tag if bound, else the default
    /// locale's document, else the first-inserted document; with no
    /// documents at all the fallback is returned as-is. A missing key also
    /// returns the fallback verbatim, with no substitution applied to it.
    ///
    /// Substitution order: global replacer map first, then the document's
    /// placeholder map, each as sequential literal replacement in
    /// deterministic token order.
    pub fn resolve(&self, requested: Option<&Locale>, key: &str, fallback: &str) -> String {
        let Some(doc) = self.select_document(requested) else {
            info!(key, "no language file available, using fallback value");
            return fallback.to_owned();
        };

        let Some(mut text) = doc.get_string(key) else {
            return fallback.to_owned();
        };

        {
            let global = self.global.read();
            for (token, value) in global.iter() {
                text = text.replace(token.as_str(), value);
            }
        }

        if doc.placeholders().is_stale() {
            doc.rebuild_placeholders();
        }
        doc.placeholders().apply(&text)
    }

    /// Resolve against the default locale, with the key itself as the
    /// fallback value.
    pub fn value(&self, key: &str) -> String {
        self.resolve(None, key, key)
    }

    /// Resolve for a specific locale, with the key itself as the fallback
    /// value.
    pub fn value_for(&self, locale: &Locale, key: &str) -> String {
        self.resolve(Some(locale), key, key)
    }

    fn select_document(&self, requested: Option<&Locale>) -> Option<Arc<LangDocument>> {
        let state = self.inner.lock();
        if state.locale_map.is_empty() {
            return None;
        }
        if let Some(locale) = requested {
            if let Some(doc) = state.locale_map.get(locale) {
                return Some(doc.clone());
            }
        }
        if let Some(doc) = state.locale_map.get(&state.default_locale) {
            return Some(doc.clone());
        }
        state
            .order
            .first()
            .and_then(|locale| state.locale_map.get(locale))
            .cloned()
    }
}
