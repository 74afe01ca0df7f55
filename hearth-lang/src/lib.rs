//! Per-Locale Language Resources for Plugin Hosts
//!
//! Manages per-locale YAML string-resource files with placeholder
//! substitution, layered over [`hearth_config`]:
//!
//! - **Locale index**: one language file covers every region variant of
//!   its language code
//! - **Fallback resolution**: requested locale, then the default locale,
//!   then any loaded document
//! - **Placeholders**: a global replacer map plus a per-document
//!   `%token%` map fed from the file's reserved `placeholders` section
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use hearth_config::{HostContext, NoResources};
//! use hearth_lang::{LangDocument, LangRegistry, Locale};
//! use std::sync::Arc;
//!
//! let ctx = HostContext::init("plugins/my-plugin", Box::new(NoResources));
//! let registry = LangRegistry::new(ctx.clone());
//!
//! let en = Arc::new(LangDocument::new(ctx, "lang/en.yml"));
//! registry.set_default_locale(Locale::en(), en);
//! registry.add_all_from_directory("lang");
//!
//! let motd = registry.value("messages.motd");
//! ```
//!
//! A lang file pairs strings with a reserved placeholder section:
//!
//! ```yaml
//! messages:
//!   motd: "Welcome to %server%!"
//! placeholders:
//!   server: "Hearth"
//! ```

mod document;
mod error;
mod index;
mod locale;
mod placeholder;
mod registry;

pub use document::{DEFAULT_PLACEHOLDER_PATH, LangDocument};
pub use error::{LangError, Result};
pub use index::{KNOWN_LOCALES, tags_for_language};
pub use locale::Locale;
pub use placeholder::PlaceholderCache;
pub use registry::LangRegistry;
