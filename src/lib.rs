// Hearth - YAML configuration and language resources for plugin hosts
//
// This library manages YAML-backed configuration documents and per-locale
// language/string-resource files with placeholder substitution, rooted in
// a host-provided data directory.

// Re-export optional crates
#[cfg(feature = "config")]
pub use hearth_config;

#[cfg(feature = "lang")]
pub use hearth_lang;

// Prelude for common imports
pub mod prelude {
    #[cfg(feature = "config")]
    pub use hearth_config::{
        ConfigRegistry, DirResources, HostContext, NoResources, ResourceSource, YamlDocument,
    };

    #[cfg(feature = "lang")]
    pub use hearth_lang::{LangDocument, LangRegistry, Locale, tags_for_language};
}
