//! YAML Configuration Layer for Plugin Hosts
//!
//! Manages YAML-backed configuration documents rooted in a host-provided
//! data directory:
//!
//! - **Documents**: in-memory key-value trees addressed by dotted paths,
//!   backed by files on disk
//! - **Bootstrap**: missing files are created from bundled default
//!   resources, or empty
//! - **Registry**: first-wins name registration, bulk load/save,
//!   directory scans, shutdown flush
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use hearth_config::{ConfigRegistry, HostContext, NoResources, YamlDocument};
//!
//! let ctx = HostContext::init("plugins/my-plugin", Box::new(NoResources));
//! let registry = ConfigRegistry::new(ctx.clone());
//!
//! let config = registry.register("config", YamlDocument::new(ctx, "config.yml"));
//! let port = config.get_i64("server.port").unwrap_or(25565);
//!
//! // on host teardown
//! registry.shutdown();
//! ```

pub mod context;
pub mod document;
pub mod error;
pub mod registry;

pub use context::{DirResources, HostContext, NoResources, ResourceSource};
pub use document::YamlDocument;
pub use error::{ConfigError, Result};
pub use registry::{ConfigRegistry, scan_directory};
