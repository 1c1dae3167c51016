//! `cs-plugin` — extending the simulator without touching the core.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`plugin`]    | `Plugin` trait (`register`, `attach`)                       |
//! | [`registrar`] | `PluginRegistrar` — goal renderers, task catalog, models    |
//! | [`loader`]    | `PluginLoader` (manifest discovery), `LoadedPlugins`        |
//! | [`error`]     | `PluginError`, `PluginResult`                               |
//!
//! # Activation
//!
//! Plugins are statically linked.  At start-up the host gives the loader
//! every plugin it links, then the loader scans the plugin directory for
//! `*.plugin` manifests and activates the plugins they name:
//!
//! ```text
//! for manifest in plugin_dir/*.plugin (sorted):
//!     name unknown       → warn, skip
//!     register() fails   → warn, skip
//!     otherwise          → loaded
//! ```
//!
//! Nothing in that loop is fatal.  Whether a missing plugin matters is
//! decided afterwards by [`LoadedPlugins::require`].

pub mod error;
pub mod loader;
pub mod plugin;
pub mod registrar;

#[cfg(test)]
mod tests;

pub use error::{PluginError, PluginResult};
pub use loader::{LoadedPlugins, MANIFEST_EXTENSION, PluginLoader};
pub use plugin::Plugin;
pub use registrar::PluginRegistrar;
