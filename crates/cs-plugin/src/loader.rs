//! Plugin discovery and activation.
//!
//! # Manifests
//!
//! A plugin is activated by a file `<name>.plugin` in the plugin directory.
//! The file may be empty.  Non-empty manifests are line-oriented:
//!
//! ```text
//! # comment
//! name = stress
//! ```
//!
//! `name` overrides the file stem; other keys are ignored.  Manifests are
//! processed in file-name order and a plugin named twice is activated once.

use std::fs;
use std::path::{Path, PathBuf};

use cs_task::TaskList;

use crate::registrar::StagedTables;
use crate::{Plugin, PluginError, PluginRegistrar, PluginResult};

/// File extension of plugin manifests.
pub const MANIFEST_EXTENSION: &str = "plugin";

/// The set of plugins linked into the binary, waiting for activation.
#[derive(Default)]
pub struct PluginLoader {
    available: Vec<Box<dyn Plugin>>,
}

impl PluginLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chaining form of [`add`][Self::add].
    pub fn with(mut self, plugin: Box<dyn Plugin>) -> Self {
        self.add(plugin);
        self
    }

    /// Make `plugin` available for activation.  A plugin with the same name
    /// is replaced.
    pub fn add(&mut self, plugin: Box<dyn Plugin>) {
        if let Some(slot) = self.available.iter_mut().find(|p| p.name() == plugin.name()) {
            log::warn!("plugin {:?} made available twice; keeping the later one", plugin.name());
            *slot = plugin;
        } else {
            self.available.push(plugin);
        }
    }

    /// Names of the available plugins, sorted.
    pub fn available_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.available.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names
    }

    /// Plugin names requested by the manifests in `dir`.
    ///
    /// A missing directory or an unreadable manifest is logged and skipped.
    pub fn discover(dir: &Path) -> Vec<String> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("plugin directory {}: {e}", dir.display());
                return Vec::new();
            }
        };

        let mut manifests: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == MANIFEST_EXTENSION))
            .collect();
        manifests.sort();

        let mut names: Vec<String> = Vec::new();
        for path in manifests {
            match read_manifest(&path) {
                Ok(name) if names.contains(&name) => {
                    log::debug!("plugin {name:?} requested again by {}", path.display());
                }
                Ok(name) => names.push(name),
                Err(e) => log::warn!("{e}; skipping"),
            }
        }
        names
    }

    /// Activate the plugins requested by manifests in `dir`.
    pub fn load(self, dir: &Path, registrar: &mut PluginRegistrar<'_>) -> LoadedPlugins {
        log::info!("scanning {} for plugin manifests", dir.display());
        let names = Self::discover(dir);
        self.load_named(&names, registrar)
    }

    /// Activate the named plugins, in order.
    ///
    /// Unknown names and plugins whose `register` fails are logged and left
    /// out; neither stops the remaining plugins from loading.  A plugin's
    /// bindings reach `registrar` only once its `register` has succeeded.
    pub fn load_named<S: AsRef<str>>(mut self, names: &[S], registrar: &mut PluginRegistrar<'_>) -> LoadedPlugins {
        let mut loaded = LoadedPlugins::default();
        for name in names {
            let name = name.as_ref();
            let Some(pos) = self.available.iter().position(|p| p.name() == name) else {
                log::warn!("no plugin named {name:?} is available; skipping");
                continue;
            };
            let plugin = self.available.swap_remove(pos);
            let mut staged = StagedTables::default();
            let registered = plugin.register(&mut staged.registrar());
            match registered {
                Ok(()) => {
                    registrar.commit(staged);
                    log::info!("plugin {name:?} loaded");
                    loaded.plugins.push(plugin);
                }
                Err(e) => log::warn!("{e}; plugin {name:?} not loaded"),
            }
        }
        loaded
    }
}

fn read_manifest(path: &Path) -> PluginResult<String> {
    let text = fs::read_to_string(path).map_err(|source| PluginError::Manifest {
        path: path.display().to_string(),
        source,
    })?;

    let mut name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) if key.trim() == "name" => name = value.trim().to_owned(),
            _ => log::debug!("{}: ignoring {line:?}", path.display()),
        }
    }
    Ok(name)
}

/// The plugins that registered successfully, in activation order.
#[derive(Default)]
pub struct LoadedPlugins {
    plugins: Vec<Box<dyn Plugin>>,
}

impl LoadedPlugins {
    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Fail with [`PluginError::MissingRequired`] unless every name in
    /// `required` is loaded.
    pub fn require<S: AsRef<str>>(&self, required: &[S]) -> PluginResult<()> {
        let missing: Vec<String> = required
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !self.contains(name))
            .map(str::to_owned)
            .collect();
        if missing.is_empty() { Ok(()) } else { Err(PluginError::MissingRequired(missing)) }
    }

    /// Let every loaded plugin add its tasks, in activation order.
    pub fn attach_all(&self, tasks: &mut TaskList) {
        for plugin in &self.plugins {
            plugin.attach(tasks);
        }
    }
}
