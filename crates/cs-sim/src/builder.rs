//! Fluent builder for constructing a [`Simulator`].

use std::path::PathBuf;

use cs_core::SimConfig;
use cs_fsm::{BehaviorSpec, FsmBuilder, ModelCatalog, Scene, load_behavior, load_scene};
use cs_plugin::{LoadedPlugins, Plugin, PluginLoader, PluginRegistrar};
use cs_stress::StressPlugin;
use cs_task::TaskCatalog;
use cs_vis::GoalRendererDb;

use crate::{SimResult, Simulator};

/// Where an input comes from.
enum Source<T> {
    File(PathBuf),
    Value(T),
}

/// Every plugin linked into this build.
pub fn linked_plugins() -> Vec<Box<dyn Plugin>> {
    vec![Box::new(StressPlugin::new())]
}

/// Fluent builder for [`Simulator`].
///
/// # Required inputs
///
/// - the behavior (a JSON file, or a parsed [`BehaviorSpec`])
/// - the scene (a CSV file, or a [`Scene`])
/// - the pedestrian model name (`"direct"`, `"damped"`, or one a plugin adds)
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                   |
/// |--------------------------|-------------------------------------------|
/// | `.plugin_path(p)`        | none: no plugin is activated              |
/// | `.available_plugin(p)`   | no plugins available                      |
/// | `.linked_plugins()`      | makes every [`linked_plugins`] available  |
/// | `.config(c)`             | the behavior file's `config` section      |
///
/// # Initialization order
///
/// 1. Built-in goal renderers and models.
/// 2. Plugins named by manifests on the plugin path register.
/// 3. Behavior and scene are loaded; `required_plugins` are checked.
/// 4. The model is resolved and the behavior graph built (tasks deduplicated).
/// 5. Each loaded plugin attaches its tasks.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new("behavior.json", "scene.csv", "damped")
///     .plugin_path("plugins")
///     .linked_plugins()
///     .build()?;
/// while sim.step() {}
/// ```
pub struct SimBuilder {
    behavior:    Source<BehaviorSpec>,
    scene:       Source<Scene>,
    model:       String,
    plugin_path: Option<PathBuf>,
    loader:      PluginLoader,
    config:      Option<SimConfig>,
}

impl SimBuilder {
    /// Builder reading the behavior and scene from files.
    pub fn new(behavior: impl Into<PathBuf>, scene: impl Into<PathBuf>, model: impl Into<String>) -> Self {
        Self::with_sources(Source::File(behavior.into()), Source::File(scene.into()), model.into())
    }

    /// Builder over an already parsed behavior and scene.
    pub fn from_specs(behavior: BehaviorSpec, scene: Scene, model: impl Into<String>) -> Self {
        Self::with_sources(Source::Value(behavior), Source::Value(scene), model.into())
    }

    fn with_sources(behavior: Source<BehaviorSpec>, scene: Source<Scene>, model: String) -> Self {
        Self {
            behavior,
            scene,
            model,
            plugin_path: None,
            loader: PluginLoader::new(),
            config: None,
        }
    }

    /// Directory scanned for `*.plugin` manifests.
    pub fn plugin_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.plugin_path = Some(path.into());
        self
    }

    /// Make `plugin` available for activation by a manifest.
    pub fn available_plugin(mut self, plugin: Box<dyn Plugin>) -> Self {
        self.loader.add(plugin);
        self
    }

    /// Make every plugin in [`linked_plugins`] available.
    pub fn linked_plugins(mut self) -> Self {
        for plugin in linked_plugins() {
            self.loader.add(plugin);
        }
        self
    }

    /// Override the behavior file's `config` section.
    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Run the initialization sequence and return a ready-to-step simulator.
    pub fn build(self) -> SimResult<Simulator> {
        let mut renderers = GoalRendererDb::with_builtins();
        let mut tasks = TaskCatalog::new();
        let mut models = ModelCatalog::with_builtins();

        // ── Plugins ───────────────────────────────────────────────────────
        let plugins = match &self.plugin_path {
            Some(dir) => {
                let mut registrar = PluginRegistrar::new(&mut renderers, &mut tasks, &mut models);
                self.loader.load(dir, &mut registrar)
            }
            None => {
                log::debug!("no plugin path given; plugins stay inactive");
                LoadedPlugins::default()
            }
        };

        // ── Inputs ────────────────────────────────────────────────────────
        let behavior = match self.behavior {
            Source::File(path) => load_behavior(&path)?,
            Source::Value(spec) => spec,
        };
        let scene = match self.scene {
            Source::File(path) => load_scene(&path)?,
            Source::Value(scene) => scene,
        };
        plugins.require(&behavior.required_plugins)?;

        // ── Behavior graph ────────────────────────────────────────────────
        let model = models.create(&self.model)?;
        let mut builder = FsmBuilder::new(behavior, scene).model(model).tasks(&tasks);
        if let Some(config) = self.config {
            builder = builder.config(config);
        }
        let mut fsm = builder.build()?;
        plugins.attach_all(fsm.tasks_mut());

        log::info!(
            "simulator ready: {} agents, plugins [{}], tasks [{}]",
            fsm.agent_count(),
            plugins.names().join(", "),
            fsm.tasks().descriptions().join(", ")
        );
        Ok(Simulator::new(fsm, renderers, plugins))
    }
}
