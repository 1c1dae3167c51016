//! `PluginRegistrar` — the registration surface handed to plugins.

use cs_fsm::{ModelCatalog, PedestrianModel};
use cs_registry::ElementFactory;
use cs_task::{TaskCatalog, TaskFactory};
use cs_vis::{GoalRenderer, GoalRendererDb};

/// Mutable access to every table a plugin may extend.
///
/// Later registrations replace earlier ones under the same name, so a plugin
/// can shadow a built-in or a plugin loaded before it.  During
/// [`PluginLoader`][crate::PluginLoader] activation the tables behind a
/// plugin's registrar hold only that plugin's own bindings.
pub struct PluginRegistrar<'a> {
    goal_renderers: &'a mut GoalRendererDb,
    tasks:          &'a mut TaskCatalog,
    models:         &'a mut ModelCatalog,
}

impl<'a> PluginRegistrar<'a> {
    pub fn new(
        goal_renderers: &'a mut GoalRendererDb,
        tasks:          &'a mut TaskCatalog,
        models:         &'a mut ModelCatalog,
    ) -> Self {
        Self { goal_renderers, tasks, models }
    }

    /// Bind a renderer to goals whose kind is `goal_kind`.
    pub fn register_goal_renderer<F>(&mut self, goal_kind: &str, factory: F) -> bool
    where
        F: ElementFactory<dyn GoalRenderer>,
    {
        self.goal_renderers.register_element(goal_kind, factory)
    }

    pub fn register_task(&mut self, factory: Box<dyn TaskFactory>) -> bool {
        self.tasks.register(factory)
    }

    pub fn register_model<F>(&mut self, name: &str, factory: F) -> bool
    where
        F: Fn() -> Box<dyn PedestrianModel> + Send + Sync + 'static,
    {
        self.models.register(name, factory)
    }

    pub fn goal_renderers(&mut self) -> &mut GoalRendererDb {
        self.goal_renderers
    }

    pub fn task_catalog(&mut self) -> &mut TaskCatalog {
        self.tasks
    }

    pub fn model_catalog(&mut self) -> &mut ModelCatalog {
        self.models
    }

    /// Bind everything in `staged`, replacing earlier bindings.
    pub(crate) fn commit(&mut self, staged: StagedTables) {
        self.goal_renderers.merge(staged.goal_renderers);
        self.tasks.merge(staged.tasks);
        self.models.merge(staged.models);
    }
}

/// Empty tables one plugin registers into before its bindings are committed.
///
/// A plugin whose `register` fails leaves nothing behind, because its
/// staged tables are dropped instead of committed.
#[derive(Default)]
pub(crate) struct StagedTables {
    goal_renderers: GoalRendererDb,
    tasks:          TaskCatalog,
    models:         ModelCatalog,
}

impl StagedTables {
    pub(crate) fn registrar(&mut self) -> PluginRegistrar<'_> {
        PluginRegistrar::new(&mut self.goal_renderers, &mut self.tasks, &mut self.models)
    }
}
