//! Unit tests for cs-plugin.

use std::any::Any;
use std::fmt;
use std::fs;

use serde_json::Value;

use cs_fsm::{DirectModel, Goal, ModelCatalog, PedestrianModel};
use cs_task::{Task, TaskBuildError, TaskCatalog, TaskContext, TaskFactory, TaskList, TaskResult};
use cs_vis::{DrawCommand, GoalRenderer, GoalRendererDb};

use crate::{Plugin, PluginError, PluginLoader, PluginRegistrar, PluginResult};

// ── Test plugins ──────────────────────────────────────────────────────────────

struct Flag(&'static str);

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flag({})", self.0)
    }
}

impl Task for Flag {
    fn do_work(&mut self, _ctx: &mut TaskContext<'_>) -> TaskResult<()> {
        Ok(())
    }

    fn is_equivalent(&self, other: &dyn Task) -> bool {
        other.as_any().downcast_ref::<Flag>().is_some_and(|o| o.0 == self.0)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct FlagFactory;

impl TaskFactory for FlagFactory {
    fn task_type(&self) -> &str {
        "flag"
    }

    fn create(&self, _params: &Value) -> Result<Box<dyn Task>, TaskBuildError> {
        Ok(Box::new(Flag("from-file")))
    }
}

struct Banner;

impl GoalRenderer for Banner {
    fn name(&self) -> &str {
        "banner"
    }

    fn draw(&self, _goal: &Goal, _highlight: bool) -> Vec<DrawCommand> {
        Vec::new()
    }
}

/// Registers a renderer for `Goal`, a task factory and a model; attaches
/// one task.
struct Extras;

impl Plugin for Extras {
    fn name(&self) -> &str {
        "extras"
    }

    fn register(&self, registrar: &mut PluginRegistrar<'_>) -> PluginResult<()> {
        registrar.register_goal_renderer("Goal", || Box::new(Banner) as Box<dyn GoalRenderer>);
        registrar.register_task(Box::new(FlagFactory));
        registrar.register_model("still", || Box::new(DirectModel) as Box<dyn PedestrianModel>);
        Ok(())
    }

    fn attach(&self, tasks: &mut TaskList) {
        tasks.add(Box::new(Flag("extras")));
    }
}

struct Broken;

impl Plugin for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn register(&self, _registrar: &mut PluginRegistrar<'_>) -> PluginResult<()> {
        Err(PluginError::Registration { plugin: "broken".into(), reason: "no luck".into() })
    }
}

/// Binds a renderer, a task factory and a model, then fails.
struct HalfBroken;

impl Plugin for HalfBroken {
    fn name(&self) -> &str {
        "half"
    }

    fn register(&self, registrar: &mut PluginRegistrar<'_>) -> PluginResult<()> {
        registrar.register_goal_renderer("point", || Box::new(Banner) as Box<dyn GoalRenderer>);
        registrar.register_task(Box::new(FlagFactory));
        registrar.register_model("still", || Box::new(DirectModel) as Box<dyn PedestrianModel>);
        Err(PluginError::Registration { plugin: "half".into(), reason: "gave up midway".into() })
    }
}

struct Tables {
    renderers: GoalRendererDb,
    tasks:     TaskCatalog,
    models:    ModelCatalog,
}

impl Tables {
    fn new() -> Self {
        Self {
            renderers: GoalRendererDb::with_builtins(),
            tasks:     TaskCatalog::new(),
            models:    ModelCatalog::with_builtins(),
        }
    }

    fn registrar(&mut self) -> PluginRegistrar<'_> {
        PluginRegistrar::new(&mut self.renderers, &mut self.tasks, &mut self.models)
    }
}

fn loader() -> PluginLoader {
    PluginLoader::new().with(Box::new(Extras)).with(Box::new(Broken))
}

// ── Discovery ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod discovery_tests {
    use super::*;

    #[test]
    fn manifests_name_plugins_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.plugin"), "").unwrap();
        fs::write(dir.path().join("a.plugin"), "# comment\nname = extras\n").unwrap();
        fs::write(dir.path().join("readme.txt"), "not a manifest").unwrap();
        fs::write(dir.path().join("c.plugin"), "name = extras").unwrap();
        assert_eq!(PluginLoader::discover(dir.path()), vec!["extras", "b"]);
    }

    #[test]
    fn missing_directory_discovers_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PluginLoader::discover(&dir.path().join("absent")).is_empty());
    }

    #[test]
    fn available_names_are_sorted() {
        assert_eq!(loader().available_names(), vec!["broken", "extras"]);
    }
}

// ── Activation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod load_tests {
    use super::*;

    #[test]
    fn unknown_and_failing_plugins_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["extras", "broken", "ghost"] {
            fs::write(dir.path().join(format!("{name}.plugin")), "").unwrap();
        }
        let mut tables = Tables::new();
        let loaded = loader().load(dir.path(), &mut tables.registrar());
        assert_eq!(loaded.names(), vec!["extras"]);
        assert!(!loaded.contains("broken"));
    }

    #[test]
    fn registration_reaches_every_table() {
        let mut tables = Tables::new();
        loader().load_named(&["extras"], &mut tables.registrar());
        assert_eq!(tables.renderers.get_element("Goal").name(), "banner");
        assert!(tables.tasks.contains("flag"));
        assert!(tables.models.contains("still"));
    }

    #[test]
    fn plugin_override_beats_builtin() {
        let mut tables = Tables::new();
        tables.renderers.register_element("Goal", || Box::new(cs_vis::MarkerRenderer) as Box<dyn GoalRenderer>);
        loader().load_named(&["extras"], &mut tables.registrar());
        assert_eq!(tables.renderers.get_element("Goal").name(), "banner");
    }

    #[test]
    fn attach_adds_plugin_tasks() {
        let mut tables = Tables::new();
        let loaded = loader().load_named(&["extras"], &mut tables.registrar());
        let mut tasks = TaskList::new();
        loaded.attach_all(&mut tasks);
        loaded.attach_all(&mut tasks);
        assert_eq!(tasks.descriptions(), vec!["Flag(extras)"]);
    }

    #[test]
    fn require_reports_missing_plugins() {
        let mut tables = Tables::new();
        let loaded = loader().load_named(&["extras", "broken"], &mut tables.registrar());
        assert!(loaded.require(&["extras"]).is_ok());
        let err = loaded.require(&["extras", "broken", "stress"]).unwrap_err();
        assert!(matches!(&err, PluginError::MissingRequired(m) if m == &["broken", "stress"]));
        assert_eq!(err.to_string(), "required plugins not loaded: broken, stress");
    }

    #[test]
    fn failed_registration_leaves_no_bindings() {
        let mut tables = Tables::new();
        let loaded = PluginLoader::new()
            .with(Box::new(HalfBroken))
            .load_named(&["half"], &mut tables.registrar());
        assert!(loaded.is_empty());
        assert_eq!(tables.renderers.get_element("point").name(), "point");
        assert!(!tables.tasks.contains("flag"));
        assert!(!tables.models.contains("still"));
    }

    #[test]
    fn failed_plugin_does_not_undo_earlier_plugins() {
        let mut tables = Tables::new();
        let loaded = PluginLoader::new()
            .with(Box::new(Extras))
            .with(Box::new(HalfBroken))
            .load_named(&["extras", "half"], &mut tables.registrar());
        assert_eq!(loaded.names(), vec!["extras"]);
        assert!(tables.tasks.contains("flag"));
        assert!(tables.models.contains("still"));
        assert_eq!(tables.renderers.get_element("point").name(), "point");
    }

    #[test]
    fn later_plugin_with_same_name_replaces_earlier() {
        let loader = PluginLoader::new().with(Box::new(Broken)).with(Box::new(Broken));
        assert_eq!(loader.available_names(), vec!["broken"]);
    }
}
