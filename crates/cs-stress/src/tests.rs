//! Unit tests for cs-stress.

use serde_json::json;

use cs_agent::{AgentSpec, AgentStore, AgentStoreBuilder};
use cs_core::{AgentId, StateId, Tick, Vec2};
use cs_task::{Task, TaskContext, TaskError, TaskResult};

use crate::StressTask;

fn store_at(points: &[(f32, f32)]) -> AgentStore {
    let mut b = AgentStoreBuilder::new();
    for &(x, y) in points {
        b.push(AgentSpec { position: Vec2::new(x, y), pref_speed: 1.0, ..AgentSpec::default() });
    }
    b.build()
}

fn tick(task: &mut StressTask, store: &mut AgentStore, dt: f32) -> TaskResult<()> {
    let states = vec![StateId(0); store.count];
    let mut ctx = TaskContext::new(Tick(0), dt, dt, store, &states);
    task.do_work(&mut ctx)
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

// ── Stress law ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod law_tests {
    use super::*;

    #[test]
    fn neighbors_accumulate_stress() {
        let mut store = store_at(&[(0.0, 0.0), (1.0, 0.0), (10.0, 0.0)]);
        let mut task = StressTask::new(2.0, 0.1, 0.5);
        tick(&mut task, &mut store, 0.1).unwrap();
        // exposure = 1 - 1/2 = 0.5; 0.5 * 0.5 * 0.1
        assert!(close(task.stress(AgentId(0)).unwrap(), 0.025));
        assert!(close(task.stress(AgentId(1)).unwrap(), 0.025));
        assert_eq!(task.stress(AgentId(2)), Some(0.0));
        assert_eq!(task.stress(AgentId(3)), None);
    }

    #[test]
    fn closer_means_more_stress() {
        let mut near = store_at(&[(0.0, 0.0), (0.5, 0.0)]);
        let mut far = store_at(&[(0.0, 0.0), (1.5, 0.0)]);
        let (mut a, mut b) = (StressTask::default(), StressTask::default());
        tick(&mut a, &mut near, 0.1).unwrap();
        tick(&mut b, &mut far, 0.1).unwrap();
        assert!(a.stress_levels()[0] > b.stress_levels()[0]);
    }

    #[test]
    fn stress_is_bounded() {
        let mut store = store_at(&[(0.0, 0.0), (0.1, 0.0), (0.0, 0.1)]);
        let mut task = StressTask::new(2.0, 0.0, 100.0);
        for _ in 0..10 {
            tick(&mut task, &mut store, 0.5).unwrap();
        }
        assert!(task.stress_levels().iter().all(|&s| s == 1.0));
    }

    #[test]
    fn stress_decays_without_contact() {
        let mut store = store_at(&[(0.0, 0.0), (0.5, 0.0)]);
        let mut task = StressTask::default();
        for _ in 0..5 {
            tick(&mut task, &mut store, 0.1).unwrap();
        }
        let peak = task.stress_levels()[0];
        store.position[1] = Vec2::new(50.0, 0.0);
        tick(&mut task, &mut store, 0.1).unwrap();
        assert!(close(task.stress_levels()[0], peak * (1.0 - 0.1 * 0.1)));
    }

    #[test]
    fn new_agents_start_calm() {
        let mut task = StressTask::default();
        tick(&mut task, &mut store_at(&[(0.0, 0.0)]), 0.1).unwrap();
        assert_eq!(task.stress_levels().len(), 1);
        tick(&mut task, &mut store_at(&[(0.0, 0.0), (30.0, 0.0)]), 0.1).unwrap();
        assert_eq!(task.stress_levels(), &[0.0, 0.0]);
    }

    #[test]
    fn speed_relief_scales_preferred_speed() {
        let mut store = store_at(&[(0.0, 0.0), (1.0, 0.0)]);
        let mut task = StressTask::new(2.0, 0.1, 0.5).with_speed_relief(1.0);
        tick(&mut task, &mut store, 0.1).unwrap();
        let s = task.stress_levels()[0];
        assert!(close(store.pref_speed[0], 1.0 + s));
        // Base speed is captured once; relief does not compound.
        tick(&mut task, &mut store, 0.1).unwrap();
        assert!(close(store.pref_speed[0], 1.0 + task.stress_levels()[0]));
    }
}

// ── Failures ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod failure_tests {
    use super::*;

    #[test]
    fn non_finite_position_is_recoverable_and_harmless() {
        let mut store = store_at(&[(0.0, 0.0), (1.0, 0.0)]);
        let mut task = StressTask::default();
        tick(&mut task, &mut store, 0.1).unwrap();
        let before = task.stress_levels().to_vec();

        store.position[1] = Vec2::new(f32::NAN, 0.0);
        let err = tick(&mut task, &mut store, 0.1).unwrap_err();
        assert!(matches!(err, TaskError::Recoverable(_)));
        assert_eq!(task.stress_levels(), before.as_slice());

        store.position[1] = Vec2::new(1.0, 0.0);
        tick(&mut task, &mut store, 0.1).unwrap();
        assert!(task.stress_levels()[0] > before[0]);
    }

    #[test]
    fn invalid_parameters_are_fatal() {
        let mut store = store_at(&[(0.0, 0.0)]);
        for mut task in [
            StressTask::new(0.0, 0.1, 0.5),
            StressTask::new(2.0, -0.1, 0.5),
            StressTask::new(2.0, 0.1, f32::NAN),
            StressTask::default().with_speed_relief(-1.0),
        ] {
            assert!(tick(&mut task, &mut store, 0.1).unwrap_err().is_fatal(), "{task}");
        }
    }
}

// ── Identity ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod identity_tests {
    use super::*;

    #[test]
    fn display_is_stable() {
        assert_eq!(
            StressTask::default().to_string(),
            "StressTask(radius=2, decay=0.1, accumulation=0.5, relief=0)"
        );
    }

    #[test]
    fn equivalence_follows_parameters() {
        let a = StressTask::new(2.0, 0.1, 0.5);
        assert!(a.is_equivalent(&StressTask::new(2.0, 0.1, 0.5)));
        assert!(!a.is_equivalent(&StressTask::new(2.0, 0.2, 0.5)));
        assert!(!a.is_equivalent(&a.clone().with_speed_relief(0.5)));
    }

    #[test]
    fn equivalence_ignores_accumulated_state() {
        let mut busy = StressTask::default();
        tick(&mut busy, &mut store_at(&[(0.0, 0.0), (1.0, 0.0)]), 0.1).unwrap();
        assert!(busy.is_equivalent(&StressTask::default()));
    }
}

// ── Factory ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod factory_tests {
    use cs_task::{TaskBuildError, TaskFactory};

    use super::*;
    use crate::StressTaskFactory;

    fn create(params: serde_json::Value) -> Result<Box<dyn Task>, TaskBuildError> {
        StressTaskFactory.create(&params)
    }

    #[test]
    fn null_params_use_defaults() {
        let task = create(serde_json::Value::Null).unwrap();
        assert!(task.is_equivalent(&StressTask::default()));
    }

    #[test]
    fn partial_params_fill_defaults() {
        let task = create(json!({ "radius": 3.0, "speed_relief": 0.5 })).unwrap();
        let stress = task.as_any().downcast_ref::<StressTask>().unwrap();
        assert_eq!(stress.contact_radius, 3.0);
        assert_eq!(stress.decay, 0.1);
        assert_eq!(stress.speed_relief, 0.5);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(create(json!({ "radius": 0.0 })), Err(TaskBuildError::InvalidParams { .. })));
        assert!(matches!(create(json!({ "decay": -1.0 })), Err(TaskBuildError::InvalidParams { .. })));
        assert!(matches!(create(json!({ "radius": "wide" })), Err(TaskBuildError::Json(_))));
        assert!(matches!(create(json!({ "radious": 2.0 })), Err(TaskBuildError::Json(_))));
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod plugin_tests {
    use cs_fsm::{GoalSet, GoalShape, ModelCatalog};
    use cs_plugin::{Plugin, PluginRegistrar};
    use cs_task::{TaskCatalog, TaskList};
    use cs_vis::{DrawCommand, GoalRendererDb};

    use super::*;
    use crate::StressPlugin;

    #[test]
    fn registers_task_type_and_renderer() {
        let mut renderers = GoalRendererDb::with_builtins();
        let mut catalog = TaskCatalog::new();
        let mut models = ModelCatalog::with_builtins();
        StressPlugin::new()
            .register(&mut PluginRegistrar::new(&mut renderers, &mut catalog, &mut models))
            .unwrap();
        assert!(catalog.contains("stress"));
        assert_eq!(renderers.get_element("stress_zone").name(), "stress_zone");

        let mut goals = GoalSet::new();
        let id = goals
            .add("crush", "stress_zone", GoalShape::Circle { center: Vec2::new(1.0, 1.0), radius: 3.0 })
            .unwrap();
        let goal = goals.get(id).unwrap();
        let cmds = renderers.get_element_for(goal).draw(goal, false);
        assert!(matches!(cmds.as_slice(), [DrawCommand::Circle { radius, .. }, DrawCommand::Label { .. }] if *radius == 3.0));
    }

    #[test]
    fn attaching_plugin_adds_its_task_once() {
        let plugin = StressPlugin::attaching(StressTask::default());
        let mut tasks = TaskList::new();
        tasks.add(Box::new(StressTask::default()));
        plugin.attach(&mut tasks);
        assert_eq!(tasks.len(), 1);

        let mut other = TaskList::new();
        plugin.attach(&mut other);
        assert_eq!(other.descriptions(), vec!["StressTask(radius=2, decay=0.1, accumulation=0.5, relief=0)"]);
    }

    #[test]
    fn plain_plugin_attaches_nothing() {
        let mut tasks = TaskList::new();
        StressPlugin::new().attach(&mut tasks);
        assert!(tasks.is_empty());
    }
}
