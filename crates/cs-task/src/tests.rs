//! Unit tests for cs-task.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Mutex};

use cs_agent::{AgentSpec, AgentStore, AgentStoreBuilder};
use cs_core::{StateId, Tick, Vec2};

use crate::{Task, TaskContext, TaskError, TaskResult};

// ── Helpers ───────────────────────────────────────────────────────────────────

type Journal = Arc<Mutex<Vec<String>>>;

fn make_store(n: usize) -> AgentStore {
    let mut b = AgentStoreBuilder::with_capacity(n);
    for i in 0..n {
        b.push(AgentSpec { position: Vec2::new(i as f32, 0.0), ..AgentSpec::default() });
    }
    b.build()
}

/// What a `Scripted` task does on a given call.
#[derive(Clone, Copy, PartialEq, Debug)]
enum Act {
    Succeed,
    Recover,
    Die,
}

/// Task that appends its label to a shared journal and then behaves per
/// `script` (last entry repeats).
struct Scripted {
    label:   &'static str,
    script:  Vec<Act>,
    calls:   usize,
    journal: Journal,
}

impl Scripted {
    fn new(label: &'static str, script: Vec<Act>, journal: &Journal) -> Box<Self> {
        Box::new(Self { label, script, calls: 0, journal: Arc::clone(journal) })
    }
}

impl fmt::Display for Scripted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scripted({})", self.label)
    }
}

impl Task for Scripted {
    fn do_work(&mut self, _ctx: &mut TaskContext<'_>) -> TaskResult<()> {
        let act = self.script.get(self.calls).or(self.script.last()).copied().unwrap_or(Act::Succeed);
        self.calls += 1;
        self.journal.lock().unwrap().push(self.label.to_string());
        match act {
            Act::Succeed => Ok(()),
            Act::Recover => Err(TaskError::recoverable(format!("{} hiccup", self.label))),
            Act::Die => Err(TaskError::fatal(format!("{} broke", self.label))),
        }
    }

    fn is_equivalent(&self, other: &dyn Task) -> bool {
        other.as_any().downcast_ref::<Scripted>().is_some_and(|o| o.label == self.label)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Task that nudges every agent's velocity by `dx`.
struct Nudge {
    dx: f32,
}

impl fmt::Display for Nudge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nudge(dx={})", self.dx)
    }
}

impl Task for Nudge {
    fn do_work(&mut self, ctx: &mut TaskContext<'_>) -> TaskResult<()> {
        for (i, v) in ctx.agents.velocity.iter_mut().enumerate() {
            *v += Vec2::new(self.dx * (i as f32 + 1.0), 0.0);
        }
        Ok(())
    }

    fn is_equivalent(&self, other: &dyn Task) -> bool {
        other.as_any().downcast_ref::<Nudge>().is_some_and(|o| o.dx == self.dx)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn run_once(list: &mut crate::TaskList, store: &mut AgentStore) -> Result<crate::TaskReport, crate::FatalTaskError> {
    let states = vec![StateId(0); store.count];
    let mut ctx = TaskContext::new(Tick(0), 0.1, 0.1, store, &states);
    list.run_all(&mut ctx)
}

// ── Insertion / equivalence ───────────────────────────────────────────────────

#[cfg(test)]
mod insertion_tests {
    use super::*;
    use crate::TaskList;

    #[test]
    fn equivalent_task_is_discarded() {
        let mut list = TaskList::new();
        assert!(list.add(Box::new(Nudge { dx: 1.0 })));
        assert!(!list.add(Box::new(Nudge { dx: 1.0 })));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn different_parameters_are_kept() {
        let mut list = TaskList::new();
        assert!(list.add(Box::new(Nudge { dx: 1.0 })));
        assert!(list.add(Box::new(Nudge { dx: 2.0 })));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn different_kinds_are_kept() {
        let journal = Journal::default();
        let mut list = TaskList::new();
        assert!(list.add(Box::new(Nudge { dx: 1.0 })));
        assert!(list.add(Scripted::new("a", vec![Act::Succeed], &journal)));
        assert_eq!(list.descriptions(), vec!["Nudge(dx=1)", "Scripted(a)"]);
    }

    #[test]
    fn duplicate_insertion_does_not_double_work() {
        let mut once = TaskList::new();
        once.add(Box::new(Nudge { dx: 0.5 }));

        let mut twice = TaskList::new();
        twice.add(Box::new(Nudge { dx: 0.5 }));
        twice.add(Box::new(Nudge { dx: 0.5 }));

        let mut a = make_store(3);
        let mut b = make_store(3);
        run_once(&mut once, &mut a).unwrap();
        run_once(&mut twice, &mut b).unwrap();
        assert_eq!(a.velocity, b.velocity);
    }

    #[test]
    fn find_downcasts() {
        let mut list = TaskList::new();
        list.add(Box::new(Nudge { dx: 3.0 }));
        assert_eq!(list.find::<Nudge>().map(|n| n.dx), Some(3.0));
        assert!(list.find::<Scripted>().is_none());
    }
}

// ── run_all semantics ─────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;
    use crate::TaskList;

    #[test]
    fn runs_in_insertion_order() {
        let journal = Journal::default();
        let mut list = TaskList::new();
        for label in ["first", "second", "third"] {
            list.add(Scripted::new(label, vec![Act::Succeed], &journal));
        }
        let report = run_once(&mut list, &mut make_store(1)).unwrap();
        assert_eq!(report.succeeded, 3);
        assert!(report.is_clean());
        assert_eq!(*journal.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn recoverable_failure_is_isolated() {
        let journal = Journal::default();
        let mut list = TaskList::new();
        list.add(Scripted::new("a", vec![Act::Succeed], &journal));
        list.add(Scripted::new("b", vec![Act::Recover], &journal));
        list.add(Scripted::new("c", vec![Act::Succeed], &journal));
        list.add(Scripted::new("d", vec![Act::Succeed], &journal));

        let report = run_once(&mut list, &mut make_store(1)).unwrap();
        assert_eq!(report.succeeded, 3);
        assert_eq!(report.recovered.len(), 1);
        assert_eq!(report.executed(), 4);
        assert_eq!(report.recovered[0].index, 1);
        assert_eq!(report.recovered[0].task, "Scripted(b)");
        assert_eq!(report.recovered[0].message, "b hiccup");
        assert_eq!(*journal.lock().unwrap(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn recoverable_task_runs_again_next_tick() {
        let journal = Journal::default();
        let mut list = TaskList::new();
        list.add(Scripted::new("flaky", vec![Act::Recover, Act::Succeed], &journal));

        let mut store = make_store(1);
        let first = run_once(&mut list, &mut store).unwrap();
        let second = run_once(&mut list, &mut store).unwrap();
        assert_eq!(first.recovered.len(), 1);
        assert!(second.is_clean());
        assert_eq!(second.succeeded, 1);
        assert_eq!(journal.lock().unwrap().len(), 2);
    }

    #[test]
    fn fatal_failure_short_circuits() {
        let journal = Journal::default();
        let mut list = TaskList::new();
        list.add(Scripted::new("a", vec![Act::Succeed], &journal));
        list.add(Scripted::new("b", vec![Act::Recover], &journal));
        list.add(Scripted::new("c", vec![Act::Die], &journal));
        list.add(Scripted::new("d", vec![Act::Succeed], &journal));

        let err = run_once(&mut list, &mut make_store(1)).unwrap_err();
        assert_eq!(err.index, 2);
        assert_eq!(err.task, "Scripted(c)");
        assert_eq!(err.message, "c broke");
        assert_eq!(err.completed, 2);
        assert_eq!(*journal.lock().unwrap(), vec!["a", "b", "c"], "d must not run");
    }

    #[test]
    fn empty_list_reports_nothing() {
        let mut list = TaskList::new();
        let report = run_once(&mut list, &mut make_store(2)).unwrap();
        assert_eq!(report.executed(), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn identical_inputs_identical_results() {
        let build = || {
            let mut list = TaskList::new();
            list.add(Box::new(Nudge { dx: 0.25 }));
            list.add(Box::new(Nudge { dx: -0.1 }));
            list
        };
        let mut a = make_store(4);
        let mut b = a.clone();
        let (mut la, mut lb) = (build(), build());
        for _ in 0..3 {
            run_once(&mut la, &mut a).unwrap();
            run_once(&mut lb, &mut b).unwrap();
        }
        assert_eq!(a.velocity, b.velocity);
    }

    #[test]
    fn task_error_helpers() {
        assert!(TaskError::fatal("x").is_fatal());
        assert!(!TaskError::recoverable("x").is_fatal());
        assert_eq!(TaskError::recoverable("x").to_string(), "recoverable task error: x");
    }
}

// ── TaskCatalog ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod catalog_tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::{TaskBuildError, TaskCatalog, TaskFactory};

    struct NudgeFactory;

    impl TaskFactory for NudgeFactory {
        fn task_type(&self) -> &str {
            "nudge"
        }

        fn create(&self, params: &Value) -> Result<Box<dyn Task>, TaskBuildError> {
            let dx = params.get("dx").and_then(Value::as_f64).ok_or_else(|| {
                TaskBuildError::InvalidParams {
                    task_type: "nudge".into(),
                    reason:    "missing dx".into(),
                }
            })?;
            Ok(Box::new(Nudge { dx: dx as f32 }))
        }
    }

    struct OtherNudgeFactory;

    impl TaskFactory for OtherNudgeFactory {
        fn task_type(&self) -> &str {
            "nudge"
        }

        fn create(&self, _params: &Value) -> Result<Box<dyn Task>, TaskBuildError> {
            Ok(Box::new(Nudge { dx: 99.0 }))
        }
    }

    #[test]
    fn create_known_type() {
        let mut catalog = TaskCatalog::new();
        assert!(!catalog.register(Box::new(NudgeFactory)));
        let task = catalog.create("nudge", &json!({ "dx": 2.0 })).unwrap();
        assert_eq!(task.to_string(), "Nudge(dx=2)");
        assert!(catalog.contains("nudge"));
        assert_eq!(catalog.task_types(), vec!["nudge"]);
    }

    #[test]
    fn unknown_type_is_an_error() {
        let catalog = TaskCatalog::new();
        assert!(matches!(
            catalog.create("nope", &Value::Null),
            Err(TaskBuildError::UnknownType(name)) if name == "nope"
        ));
    }

    #[test]
    fn bad_params_surface() {
        let mut catalog = TaskCatalog::new();
        catalog.register(Box::new(NudgeFactory));
        assert!(matches!(
            catalog.create("nudge", &Value::Null),
            Err(TaskBuildError::InvalidParams { .. })
        ));
    }

    #[test]
    fn merge_adds_and_replaces_factories() {
        let mut catalog = TaskCatalog::new();
        catalog.register(Box::new(NudgeFactory));
        let mut staged = TaskCatalog::new();
        staged.register(Box::new(OtherNudgeFactory));
        catalog.merge(staged);
        assert_eq!(catalog.len(), 1);
        let task = catalog.create("nudge", &Value::Null).unwrap();
        assert_eq!(task.to_string(), "Nudge(dx=99)");
    }

    #[test]
    fn later_registration_wins() {
        let mut catalog = TaskCatalog::new();
        catalog.register(Box::new(NudgeFactory));
        assert!(catalog.register(Box::new(OtherNudgeFactory)));
        assert_eq!(catalog.len(), 1);
        let task = catalog.create("nudge", &Value::Null).unwrap();
        assert_eq!(task.to_string(), "Nudge(dx=99)");
    }
}
