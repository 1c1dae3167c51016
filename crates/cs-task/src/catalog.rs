//! Task factories — how declarative task names become `Task` instances.

use std::collections::HashMap;

use serde_json::Value;

use crate::{Task, TaskBuildError};

/// Constructs tasks of one type from JSON parameters.
///
/// Registered in a [`TaskCatalog`] by the core or by plugins.  `params` is the
/// `params` object of a behavior-file task entry (`Value::Null` when absent).
pub trait TaskFactory: Send + Sync + 'static {
    /// The name behavior files use to request this task (e.g. `"stress"`).
    fn task_type(&self) -> &str;

    fn create(&self, params: &Value) -> Result<Box<dyn Task>, TaskBuildError>;
}

/// Task type name → factory.
///
/// Unlike the renderer registry, an unknown task type has no fallback: a
/// behavior file asking for a task nobody provides is an initialization
/// error.
#[derive(Default)]
pub struct TaskCatalog {
    factories: HashMap<String, Box<dyn TaskFactory>>,
}

impl TaskCatalog {
    pub fn new() -> Self {
        Self { factories: HashMap::new() }
    }

    /// Register `factory` under its `task_type()`.
    ///
    /// A later registration for the same name replaces the earlier one;
    /// returns `true` when that happened.
    pub fn register(&mut self, factory: Box<dyn TaskFactory>) -> bool {
        let name = factory.task_type().to_owned();
        let replaced = self.factories.insert(name.clone(), factory).is_some();
        if replaced {
            log::info!("task factory {name:?} replaced");
        } else {
            log::debug!("task factory {name:?} registered");
        }
        replaced
    }

    /// Move every factory of `other` into `self`, replacing on collision.
    pub fn merge(&mut self, other: TaskCatalog) {
        let mut factories: Vec<_> = other.factories.into_values().collect();
        factories.sort_unstable_by(|a, b| a.task_type().cmp(b.task_type()));
        for factory in factories {
            self.register(factory);
        }
    }

    /// Build a task of type `task_type`.
    pub fn create(&self, task_type: &str, params: &Value) -> Result<Box<dyn Task>, TaskBuildError> {
        self.factories
            .get(task_type)
            .ok_or_else(|| TaskBuildError::UnknownType(task_type.to_owned()))?
            .create(params)
    }

    pub fn contains(&self, task_type: &str) -> bool {
        self.factories.contains_key(task_type)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered task type names, sorted.
    pub fn task_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
