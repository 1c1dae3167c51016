//! Fluent builder for constructing an [`Fsm`].

use std::collections::HashMap;

use cs_agent::AgentStoreBuilder;
use cs_core::{AgentId, GoalId, SimConfig, SimRng, StateId};
use cs_task::{TaskCatalog, TaskList};

use crate::behavior::{ConditionSpec, SelectorSpec, VelocitySpec};
use crate::{
    BehaviorSpec, Condition, DirectModel, Fsm, FsmError, FsmResult, GoalSelector, GoalSet,
    GoalShape, PedestrianModel, Scene, State, Transition, VelocityComponent,
};

/// Fluent builder for [`Fsm`].
///
/// # Required inputs
///
/// - [`BehaviorSpec`]: goals, states, transitions, tasks
/// - [`Scene`]: the initial population
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                         |
/// |-----------------|-------------------------------------------------|
/// | `.model(m)`     | [`DirectModel`]                                 |
/// | `.tasks(c)`     | empty catalog (any declared task is an error)   |
/// | `.config(c)`    | the behavior's `config`, else `SimConfig::default()` |
///
/// # Example
///
/// ```rust,ignore
/// let fsm = FsmBuilder::new(load_behavior(path)?, load_scene(scene)?)
///     .model(catalog.create("damped")?)
///     .tasks(&tasks)
///     .build()?;
/// ```
pub struct FsmBuilder<'a> {
    behavior: BehaviorSpec,
    scene:    Scene,
    model:    Option<Box<dyn PedestrianModel>>,
    catalog:  Option<&'a TaskCatalog>,
    config:   Option<SimConfig>,
}

impl<'a> FsmBuilder<'a> {
    pub fn new(behavior: BehaviorSpec, scene: Scene) -> Self {
        Self { behavior, scene, model: None, catalog: None, config: None }
    }

    /// The pedestrian model computing velocities.
    pub fn model(mut self, model: Box<dyn PedestrianModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Catalog used to instantiate the behavior's `tasks` entries.
    pub fn tasks(mut self, catalog: &'a TaskCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Override the behavior file's `config` section.
    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Resolve every name in the behavior, build the agent store and task
    /// list, and place each agent in its initial state.
    pub fn build(self) -> FsmResult<Fsm> {
        let FsmBuilder { behavior, scene, model, catalog, config } = self;

        let config = config.or(behavior.config).unwrap_or_default();
        config.validate()?;

        if scene.initial_states.len() != scene.agents.len() {
            return Err(FsmError::AgentCountMismatch {
                expected: scene.agents.len(),
                got:      scene.initial_states.len(),
                what:     "initial states",
            });
        }

        // ── Goals ─────────────────────────────────────────────────────────
        let mut goals = GoalSet::new();
        for spec in behavior.goals {
            check_shape(&spec.name, &spec.shape)?;
            let kind = spec.kind.unwrap_or_else(|| spec.shape.type_name().to_owned());
            goals.add(spec.name, kind, spec.shape)?;
        }

        // ── States ────────────────────────────────────────────────────────
        if behavior.states.is_empty() {
            return Err(FsmError::Behavior("behavior declares no states".into()));
        }
        let mut state_ids: HashMap<String, StateId> = HashMap::new();
        let mut states = Vec::with_capacity(behavior.states.len());
        for (i, spec) in behavior.states.into_iter().enumerate() {
            let id = StateId::try_from(i)
                .map_err(|_| FsmError::Behavior(format!("too many states ({i}+)")))?;
            if state_ids.insert(spec.name.clone(), id).is_some() {
                return Err(FsmError::Behavior(format!("duplicate state {:?}", spec.name)));
            }
            let selector = resolve_selector(&spec.goal, &goals)?;
            let velocity = match spec.velocity {
                Some(VelocitySpec::Zero) => VelocityComponent::Zero,
                Some(VelocitySpec::Goal) => VelocityComponent::TowardGoal,
                None if selector == GoalSelector::None => VelocityComponent::Zero,
                None => VelocityComponent::TowardGoal,
            };
            states.push(State { id, name: spec.name, selector, velocity, is_final: spec.is_final });
        }
        let lookup_state = |name: &str| {
            state_ids.get(name).copied().ok_or_else(|| FsmError::UnknownState(name.to_owned()))
        };

        // ── Transitions ───────────────────────────────────────────────────
        let mut transitions: Vec<Vec<Transition>> = vec![Vec::new(); states.len()];
        for spec in &behavior.transitions {
            let from = lookup_state(&spec.from)?;
            let to = lookup_state(&spec.to)?;
            let condition = match spec.condition {
                ConditionSpec::Auto => Condition::Auto,
                ConditionSpec::GoalReached { distance } => Condition::GoalReached { distance },
                ConditionSpec::Timer { secs } => Condition::Timer { secs },
            };
            transitions[from.index()].push(Transition { from, to, condition });
        }

        let default_state = match &behavior.initial_state {
            Some(name) => lookup_state(name)?,
            None => StateId(0),
        };
        let mut initial = Vec::with_capacity(scene.len());
        for state in &scene.initial_states {
            initial.push(match state {
                Some(name) => lookup_state(name)?,
                None => default_state,
            });
        }

        // ── Tasks ─────────────────────────────────────────────────────────
        let empty = TaskCatalog::new();
        let catalog = catalog.unwrap_or(&empty);
        let mut tasks = TaskList::new();
        for spec in &behavior.tasks {
            let task = catalog.create(&spec.task_type, &spec.params)?;
            let description = task.to_string();
            if !tasks.add(task) {
                log::info!("task {description} declared twice; keeping the first");
            }
        }

        // ── Agents ────────────────────────────────────────────────────────
        let mut store = AgentStoreBuilder::with_capacity(scene.len());
        for spec in scene.agents {
            store.push(spec);
        }
        let agents = store.build();
        let count = agents.count;

        #[cfg(feature = "parallel")]
        let pool = match config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| FsmError::Behavior(format!("thread pool: {e}")))?,
            ),
            None => None,
        };

        let model = model.unwrap_or_else(|| Box::new(DirectModel) as Box<dyn PedestrianModel>);
        log::info!(
            "behavior graph ready: {count} agents, {} states, {} goals, {} tasks, model {:?}",
            states.len(),
            goals.len(),
            tasks.len(),
            model.name()
        );

        let mut fsm = Fsm {
            clock: config.make_clock(),
            rng: SimRng::new(config.seed),
            config,
            agents,
            agent_states: vec![default_state; count],
            agent_goals: vec![None::<GoalId>; count],
            state_entered: vec![0.0; count],
            states,
            transitions,
            goals,
            tasks,
            model,
            #[cfg(feature = "parallel")]
            pool,
        };
        for (i, state) in initial.into_iter().enumerate() {
            fsm.enter_state(AgentId(i as u32), state);
        }
        Ok(fsm)
    }
}

fn resolve_selector(spec: &SelectorSpec, goals: &GoalSet) -> FsmResult<GoalSelector> {
    let lookup = |name: &String| goals.id_of(name).ok_or_else(|| FsmError::UnknownGoal(name.clone()));
    Ok(match spec {
        SelectorSpec::None => GoalSelector::None,
        SelectorSpec::Fixed { goal } => GoalSelector::Fixed(lookup(goal)?),
        SelectorSpec::Nearest { goals: names } => {
            GoalSelector::Nearest(names.iter().map(lookup).collect::<FsmResult<_>>()?)
        }
        SelectorSpec::Random { goals: names } => {
            GoalSelector::Random(names.iter().map(lookup).collect::<FsmResult<_>>()?)
        }
    })
}

fn check_shape(name: &str, shape: &GoalShape) -> FsmResult<()> {
    let ok = match *shape {
        GoalShape::Point { at } => at.is_finite(),
        GoalShape::Circle { center, radius } => center.is_finite() && radius.is_finite() && radius >= 0.0,
        GoalShape::Aabb { min, max } => {
            min.is_finite() && max.is_finite() && min.x <= max.x && min.y <= max.y
        }
    };
    if ok {
        Ok(())
    } else {
        Err(FsmError::Behavior(format!("goal {name:?} has an invalid shape {shape:?}")))
    }
}
