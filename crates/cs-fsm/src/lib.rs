//! `cs-fsm` — the behavior graph that drives every pedestrian.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`goal`]         | `GoalShape`, `Goal`, `GoalSet`                            |
//! | [`state`]        | `State`, `GoalSelector`, `VelocityComponent`              |
//! | [`transition`]   | `Transition`, `Condition`                                 |
//! | [`model`]        | `PedestrianModel` trait, `DirectModel`, `DampedModel`, `ModelCatalog` |
//! | [`behavior`]     | JSON behavior file types and loader                       |
//! | [`scene`]        | CSV scene loader                                          |
//! | [`builder`]      | `FsmBuilder`                                              |
//! | [`fsm`]          | `Fsm`, `StepReport`                                       |
//!
//! # Tick
//!
//! ```text
//! advance():
//!   ① Transitions  first matching outgoing transition per agent fires
//!   ② Preferred    state velocity component → preferred velocity
//!   ③ Velocity     PedestrianModel::compute_velocity (parallel feature)
//!   ④ Integrate    clamp to max_speed, move, orient; ascending AgentId
//!   ⑤ Tasks        TaskList::run_all once
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the velocity phase on Rayon's thread pool.        |

pub mod behavior;
pub mod builder;
pub mod error;
pub mod fsm;
pub mod goal;
pub mod model;
pub mod scene;
pub mod state;
pub mod transition;


pub use behavior::{BehaviorSpec, load_behavior, load_behavior_reader};
pub use builder::FsmBuilder;
pub use error::{FsmError, FsmResult};
pub use fsm::{Fsm, StepReport};
pub use goal::{Goal, GoalSet, GoalShape};
pub use model::{DampedModel, DirectModel, ModelCatalog, ModelContext, PedestrianModel};
pub use scene::{Scene, load_scene, load_scene_reader};
pub use state::{GoalSelector, State, VelocityComponent};
pub use transition::{Condition, Transition};
