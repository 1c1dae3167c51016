//! Building `StressTask`s from behavior-file parameters.

use serde::Deserialize;
use serde_json::Value;

use cs_task::{Task, TaskBuildError, TaskFactory};

use crate::StressTask;

/// Task type name behavior files use.
pub const STRESS_TASK_TYPE: &str = "stress";

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct StressParams {
    radius:       f32,
    decay:        f32,
    accumulation: f32,
    speed_relief: f32,
}

impl Default for StressParams {
    fn default() -> Self {
        let d = StressTask::default();
        Self {
            radius:       d.contact_radius,
            decay:        d.decay,
            accumulation: d.accumulation,
            speed_relief: d.speed_relief,
        }
    }
}

/// `{ "type": "stress", "params": { "radius": 2.0, "decay": 0.1, ... } }`
///
/// | Param          | Default |
/// |----------------|---------|
/// | `radius`       | 2.0     |
/// | `decay`        | 0.1     |
/// | `accumulation` | 0.5     |
/// | `speed_relief` | 0.0     |
pub struct StressTaskFactory;

impl TaskFactory for StressTaskFactory {
    fn task_type(&self) -> &str {
        STRESS_TASK_TYPE
    }

    fn create(&self, params: &Value) -> Result<Box<dyn Task>, TaskBuildError> {
        let p = if params.is_null() { StressParams::default() } else { StressParams::deserialize(params)? };

        let invalid = |reason: &str| TaskBuildError::InvalidParams {
            task_type: STRESS_TASK_TYPE.to_owned(),
            reason:    reason.to_owned(),
        };
        if !(p.radius.is_finite() && p.radius > 0.0) {
            return Err(invalid("radius must be positive"));
        }
        if [p.decay, p.accumulation, p.speed_relief].iter().any(|v| !(v.is_finite() && *v >= 0.0)) {
            return Err(invalid("decay, accumulation and speed_relief must be non-negative"));
        }

        Ok(Box::new(StressTask::new(p.radius, p.decay, p.accumulation).with_speed_relief(p.speed_relief)))
    }
}
