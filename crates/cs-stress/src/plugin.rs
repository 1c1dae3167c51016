//! `StressPlugin` and the stress-zone goal renderer.

use cs_fsm::{Goal, GoalShape};
use cs_plugin::{Plugin, PluginRegistrar, PluginResult};
use cs_task::TaskList;
use cs_vis::{Color, DrawCommand, GoalRenderer};

use crate::{StressTask, StressTaskFactory};

/// Goal kind drawn by [`StressZoneRenderer`].
pub const STRESS_ZONE_KIND: &str = "stress_zone";

const ZONE_COLOR: Color = Color::new(0.9, 0.15, 0.1);

/// Draws a stress zone as its outline plus a label.
pub struct StressZoneRenderer;

impl GoalRenderer for StressZoneRenderer {
    fn name(&self) -> &str {
        "stress_zone"
    }

    fn draw(&self, goal: &Goal, highlight: bool) -> Vec<DrawCommand> {
        let color = if highlight { Color::HIGHLIGHT } else { ZONE_COLOR };
        let at = goal.shape.centroid().to_xz();
        let outline = match goal.shape {
            GoalShape::Circle { center, radius } => DrawCommand::Circle { center: center.to_xz(), radius, color },
            GoalShape::Aabb { min, max } => DrawCommand::Rect { min: min.to_xz(), max: max.to_xz(), color },
            GoalShape::Point { .. } => DrawCommand::Marker { at, size: 0.5, color },
        };
        vec![outline, DrawCommand::Label { at, text: format!("{} (stress)", goal.name), color }]
    }
}

/// Registers the `stress` task type and the `stress_zone` renderer.
///
/// Built with [`attaching`](Self::attaching), it also adds its task to every
/// behavior graph, whether or not the behavior file asks for one.
#[derive(Default)]
pub struct StressPlugin {
    attach: Option<StressTask>,
}

impl StressPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attaching(task: StressTask) -> Self {
        Self { attach: Some(task) }
    }
}

impl Plugin for StressPlugin {
    fn name(&self) -> &str {
        "stress"
    }

    fn register(&self, registrar: &mut PluginRegistrar<'_>) -> PluginResult<()> {
        registrar.register_task(Box::new(StressTaskFactory));
        registrar.register_goal_renderer(STRESS_ZONE_KIND, || Box::new(StressZoneRenderer) as Box<dyn GoalRenderer>);
        Ok(())
    }

    fn attach(&self, tasks: &mut TaskList) {
        if let Some(task) = &self.attach {
            if !tasks.add(Box::new(task.clone())) {
                log::debug!("stress plugin: {task} already present");
            }
        }
    }
}
