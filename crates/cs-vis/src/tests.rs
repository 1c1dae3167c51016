//! Unit tests for cs-vis.

use cs_core::{Vec2, Vec3};
use cs_fsm::{Goal, GoalSet, GoalShape};

use crate::{Color, DrawCommand, GoalRenderer, GoalRendererDb, draw_goals};

fn sample_goals() -> GoalSet {
    let mut goals = GoalSet::new();
    goals.add("door", "point", GoalShape::Point { at: Vec2::new(1.0, 2.0) }).unwrap();
    goals
        .add("plaza", "circle", GoalShape::Circle { center: Vec2::new(5.0, 5.0), radius: 2.0 })
        .unwrap();
    goals
        .add("hall", "aabb", GoalShape::Aabb { min: Vec2::new(0.0, 0.0), max: Vec2::new(4.0, 3.0) })
        .unwrap();
    goals
        .add("hotspot", "stress_zone", GoalShape::Circle { center: Vec2::ZERO, radius: 1.0 })
        .unwrap();
    goals
}

fn goal<'a>(goals: &'a GoalSet, name: &str) -> &'a Goal {
    goals.get(goals.id_of(name).unwrap()).unwrap()
}

struct Halo;

impl GoalRenderer for Halo {
    fn name(&self) -> &str {
        "halo"
    }

    fn draw(&self, goal: &Goal, _highlight: bool) -> Vec<DrawCommand> {
        vec![DrawCommand::Circle { center: goal.shape.centroid().to_xz(), radius: 9.0, color: Color::WHITE }]
    }
}

#[cfg(test)]
mod renderer_tests {
    use super::*;

    #[test]
    fn builtins_bind_shape_kinds() {
        let db = GoalRendererDb::with_builtins();
        let goals = sample_goals();
        assert_eq!(db.get_element_for(goal(&goals, "door")).name(), "point");
        assert_eq!(db.get_element_for(goal(&goals, "plaza")).name(), "circle");
        assert_eq!(db.get_element_for(goal(&goals, "hall")).name(), "aabb");
        assert_eq!(db.key_names(), vec!["aabb", "circle", "point"]);
    }

    #[test]
    fn unknown_kind_gets_marker() {
        let db = GoalRendererDb::with_builtins();
        let goals = sample_goals();
        let renderer = db.get_element_for(goal(&goals, "hotspot"));
        assert_eq!(renderer.name(), "marker");
        assert_eq!(db.get_default_element().name(), "marker");
    }

    #[test]
    fn circle_is_drawn_on_the_xz_plane() {
        let db = GoalRendererDb::with_builtins();
        let goals = sample_goals();
        let cmds = db.get_element_for(goal(&goals, "plaza")).draw(goal(&goals, "plaza"), false);
        assert_eq!(cmds, vec![DrawCommand::Circle {
            center: Vec3::new(5.0, 0.0, 5.0),
            radius: 2.0,
            color:  Color::GOAL,
        }]);
    }

    #[test]
    fn highlight_changes_color() {
        let db = GoalRendererDb::with_builtins();
        let goals = sample_goals();
        let hall = goal(&goals, "hall");
        let cmds = db.get_element("aabb").draw(hall, true);
        assert!(cmds.iter().all(|c| c.color() == Color::HIGHLIGHT));
    }

    #[test]
    fn mismatched_shape_falls_back_to_marker() {
        let db = GoalRendererDb::with_builtins();
        let goals = sample_goals();
        let cmds = db.get_element("aabb").draw(goal(&goals, "door"), false);
        assert!(matches!(cmds.as_slice(), [DrawCommand::Marker { .. }]));
    }

    #[test]
    fn plugin_renderer_overrides_builtin() {
        let mut db = GoalRendererDb::with_builtins();
        assert!(db.register_element("circle", || Box::new(Halo) as Box<dyn GoalRenderer>));
        let goals = sample_goals();
        assert_eq!(db.get_element_for(goal(&goals, "plaza")).name(), "halo");
        // Re-adding built-ins does not undo the override.
        db.add_builtins();
        assert_eq!(db.get_element("circle").name(), "halo");
    }

    #[test]
    fn draw_goals_covers_every_goal() {
        let db = GoalRendererDb::with_builtins();
        let cmds = draw_goals(&db, &sample_goals());
        // point: marker + label; circle; aabb; stress_zone via default marker.
        assert_eq!(cmds.len(), 5);
        assert!(matches!(&cmds[1], DrawCommand::Label { text, .. } if text == "door"));
    }
}
