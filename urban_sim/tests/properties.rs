// Property tests for the invariants that hold for any input: the angle
// wheel, the zoom clamp, intersection symmetry, and the grid accelerator
// agreeing with the plain scan.

use proptest::prelude::*;
use urban_sim::agent::AgentState;
use urban_sim::config::{AgentConfig, OcclusionConfig};
use urban_sim::occlusion::OcclusionIndex;
use urban_sim::vect::{Vect2, segments_intersect};

#[derive(Clone, Debug)]
enum Input {
    Turn(i32),
    Move(i32),
    Zoom(i32),
    Cycle,
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        (-1000i32..1000).prop_map(Input::Turn),
        (-50i32..50).prop_map(Input::Move),
        (-300i32..300).prop_map(Input::Zoom),
        Just(Input::Cycle),
    ]
}

fn point(range: i32) -> impl Strategy<Value = Vect2> {
    (-range..range, -range..range).prop_map(|(x, y)| Vect2::new(x, y))
}

fn segment(range: i32) -> impl Strategy<Value = (Vect2, Vect2)> {
    (point(range), point(range))
}

proptest! {
    #[test]
    fn facing_stays_on_the_wheel(inputs in prop::collection::vec(input(), 0..64)) {
        let mut agent = AgentState::new(AgentConfig::default());
        for i in inputs {
            match i {
                Input::Turn(d) => agent.turn(d),
                Input::Move(d) => agent.move_forward(d),
                Input::Zoom(d) => agent.zoom(d),
                Input::Cycle => agent.cycle(),
            }
            prop_assert!((0..=255).contains(&agent.facing()));
        }
    }

    #[test]
    fn zoom_stays_in_open_range(deltas in prop::collection::vec(-300i32..300, 0..64)) {
        let config = AgentConfig::default();
        let mut agent = AgentState::new(config.clone());
        for d in deltas {
            agent.zoom(d);
            prop_assert!(agent.zooming() > config.zoom_min);
            prop_assert!(agent.zooming() < config.zoom_max);
        }
    }

    #[test]
    fn intersection_is_symmetric((a0, a1) in segment(5000), (b0, b1) in segment(5000)) {
        let hit = segments_intersect(a0, a1, b0, b1);
        prop_assert_eq!(hit, segments_intersect(b0, b1, a0, a1));
        prop_assert_eq!(hit, segments_intersect(a1, a0, b0, b1));
        prop_assert_eq!(hit, segments_intersect(a0, a1, b1, b0));
    }

    #[test]
    fn segment_touches_itself((a0, a1) in segment(5000)) {
        prop_assert!(segments_intersect(a0, a1, a0, a1));
    }

    #[test]
    fn grid_matches_linear_scan(
        walls in prop::collection::vec(segment(3000), 1..80),
        queries in prop::collection::vec(segment(3000), 1..40),
        cell in 16i32..2048,
    ) {
        let mut linear = OcclusionIndex::new(&OcclusionConfig {
            grid_cell_size: None,
            ..OcclusionConfig::default()
        });
        let mut grid = OcclusionIndex::new(&OcclusionConfig {
            grid_cell_size: Some(cell),
            ..OcclusionConfig::default()
        });
        for &(a, b) in &walls {
            linear.add_wall(a, b).unwrap();
            grid.add_wall(a, b).unwrap();
        }
        for &(a, b) in &queries {
            prop_assert_eq!(linear.first_blocking(a, b), grid.first_blocking(a, b));
            prop_assert_eq!(linear.is_path_open(a, b).unwrap(), grid.is_path_open(a, b).unwrap());
        }
        prop_assert_eq!(linear.debug_segments(), grid.debug_segments());
        prop_assert_eq!(linear.hit_count(), grid.hit_count());
    }
}
