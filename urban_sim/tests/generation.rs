// End-to-end generation checks: a fixed seed builds the same town every
// time, with exact cell quotas, and the dump survives a file round trip.

use urban_sim::Seed;
use urban_sim::config::{COORDINATE_LIMIT, CityConfig};
use urban_sim::export;
use urban_sim::types::{LOTS_PER_CELL, POINTS_PER_TREE};
use urban_sim::world::WorldState;

const REFERENCE: [u16; 4] = [0x1234, 0x5678, 0x9abc, 0xdef0];

fn reference_world() -> WorldState {
    WorldState::new(Seed::new(REFERENCE), CityConfig::default()).unwrap()
}

#[test]
fn reference_seed_fills_the_grid_exactly() {
    let world = reference_world();
    let config = &world.config.neighborhood;
    let n = &world.neighborhood;
    assert_eq!(n.parks().len(), config.park_count);
    assert_eq!(n.twoblocks().len(), config.twoblock_count());
    assert_eq!(n.parks().len() + n.twoblocks().len(), 64);
    for t in n.twoblocks() {
        assert_eq!(t.houses.len(), LOTS_PER_CELL);
    }
    for p in n.parks() {
        assert_eq!(p.park.trees.len(), LOTS_PER_CELL);
    }
}

#[test]
fn same_seed_same_json() {
    let a = export::to_json(&reference_world().neighborhood).unwrap();
    let b = export::to_json(&reference_world().neighborhood).unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_seeds_differ() {
    let a = WorldState::new(Seed::new([1, 2, 3, 4]), CityConfig::default()).unwrap();
    let b = WorldState::new(Seed::new([4, 3, 2, 1]), CityConfig::default()).unwrap();
    assert_ne!(a.neighborhood, b.neighborhood);
}

#[test]
fn every_room_is_well_formed() {
    let world = reference_world();
    for t in world.neighborhood.twoblocks() {
        for house in &t.houses {
            assert!(house.rooms.len() >= 3);
            for room in &house.rooms {
                for (outer, inner) in room.outer_walls.iter().zip(&room.inner_walls) {
                    assert_ne!(outer, inner);
                }
            }
            for tree in house.trees.iter() {
                assert_eq!(tree.offsets.len(), POINTS_PER_TREE);
                assert!((5..13).contains(&tree.radius));
            }
        }
    }
}

#[test]
fn park_trees_are_large() {
    let world = reference_world();
    for p in world.neighborhood.parks() {
        for group in &p.park.trees {
            for tree in group.iter() {
                assert!((16..26).contains(&tree.radius), "radius {}", tree.radius);
            }
        }
    }
}

#[test]
fn dump_file_round_trip() {
    let world = reference_world();
    let path = std::env::temp_dir().join(format!("urban_dump_{}.json", std::process::id()));
    export::write_file(&world.neighborhood, &path).unwrap();
    let back = export::read_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    // Genetics are generation scratch and are not part of the dump.
    assert_eq!(back.twoblocks().len(), world.neighborhood.twoblocks().len());
    for (a, b) in back.twoblocks().iter().zip(world.neighborhood.twoblocks()) {
        assert_eq!(a.location, b.location);
        assert_eq!(a.rotation, b.rotation);
        assert_eq!(a.fences, b.fences);
        assert_eq!(a.road, b.road);
        for (ha, hb) in a.houses.iter().zip(&b.houses) {
            assert_eq!(ha.rooms, hb.rooms);
            assert_eq!(ha.trees, hb.trees);
        }
    }
    assert_eq!(back.parks(), world.neighborhood.parks());
    assert_eq!(back.fences(), world.neighborhood.fences());

    // An imported town indexes to the same blocking list.
    let rebuilt = WorldState::from_neighborhood(
        world.initial_seed,
        world.seed,
        back,
        CityConfig::default(),
    )
    .unwrap();
    assert_eq!(rebuilt.occlusion.blocking(), world.occlusion.blocking());
}

#[test]
fn config_file_changes_the_town() {
    let json = r#"{
        "neighborhood": { "edge_half": 2, "park_count": 2, "unit_space": 3400, "origin": [500, 500] },
        "occlusion": { "debug_decay_period": 6, "blocking_capacity": 100000,
                       "debug_capacity": 60000, "grid_cell_size": null },
        "agent": { "step_divisor": 1344, "zoom_min": -99, "zoom_max": 120 }
    }"#;
    let config = CityConfig::from_json(json).unwrap();
    let world = WorldState::new(Seed::new(REFERENCE), config).unwrap();
    assert_eq!(world.neighborhood.parks().len(), 2);
    assert_eq!(world.neighborhood.twoblocks().len(), 14);
    assert!(!world.occlusion.is_accelerated());
}

#[test]
fn widest_valid_city_stays_inside_coordinate_limit() {
    let mut config = CityConfig::default();
    config.neighborhood.edge_half = 1;
    config.neighborhood.park_count = 1;
    config.neighborhood.unit_space = 4_000_000;
    config.validate().unwrap();

    let world = WorldState::new(Seed::new(REFERENCE), config).unwrap();
    let inside = |v: i32| (-COORDINATE_LIMIT..=COORDINATE_LIMIT).contains(&v);
    let (mut low, mut high) = (i32::MAX, i32::MIN);
    for s in world.occlusion.blocking() {
        for p in [s.start, s.end] {
            assert!(inside(p.x) && inside(p.y), "{p:?} escapes the limit");
            low = low.min(p.x.min(p.y));
            high = high.max(p.x.max(p.y));
        }
    }
    // The camera multiplies point differences by a scale below 220.
    assert!((high - low).checked_mul(219).is_some());
}
