// urban_sim: procedural town generation and visibility, no rendering.
//
// This crate builds a walled town from a four-word seed and answers "can I
// see / walk from here to there?" against the town's walls and fences. It
// has no windowing or image dependencies; `urban_render` draws what this
// crate produces and `urban_cli` wraps both in command-line tools.
//
// Module overview:
// - `vect.rs`:         Integer 2D/3D vectors, the 256-step sine table, rotation, segment intersection.
// - `types.rs`:        Layout constants, `Side` / `Sides`.
// - `tree.rs`:         Tree outlines and 2 x 2 tree groups around an anchor.
// - `path.rs`:         Road quads (cell frame plus dividing strip).
// - `fence.rs`:        Wabbled two-block fences.
// - `house.rs`:        Genetics-driven room chains, rotated onto their lots.
// - `park.rs`:         Park cells: a ring road and sixteen tree groups.
// - `neighborhood.rs`: The whole town: cell choice with exact park/two-block quotas.
// - `occlusion.rs`:    Ordered blocking segments, path queries, debug trail, grid accelerator.
// - `world.rs`:        WorldState: neighborhood plus populated occlusion index.
// - `agent.rs`:        The viewer: facing, zoom, movement.
// - `city.rs`:         City-space torus and the being movement/sight hooks.
// - `export.rs`:       JSON dump and import of a neighborhood.
// - `config.rs`:       CityConfig and its sections, JSON load/save and validation.
// - `bounded.rs`:      Fixed-capacity list that errors instead of dropping.
// - `error.rs`:        UrbanError.
//
// **Critical constraint: determinism.** Generation is a pure function of
// the seed and the config. All randomness comes from `urban_prng::Seed`,
// drawn in a fixed order; all geometry is integer math. No floating point,
// no system time, no iteration over hash maps where order matters.

pub mod agent;
pub mod bounded;
pub mod city;
pub mod config;
pub mod error;
pub mod export;
pub mod fence;
pub mod house;
pub mod neighborhood;
pub mod occlusion;
pub mod park;
pub mod path;
pub use urban_prng as prng;
pub use urban_prng::Seed;
pub mod tree;
pub mod types;
pub mod vect;
pub mod world;
