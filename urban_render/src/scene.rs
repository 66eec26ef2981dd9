// Scene builders: fill draw lists from simulation state.
//
// `draw_neighborhood` writes the static town into the display bucket once
// per world. Layering follows the frame passes in `render.rs`: roads are
// the only filled quads, so they are painted after every line; rooms,
// fences and trees are line work.
//
//   roads           grey, filled
//   fences          black thin; the city boundary red wide
//   room structure  dark grey wide outline
//   room inset      black thin
//   windows         light grey wide
//   doors           orange thin
//   trees           light green thin, 32-point outline
//
// `draw_agent` and `draw_occlusion_debug` rebuild the active bucket each
// frame; `draw_label` writes seven-segment digits to the text bucket.

use crate::draw_list::{Bucket, DrawLists};
use crate::palette::Color;
use urban_sim::agent::AgentState;
use urban_sim::error::Result;
use urban_sim::house::Room;
use urban_sim::neighborhood::Neighborhood;
use urban_sim::occlusion::{OcclusionIndex, SegmentKind};
use urban_sim::path::PathGroup;
use urban_sim::tree::{Tree, TreeGroup};
use urban_sim::types::{POINTS_PER_TREE, Side};
use urban_sim::vect::{SINE_MAXIMUM, Vect2};

/// Length of the agent marker's nose, world units.
const AGENT_SIZE: i32 = 120;

// ---------------------------------------------------------------------------
// Town
// ---------------------------------------------------------------------------

/// World-space outline of a tree: spoke `i` points along angle `8 * i`
/// and is `offset * radius / 2` long.
pub fn tree_outline(tree: &Tree) -> [Vect2; POINTS_PER_TREE] {
    let mut points = [tree.center; POINTS_PER_TREE];
    for (i, point) in points.iter_mut().enumerate() {
        let spoke = Vect2::direction(i as i32 * 8, 1);
        point.add_scaled(spoke, tree.offsets[i] * tree.radius, SINE_MAXIMUM * 2);
    }
    points
}

fn draw_roads(lists: &mut DrawLists, road: &PathGroup) -> Result<()> {
    lists.set_color(Color::Grey);
    for path in road.iter() {
        lists.quad(Bucket::Display, path.points, true)?;
    }
    Ok(())
}

fn draw_trees(lists: &mut DrawLists, group: &TreeGroup) -> Result<()> {
    lists.set_color(Color::LightGreen);
    lists.thin_line();
    for tree in group.iter() {
        lists.polygon(Bucket::Display, &tree_outline(tree))?;
    }
    Ok(())
}

fn draw_room(lists: &mut DrawLists, room: &Room) -> Result<()> {
    lists.set_color(Color::DarkGrey);
    lists.quad(Bucket::Display, room.inner_walls, false)?;
    lists.set_color(Color::Black);
    lists.thin_line();
    lists.polygon(Bucket::Display, &room.outer_walls)?;

    for side in Side::ALL {
        if let Some(window) = room.window(side) {
            lists.set_color(Color::LightGrey);
            lists.wide_line();
            lists.line(Bucket::Display, window[0], window[1])?;
        }
        if let Some(door) = room.door(side) {
            lists.set_color(Color::Orange);
            lists.thin_line();
            lists.polygon(Bucket::Display, door)?;
        }
    }
    Ok(())
}

/// Append the whole town to the display bucket.
pub fn draw_neighborhood(lists: &mut DrawLists, neighborhood: &Neighborhood) -> Result<()> {
    for twoblock in neighborhood.twoblocks() {
        draw_roads(lists, &twoblock.road)?;
        lists.set_color(Color::Black);
        lists.thin_line();
        for fence in &twoblock.fences {
            lists.line(Bucket::Display, fence.start, fence.end)?;
        }
        for house in &twoblock.houses {
            for room in &house.rooms {
                draw_room(lists, room)?;
            }
            draw_trees(lists, &house.trees)?;
        }
    }
    for cell in neighborhood.parks() {
        draw_roads(lists, &cell.park.road)?;
        for group in &cell.park.trees {
            draw_trees(lists, group)?;
        }
    }
    lists.set_color(Color::Red);
    lists.wide_line();
    for fence in neighborhood.fences() {
        lists.line(Bucket::Display, fence.start, fence.end)?;
    }
    tracing::debug!(
        lines = lists.lines(Bucket::Display).len(),
        quads = lists.quads().len(),
        "display list built"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Per-frame overlays
// ---------------------------------------------------------------------------

/// A red arrowhead at the agent, nose along its heading.
pub fn draw_agent(lists: &mut DrawLists, agent: &AgentState) -> Result<()> {
    let at = |angle: i32, length: i32| {
        let mut p = agent.location();
        p.add_scaled(Vect2::direction(angle.rem_euclid(256), 1), length, SINE_MAXIMUM);
        p
    };
    let heading = 192 - agent.facing();
    let nose = at(heading, AGENT_SIZE);
    let left = at(heading + 96, AGENT_SIZE / 2);
    let right = at(heading - 96, AGENT_SIZE / 2);
    lists.set_color(Color::Red);
    lists.wide_line();
    lists.polygon(Bucket::Active, &[nose, left, agent.location(), right])
}

/// The index's debug trail: queries in light green, the walls that
/// blocked them in red.
pub fn draw_occlusion_debug(lists: &mut DrawLists, index: &OcclusionIndex) -> Result<()> {
    for segment in index.debug_segments() {
        if segment.kind == SegmentKind::Query {
            lists.set_color(Color::LightGreen);
            lists.thin_line();
        } else {
            lists.set_color(Color::Red);
            lists.wide_line();
        }
        lists.line(Bucket::Active, segment.start, segment.end)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Segment endpoints on a 1 x 2 cell, y down: a, b, c, d, e, f, g.
const SEGMENTS: [((i32, i32), (i32, i32)); 7] = [
    ((0, 0), (1, 0)),
    ((1, 0), (1, 1)),
    ((1, 1), (1, 2)),
    ((0, 2), (1, 2)),
    ((0, 1), (0, 2)),
    ((0, 0), (0, 1)),
    ((0, 1), (1, 1)),
];

fn glyph(c: char) -> u8 {
    match c {
        '0' => 0x3f,
        '1' => 0x06,
        '2' => 0x5b,
        '3' => 0x4f,
        '4' => 0x66,
        '5' => 0x6d,
        '6' => 0x7d,
        '7' => 0x07,
        '8' => 0x7f,
        '9' => 0x6f,
        '-' => 0x40,
        _ => 0,
    }
}

/// Seven-segment `text` with its top-left at `origin` (screen pixels),
/// `size` pixels per segment.
///
/// Only digits and `-` have glyphs. Any other character (letters, spaces,
/// punctuation) still takes up one advance but draws nothing, and is not
/// reported as an error.
pub fn draw_label(lists: &mut DrawLists, origin: Vect2, text: &str, size: i32) -> Result<()> {
    lists.set_color(Color::Black);
    lists.thin_line();
    let advance = size + size / 2;
    for (i, c) in text.chars().enumerate() {
        let mask = glyph(c);
        let cell = origin.offset(i as i32 * advance, 0);
        for (bit, &((x0, y0), (x1, y1))) in SEGMENTS.iter().enumerate() {
            if (mask >> bit) & 1 == 1 {
                lists.line(
                    Bucket::Text,
                    cell.offset(x0 * size, y0 * size),
                    cell.offset(x1 * size, y1 * size),
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use urban_sim::config::{AgentConfig, NeighborhoodConfig, OcclusionConfig};
    use urban_sim::neighborhood::neighborhood_init;
    use urban_sim::Seed;

    fn lists() -> DrawLists {
        DrawLists::new(&RenderConfig::default())
    }

    #[test]
    fn label_segment_counts() {
        for (text, expected) in [("8", 7), ("1", 2), ("-", 1), ("10", 8), ("a b", 0)] {
            let mut l = lists();
            draw_label(&mut l, Vect2::ZERO, text, 4).unwrap();
            assert_eq!(l.lines(Bucket::Text).len(), expected, "{text}");
        }
    }

    #[test]
    fn label_cells_advance() {
        let mut l = lists();
        draw_label(&mut l, Vect2::new(10, 20), "11", 4).unwrap();
        let lines = l.lines(Bucket::Text);
        assert_eq!(lines[0].start, Vect2::new(14, 20));
        assert_eq!(lines[2].start, Vect2::new(20, 20));
    }

    #[test]
    fn tree_outline_surrounds_center() {
        let tree = Tree {
            center: Vect2::new(1000, 1000),
            radius: 10,
            offsets: [60; POINTS_PER_TREE],
        };
        let outline = tree_outline(&tree);
        // 60 * 10 / 2 = 300 along each spoke.
        assert_eq!(outline[0], Vect2::new(1300, 1000));
        assert_eq!(outline[16], Vect2::new(700, 1000));
        for p in outline {
            assert!(Vect2::distance_under(p, tree.center, 301));
            assert!(!Vect2::distance_under(p, tree.center, 290));
        }
    }

    #[test]
    fn neighborhood_fills_display_only() {
        let config = NeighborhoodConfig {
            edge_half: 1,
            park_count: 1,
            ..NeighborhoodConfig::default()
        };
        let n = neighborhood_init(&mut Seed::new([0x1234, 0x5678, 0x9abc, 0xdef0]), &config);
        let mut l = lists();
        draw_neighborhood(&mut l, &n).unwrap();
        // 3 two-blocks with 5 road quads, 1 park with 4.
        assert_eq!(l.quads().len(), 3 * 5 + 4);
        assert!(l.lines(Bucket::Active).is_empty());
        assert!(l.lines(Bucket::Text).is_empty());
        let walls: usize = n.room_count() * 8;
        assert!(l.lines(Bucket::Display).len() > walls);
    }

    #[test]
    fn agent_marker_is_active() {
        let mut l = lists();
        let agent = AgentState::new(AgentConfig::default());
        draw_agent(&mut l, &agent).unwrap();
        let lines = l.lines(Bucket::Active);
        assert_eq!(lines.len(), 4);
        // Facing 0: the nose is 120 units toward -y.
        assert_eq!(lines[0].start, Vect2::new(0, -120));
        assert!(l.lines(Bucket::Display).is_empty());
    }

    #[test]
    fn debug_trail_colors_hits() {
        let mut index = OcclusionIndex::new(&OcclusionConfig::default());
        index.add_wall(Vect2::new(5, -5), Vect2::new(5, 5)).unwrap();
        index.is_path_open(Vect2::ZERO, Vect2::new(10, 0)).unwrap();
        let mut l = lists();
        draw_occlusion_debug(&mut l, &index).unwrap();
        let lines = l.lines(Bucket::Active);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].color, Color::LightGreen);
        assert_eq!(lines[1].color, Color::Red);
    }
}
