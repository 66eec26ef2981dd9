// Visibility index: ordered blocking segments and line-of-movement queries.
//
// Every wall edge and fence in the town is appended, in a fixed order, to
// an append-only blocking list. `is_path_open` answers "does the segment
// from A to B cross anything?" by scanning that list in insertion order and
// stopping at the first hit. Queries and their first hits are also recorded
// in a debug list so the renderer can show what the agent has been
// "looking at"; `account_reset`, called once per tick, clears the hit
// counter and wipes the debug list every `debug_decay_period` ticks.
//
// An optional uniform-grid accelerator (`FxHashMap` of cell → segment
// indices) narrows the scan to segments whose bounding boxes share a cell
// with the query. Candidates are sorted by insertion index before testing,
// so the first hit, and therefore the debug output, is identical to the
// plain scan.
//
// Both lists are bounded (`BoundedVec`); overflowing either one is an error
// rather than a silently dropped segment.
//
// See also: `vect.rs` for `segments_intersect`, `world.rs` for the order in
// which the town's segments are added, `agent.rs` / `city.rs` for callers.

use crate::bounded::BoundedVec;
use crate::config::OcclusionConfig;
use crate::error::Result;
use crate::vect::{Vect2, segments_intersect};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// What a recorded segment represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    Wall,
    Fence,
    /// A movement or sight query, recorded only in the debug list.
    Query,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vect2,
    pub end: Vect2,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn new(start: Vect2, end: Vect2, kind: SegmentKind) -> Self {
        Self { start, end, kind }
    }
}

// ---------------------------------------------------------------------------
// Grid accelerator
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct SegmentGrid {
    cell_size: i32,
    cells: FxHashMap<(i32, i32), Vec<u32>>,
}

impl SegmentGrid {
    fn new(cell_size: i32) -> Self {
        Self {
            cell_size,
            cells: FxHashMap::default(),
        }
    }

    /// Inclusive cell bounds covering the bounding box of `a`..`b`.
    fn cell_bounds(&self, a: Vect2, b: Vect2) -> ((i32, i32), (i32, i32)) {
        let cell = |v: i32| v.div_euclid(self.cell_size);
        (
            (cell(a.x.min(b.x)), cell(a.y.min(b.y))),
            (cell(a.x.max(b.x)), cell(a.y.max(b.y))),
        )
    }

    fn insert(&mut self, index: u32, segment: &Segment) {
        let ((x0, y0), (x1, y1)) = self.cell_bounds(segment.start, segment.end);
        for cx in x0..=x1 {
            for cy in y0..=y1 {
                self.cells.entry((cx, cy)).or_default().push(index);
            }
        }
    }

    /// Every segment index whose cells overlap the query's, ascending and
    /// without duplicates.
    fn candidates(&self, a: Vect2, b: Vect2, out: &mut Vec<u32>) {
        out.clear();
        let ((x0, y0), (x1, y1)) = self.cell_bounds(a, b);
        for cx in x0..=x1 {
            for cy in y0..=y1 {
                if let Some(indices) = self.cells.get(&(cx, cy)) {
                    out.extend_from_slice(indices);
                }
            }
        }
        out.sort_unstable();
        out.dedup();
    }

    fn clear(&mut self) {
        self.cells.clear();
    }
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// Blocking segments plus the per-tick debug trail.
#[derive(Clone, Debug)]
pub struct OcclusionIndex {
    blocking: BoundedVec<Segment>,
    debug: BoundedVec<Segment>,
    hit_count: u32,
    decay_timer: u32,
    decay_period: u32,
    grid: Option<SegmentGrid>,
    scratch: Vec<u32>,
}

impl OcclusionIndex {
    pub fn new(config: &OcclusionConfig) -> Self {
        Self {
            blocking: BoundedVec::new("blocking segments", config.blocking_capacity),
            debug: BoundedVec::new("debug segments", config.debug_capacity),
            hit_count: 0,
            decay_timer: 0,
            decay_period: config.debug_decay_period.max(1),
            grid: config.grid_cell_size.map(SegmentGrid::new),
            scratch: Vec::new(),
        }
    }

    fn add(&mut self, segment: Segment) -> Result<()> {
        let index = self.blocking.len() as u32;
        self.blocking.push(segment)?;
        if let Some(grid) = self.grid.as_mut() {
            grid.insert(index, &segment);
        }
        Ok(())
    }

    pub fn add_wall(&mut self, start: Vect2, end: Vect2) -> Result<()> {
        self.add(Segment::new(start, end, SegmentKind::Wall))
    }

    pub fn add_fence(&mut self, start: Vect2, end: Vect2) -> Result<()> {
        self.add(Segment::new(start, end, SegmentKind::Fence))
    }

    /// Index of the earliest-added segment crossing `origin`..`destination`.
    pub fn first_blocking(&mut self, origin: Vect2, destination: Vect2) -> Option<usize> {
        let blocking = self.blocking.as_slice();
        let crosses = |s: &Segment| segments_intersect(origin, destination, s.start, s.end);
        match self.grid.as_ref() {
            Some(grid) => {
                let mut candidates = std::mem::take(&mut self.scratch);
                grid.candidates(origin, destination, &mut candidates);
                let hit = candidates
                    .iter()
                    .map(|&i| i as usize)
                    .find(|&i| crosses(&blocking[i]));
                self.scratch = candidates;
                hit
            }
            None => blocking.iter().position(crosses),
        }
    }

    /// True if nothing blocks the segment. Records the query, and on a
    /// block the first blocking segment, in the debug list.
    pub fn is_path_open(&mut self, origin: Vect2, destination: Vect2) -> Result<bool> {
        self.debug
            .push(Segment::new(origin, destination, SegmentKind::Query))?;
        match self.first_blocking(origin, destination) {
            Some(index) => {
                let hit = self.blocking.as_slice()[index];
                self.debug.push(hit)?;
                self.hit_count += 1;
                Ok(false)
            }
            None => Ok(true),
        }
    }

    /// Per-tick bookkeeping: zero the hit counter and periodically clear
    /// the debug trail.
    pub fn account_reset(&mut self) {
        self.hit_count = 0;
        self.decay_timer += 1;
        if self.decay_timer >= self.decay_period {
            self.debug.clear();
            self.decay_timer = 0;
        }
    }

    /// Drop every segment and reset the counters.
    pub fn clear(&mut self) {
        self.blocking.clear();
        self.debug.clear();
        self.hit_count = 0;
        self.decay_timer = 0;
        if let Some(grid) = self.grid.as_mut() {
            grid.clear();
        }
    }

    pub fn blocking(&self) -> &[Segment] {
        self.blocking.as_slice()
    }

    pub fn debug_segments(&self) -> &[Segment] {
        self.debug.as_slice()
    }

    pub fn hit_count(&self) -> u32 {
        self.hit_count
    }

    pub fn len(&self) -> usize {
        self.blocking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocking.is_empty()
    }

    pub fn is_accelerated(&self) -> bool {
        self.grid.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UrbanError;

    fn linear() -> OcclusionIndex {
        OcclusionIndex::new(&OcclusionConfig {
            grid_cell_size: None,
            ..OcclusionConfig::default()
        })
    }

    fn v(x: i32, y: i32) -> Vect2 {
        Vect2::new(x, y)
    }

    /// Walls A (x = 10), B (off to the side) and C (x = 20). A query along
    /// y = 0 crosses A and C.
    fn abc(index: &mut OcclusionIndex) {
        index.add_wall(v(10, -5), v(10, 5)).unwrap();
        index.add_wall(v(100, 100), v(110, 110)).unwrap();
        index.add_wall(v(20, -5), v(20, 5)).unwrap();
    }

    #[test]
    fn first_hit_in_insertion_order() {
        for mut index in [linear(), OcclusionIndex::new(&OcclusionConfig::default())] {
            abc(&mut index);
            assert!(!index.is_path_open(v(0, 0), v(30, 0)).unwrap());
            let debug = index.debug_segments();
            assert_eq!(debug.len(), 2);
            assert_eq!(debug[0], Segment::new(v(0, 0), v(30, 0), SegmentKind::Query));
            assert_eq!(debug[1].start, v(10, -5), "wall A must be recorded, not C");
            assert_eq!(index.hit_count(), 1);
        }
    }

    #[test]
    fn open_path_records_only_query() {
        let mut index = linear();
        abc(&mut index);
        assert!(index.is_path_open(v(0, 50), v(30, 50)).unwrap());
        assert_eq!(index.debug_segments().len(), 1);
        assert_eq!(index.hit_count(), 0);
    }

    #[test]
    fn reverse_query_hits_nearest_in_list_order() {
        // Direction of travel does not matter; list order does.
        let mut index = linear();
        abc(&mut index);
        assert_eq!(index.first_blocking(v(30, 0), v(0, 0)), Some(0));
    }

    #[test]
    fn debug_list_decays_every_sixth_reset() {
        let mut index = linear();
        abc(&mut index);
        index.is_path_open(v(0, 0), v(30, 0)).unwrap();
        for _ in 0..5 {
            index.account_reset();
            assert_eq!(index.hit_count(), 0);
            assert_eq!(index.debug_segments().len(), 2);
        }
        index.account_reset();
        assert!(index.debug_segments().is_empty());
    }

    #[test]
    fn blocking_capacity_is_enforced() {
        let mut index = OcclusionIndex::new(&OcclusionConfig {
            blocking_capacity: 2,
            ..OcclusionConfig::default()
        });
        index.add_wall(v(0, 0), v(1, 1)).unwrap();
        index.add_fence(v(0, 0), v(1, 1)).unwrap();
        assert!(matches!(
            index.add_wall(v(0, 0), v(1, 1)),
            Err(UrbanError::CapacityExceeded { .. })
        ));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn debug_capacity_is_enforced() {
        let mut index = OcclusionIndex::new(&OcclusionConfig {
            debug_capacity: 1,
            ..OcclusionConfig::default()
        });
        index.add_wall(v(5, -5), v(5, 5)).unwrap();
        // The query fits, the hit does not.
        assert!(index.is_path_open(v(0, 0), v(10, 0)).is_err());
    }

    #[test]
    fn grid_handles_negative_and_long_segments() {
        let mut index = OcclusionIndex::new(&OcclusionConfig {
            grid_cell_size: Some(64),
            ..OcclusionConfig::default()
        });
        index.add_fence(v(-13655, -13655), v(13655, -13655)).unwrap();
        index.add_wall(v(-300, -300), v(-200, -250)).unwrap();
        assert_eq!(index.first_blocking(v(0, -13000), v(0, -14000)), Some(0));
        assert_eq!(index.first_blocking(v(-250, -400), v(-250, 0)), Some(1));
        assert_eq!(index.first_blocking(v(0, 0), v(50, 50)), None);
    }

    #[test]
    fn clear_resets_everything() {
        let mut index = OcclusionIndex::new(&OcclusionConfig::default());
        abc(&mut index);
        index.is_path_open(v(0, 0), v(30, 0)).unwrap();
        index.clear();
        assert!(index.is_empty());
        assert!(index.debug_segments().is_empty());
        assert_eq!(index.hit_count(), 0);
        assert!(index.is_path_open(v(0, 0), v(30, 0)).unwrap());
    }
}
