// Dump format: the neighborhood as a JSON object tree.
//
// The export is a plain serde mirror of the generated town, shaped for
// external tools (the `walls` rasterizer in `urban_cli` reads it):
//
//   { "twoblocks": [ { "location", "rotation",
//                      "houses": [ { "rooms": [ room, ... ] } x16 ],
//                      "trees":  [ [ tree, ... ] x16 ],
//                      "fences": [ { "fence": [[x,y],[x,y]] } x8 ],
//                      "roads":  { "paths": [ { "path": [4 points] } ] } } ],
//     "parks":     [ { "location", "road": { "paths" }, "trees": [[tree]] } ],
//     "fences":    [ { "fence": [...] } x4 ] }
//
//   room = { "inner_walls": [4], "outer_walls": [4],
//            "doors"?: [ { "location": "north", "points": [4] } ],
//            "windows"?: [ { "location": "east", "points": [2] } ] }
//   tree = { "location": slot name, "radius", "center": [x,y], "values": [32] }
//
// Points are `[x, y]` arrays. Absent windows and doors are omitted, not
// zero-filled. Every lot and park cell gets a tree array, possibly empty,
// so lots line up on import. House genetics are generation scratch and are
// not exported.
//
// `location` and `rotation` on a two-block are optional on import; when
// missing they are recovered from the road frame.

use crate::error::{Result, UrbanError};
use crate::fence::Fence;
use crate::house::{Building, Genetics, Room};
use crate::neighborhood::{Neighborhood, ParkCell, TwoBlock};
use crate::park::Park;
use crate::path::{FOOTPATH_OFFSET, FOOTPATH_WIDTH, Path, PathGroup};
use crate::tree::{Tree, TreeGroup};
use crate::types::{FENCES_PER_TWOBLOCK, LOTS_PER_CELL, PATHS_PER_GROUP, POINTS_PER_TREE, Side, TREES_PER_GROUP};
use crate::vect::Vect2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::path::Path as FsPath;

// ---------------------------------------------------------------------------
// Export records
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FenceExport {
    pub fence: [Vect2; 2],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathExport {
    pub path: [Vect2; 4],
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathGroupExport {
    pub paths: Vec<PathExport>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeExport {
    /// Slot within the group, named like a side.
    pub location: Side,
    pub radius: i32,
    pub center: Vect2,
    pub values: [i32; POINTS_PER_TREE],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowExport {
    pub location: Side,
    pub points: [Vect2; 2],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorExport {
    pub location: Side,
    pub points: [Vect2; 4],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomExport {
    pub inner_walls: [Vect2; 4],
    pub outer_walls: [Vect2; 4],
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub doors: Vec<DoorExport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub windows: Vec<WindowExport>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingExport {
    pub rooms: Vec<RoomExport>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoBlockExport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Vect2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<bool>,
    pub houses: Vec<BuildingExport>,
    #[serde(default)]
    pub trees: Vec<Vec<TreeExport>>,
    pub fences: Vec<FenceExport>,
    pub roads: PathGroupExport,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkExport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Vect2>,
    pub road: PathGroupExport,
    #[serde(default)]
    pub trees: Vec<Vec<TreeExport>>,
}

/// Root of the dump.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborhoodExport {
    pub twoblocks: Vec<TwoBlockExport>,
    pub parks: Vec<ParkExport>,
    pub fences: Vec<FenceExport>,
}

// ---------------------------------------------------------------------------
// Neighborhood -> export
// ---------------------------------------------------------------------------

fn export_fence(fence: &Fence) -> FenceExport {
    FenceExport {
        fence: [fence.start, fence.end],
    }
}

fn export_paths(group: &PathGroup) -> PathGroupExport {
    PathGroupExport {
        paths: group.iter().map(|p| PathExport { path: p.points }).collect(),
    }
}

fn export_trees(group: &TreeGroup) -> Vec<TreeExport> {
    group
        .slots
        .iter()
        .zip(Side::ALL)
        .filter_map(|(slot, location)| {
            slot.as_ref().map(|tree| TreeExport {
                location,
                radius: tree.radius,
                center: tree.center,
                values: tree.offsets,
            })
        })
        .collect()
}

fn export_room(room: &Room) -> RoomExport {
    let doors = Side::ALL
        .into_iter()
        .filter_map(|side| {
            room.door(side).map(|points| DoorExport {
                location: side,
                points: *points,
            })
        })
        .collect();
    let windows = Side::ALL
        .into_iter()
        .filter_map(|side| {
            room.window(side).map(|points| WindowExport {
                location: side,
                points: *points,
            })
        })
        .collect();
    RoomExport {
        inner_walls: room.inner_walls,
        outer_walls: room.outer_walls,
        doors,
        windows,
    }
}

fn export_twoblock(twoblock: &TwoBlock) -> TwoBlockExport {
    TwoBlockExport {
        location: Some(twoblock.location),
        rotation: Some(twoblock.rotation),
        houses: twoblock
            .houses
            .iter()
            .map(|h| BuildingExport {
                rooms: h.rooms.iter().map(export_room).collect(),
            })
            .collect(),
        trees: twoblock.houses.iter().map(|h| export_trees(&h.trees)).collect(),
        fences: twoblock.fences.iter().map(export_fence).collect(),
        roads: export_paths(&twoblock.road),
    }
}

fn export_park(cell: &ParkCell) -> ParkExport {
    ParkExport {
        location: Some(cell.location),
        road: export_paths(&cell.park.road),
        trees: cell.park.trees.iter().map(export_trees).collect(),
    }
}

/// Mirror `neighborhood` into export records.
pub fn export(neighborhood: &Neighborhood) -> NeighborhoodExport {
    NeighborhoodExport {
        twoblocks: neighborhood.twoblocks().iter().map(export_twoblock).collect(),
        parks: neighborhood.parks().iter().map(export_park).collect(),
        fences: neighborhood.fences().iter().map(export_fence).collect(),
    }
}

// ---------------------------------------------------------------------------
// Export -> neighborhood
// ---------------------------------------------------------------------------

fn malformed(what: &'static str, context: impl Into<String>, found: impl ToString) -> UrbanError {
    UrbanError::Malformed {
        what,
        context: context.into(),
        found: found.to_string(),
    }
}

fn import_fence(record: &FenceExport) -> Fence {
    Fence::new(record.fence[0], record.fence[1])
}

fn import_paths(record: &PathGroupExport, context: &str) -> Result<PathGroup> {
    if record.paths.len() > PATHS_PER_GROUP {
        return Err(malformed("path count", context, record.paths.len()));
    }
    Ok(PathGroup {
        paths: record
            .paths
            .iter()
            .map(|p| Path { points: p.path })
            .collect::<SmallVec<_>>(),
    })
}

fn import_trees(records: &[TreeExport], context: &str) -> Result<TreeGroup> {
    if records.len() > TREES_PER_GROUP {
        return Err(malformed("tree count", context, records.len()));
    }
    let mut group = TreeGroup::default();
    for record in records {
        let slot = &mut group.slots[record.location.index()];
        if slot.is_some() {
            return Err(malformed("duplicate tree slot", context, record.location));
        }
        *slot = Some(Tree {
            center: record.center,
            radius: record.radius,
            offsets: record.values,
        });
    }
    Ok(group)
}

fn import_room(record: &RoomExport, context: &str) -> Result<Room> {
    let mut room = Room {
        inner_walls: record.inner_walls,
        outer_walls: record.outer_walls,
        windows: [None; 4],
        doors: [None; 4],
    };
    for window in &record.windows {
        let slot = &mut room.windows[window.location.index()];
        if slot.is_some() {
            return Err(malformed("duplicate window", context, window.location));
        }
        *slot = Some(window.points);
    }
    for door in &record.doors {
        let slot = &mut room.doors[door.location.index()];
        if slot.is_some() {
            return Err(malformed("duplicate door", context, door.location));
        }
        *slot = Some(door.points);
    }
    Ok(room)
}

fn tree_groups(records: &[Vec<TreeExport>], context: &str) -> Result<Vec<TreeGroup>> {
    if !records.is_empty() && records.len() != LOTS_PER_CELL {
        return Err(malformed("tree group count", context, records.len()));
    }
    let mut groups: Vec<TreeGroup> = records
        .iter()
        .enumerate()
        .map(|(i, r)| import_trees(r, &format!("{context} lot {i}")))
        .collect::<Result<_>>()?;
    groups.resize_with(LOTS_PER_CELL, TreeGroup::default);
    Ok(groups)
}

/// The cell location sits one footpath offset and width inside the first
/// road strip's first corner.
fn location_from_road(road: &PathGroup) -> Option<Vect2> {
    let inset = FOOTPATH_OFFSET + FOOTPATH_WIDTH;
    road.paths.first().map(|p| p.points[0].offset(inset, inset))
}

/// The dividing strip (fifth path) runs along y when rotated.
fn rotation_from_road(road: &PathGroup) -> Option<bool> {
    road.paths.get(4).map(|p| p.points[0].x == p.points[1].x)
}

fn import_twoblock(record: &TwoBlockExport, index: usize) -> Result<TwoBlock> {
    let context = format!("twoblock {index}");
    if record.houses.len() != LOTS_PER_CELL {
        return Err(malformed("house count", context, record.houses.len()));
    }
    if record.fences.len() != FENCES_PER_TWOBLOCK {
        return Err(malformed("fence count", context, record.fences.len()));
    }
    let road = import_paths(&record.roads, &context)?;
    if record.location.is_none() || record.rotation.is_none() {
        tracing::warn!(%context, "two-block frame missing, recovering from roads");
    }
    let location = match record.location.or_else(|| location_from_road(&road)) {
        Some(location) => location,
        None => {
            return Err(UrbanError::MissingField {
                field: "location",
                context,
            });
        }
    };
    let rotation = match record.rotation.or_else(|| rotation_from_road(&road)) {
        Some(rotation) => rotation,
        None => {
            return Err(UrbanError::MissingField {
                field: "rotation",
                context,
            });
        }
    };

    let trees = tree_groups(&record.trees, &context)?;
    let mut houses = Vec::with_capacity(LOTS_PER_CELL);
    for (lot, (house, trees)) in record.houses.iter().zip(trees).enumerate() {
        let room_context = format!("{context} house {lot}");
        let rooms = house
            .rooms
            .iter()
            .map(|r| import_room(r, &room_context))
            .collect::<Result<SmallVec<_>>>()?;
        houses.push(Building {
            rooms,
            genetics: Genetics::default(),
            trees,
        });
    }

    let mut fences = [Fence::new(Vect2::ZERO, Vect2::ZERO); FENCES_PER_TWOBLOCK];
    for (slot, record) in fences.iter_mut().zip(&record.fences) {
        *slot = import_fence(record);
    }

    Ok(TwoBlock {
        location,
        rotation,
        houses,
        fences,
        footpath: PathGroup::default(),
        road,
    })
}

fn import_park(record: &ParkExport, index: usize) -> Result<ParkCell> {
    let context = format!("park {index}");
    let road = import_paths(&record.road, &context)?;
    if record.location.is_none() {
        tracing::warn!(%context, "park location missing, recovering from road");
    }
    let location = match record.location.or_else(|| location_from_road(&road)) {
        Some(location) => location,
        None => {
            return Err(UrbanError::MissingField {
                field: "location",
                context,
            });
        }
    };
    let trees = tree_groups(&record.trees, &context)?;
    Ok(ParkCell {
        location,
        park: Park { road, trees },
    })
}

/// Rebuild a neighborhood from export records. Any structural problem
/// aborts the whole import.
pub fn import(record: &NeighborhoodExport) -> Result<Neighborhood> {
    if record.fences.len() != 4 {
        return Err(malformed("boundary fence count", "neighborhood", record.fences.len()));
    }
    let twoblocks = record
        .twoblocks
        .iter()
        .enumerate()
        .map(|(i, t)| import_twoblock(t, i))
        .collect::<Result<Vec<_>>>()?;
    let parks = record
        .parks
        .iter()
        .enumerate()
        .map(|(i, p)| import_park(p, i))
        .collect::<Result<Vec<_>>>()?;
    let fences = [
        import_fence(&record.fences[0]),
        import_fence(&record.fences[1]),
        import_fence(&record.fences[2]),
        import_fence(&record.fences[3]),
    ];
    tracing::debug!(twoblocks = twoblocks.len(), parks = parks.len(), "neighborhood imported");
    Ok(Neighborhood {
        twoblocks,
        parks,
        fences,
    })
}

// ---------------------------------------------------------------------------
// JSON and files
// ---------------------------------------------------------------------------

pub fn to_json(neighborhood: &Neighborhood) -> Result<String> {
    Ok(serde_json::to_string_pretty(&export(neighborhood))?)
}

pub fn from_json(json: &str) -> Result<Neighborhood> {
    let record: NeighborhoodExport = serde_json::from_str(json)?;
    import(&record)
}

pub fn write_file(neighborhood: &Neighborhood, path: impl AsRef<FsPath>) -> Result<()> {
    let json = to_json(neighborhood)?;
    std::fs::write(path.as_ref(), json)?;
    tracing::info!(path = %path.as_ref().display(), "neighborhood written");
    Ok(())
}

pub fn read_export(path: impl AsRef<FsPath>) -> Result<NeighborhoodExport> {
    let json = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&json)?)
}

pub fn read_file(path: impl AsRef<FsPath>) -> Result<Neighborhood> {
    import(&read_export(path)?)
}
