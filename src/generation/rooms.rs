//! Room carving.
//!
//! Rooms are carved into existing floor plates: a random archetype, a
//! random anchor cell, and a rectangular prism whose bottom layer is floor
//! and whose upper layers keep only a facade perimeter. A carved room is
//! treated as self-supporting; every written cell is anchored.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::GeneratorConfig;
use crate::grid::{CellType, Coord, VoxelGrid};

/// Functional classification of a carved room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RoomKind {
    Residential,
    Industrial,
    Utility,
    Commercial,
}

/// A carved room volume.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Room {
    pub kind: RoomKind,
    /// Anchor corner of the carved prism
    pub origin: Coord,
    /// (width, height in layers, depth)
    pub extent: (usize, usize, usize),
    /// Cell type dominating the carved volume
    pub dominant: CellType,
}

/// A room template: footprint range, height, and the cell type that
/// dominates the carved volume.
struct RoomArchetype {
    kind: RoomKind,
    footprint_min: usize,
    footprint_max: usize,
    height: usize,
    dominant: CellType,
}

const ARCHETYPES: [RoomArchetype; 4] = [
    RoomArchetype {
        kind: RoomKind::Residential,
        footprint_min: 2,
        footprint_max: 4,
        height: 2,
        dominant: CellType::Facade,
    },
    RoomArchetype {
        kind: RoomKind::Industrial,
        footprint_min: 4,
        footprint_max: 6,
        height: 3,
        dominant: CellType::Horizontal,
    },
    RoomArchetype {
        kind: RoomKind::Utility,
        footprint_min: 2,
        footprint_max: 3,
        height: 2,
        dominant: CellType::Facade,
    },
    RoomArchetype {
        kind: RoomKind::Commercial,
        footprint_min: 3,
        footprint_max: 5,
        height: 3,
        dominant: CellType::Horizontal,
    },
];

/// Attempt `size^2 / room_attempt_divisor` room placements. An attempt
/// only carves when its anchor cell currently holds floor. Returns the
/// number of rooms carved.
pub fn carve_rooms(
    grid: &mut VoxelGrid,
    rooms: &mut Vec<Room>,
    config: &GeneratorConfig,
    rng: &mut ChaCha8Rng,
) -> usize {
    let attempts = (grid.size * grid.size) / config.room_attempt_divisor;
    let mut carved = 0;

    for _ in 0..attempts {
        let archetype = &ARCHETYPES[rng.gen_range(0..ARCHETYPES.len())];
        let x = rng.gen_range(0..grid.size);
        let z = rng.gen_range(0..grid.size);
        let y = rng.gen_range(0..grid.layers);

        if grid.get(x, z, y) != CellType::Horizontal {
            continue;
        }

        let width = rng.gen_range(archetype.footprint_min..=archetype.footprint_max);
        let depth = rng.gen_range(archetype.footprint_min..=archetype.footprint_max);
        carve_prism(grid, x, z, y, width, depth, archetype.height);

        rooms.push(Room {
            kind: archetype.kind,
            origin: (x, y, z),
            extent: (width, archetype.height, depth),
            dominant: archetype.dominant,
        });
        carved += 1;
    }

    carved
}

/// Carve one prism: floor across the bottom layer, facade on the perimeter
/// of the upper layers, interior of upper layers untouched. Cells are
/// clipped against the grid extent.
fn carve_prism(
    grid: &mut VoxelGrid,
    x: usize,
    z: usize,
    y: usize,
    width: usize,
    depth: usize,
    height: usize,
) {
    for dy in 0..height {
        let ly = y + dy;
        if ly >= grid.layers {
            break;
        }
        for dx in 0..width {
            for dz in 0..depth {
                let cx = x + dx;
                let cz = z + dz;
                if cx >= grid.size || cz >= grid.size {
                    continue;
                }
                if dy == 0 {
                    grid.set(cx, cz, ly, CellType::Horizontal);
                    grid.set_anchor(cx, cz, ly, true);
                } else if dx == 0 || dx == width - 1 || dz == 0 || dz == depth - 1 {
                    grid.set(cx, cz, ly, CellType::Facade);
                    grid.set_anchor(cx, cz, ly, true);
                }
            }
        }
    }
}
