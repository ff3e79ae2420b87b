//! Generated structure bundle.
//!
//! Everything a consumer (visualization, analysis, persistence) needs in
//! one place: the voxel grid, the connection log, and the room list. All
//! access is read-only; the generator never reads this back.

use crate::generation::rooms::Room;
use crate::grid::{CellType, Connection, VoxelGrid};

/// A fully generated megastructure.
#[derive(Clone, Debug, PartialEq)]
pub struct StructureData {
    pub grid: VoxelGrid,
    pub connections: Vec<Connection>,
    pub rooms: Vec<Room>,
}

impl StructureData {
    pub fn new(grid: VoxelGrid, connections: Vec<Connection>, rooms: Vec<Room>) -> Self {
        Self {
            grid,
            connections,
            rooms,
        }
    }

    /// Per-classification cell totals.
    pub fn cell_counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for (_, _, _, cell) in self.grid.iter() {
            match cell {
                CellType::Empty => counts.empty += 1,
                CellType::Vertical => counts.vertical += 1,
                CellType::Horizontal => counts.horizontal += 1,
                CellType::Bridge => counts.bridge += 1,
                CellType::Facade => counts.facade += 1,
                CellType::Stair => counts.stair += 1,
            }
        }
        counts
    }
}

/// Cell totals per classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellCounts {
    pub empty: usize,
    pub vertical: usize,
    pub horizontal: usize,
    pub bridge: usize,
    pub facade: usize,
    pub stair: usize,
}

impl CellCounts {
    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.vertical + self.horizontal + self.bridge + self.facade + self.stair
    }

    pub fn total(&self) -> usize {
        self.empty + self.occupied()
    }
}
