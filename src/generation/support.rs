//! Structural validation and pillar backfill.
//!
//! The support predicate decides whether a non-load-bearing cell is
//! structurally valid: anchored on the layer below, or adjacent to
//! horizontal/bridge structure at its own layer. Validation is a single
//! ascending sweep and removals are NOT re-propagated within the pass; a
//! cell kept on the strength of a neighbor removed later in the same sweep
//! survives. This matches the reference behavior.

use crate::grid::{CellType, VoxelGrid};

/// The support predicate for (x, z, y).
///
/// Ground-layer cells count as supported (they rest on the ground).
pub fn is_supported(grid: &VoxelGrid, x: usize, z: usize, y: usize) -> bool {
    if y == 0 {
        return true;
    }
    if grid.is_anchored(x, z, y - 1) {
        return true;
    }
    grid.plan_neighbors(x, z)
        .into_iter()
        .any(|(nx, nz)| matches!(grid.get(nx, nz, y), CellType::Horizontal | CellType::Bridge))
}

/// Remove every `Horizontal`/`Facade` cell that fails the support
/// predicate, clearing its anchor flag. One ascending pass over y = 1..
/// Returns the number of cells removed.
pub fn validate_support(grid: &mut VoxelGrid) -> usize {
    let mut removed = 0;
    for y in 1..grid.layers {
        for x in 0..grid.size {
            for z in 0..grid.size {
                let cell = grid.get(x, z, y);
                if matches!(cell, CellType::Horizontal | CellType::Facade)
                    && !is_supported(grid, x, z, y)
                {
                    grid.set(x, z, y, CellType::Empty);
                    grid.set_anchor(x, z, y, false);
                    removed += 1;
                }
            }
        }
    }
    removed
}

/// Drop a load-bearing pillar under every `Horizontal` cell that still
/// fails the support predicate. The walk descends through strictly-empty
/// cells and stops at the first obstacle without overwriting it, so an
/// interrupted walk can leave the cell unsupported. Returns the number of
/// pillar cells inserted.
pub fn backfill_pillars(grid: &mut VoxelGrid) -> usize {
    let mut inserted = 0;
    for y in 1..grid.layers {
        for x in 0..grid.size {
            for z in 0..grid.size {
                if grid.get(x, z, y) != CellType::Horizontal || is_supported(grid, x, z, y) {
                    continue;
                }
                let mut below = y;
                while below > 0 {
                    below -= 1;
                    if grid.get(x, z, below) != CellType::Empty {
                        break;
                    }
                    grid.set(x, z, below, CellType::Vertical);
                    grid.set_anchor(x, z, below, true);
                    inserted += 1;
                }
            }
        }
    }
    inserted
}
