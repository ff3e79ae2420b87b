//! Load-bearing core construction.
//!
//! Cores are stepped, tapering towers: a square footprint whose half-width
//! shrinks by one every four layers, never below one. Every core cell is
//! anchored at placement.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::GeneratorConfig;
use crate::grid::{CellType, Connection, VoxelGrid};

/// Place candidate cores on an s-spaced lattice. Returns the number of
/// cores built.
pub fn place_cores(
    grid: &mut VoxelGrid,
    connections: &mut Vec<Connection>,
    config: &GeneratorConfig,
    rng: &mut ChaCha8Rng,
) -> usize {
    let spacing = rng.gen_range(config.core_spacing_min..=config.core_spacing_max);
    let mut placed = 0;

    for x in (0..grid.size).step_by(spacing) {
        for z in (0..grid.size).step_by(spacing) {
            if !rng.gen_bool(config.core_probability) {
                continue;
            }
            let height = rng.gen_range(config.core_height_min..=grid.layers);
            let half_width = rng.gen_range(1..=config.core_half_width_max);
            build_core(grid, connections, x, z, height, half_width);
            placed += 1;
        }
    }

    placed
}

/// Build one tapering core column centered at (x, z). Footprint cells are
/// clipped against the grid edge; the center column logs one connection per
/// shaft step.
pub fn build_core(
    grid: &mut VoxelGrid,
    connections: &mut Vec<Connection>,
    x: usize,
    z: usize,
    height: usize,
    base_half_width: usize,
) {
    for y in 0..height.min(grid.layers) {
        let half = (base_half_width as isize - (y / 4) as isize).max(1);
        for dx in -half..=half {
            for dz in -half..=half {
                let nx = x as isize + dx;
                let nz = z as isize + dz;
                if grid.plan_contains(nx, nz) {
                    grid.set(nx as usize, nz as usize, y, CellType::Vertical);
                    grid.set_anchor(nx as usize, nz as usize, y, true);
                }
            }
        }
        if y > 0 {
            connections.push(((x, y - 1, z), (x, y, z)));
        }
    }
}
