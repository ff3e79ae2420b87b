//! Floor-slab growth.
//!
//! Every core cell may seed a breadth-first expansion across its layer. The
//! expansion is gated twice: a branch dies where the layer below is
//! unanchored, and a position only receives floor where the noise field
//! exceeds the threshold. The result is organically-bounded plates that
//! stay tethered to the cores beneath them.

use std::collections::{HashSet, VecDeque};

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::GeneratorConfig;
use crate::grid::{CellType, Connection, VoxelGrid};
use crate::noise_field::NoiseField;

/// Grow floor plates outward from core cells, layer by layer. Returns the
/// number of expansions seeded.
pub fn grow_floors(
    grid: &mut VoxelGrid,
    connections: &mut Vec<Connection>,
    noise: &NoiseField,
    config: &GeneratorConfig,
    rng: &mut ChaCha8Rng,
) -> usize {
    let mut seeded = 0;
    for y in 0..grid.layers {
        for x in 0..grid.size {
            for z in 0..grid.size {
                if grid.get(x, z, y) != CellType::Vertical {
                    continue;
                }
                if !rng.gen_bool(config.floor_probability) {
                    continue;
                }
                expand_slab(grid, connections, noise, config, x, z, y);
                seeded += 1;
            }
        }
    }
    seeded
}

/// One breadth-first expansion over plan positions at layer y. Visitation
/// is per (x, z) regardless of slab thickness.
fn expand_slab(
    grid: &mut VoxelGrid,
    connections: &mut Vec<Connection>,
    noise: &NoiseField,
    config: &GeneratorConfig,
    seed_x: usize,
    seed_z: usize,
    y: usize,
) {
    let mut queue: VecDeque<(usize, usize, Option<(usize, usize)>)> = VecDeque::new();
    let mut visited: HashSet<(usize, usize)> = HashSet::new();

    queue.push_back((seed_x, seed_z, None));
    visited.insert((seed_x, seed_z));

    while let Some((x, z, parent)) = queue.pop_front() {
        // A branch over unanchored space is abandoned.
        if y > 0 && !grid.is_anchored(x, z, y - 1) {
            continue;
        }

        let value = noise.sample(
            x as f64 * config.noise_scale,
            y as f64 * config.noise_vertical_scale,
            z as f64 * config.noise_scale,
        );
        if value <= config.noise_threshold {
            continue;
        }

        let top = (y + config.floor_thickness).min(grid.layers);
        for layer in y..top {
            grid.set(x, z, layer, CellType::Horizontal);
            grid.set_anchor(x, z, layer, true);
        }
        if let Some((px, pz)) = parent {
            connections.push(((px, y, pz), (x, y, z)));
        }

        for (nx, nz) in grid.plan_neighbors(x, z) {
            if visited.insert((nx, nz)) {
                queue.push_back((nx, nz, Some((x, z))));
            }
        }
    }
}
