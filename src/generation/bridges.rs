//! Bridge rasterization, core interconnection, and vertical circulation.
//!
//! Bridges are discrete line walks between two plan coordinates at a fixed
//! elevation. Each visited position is written only where a foundation
//! exists directly below; positions without one are skipped without
//! aborting the walk. A written span occupies two layers.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::GeneratorConfig;
use crate::grid::{CellType, Connection, VoxelGrid};

/// Rasterize a bridge from `from` to `to` at elevation y using the
/// error-accumulator line walk. Returns the number of plan positions that
/// received bridge cells.
pub fn rasterize_bridge(
    grid: &mut VoxelGrid,
    connections: &mut Vec<Connection>,
    from: (usize, usize),
    to: (usize, usize),
    y: usize,
) -> usize {
    // Walk from the lexicographically smaller endpoint: error-accumulator
    // tie-breaking is direction-sensitive, and both directions must carve
    // the same cells.
    let (from, to) = if from <= to { (from, to) } else { (to, from) };
    let (mut x, mut z) = (from.0 as isize, from.1 as isize);
    let (tx, tz) = (to.0 as isize, to.1 as isize);

    let dx = (tx - x).abs();
    let dz = (tz - z).abs();
    let sx = if tx > x { 1 } else { -1 };
    let sz = if tz > z { 1 } else { -1 };
    let mut err = dx - dz;

    let mut written = 0;
    let mut last_visited: Option<(usize, usize)> = None;

    loop {
        let (ux, uz) = (x as usize, z as usize);

        let founded = y >= 1
            && matches!(grid.get(ux, uz, y - 1), CellType::Vertical | CellType::Bridge);
        if founded {
            grid.set(ux, uz, y, CellType::Bridge);
            grid.set_anchor(ux, uz, y, true);
            // Bridges are two layers thick; the upper deck is clipped at
            // the grid top.
            if y + 1 < grid.layers {
                grid.set(ux, uz, y + 1, CellType::Bridge);
                grid.set_anchor(ux, uz, y + 1, true);
            }
            if let Some((lx, lz)) = last_visited {
                connections.push(((lx, y, lz), (ux, y, uz)));
            }
            written += 1;
        }
        last_visited = Some((ux, uz));

        if x == tx && z == tz {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dz {
            err -= dz;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            z += sz;
        }
    }

    written
}

/// Connect pairs of core columns with bridges at periodic elevations.
/// A core column is any plan position holding at least one `Vertical`
/// cell. Returns the number of spans rasterized.
pub fn connect_cores(
    grid: &mut VoxelGrid,
    connections: &mut Vec<Connection>,
    config: &GeneratorConfig,
    rng: &mut ChaCha8Rng,
) -> usize {
    let cores = core_columns(grid);
    let mut spans = 0;

    let mut y = config.bridge_interval;
    while y < grid.layers {
        for i in 0..cores.len() {
            for j in (i + 1)..cores.len() {
                if rng.gen_bool(config.bridge_probability) {
                    rasterize_bridge(grid, connections, cores[i], cores[j], y);
                    spans += 1;
                }
            }
        }
        y += config.bridge_interval;
    }

    spans
}

/// Convert a fraction of each core column's non-topmost `Vertical` cells
/// to `Stair`, marking vertical circulation. Anchor flags are untouched.
/// Returns the number of cells converted.
pub fn mark_stairs(grid: &mut VoxelGrid, config: &GeneratorConfig, rng: &mut ChaCha8Rng) -> usize {
    let mut converted = 0;
    for x in 0..grid.size {
        for z in 0..grid.size {
            let top = (0..grid.layers)
                .rev()
                .find(|&y| grid.get(x, z, y) == CellType::Vertical);
            let Some(top) = top else { continue };
            for y in 0..top {
                if grid.get(x, z, y) == CellType::Vertical && rng.gen_bool(config.stair_probability)
                {
                    grid.set(x, z, y, CellType::Stair);
                    converted += 1;
                }
            }
        }
    }
    converted
}

fn core_columns(grid: &VoxelGrid) -> Vec<(usize, usize)> {
    let mut cores = Vec::new();
    for x in 0..grid.size {
        for z in 0..grid.size {
            if (0..grid.layers).any(|y| grid.get(x, z, y) == CellType::Vertical) {
                cores.push((x, z));
            }
        }
    }
    cores
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_span_over_full_foundation_is_two_layers_thick() {
        let mut grid = VoxelGrid::new(10, 5);
        for x in 0..=3 {
            grid.set(x, 0, 1, CellType::Vertical);
            grid.set_anchor(x, 0, 1, true);
        }
        let mut connections = Vec::new();

        let written = rasterize_bridge(&mut grid, &mut connections, (0, 0), (3, 0), 2);

        assert_eq!(written, 4);
        for x in 0..=3 {
            assert_eq!(grid.get(x, 0, 2), CellType::Bridge);
            assert_eq!(grid.get(x, 0, 3), CellType::Bridge);
            assert!(grid.is_anchored(x, 0, 2));
            assert!(grid.is_anchored(x, 0, 3));
        }
        assert_eq!(connections.len(), 3);
        assert_eq!(connections[0], ((0, 2, 0), (1, 2, 0)));
    }

    #[test]
    fn test_missing_foundation_skips_without_aborting() {
        let mut grid = VoxelGrid::new(10, 5);
        for x in [0, 1, 3] {
            grid.set(x, 0, 1, CellType::Vertical);
        }
        let mut connections = Vec::new();

        let written = rasterize_bridge(&mut grid, &mut connections, (0, 0), (3, 0), 2);

        assert_eq!(written, 3);
        assert_eq!(grid.get(2, 0, 2), CellType::Empty);
        assert_eq!(grid.get(3, 0, 2), CellType::Bridge);
    }

    #[test]
    fn test_upper_deck_clips_at_grid_top() {
        let mut grid = VoxelGrid::new(6, 3);
        for x in 0..=2 {
            grid.set(x, 0, 1, CellType::Vertical);
        }
        let mut connections = Vec::new();

        rasterize_bridge(&mut grid, &mut connections, (0, 0), (2, 0), 2);

        for x in 0..=2 {
            assert_eq!(grid.get(x, 0, 2), CellType::Bridge);
        }
    }

    #[test]
    fn test_walk_visits_same_cells_in_both_directions() {
        let span = |from: (usize, usize), to: (usize, usize)| {
            let mut grid = VoxelGrid::new(12, 4);
            // Foundation everywhere, so written cells = visited cells.
            for x in 0..12 {
                for z in 0..12 {
                    grid.set(x, z, 1, CellType::Vertical);
                }
            }
            let mut connections = Vec::new();
            rasterize_bridge(&mut grid, &mut connections, from, to, 2);
            let mut cells: Vec<(usize, usize)> = grid
                .iter()
                .filter(|&(_, _, y, c)| y == 2 && c == CellType::Bridge)
                .map(|(x, z, _, _)| (x, z))
                .collect();
            cells.sort_unstable();
            cells
        };

        assert_eq!(span((1, 2), (9, 7)), span((9, 7), (1, 2)));
        assert_eq!(span((0, 0), (11, 3)), span((11, 3), (0, 0)));
        assert_eq!(span((4, 4), (4, 4)), vec![(4, 4)]);
    }

    #[test]
    fn test_ground_elevation_never_writes() {
        let mut grid = VoxelGrid::new(6, 4);
        let mut connections = Vec::new();

        let written = rasterize_bridge(&mut grid, &mut connections, (0, 0), (5, 0), 0);

        assert_eq!(written, 0);
        assert_eq!(grid.count(CellType::Bridge), 0);
    }

    #[test]
    fn test_connect_cores_spans_between_towers() {
        let config = GeneratorConfig {
            size: 8,
            layers: 5,
            bridge_interval: 2,
            bridge_probability: 1.0,
            ..GeneratorConfig::default()
        };
        let mut grid = VoxelGrid::new(config.size, config.layers);
        for y in 0..5 {
            grid.set(0, 0, y, CellType::Vertical);
            grid.set(5, 0, y, CellType::Vertical);
        }
        let mut connections = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let spans = connect_cores(&mut grid, &mut connections, &config, &mut rng);

        assert!(spans > 0);
        assert_eq!(grid.get(0, 0, 2), CellType::Bridge);
        assert_eq!(grid.get(5, 0, 2), CellType::Bridge);
    }

    #[test]
    fn test_stairs_spare_the_column_top() {
        let config = GeneratorConfig {
            size: 6,
            layers: 6,
            stair_probability: 1.0,
            ..GeneratorConfig::default()
        };
        let mut grid = VoxelGrid::new(config.size, config.layers);
        for y in 0..5 {
            grid.set(2, 2, y, CellType::Vertical);
            grid.set_anchor(2, 2, y, true);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let converted = mark_stairs(&mut grid, &config, &mut rng);

        assert_eq!(converted, 4);
        for y in 0..4 {
            assert_eq!(grid.get(2, 2, y), CellType::Stair);
            // Circulation cells keep their anchors.
            assert!(grid.is_anchored(2, 2, y));
        }
        assert_eq!(grid.get(2, 2, 4), CellType::Vertical);
    }
}
