//! Secondary scatter.
//!
//! Cosmetic densification: small floor and facade fragments dropped onto
//! empty positions that already pass the support predicate, occasionally
//! extending a cell or two upward through empty space. Nothing downstream
//! depends on this pass.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::GeneratorConfig;
use crate::generation::support::is_supported;
use crate::grid::{CellType, VoxelGrid};

/// Scatter fragments over a fraction of the total volume. Returns the
/// number of cells written.
pub fn scatter_fragments(
    grid: &mut VoxelGrid,
    config: &GeneratorConfig,
    rng: &mut ChaCha8Rng,
) -> usize {
    let volume = grid.size * grid.size * grid.layers;
    let attempts = (volume as f64 * config.scatter_fraction) as usize;
    let mut placed = 0;

    for _ in 0..attempts {
        let x = rng.gen_range(0..grid.size);
        let z = rng.gen_range(0..grid.size);
        let y = rng.gen_range(0..grid.layers);

        if grid.get(x, z, y) != CellType::Empty || !is_supported(grid, x, z, y) {
            continue;
        }

        let cell = if rng.gen_bool(0.5) {
            CellType::Horizontal
        } else {
            CellType::Facade
        };
        grid.set(x, z, y, cell);
        grid.set_anchor(x, z, y, true);
        placed += 1;

        // Occasionally climb one or two cells while the space is empty.
        let extension: usize = rng.gen_range(0..=2);
        for dy in 1..=extension {
            let ly = y + dy;
            if ly >= grid.layers || grid.get(x, z, ly) != CellType::Empty {
                break;
            }
            grid.set(x, z, ly, cell);
            grid.set_anchor(x, z, ly, true);
            placed += 1;
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_fragments_only_land_on_supported_empty_cells() {
        let config = GeneratorConfig {
            size: 10,
            layers: 6,
            scatter_fraction: 0.5,
            ..GeneratorConfig::default()
        };
        let mut grid = VoxelGrid::new(config.size, config.layers);
        // One anchored platform to catch fragments above the ground.
        for x in 3..7 {
            for z in 3..7 {
                grid.set(x, z, 2, CellType::Horizontal);
                grid.set_anchor(x, z, 2, true);
            }
        }
        let reference = grid.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let placed = scatter_fragments(&mut grid, &config, &mut rng);

        assert!(placed > 0);
        for (x, z, y, cell) in grid.iter() {
            if reference.get(x, z, y) != CellType::Empty {
                continue;
            }
            if cell != CellType::Empty {
                assert!(matches!(cell, CellType::Horizontal | CellType::Facade));
                assert!(grid.is_anchored(x, z, y));
                assert!(is_supported(&grid, x, z, y));
            }
        }
    }

    #[test]
    fn test_zero_fraction_scatters_nothing() {
        let config = GeneratorConfig {
            size: 8,
            layers: 4,
            scatter_fraction: 0.0,
            ..GeneratorConfig::default()
        };
        let mut grid = VoxelGrid::new(config.size, config.layers);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        assert_eq!(scatter_fragments(&mut grid, &config, &mut rng), 0);
        assert_eq!(grid.count(CellType::Empty), 8 * 8 * 4);
    }

    #[test]
    fn test_scatter_is_deterministic() {
        let config = GeneratorConfig {
            size: 10,
            layers: 5,
            scatter_fraction: 0.3,
            ..GeneratorConfig::default()
        };

        let run = || {
            let mut grid = VoxelGrid::new(config.size, config.layers);
            let mut rng = ChaCha8Rng::seed_from_u64(13);
            scatter_fragments(&mut grid, &config, &mut rng);
            grid
        };

        assert!(run() == run());
    }
}
