//! The multi-phase generation pipeline.
//!
//! Phases run strictly in order over the single owning grid: cores, floor
//! slabs, rooms, support validation, pillar backfill, secondary scatter,
//! bridges, vertical circulation. Each phase draws from its own seeded RNG
//! so one phase can be varied without disturbing the rest.

pub mod bridges;
pub mod cores;
pub mod floors;
pub mod rooms;
pub mod scatter;
pub mod support;

pub use rooms::{Room, RoomKind};
pub use support::is_supported;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{ConfigError, GeneratorConfig};
use crate::grid::{Connection, VoxelGrid};
use crate::noise_field::NoiseField;
use crate::seeds::GeneratorSeeds;
use crate::structure::StructureData;

/// Counters reported by a generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub cores_placed: usize,
    pub slabs_seeded: usize,
    pub rooms_carved: usize,
    pub cells_removed: usize,
    pub pillars_inserted: usize,
    pub fragments_scattered: usize,
    pub spans_built: usize,
    pub stairs_marked: usize,
}

/// Owns the grid, connection log, and room list for one generation run.
pub struct StructureGenerator {
    config: GeneratorConfig,
    seeds: GeneratorSeeds,
    grid: VoxelGrid,
    connections: Vec<Connection>,
    rooms: Vec<Room>,
}

impl StructureGenerator {
    /// Validate the configuration and set up an empty grid.
    pub fn new(config: GeneratorConfig, seeds: GeneratorSeeds) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = VoxelGrid::new(config.size, config.layers);
        Ok(Self {
            config,
            seeds,
            grid,
            connections: Vec::new(),
            rooms: Vec::new(),
        })
    }

    pub fn seeds(&self) -> GeneratorSeeds {
        self.seeds
    }

    /// Run the full pipeline once and hand the structure to the caller.
    pub fn generate(mut self) -> (StructureData, GenerationReport) {
        let mut report = GenerationReport::default();

        let mut rng = ChaCha8Rng::seed_from_u64(self.seeds.cores);
        report.cores_placed =
            cores::place_cores(&mut self.grid, &mut self.connections, &self.config, &mut rng);

        let noise = NoiseField::new(self.seeds.floors);
        let mut rng = ChaCha8Rng::seed_from_u64(self.seeds.floors);
        report.slabs_seeded = floors::grow_floors(
            &mut self.grid,
            &mut self.connections,
            &noise,
            &self.config,
            &mut rng,
        );

        let mut rng = ChaCha8Rng::seed_from_u64(self.seeds.rooms);
        report.rooms_carved =
            rooms::carve_rooms(&mut self.grid, &mut self.rooms, &self.config, &mut rng);

        report.cells_removed = support::validate_support(&mut self.grid);
        report.pillars_inserted = support::backfill_pillars(&mut self.grid);

        let mut rng = ChaCha8Rng::seed_from_u64(self.seeds.scatter);
        report.fragments_scattered =
            scatter::scatter_fragments(&mut self.grid, &self.config, &mut rng);

        let mut rng = ChaCha8Rng::seed_from_u64(self.seeds.bridges);
        report.spans_built =
            bridges::connect_cores(&mut self.grid, &mut self.connections, &self.config, &mut rng);

        let mut rng = ChaCha8Rng::seed_from_u64(self.seeds.stairs);
        report.stairs_marked = bridges::mark_stairs(&mut self.grid, &self.config, &mut rng);

        let structure = StructureData::new(self.grid, self.connections, self.rooms);
        (structure, report)
    }
}
