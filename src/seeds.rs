//! Seed management for structure generation.
//!
//! Each generation phase gets its own seed, derived from a master seed, so a
//! single phase can be varied or held constant without disturbing the others.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for every phase of the generation pipeline.
#[derive(Clone, Copy, Debug)]
pub struct GeneratorSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Core placement (spacing, heights, widths)
    pub cores: u64,
    /// Floor-slab flood fill (seeding draws; also seeds the noise field)
    pub floors: u64,
    /// Room carving (archetype and anchor draws)
    pub rooms: u64,
    /// Bridge pairing draws
    pub bridges: u64,
    /// Stair conversion draws
    pub stairs: u64,
    /// Secondary scatter draws
    pub scatter: u64,
}

impl GeneratorSeeds {
    /// Derive all phase seeds deterministically from a master seed.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            cores: derive_seed(master, "cores"),
            floors: derive_seed(master, "floors"),
            rooms: derive_seed(master, "rooms"),
            bridges: derive_seed(master, "bridges"),
            stairs: derive_seed(master, "stairs"),
            scatter: derive_seed(master, "scatter"),
        }
    }
}

impl Default for GeneratorSeeds {
    fn default() -> Self {
        Self::from_master(rand::random())
    }
}

/// Derive a phase seed from the master seed and the phase name.
fn derive_seed(master: u64, phase: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    phase.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for GeneratorSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GeneratorSeeds {{ master: {}, cores: {}, floors: {}, rooms: {}, \
             bridges: {}, stairs: {}, scatter: {} }}",
            self.master, self.cores, self.floors, self.rooms, self.bridges, self.stairs, self.scatter,
        )
    }
}
