use std::error::Error;

use clap::Parser;

use arcology_generator::config::GeneratorConfig;
use arcology_generator::generation::{is_supported, StructureGenerator};
use arcology_generator::grid::CellType;
use arcology_generator::seeds::GeneratorSeeds;
use arcology_generator::storage;

#[derive(Parser, Debug)]
#[command(name = "arcology_generator")]
#[command(about = "Generate Kowloon-style voxel megastructures")]
struct Args {
    /// Horizontal grid extent (both x and z)
    #[arg(short, long, default_value = "30")]
    size: usize,

    /// Number of vertical layers
    #[arg(short, long, default_value = "15")]
    layers: usize,

    /// Random seed (uses a random seed if not specified)
    #[arg(long)]
    seed: Option<u64>,

    /// Output path for the serialized structure
    #[arg(short, long, default_value = "structure.json")]
    output: String,

    /// Load a saved structure and re-verify the support invariant instead
    /// of generating
    #[arg(long)]
    check: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if let Some(path) = args.check {
        return check_structure(&path);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = GeneratorConfig {
        size: args.size,
        layers: args.layers,
        ..GeneratorConfig::default()
    };

    println!("Generating structure with seed: {}", seed);
    println!("Grid size: {}x{}x{}", config.size, config.size, config.layers);

    let generator = StructureGenerator::new(config, GeneratorSeeds::from_master(seed))?;
    let (structure, report) = generator.generate();

    println!("Cores placed: {}", report.cores_placed);
    println!("Floor expansions seeded: {}", report.slabs_seeded);
    println!("Rooms carved: {}", report.rooms_carved);
    println!(
        "Validation removed {} cells, backfilled {} pillar cells",
        report.cells_removed, report.pillars_inserted
    );
    println!("Secondary fragments: {}", report.fragments_scattered);
    println!(
        "Bridge spans: {}, stair cells: {}",
        report.spans_built, report.stairs_marked
    );

    let counts = structure.cell_counts();
    println!(
        "Occupied cells: {} of {} ({:.1}%)",
        counts.occupied(),
        counts.total(),
        100.0 * counts.occupied() as f64 / counts.total() as f64
    );
    println!(
        "  vertical: {}, horizontal: {}, bridge: {}, facade: {}, stair: {}",
        counts.vertical, counts.horizontal, counts.bridge, counts.facade, counts.stair
    );
    println!(
        "Connections: {}, rooms: {}",
        structure.connections.len(),
        structure.rooms.len()
    );

    storage::save(&structure, &args.output)?;
    println!("Saved structure to {}", args.output);

    Ok(())
}

/// Reload a saved structure and re-check the support predicate over every
/// slab and facade cell.
fn check_structure(path: &str) -> Result<(), Box<dyn Error>> {
    let structure = storage::load(path)?;
    let grid = &structure.grid;

    println!(
        "Loaded {}x{}x{} structure from {}",
        grid.size, grid.size, grid.layers, path
    );

    let mut violations = 0;
    for (x, z, y, cell) in grid.iter() {
        if matches!(cell, CellType::Horizontal | CellType::Facade) && !is_supported(grid, x, z, y)
        {
            violations += 1;
        }
    }

    let counts = structure.cell_counts();
    println!(
        "Occupied cells: {}, connections: {}, rooms: {}",
        counts.occupied(),
        structure.connections.len(),
        structure.rooms.len()
    );

    if violations > 0 {
        return Err(format!("{} cells violate the support invariant", violations).into());
    }
    println!("Support invariant holds");
    Ok(())
}
