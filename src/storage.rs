//! Structure persistence.
//!
//! Saves the generated model as a JSON document with three top-level
//! fields: `grid` (nested integer cell codes, x then z then y, matching the
//! in-memory layout), `connections` (coordinate-pair list), and `rooms`.
//! Loading is all-or-nothing: malformed input fails without installing any
//! partial state.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::generation::rooms::Room;
use crate::grid::{CellType, Connection, VoxelGrid};
use crate::structure::StructureData;

/// The persisted document shape. Field names and nesting order are the
/// compatibility contract.
#[derive(Serialize, Deserialize)]
struct StructureFile {
    grid: Vec<Vec<Vec<u8>>>,
    connections: Vec<Connection>,
    rooms: Vec<Room>,
}

/// Save a structure to a JSON file.
pub fn save<P: AsRef<Path>>(structure: &StructureData, path: P) -> Result<(), StorageError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let document = StructureFile {
        grid: grid_to_codes(&structure.grid),
        connections: structure.connections.clone(),
        rooms: structure.rooms.clone(),
    };
    serde_json::to_writer(writer, &document)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;

    Ok(())
}

/// Load a structure from a JSON file. Validates dimensions, cell codes,
/// and connection bounds before building the grid.
pub fn load<P: AsRef<Path>>(path: P) -> Result<StructureData, StorageError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let document: StructureFile = serde_json::from_reader(reader)
        .map_err(|e| StorageError::Deserialization(e.to_string()))?;

    structure_from_document(document)
}

fn grid_to_codes(grid: &VoxelGrid) -> Vec<Vec<Vec<u8>>> {
    let mut codes = Vec::with_capacity(grid.size);
    for x in 0..grid.size {
        let mut plane = Vec::with_capacity(grid.size);
        for z in 0..grid.size {
            let mut column = Vec::with_capacity(grid.layers);
            for y in 0..grid.layers {
                column.push(grid.get(x, z, y).code());
            }
            plane.push(column);
        }
        codes.push(plane);
    }
    codes
}

fn structure_from_document(document: StructureFile) -> Result<StructureData, StorageError> {
    let size = document.grid.len();
    if size == 0 {
        return Err(StorageError::Deserialization(
            "grid has zero horizontal extent".to_string(),
        ));
    }
    let layers = document.grid[0].first().map(Vec::len).unwrap_or(0);
    if layers == 0 {
        return Err(StorageError::Deserialization(
            "grid has zero vertical extent".to_string(),
        ));
    }

    let mut grid = VoxelGrid::new(size, layers);
    for (x, plane) in document.grid.iter().enumerate() {
        if plane.len() != size {
            return Err(StorageError::Deserialization(format!(
                "grid row {} has {} columns, expected {}",
                x,
                plane.len(),
                size
            )));
        }
        for (z, column) in plane.iter().enumerate() {
            if column.len() != layers {
                return Err(StorageError::Deserialization(format!(
                    "grid column ({}, {}) has {} layers, expected {}",
                    x,
                    z,
                    column.len(),
                    layers
                )));
            }
            for (y, &code) in column.iter().enumerate() {
                let cell = CellType::from_code(code).ok_or_else(|| {
                    StorageError::Deserialization(format!(
                        "unknown cell code {} at ({}, {}, {})",
                        code, x, z, y
                    ))
                })?;
                grid.set(x, z, y, cell);
                // The support map is not persisted; every surviving
                // non-empty cell was anchored at write time.
                grid.set_anchor(x, z, y, cell != CellType::Empty);
            }
        }
    }

    for (i, &((x1, y1, z1), (x2, y2, z2))) in document.connections.iter().enumerate() {
        for (x, y, z) in [(x1, y1, z1), (x2, y2, z2)] {
            if x >= size || z >= size || y >= layers {
                return Err(StorageError::Deserialization(format!(
                    "connection {} coordinate ({}, {}, {}) out of bounds",
                    i, x, y, z
                )));
            }
        }
    }

    Ok(StructureData::new(grid, document.connections, document.rooms))
}

/// Errors that can occur while persisting or restoring a structure.
#[derive(Debug)]
pub enum StorageError {
    /// IO error (file not found, permissions, etc.)
    Io(std::io::Error),
    /// The structure could not be encoded
    Serialization(String),
    /// The persisted document is malformed (bad nesting, unknown cell
    /// codes, mismatched dimensions)
    Deserialization(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::Serialization(e) => write!(f, "serialization error: {}", e),
            StorageError::Deserialization(e) => write!(f, "deserialization error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::generation::rooms::RoomKind;
    use crate::generation::StructureGenerator;
    use crate::seeds::GeneratorSeeds;
    use std::io::Write;

    fn fixture() -> StructureData {
        let mut grid = VoxelGrid::new(4, 3);
        for (x, z, y, cell) in [
            (0, 0, 0, CellType::Vertical),
            (0, 0, 1, CellType::Stair),
            (1, 0, 0, CellType::Horizontal),
            (1, 1, 1, CellType::Bridge),
            (2, 2, 2, CellType::Facade),
        ] {
            grid.set(x, z, y, cell);
            grid.set_anchor(x, z, y, true);
        }

        let connections = vec![
            ((0, 0, 0), (0, 1, 0)),
            ((0, 0, 0), (1, 0, 0)),
            // Duplicates are allowed and must survive the round trip.
            ((0, 0, 0), (1, 0, 0)),
        ];
        let rooms = vec![Room {
            kind: RoomKind::Utility,
            origin: (1, 0, 0),
            extent: (2, 2, 2),
            dominant: CellType::Facade,
        }];

        StructureData::new(grid, connections, rooms)
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("structure.json");

        let original = fixture();
        save(&original, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert!(loaded.grid == original.grid);
        assert_eq!(loaded.connections, original.connections);
        assert_eq!(loaded.rooms, original.rooms);
    }

    #[test]
    fn test_round_trip_of_generated_structure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated.json");

        let config = GeneratorConfig {
            size: 16,
            layers: 8,
            ..GeneratorConfig::default()
        };
        let generator =
            StructureGenerator::new(config, GeneratorSeeds::from_master(7)).unwrap();
        let (original, _) = generator.generate();

        save(&original, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert!(loaded == original);
    }

    #[test]
    fn test_unknown_cell_code_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_code.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"{{"grid": [[[0, 9]]], "connections": [], "rooms": []}}"#
        )
        .unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StorageError::Deserialization(_)));
        assert!(err.to_string().contains("cell code 9"));
    }

    #[test]
    fn test_ragged_grid_fails() {
        let dir = tempfile::tempdir().unwrap();

        // A plan row with the wrong column count.
        let path = dir.path().join("ragged_rows.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"{{"grid": [[[0], [0]], [[0]]], "connections": [], "rooms": []}}"#
        )
        .unwrap();
        assert!(matches!(
            load(&path).unwrap_err(),
            StorageError::Deserialization(_)
        ));

        // A column with the wrong layer count.
        let path = dir.path().join("ragged_layers.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"{{"grid": [[[0, 0], [0]], [[0, 0], [0, 0]]], "connections": [], "rooms": []}}"#
        )
        .unwrap();
        assert!(matches!(
            load(&path).unwrap_err(),
            StorageError::Deserialization(_)
        ));
    }

    #[test]
    fn test_empty_grid_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        let mut file = File::create(&path).unwrap();
        write!(file, r#"{{"grid": [], "connections": [], "rooms": []}}"#).unwrap();

        assert!(matches!(
            load(&path).unwrap_err(),
            StorageError::Deserialization(_)
        ));
    }

    #[test]
    fn test_truncated_document_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("truncated.json");
        let mut file = File::create(&path).unwrap();
        write!(file, r#"{{"grid": [[[0"#).unwrap();

        assert!(matches!(
            load(&path).unwrap_err(),
            StorageError::Deserialization(_)
        ));
    }

    #[test]
    fn test_out_of_bounds_connection_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_connection.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"{{"grid": [[[0]]], "connections": [[[0, 0, 0], [5, 0, 0]]], "rooms": []}}"#
        )
        .unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = load("/nonexistent/structure.json").unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn test_loaded_support_map_marks_occupied_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("support.json");

        save(&fixture(), &path).unwrap();
        let loaded = load(&path).unwrap();

        for (x, z, y, cell) in loaded.grid.iter() {
            assert_eq!(loaded.grid.is_anchored(x, z, y), cell != CellType::Empty);
        }
    }
}
