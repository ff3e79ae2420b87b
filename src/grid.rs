//! Voxel grid and cell classification.
//!
//! The grid is a fixed-extent 3D array indexed by (x, z, y) where x and z are
//! horizontal plan coordinates and y is the layer index. A parallel boolean
//! support map records which cells are anchored to load-bearing structure.

/// A 3D grid coordinate as (x, y, z), with y the layer index.
pub type Coord = (usize, usize, usize);

/// A structural edge between two cells (shaft step, expansion step, or
/// bridge segment). Append-only; duplicates are allowed.
pub type Connection = (Coord, Coord);

/// Classification of a single grid cell.
///
/// Exactly one variant per cell. Later phases may overwrite earlier
/// classifications; overwriting is intentional.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum CellType {
    #[default]
    Empty,
    /// Load-bearing core column
    Vertical,
    /// Floor slab / platform
    Horizontal,
    /// Inter-core span (occupies two layers)
    Bridge,
    /// Non-load-bearing wall
    Facade,
    /// Vertical circulation within a core
    Stair,
}

impl CellType {
    /// Integer code used in the persisted format.
    pub fn code(self) -> u8 {
        match self {
            CellType::Empty => 0,
            CellType::Vertical => 1,
            CellType::Horizontal => 2,
            CellType::Bridge => 3,
            CellType::Facade => 4,
            CellType::Stair => 5,
        }
    }

    /// Decode a persisted cell code. Returns None for out-of-range codes.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CellType::Empty),
            1 => Some(CellType::Vertical),
            2 => Some(CellType::Horizontal),
            3 => Some(CellType::Bridge),
            4 => Some(CellType::Facade),
            5 => Some(CellType::Stair),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CellType::Empty => "empty",
            CellType::Vertical => "vertical",
            CellType::Horizontal => "horizontal",
            CellType::Bridge => "bridge",
            CellType::Facade => "facade",
            CellType::Stair => "stair",
        }
    }
}

/// Fixed-extent voxel grid: `size x size` plan cells by `layers` elevations.
///
/// Owns both the cell-type array and the parallel support map. Dimensions
/// never change after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    /// Horizontal extent (both x and z)
    pub size: usize,
    /// Vertical extent (number of layers)
    pub layers: usize,
    /// Cell classifications, laid out (x, z, y)
    cells: Vec<CellType>,
    /// Anchored flags, same layout as `cells`
    support: Vec<bool>,
}

impl VoxelGrid {
    /// Create a grid zero-initialized to `Empty` / unanchored.
    pub fn new(size: usize, layers: usize) -> Self {
        let len = size * size * layers;
        Self {
            size,
            layers,
            cells: vec![CellType::Empty; len],
            support: vec![false; len],
        }
    }

    /// Internal index for (x, z, y). Layout order matches the persisted
    /// format: x outermost, then z, then y.
    fn index(&self, x: usize, z: usize, y: usize) -> usize {
        debug_assert!(
            x < self.size && z < self.size && y < self.layers,
            "coordinate ({}, {}, {}) out of bounds {}x{}x{}",
            x,
            z,
            y,
            self.size,
            self.size,
            self.layers
        );
        (x * self.size + z) * self.layers + y
    }

    pub fn get(&self, x: usize, z: usize, y: usize) -> CellType {
        self.cells[self.index(x, z, y)]
    }

    pub fn set(&mut self, x: usize, z: usize, y: usize, cell: CellType) {
        let idx = self.index(x, z, y);
        self.cells[idx] = cell;
    }

    /// Whether the cell is anchored (load-bearing itself, or validated as
    /// resting on anchored structure).
    pub fn is_anchored(&self, x: usize, z: usize, y: usize) -> bool {
        self.support[self.index(x, z, y)]
    }

    pub fn set_anchor(&mut self, x: usize, z: usize, y: usize, anchored: bool) {
        let idx = self.index(x, z, y);
        self.support[idx] = anchored;
    }

    /// Whether a signed plan coordinate lies inside the grid.
    pub fn plan_contains(&self, x: isize, z: isize) -> bool {
        x >= 0 && z >= 0 && (x as usize) < self.size && (z as usize) < self.size
    }

    /// The four axis-aligned plan neighbors of (x, z), clipped to the grid.
    pub fn plan_neighbors(&self, x: usize, z: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(4);
        if x > 0 {
            result.push((x - 1, z));
        }
        if x + 1 < self.size {
            result.push((x + 1, z));
        }
        if z > 0 {
            result.push((x, z - 1));
        }
        if z + 1 < self.size {
            result.push((x, z + 1));
        }
        result
    }

    /// Iterate over all cells as (x, z, y, cell).
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize, CellType)> + '_ {
        let size = self.size;
        let layers = self.layers;
        self.cells.iter().enumerate().map(move |(idx, &cell)| {
            let y = idx % layers;
            let z = (idx / layers) % size;
            let x = idx / (layers * size);
            (x, z, y, cell)
        })
    }

    /// Count cells of a given classification.
    pub fn count(&self, kind: CellType) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }
}
