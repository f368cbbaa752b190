//! Terrain document and surface mesh.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{FORMAT_VERSION, HEIGHT_SCALE};

/// In-memory form of a terrain file.
///
/// `heights` and `layers` are row-major (row = fixed y, varying x) and
/// hold `size * size` entries each. A layer value indexes `materials`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainDocument {
    /// Format revision byte.
    pub version: u8,
    /// Edge length of the square grid.
    pub size: u32,
    /// Elevation × 1000 per cell.
    pub heights: Vec<u16>,
    /// Material index per cell.
    pub layers: Vec<u8>,
    /// Material names, indexed by layer value.
    pub materials: Vec<String>,
}

impl TerrainDocument {
    /// Create a document tagged with the current format version.
    pub fn new(size: u32, heights: Vec<u16>, layers: Vec<u8>, materials: Vec<String>) -> Self {
        Self {
            version: FORMAT_VERSION,
            size,
            heights,
            layers,
            materials,
        }
    }

    /// A level grid with every cell at `height` and on layer 0.
    pub fn flat(size: u32, height: u16, materials: Vec<String>) -> Self {
        let cells = (size as usize) * (size as usize);
        Self::new(size, vec![height; cells], vec![0; cells], materials)
    }

    /// Number of grid cells, or `None` if `size * size` overflows.
    pub fn cell_count(&self) -> Option<usize> {
        (self.size as usize).checked_mul(self.size as usize)
    }

    /// Row-major index of cell (x, y). Returns None outside the grid.
    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(y as usize * self.size as usize + x as usize)
    }

    /// Decoded elevation at cell (x, y).
    pub fn height_at(&self, x: u32, y: u32) -> Option<f32> {
        let idx = self.index(x, y)?;
        self.heights.get(idx).map(|&h| h as f32 / HEIGHT_SCALE)
    }

    /// Layer index at cell (x, y).
    pub fn layer_at(&self, x: u32, y: u32) -> Option<u8> {
        let idx = self.index(x, y)?;
        self.layers.get(idx).copied()
    }

    /// Material name assigned to cell (x, y), if the layer index is in range.
    pub fn material_at(&self, x: u32, y: u32) -> Option<&str> {
        let layer = self.layer_at(x, y)?;
        self.materials.get(layer as usize).map(String::as_str)
    }

    /// Lowest and highest stored height. None for an empty grid.
    pub fn height_range(&self) -> Option<(u16, u16)> {
        let min = self.heights.iter().copied().min()?;
        let max = self.heights.iter().copied().max()?;
        Some((min, max))
    }
}

/// Vertex/face form of a terrain, as exchanged with the mesh host.
///
/// Faces are lists of vertex indices. `face_materials` runs parallel to
/// `faces` for meshes coming from the host; meshes built from a terrain
/// document leave it empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Vec<u32>>,
    #[serde(default)]
    pub face_materials: Vec<u8>,
    #[serde(default)]
    pub material_names: Vec<String>,
}

impl SurfaceMesh {
    /// Material slot of face `i`. Faces without an entry use slot 0.
    pub fn face_material(&self, i: usize) -> u8 {
        self.face_materials.get(i).copied().unwrap_or(0)
    }
}
