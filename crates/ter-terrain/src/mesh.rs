//! Conversion between terrain documents and surface meshes.
//!
//! Export (`to_document`) reads a square vertex grid in any order and
//! rebuilds the row-major height and layer grids. Import (`to_mesh`)
//! emits one vertex per cell and one quad per interior 2×2 cell block.

use std::cmp::Ordering;

use glam::Vec3;
use log::{debug, warn};

use crate::core::constants::{HEIGHT_SCALE, MAX_HEIGHT, MAX_MESH_EDGE};
use crate::core::{SurfaceMesh, TerError, TerResult, TerrainDocument};

/// Build a terrain document from a host mesh.
///
/// Vertices are stable-sorted by (y, x) to get row-major order. Heights
/// are scaled by [`HEIGHT_SCALE`], rounded, and clamped into the u16
/// range. Each face writes its material slot into `layers[v]` for every
/// host vertex index `v` it references; where faces share a vertex, the
/// last face in traversal order wins.
pub fn to_document(mesh: &SurfaceMesh) -> TerResult<TerrainDocument> {
    let vertex_count = mesh.vertices.len();
    if vertex_count == 0 {
        return Err(TerError::EmptyMesh);
    }
    let side = square_side(vertex_count).ok_or(TerError::NonSquareGrid { vertex_count })?;
    let size = u32::try_from(side).map_err(|_| TerError::NonSquareGrid { vertex_count })?;

    let order = row_major_order(&mesh.vertices);

    let mut clamped = 0usize;
    let heights: Vec<u16> = order
        .iter()
        .map(|&v| {
            let (h, was_clamped) = scale_height(mesh.vertices[v].z);
            if was_clamped {
                clamped += 1;
            }
            h
        })
        .collect();
    if clamped > 0 {
        warn!("Clamped {clamped} of {vertex_count} heights into 0..={MAX_HEIGHT}");
    }

    let mut layers = vec![0u8; vertex_count];
    for (face_idx, face) in mesh.faces.iter().enumerate() {
        let material = mesh.face_material(face_idx);
        for &vertex in face {
            let slot = layers
                .get_mut(vertex as usize)
                .ok_or(TerError::FaceIndexOutOfRange {
                    face: face_idx,
                    vertex,
                    vertex_count,
                })?;
            *slot = material;
        }
    }

    debug!(
        "Built {size}x{size} terrain document from {} faces, {} materials",
        mesh.faces.len(),
        mesh.material_names.len()
    );

    Ok(TerrainDocument::new(
        size,
        heights,
        layers,
        mesh.material_names.clone(),
    ))
}

/// Build a surface mesh from a terrain document.
///
/// Vertex `y * size + x` sits at `(x, y, height / HEIGHT_SCALE)`. Quads
/// wind counter-clockwise seen from above. Per-face materials are not
/// reconstructed from the per-cell layers; `face_materials` is left empty.
///
/// Vertex indices are u32, so `doc.size` must not exceed [`MAX_MESH_EDGE`];
/// callers holding decoded documents check with [`check_mesh_size`] first.
pub fn to_mesh(doc: &TerrainDocument) -> SurfaceMesh {
    let size = doc.size as usize;
    let cell_count = size * size;

    let mut vertices = Vec::with_capacity(cell_count);
    for y in 0..size {
        for x in 0..size {
            let h = doc.heights.get(y * size + x).copied().unwrap_or(0);
            vertices.push(Vec3::new(x as f32, y as f32, h as f32 / HEIGHT_SCALE));
        }
    }

    let quads = size.saturating_sub(1);
    let mut faces = Vec::with_capacity(quads * quads);
    for y in 0..quads {
        for x in 0..quads {
            let i = y * size + x;
            faces.push(vec![
                i as u32,
                (i + 1) as u32,
                (i + size + 1) as u32,
                (i + size) as u32,
            ]);
        }
    }

    debug!(
        "Built mesh with {} vertices and {} faces from {}x{} terrain",
        vertices.len(),
        faces.len(),
        doc.size,
        doc.size
    );

    SurfaceMesh {
        vertices,
        faces,
        face_materials: Vec::new(),
        material_names: doc.materials.clone(),
    }
}

/// Reject grids whose vertex indices would not fit in u32.
pub fn check_mesh_size(size: u32) -> TerResult<()> {
    if size > MAX_MESH_EDGE {
        return Err(TerError::GridTooLarge { size });
    }
    Ok(())
}

/// Scale an elevation to a stored height. Returns whether it was clamped.
fn scale_height(z: f32) -> (u16, bool) {
    let scaled = (z as f64 * HEIGHT_SCALE as f64).round();
    if scaled.is_nan() {
        return (0, true);
    }
    let clamped = scaled.clamp(0.0, MAX_HEIGHT as f64);
    (clamped as u16, clamped != scaled)
}

/// Vertex indices stable-sorted by (y, x).
fn row_major_order(vertices: &[Vec3]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..vertices.len()).collect();
    order.sort_by(|&a, &b| {
        let (va, vb) = (vertices[a], vertices[b]);
        match va.y.total_cmp(&vb.y) {
            Ordering::Equal => va.x.total_cmp(&vb.x),
            other => other,
        }
    });
    order
}

/// Edge length of a square grid with `n` cells, if `n` is a perfect square.
fn square_side(n: usize) -> Option<usize> {
    let guess = (n as f64).sqrt().round() as usize;
    // Float sqrt can be off by one for very large n.
    (guess.saturating_sub(1)..=guess + 1).find(|&s| s.checked_mul(s) == Some(n))
}
