//! Error type shared by every terrain operation.

/// Failures raised while encoding, decoding or converting terrain data.
///
/// No operation returns partial output alongside an error: the whole
/// document or mesh conversion is aborted.
#[derive(thiserror::Error, Debug)]
pub enum TerError {
    /// The document breaks a structural precondition of the file format.
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Truncated {section}: needed {needed} bytes, {available} available")]
    TruncatedData {
        section: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("Material name {index} is not valid ASCII")]
    MalformedString { index: usize },

    #[error("Terrain mesh must be square: {vertex_count} vertices is not a perfect square")]
    NonSquareGrid { vertex_count: usize },

    #[error("Terrain mesh has no vertices")]
    EmptyMesh,

    #[error("Face {face} references vertex {vertex} but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        vertex: u32,
        vertex_count: usize,
    },

    #[error("No mesh objects available for export")]
    NoMeshes,

    #[error("Terrain grid {size}x{size} is too large to build a mesh from")]
    GridTooLarge { size: u32 },

    #[error("Export failed for all {failed} mesh object(s)")]
    ExportFailed { failed: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene error: {0}")]
    Scene(#[from] serde_json::Error),
}

impl TerError {
    /// Convenience constructor for [`TerError::Encoding`].
    pub fn encoding<T: ToString>(msg: T) -> Self {
        TerError::Encoding(msg.to_string())
    }

    pub fn truncated(section: &'static str, needed: usize, available: usize) -> Self {
        TerError::TruncatedData {
            section,
            needed,
            available,
        }
    }
}

/// Result alias for terrain operations.
pub type TerResult<T> = Result<T, TerError>;
