//! Terrain file format constants.

/// Format revision written by the encoder.
/// Decoding preserves whatever revision byte the file carries.
pub const FORMAT_VERSION: u8 = 9;

/// Stored heights are elevation multiplied by this factor.
pub const HEIGHT_SCALE: f32 = 1000.0;

/// Largest stored height value.
pub const MAX_HEIGHT: u16 = u16::MAX;

/// Material names are length-prefixed by a single byte.
pub const MAX_MATERIAL_NAME_LEN: usize = u8::MAX as usize;

/// Version byte plus the u32 grid size.
pub const HEADER_SIZE: usize = 1 + 4;

/// Bytes per stored height sample.
pub const HEIGHT_SAMPLE_SIZE: usize = 2;

/// Bytes per stored layer index.
pub const LAYER_SAMPLE_SIZE: usize = 1;

/// Largest grid edge whose vertex indices fit in u32.
pub const MAX_MESH_EDGE: u32 = 65536;

/// Extension of terrain files (without the dot).
pub const FILE_EXTENSION: &str = "ter";

/// Name given to mesh objects created by an import.
pub const IMPORTED_OBJECT_NAME: &str = "BeamNG_Terrain";
