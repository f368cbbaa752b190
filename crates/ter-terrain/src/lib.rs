//! BeamNG terrain (.ter) conversion.
//!
//! Binary codec for terrain files, grid/mesh conversion,
//! and the batch export/import commands used by the tool.

pub use ter_core as core;

pub mod codec;
pub mod host;
pub mod mesh;
pub mod scene;
pub mod synthetic;

// Re-export key types for convenience.
pub use codec::{decode, encode, read_ter, write_ter};
pub use host::{export_meshes, export_path_for, import_terrain, ExportReport, MeshHost};
pub use mesh::{to_document, to_mesh};
pub use scene::{Scene, SceneObject};
