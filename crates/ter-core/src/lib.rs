//! Core types and definitions for BeamNG terrain conversion.
//!
//! This crate defines the vocabulary shared by the codec, the mesh
//! adapter and the command-line tool: the terrain document, the
//! surface mesh, format constants and the error type.
//! It performs no I/O of its own.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{TerError, TerResult};
pub use types::{SurfaceMesh, TerrainDocument};

#[cfg(test)]
mod tests;
