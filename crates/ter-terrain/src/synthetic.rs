//! Synthetic demo terrain.
//!
//! Rolling hills with a valley floor, useful for trying the importer
//! without a real BeamNG level at hand.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::TerrainDocument;

/// Material bands, lowest first.
pub const SYNTHETIC_MATERIALS: [&str; 3] = ["sand", "grass", "rock"];

/// Elevation (metres) above which a cell turns to grass.
const GRASS_LINE: f64 = 8.0;

/// Elevation (metres) above which a cell turns to rock.
const ROCK_LINE: f64 = 40.0;

/// Generate a `size × size` synthetic terrain. Same seed, same terrain.
pub fn generate(size: u32, seed: u64) -> TerrainDocument {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let cells = (size as usize) * (size as usize);

    let mut heights = Vec::with_capacity(cells);
    let mut layers = Vec::with_capacity(cells);

    for row in 0..size {
        for col in 0..size {
            // Normalized coordinates (0..1)
            let nx = col as f64 / size as f64;
            let ny = row as f64 / size as f64;

            let jitter: f64 = rng.gen_range(-0.25..0.25);
            let elev = (synthetic_elevation(nx, ny) + jitter).clamp(0.0, 65.0);

            heights.push((elev * 1000.0).round() as u16);
            layers.push(material_band(elev));
        }
    }

    TerrainDocument::new(
        size,
        heights,
        layers,
        SYNTHETIC_MATERIALS.iter().map(|m| m.to_string()).collect(),
    )
}

/// Elevation in metres at normalized coordinates.
///
/// A valley runs diagonally across the grid with ridges on both sides.
fn synthetic_elevation(nx: f64, ny: f64) -> f64 {
    let valley = ((nx - ny) * std::f64::consts::PI).abs().sin();
    let ridges = 0.5 + 0.5 * (nx * 9.0).sin() * (ny * 7.0).cos();
    let swell = 0.5 + 0.5 * ((nx + ny) * 3.0).sin();
    5.0 + 45.0 * valley * ridges + 8.0 * swell
}

fn material_band(elev: f64) -> u8 {
    if elev > ROCK_LINE {
        2
    } else if elev > GRASS_LINE {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_shape() {
        let doc = generate(16, 7);
        assert_eq!(doc.size, 16);
        assert_eq!(doc.heights.len(), 256);
        assert_eq!(doc.layers.len(), 256);
        assert_eq!(doc.materials, SYNTHETIC_MATERIALS);
        assert!(doc.layers.iter().all(|&l| (l as usize) < doc.materials.len()));
        assert!(doc.heights.iter().all(|&h| h <= 65_000));
    }

    #[test]
    fn test_synthetic_deterministic() {
        assert_eq!(generate(8, 42), generate(8, 42));
        assert_ne!(generate(8, 42).heights, generate(8, 43).heights);
    }

    #[test]
    fn test_synthetic_bands() {
        assert_eq!(material_band(0.0), 0);
        assert_eq!(material_band(10.0), 1);
        assert_eq!(material_band(50.0), 2);
    }

    #[test]
    fn test_synthetic_valley_floor_is_low() {
        // Along the diagonal the valley term vanishes.
        let e = synthetic_elevation(0.3, 0.3);
        assert!(e <= 13.0 + 1e-9, "valley floor too high: {e}");
    }
}
