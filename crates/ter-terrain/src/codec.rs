//! .ter binary format encoder and decoder.
//!
//! Layout, all multi-byte integers little-endian:
//!
//! | Field         | Size          |
//! |---------------|---------------|
//! | version       | u8            |
//! | size          | u32           |
//! | heights       | size² × u16   |
//! | layers        | size² × u8    |
//! | materialCount | u32           |
//! | materials     | (u8 len, len ASCII bytes) per material |

use std::path::Path;

use log::{debug, warn};

use crate::core::constants::{
    HEADER_SIZE, HEIGHT_SAMPLE_SIZE, LAYER_SAMPLE_SIZE, MAX_MATERIAL_NAME_LEN,
};
use crate::core::{TerError, TerResult, TerrainDocument};

/// Load a TerrainDocument from a .ter file.
pub fn read_ter(path: &Path) -> TerResult<TerrainDocument> {
    let data = std::fs::read(path)?;
    decode(&data)
}

/// Write a TerrainDocument to a .ter file.
pub fn write_ter(path: &Path, doc: &TerrainDocument) -> TerResult<()> {
    let data = encode(doc)?;
    std::fs::write(path, data)?;
    Ok(())
}

/// Serialize a TerrainDocument to .ter bytes.
pub fn encode(doc: &TerrainDocument) -> TerResult<Vec<u8>> {
    let cell_count = check_document(doc)?;

    let materials_size: usize = doc.materials.iter().map(|m| 1 + m.len()).sum();
    let total_size = HEADER_SIZE
        + cell_count * (HEIGHT_SAMPLE_SIZE + LAYER_SAMPLE_SIZE)
        + 4
        + materials_size;
    let mut buf = Vec::with_capacity(total_size);

    buf.push(doc.version);
    buf.extend_from_slice(&doc.size.to_le_bytes());

    for &h in &doc.heights {
        buf.extend_from_slice(&h.to_le_bytes());
    }
    buf.extend_from_slice(&doc.layers);

    buf.extend_from_slice(&(doc.materials.len() as u32).to_le_bytes());
    for name in &doc.materials {
        // Length was checked against u8::MAX above.
        buf.push(name.len() as u8);
        buf.extend_from_slice(name.as_bytes());
    }

    debug!(
        "Encoded {}x{} terrain with {} materials ({} bytes)",
        doc.size,
        doc.size,
        doc.materials.len(),
        buf.len()
    );
    Ok(buf)
}

/// Validate the structural preconditions of `encode`. Returns the cell count.
fn check_document(doc: &TerrainDocument) -> TerResult<usize> {
    if doc.size == 0 {
        return Err(TerError::encoding("grid size must be at least 1"));
    }
    let cell_count = doc
        .cell_count()
        .ok_or_else(|| TerError::encoding(format!("grid size {} overflows", doc.size)))?;

    if doc.heights.len() != cell_count {
        return Err(TerError::encoding(format!(
            "expected {cell_count} heights for a {0}x{0} grid, got {1}",
            doc.size,
            doc.heights.len()
        )));
    }
    if doc.layers.len() != cell_count {
        return Err(TerError::encoding(format!(
            "expected {cell_count} layers for a {0}x{0} grid, got {1}",
            doc.size,
            doc.layers.len()
        )));
    }
    if doc.materials.len() > u32::MAX as usize {
        return Err(TerError::encoding("too many materials"));
    }

    for (i, name) in doc.materials.iter().enumerate() {
        if !name.is_ascii() {
            return Err(TerError::encoding(format!(
                "material {i} ({name:?}) is not ASCII"
            )));
        }
        if name.len() > MAX_MATERIAL_NAME_LEN {
            return Err(TerError::encoding(format!(
                "material {i} is {} bytes long (max {MAX_MATERIAL_NAME_LEN})",
                name.len()
            )));
        }
    }

    Ok(cell_count)
}

/// Parse a TerrainDocument from a .ter byte buffer.
pub fn decode(data: &[u8]) -> TerResult<TerrainDocument> {
    let mut reader = Reader::new(data);

    let version = reader.u8("version")?;
    let size = reader.u32("size")?;

    let cell_count = (size as usize)
        .checked_mul(size as usize)
        .ok_or(TerError::truncated("heights", usize::MAX, reader.remaining()))?;
    let height_bytes = cell_count
        .checked_mul(HEIGHT_SAMPLE_SIZE)
        .ok_or(TerError::truncated("heights", usize::MAX, reader.remaining()))?;

    let heights = reader
        .take("heights", height_bytes)?
        .chunks_exact(HEIGHT_SAMPLE_SIZE)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let layers = reader.take("layers", cell_count * LAYER_SAMPLE_SIZE)?.to_vec();

    let material_count = reader.u32("material count")? as usize;
    // Each material needs at least its length byte.
    if reader.remaining() < material_count {
        return Err(TerError::truncated(
            "materials",
            material_count,
            reader.remaining(),
        ));
    }
    let mut materials = Vec::with_capacity(material_count);
    for index in 0..material_count {
        let len = reader.u8("material name length")? as usize;
        let bytes = reader.take("material name", len)?;
        if !bytes.is_ascii() {
            return Err(TerError::MalformedString { index });
        }
        // ASCII is always valid UTF-8.
        let name = String::from_utf8(bytes.to_vec())
            .map_err(|_| TerError::MalformedString { index })?;
        materials.push(name);
    }

    if reader.remaining() > 0 {
        warn!(
            "Ignoring {} trailing bytes after the material table",
            reader.remaining()
        );
    }

    debug!("Decoded {size}x{size} terrain (version {version}) with {material_count} materials");

    Ok(TerrainDocument {
        version,
        size,
        heights,
        layers,
        materials,
    })
}

/// Bounds-checked little-endian cursor over a byte slice.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Consume exactly `len` bytes, or fail without consuming anything.
    fn take(&mut self, section: &'static str, len: usize) -> TerResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(TerError::truncated(section, len, self.remaining()));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn u8(&mut self, section: &'static str) -> TerResult<u8> {
        Ok(self.take(section, 1)?[0])
    }

    fn u32(&mut self, section: &'static str) -> TerResult<u32> {
        let b = self.take(section, 4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}
