use crate::relief_pipeline::common::error::{Result, ReliefError};
use crate::relief_pipeline::stl::geometry::{Vertex, face_normal, stl_byte_len};
use crate::relief_pipeline::stl::{HEADER_SIZE, PREAMBLE_SIZE, TRIANGLE_SIZE};

/// Fixed-capacity binary STL buffer.
///
/// The buffer is sized up front for the declared triangle count and the
/// builder owns the write cursor, so callers only hand over vertices.
pub struct StlMeshBuilder {
    buffer: Vec<u8>,
    cursor: usize,
    declared: u32,
    emitted: u32,
}

impl StlMeshBuilder {
    /// Allocates the full stream and writes the zeroed header and count.
    pub fn with_triangle_count(triangles: u64) -> Result<Self> {
        let declared = u32::try_from(triangles).map_err(|_| {
            ReliefError::InvalidDimensions(format!(
                "{} triangles do not fit a binary STL count",
                triangles
            ))
        })?;

        let len = usize::try_from(stl_byte_len(triangles)).map_err(|_| {
            ReliefError::InvalidDimensions(format!(
                "STL stream for {} triangles exceeds addressable memory",
                triangles
            ))
        })?;

        let mut buffer = vec![0u8; len];
        buffer[HEADER_SIZE..PREAMBLE_SIZE].copy_from_slice(&declared.to_le_bytes());

        Ok(Self {
            buffer,
            cursor: PREAMBLE_SIZE,
            declared,
            emitted: 0,
        })
    }

    /// Appends one facet with its flat normal. Vertex order sets the facing.
    pub fn emit_triangle(&mut self, v0: Vertex, v1: Vertex, v2: Vertex) -> Result<()> {
        if self.emitted == self.declared {
            return Err(ReliefError::EncodeError(format!(
                "triangle {} exceeds declared count {}",
                self.emitted + 1,
                self.declared
            )));
        }

        let normal = face_normal(v0, v1, v2);
        let record = &mut self.buffer[self.cursor..self.cursor + TRIANGLE_SIZE];

        for (slot, value) in record
            .chunks_exact_mut(4)
            .zip(normal.iter().chain(&v0).chain(&v1).chain(&v2))
        {
            slot.copy_from_slice(&value.to_le_bytes());
        }
        // attribute byte count stays zero from allocation

        self.cursor += TRIANGLE_SIZE;
        self.emitted += 1;
        Ok(())
    }

    /// Two facets covering the quad `a b c d`, given counter-clockwise as
    /// seen from the side it should face.
    pub fn emit_quad(&mut self, a: Vertex, b: Vertex, c: Vertex, d: Vertex) -> Result<()> {
        self.emit_triangle(a, b, c)?;
        self.emit_triangle(a, c, d)
    }

    pub fn emitted(&self) -> u32 {
        self.emitted
    }

    /// Hands back the stream once every declared facet has been written.
    pub fn finish(self) -> Result<Vec<u8>> {
        if self.emitted != self.declared {
            return Err(ReliefError::EncodeError(format!(
                "emitted {} triangles, header declares {}",
                self.emitted, self.declared
            )));
        }
        Ok(self.buffer)
    }
}
