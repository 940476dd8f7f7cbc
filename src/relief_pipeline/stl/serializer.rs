use tracing::{debug, instrument};

use crate::relief_pipeline::common::error::{Result, ReliefError};
use crate::relief_pipeline::stl::StlMeshBuilder;
use crate::relief_pipeline::stl::geometry::{HeightGrid, triangle_count};
use crate::relief_pipeline::thickness::ThicknessField;

/// Closes a height grid into a solid and writes it as binary STL.
///
/// The top sheet follows the field, the bottom sheet is flat at `z = 0` and
/// a wall runs along every perimeter edge. All facets face outward.
pub struct SolidMeshSerializer;

impl SolidMeshSerializer {
    /// Serializes a `width`x`height` row-major field sampled every `px_mm`.
    ///
    /// A field one sample wide or tall encloses no volume and yields a
    /// header-only stream with a zero count.
    ///
    /// # Errors
    ///
    /// * `ReliefError::InvalidDimensions` - empty grid, or `field` does not
    ///   hold exactly `width * height` values
    /// * `ReliefError::InvalidParameter` - `px_mm` is not a positive number
    #[instrument(skip(self, field), fields(field_len = field.len()))]
    pub fn serialize(&self, field: &[f32], px_mm: f64, width: usize, height: usize) -> Result<Vec<u8>> {
        if width < 1 || height < 1 {
            return Err(ReliefError::InvalidDimensions(format!(
                "grid must be at least 1x1, got {}x{}",
                width, height
            )));
        }

        if width.checked_mul(height) != Some(field.len()) {
            return Err(ReliefError::InvalidDimensions(format!(
                "{}x{} grid needs {} values, got {}",
                width,
                height,
                width.saturating_mul(height),
                field.len()
            )));
        }

        if !(px_mm.is_finite() && px_mm > 0.0) {
            return Err(ReliefError::InvalidParameter(format!(
                "px_mm must be positive, got {}",
                px_mm
            )));
        }

        let triangles = triangle_count(width, height);
        let mut mesh = StlMeshBuilder::with_triangle_count(triangles)?;

        if triangles == 0 {
            debug!(width, height, "Degenerate grid, writing empty STL");
            return mesh.finish();
        }

        let grid = HeightGrid::new(field, width, height, px_mm);
        emit_top(&grid, &mut mesh)?;
        emit_bottom(&grid, &mut mesh)?;
        emit_walls(&grid, &mut mesh)?;

        debug!(triangles = mesh.emitted(), "STL mesh complete");
        mesh.finish()
    }

    /// Serializes a [`ThicknessField`] with its own size and scale.
    pub fn serialize_field(&self, field: &ThicknessField) -> Result<Vec<u8>> {
        self.serialize(&field.data, field.px_mm, field.width, field.height)
    }
}

// Cell corners: a = (x, y), b = (x+1, y), c = (x, y+1), d = (x+1, y+1).
// Both sheets split each cell along the b-c diagonal.

fn emit_top(grid: &HeightGrid, mesh: &mut StlMeshBuilder) -> Result<()> {
    for y in 0..grid.height - 1 {
        for x in 0..grid.width - 1 {
            let a = grid.top(x, y);
            let b = grid.top(x + 1, y);
            let c = grid.top(x, y + 1);
            let d = grid.top(x + 1, y + 1);
            mesh.emit_quad(b, d, c, a)?;
        }
    }
    Ok(())
}

fn emit_bottom(grid: &HeightGrid, mesh: &mut StlMeshBuilder) -> Result<()> {
    for y in 0..grid.height - 1 {
        for x in 0..grid.width - 1 {
            let a = grid.bottom(x, y);
            let b = grid.bottom(x + 1, y);
            let c = grid.bottom(x, y + 1);
            let d = grid.bottom(x + 1, y + 1);
            mesh.emit_quad(b, a, c, d)?;
        }
    }
    Ok(())
}

fn emit_walls(grid: &HeightGrid, mesh: &mut StlMeshBuilder) -> Result<()> {
    let (last_x, last_y) = (grid.width - 1, grid.height - 1);

    // y = 0, facing -Y
    for x in 0..last_x {
        let (ta, tb) = (grid.top(x, 0), grid.top(x + 1, 0));
        let (ba, bb) = (grid.bottom(x, 0), grid.bottom(x + 1, 0));
        mesh.emit_quad(ta, ba, bb, tb)?;
    }

    // y = H-1, facing +Y
    for x in 0..last_x {
        let (ta, tb) = (grid.top(x, last_y), grid.top(x + 1, last_y));
        let (ba, bb) = (grid.bottom(x, last_y), grid.bottom(x + 1, last_y));
        mesh.emit_quad(ta, tb, bb, ba)?;
    }

    // x = 0, facing -X
    for y in 0..last_y {
        let (ta, tb) = (grid.top(0, y), grid.top(0, y + 1));
        let (ba, bb) = (grid.bottom(0, y), grid.bottom(0, y + 1));
        mesh.emit_quad(ta, tb, bb, ba)?;
    }

    // x = W-1, facing +X
    for y in 0..last_y {
        let (ta, tb) = (grid.top(last_x, y), grid.top(last_x, y + 1));
        let (ba, bb) = (grid.bottom(last_x, y), grid.bottom(last_x, y + 1));
        mesh.emit_quad(ta, ba, bb, tb)?;
    }

    Ok(())
}
