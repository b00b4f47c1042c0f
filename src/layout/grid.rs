//! Grid partitioning of a container's interior volume
//!
//! The usable interior is the resolved container volume shrunk by the
//! configured padding. Columns slice the interior evenly along X, rows
//! (bands) slice it evenly along Y with row 0 at the bottom. Boundaries are
//! exact fractions of the interior extents, so cells cover the interior
//! with no gaps and no overlap.

use cgmath::Vector3;

use crate::geometry::Aabb;

/// One row/column intersection of the layout grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub band_y_min: f32,
    pub band_y_max: f32,
    pub col_x_min: f32,
    pub col_x_max: f32,
}

impl GridCell {
    /// Horizontal midpoint of the column slice
    pub fn x_mid(&self) -> f32 {
        (self.col_x_min + self.col_x_max) / 2.0
    }

    pub fn band_height(&self) -> f32 {
        self.band_y_max - self.band_y_min
    }

    pub fn col_width(&self) -> f32 {
        self.col_x_max - self.col_x_min
    }
}

/// Shrinks a container volume by `padding` on every side
///
/// Returns `None` when the padding consumes the volume on any axis; the
/// layout then degenerates to zero cells rather than faulting.
pub fn interior_volume(volume: &Aabb, padding: Vector3<f32>) -> Option<Aabb> {
    let interior = Aabb::new(volume.min + padding, volume.max - padding);

    if interior.is_degenerate() {
        None
    } else {
        Some(interior)
    }
}

/// Divides an interior volume into `rows * cols` cells, row-major
///
/// Row and column boundaries are computed as exact fractions of the interior
/// height and width. `rows == 0` or `cols == 0` yields no cells.
pub fn partition(interior: &Aabb, rows: u32, cols: u32) -> Vec<GridCell> {
    let width = interior.size().x;
    let height = interior.size().y;

    let mut cells = Vec::with_capacity((rows as usize) * (cols as usize));

    for row in 0..rows {
        let band_y_min = interior.min.y + height * row as f32 / rows as f32;
        let band_y_max = interior.min.y + height * (row + 1) as f32 / rows as f32;

        for col in 0..cols {
            let col_x_min = interior.min.x + width * col as f32 / cols as f32;
            let col_x_max = interior.min.x + width * (col + 1) as f32 / cols as f32;

            cells.push(GridCell {
                row,
                col,
                band_y_min,
                band_y_max,
                col_x_min,
                col_x_max,
            });
        }
    }

    cells
}
