//! Pixel-to-sector mapping.
//!
//! Each image axis is cut into `count` contiguous bands of `floor(dim / count)`
//! pixels. The remainder strip left over by the integer division belongs to
//! the last band.

use serde::{Deserialize, Serialize};

/// Number of sectors along each image axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub columns: usize,
    pub rows: usize,
}

impl GridSize {
    pub const fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(3, 3)
    }
}

/// Integer sector (grid cell) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectorCoords {
    pub sx: usize,
    pub sy: usize,
}

/// Pixel rectangle `[x0, x1) × [y0, y1)` covered by one sector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorBounds {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("pixel ({x}, {y}) lies outside the {width}x{height} image")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("image {width}x{height} is too small for a {columns}x{rows} sector grid")]
    ImageTooSmall {
        width: usize,
        height: usize,
        columns: usize,
        rows: usize,
    },
    #[error("sector ({sx}, {sy}) is outside the {columns}x{rows} grid")]
    SectorOutOfRange {
        sx: usize,
        sy: usize,
        columns: usize,
        rows: usize,
    },
}

/// Sector layout of one image under a fixed grid size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectorGeometry {
    width: usize,
    height: usize,
    grid: GridSize,
}

impl SectorGeometry {
    pub fn new(width: usize, height: usize, grid: GridSize) -> Result<Self, GeometryError> {
        if grid.columns == 0 || grid.rows == 0 || width < grid.columns || height < grid.rows {
            return Err(GeometryError::ImageTooSmall {
                width,
                height,
                columns: grid.columns,
                rows: grid.rows,
            });
        }
        Ok(Self {
            width,
            height,
            grid,
        })
    }

    #[inline]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Nominal sector size `(floor(width / columns), floor(height / rows))`.
    #[inline]
    pub fn sector_size(&self) -> (usize, usize) {
        (self.width / self.grid.columns, self.height / self.grid.rows)
    }

    /// Sector containing pixel `(x, y)`.
    pub fn sector_index(&self, x: usize, y: usize) -> Result<SectorCoords, GeometryError> {
        if x >= self.width || y >= self.height {
            return Err(GeometryError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let (band_w, band_h) = self.sector_size();
        Ok(SectorCoords {
            sx: axis_band(x, band_w, self.grid.columns),
            sy: axis_band(y, band_h, self.grid.rows),
        })
    }

    /// Pixel rectangle of sector `(sx, sy)`; the last row and column absorb the remainder strip.
    pub fn sector_bounds(&self, sx: usize, sy: usize) -> Result<SectorBounds, GeometryError> {
        if sx >= self.grid.columns || sy >= self.grid.rows {
            return Err(GeometryError::SectorOutOfRange {
                sx,
                sy,
                columns: self.grid.columns,
                rows: self.grid.rows,
            });
        }
        let (band_w, band_h) = self.sector_size();
        let x1 = if sx + 1 == self.grid.columns {
            self.width
        } else {
            band_w * (sx + 1)
        };
        let y1 = if sy + 1 == self.grid.rows {
            self.height
        } else {
            band_h * (sy + 1)
        };
        Ok(SectorBounds {
            x0: band_w * sx,
            y0: band_h * sy,
            x1,
            y1,
        })
    }
}

// smallest i >= 1 with band * i > coord, minus one; remainder pixels fall into the last band
#[inline]
fn axis_band(coord: usize, band: usize, count: usize) -> usize {
    (coord / band).min(count - 1)
}

/// One-shot form of [`SectorGeometry::sector_index`].
pub fn sector_index(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    grid: GridSize,
) -> Result<SectorCoords, GeometryError> {
    SectorGeometry::new(width, height, grid)?.sector_index(x, y)
}
