//! Dense brightness surface reconstruction from a sparse sample grid.
//!
//! Every grid sample is an anchor at the lower-left corner of its sector.
//! The output plane is divided into `columns - 1` by `rows - 1` intervals of
//! `floor(out / (count - 1)) + 1` pixels, so anchor `count - 1` sits just past
//! the far edge and every output pixel has four anchors around it. Pixels
//! are bilinearly blended from those four anchors.
//!
//! The same routine produces the coarse live preview and the full-resolution
//! background; only the output size and the [`UnsetAnchors`] policy differ.

use crate::grid::SampleGrid;
use crate::image::GrayImage;

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("interpolation needs at least a 2x2 sample grid (got {columns}x{rows})")]
    DegenerateGrid { columns: usize, rows: usize },
    #[error("invalid output size {width}x{height}")]
    EmptyOutput { width: usize, height: usize },
    #[error("anchor ({sx}, {sy}) has no sample")]
    UnsetAnchor { sx: usize, sy: usize },
}

/// How reconstruction treats anchors whose sector has no sample yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnsetAnchors {
    /// Unset anchors count as brightness 0 (progress previews).
    ZeroFill,
    /// Every participating anchor must be set.
    Reject,
}

/// Dense `width × height` field of real brightness values, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Surface {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// New surface with `delta` added to every value.
    pub fn offset(&self, delta: f32) -> Surface {
        Surface {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|v| v + delta).collect(),
        }
    }

    pub fn min_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Quantize to 8 bits: round to nearest, then clamp into `[0, 255]`.
    pub fn to_gray(&self) -> GrayImage {
        GrayImage {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .map(|v| v.round().clamp(0.0, 255.0) as u8)
                .collect(),
        }
    }
}

/// Anchor spacing of a reconstruction at a given output size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnchorLayout {
    pub columns: usize,
    pub rows: usize,
    /// Interval width in output pixels.
    pub step_x: usize,
    /// Interval height in output pixels.
    pub step_y: usize,
}

impl AnchorLayout {
    pub fn new(
        columns: usize,
        rows: usize,
        out_width: usize,
        out_height: usize,
    ) -> Result<Self, SurfaceError> {
        if columns < 2 || rows < 2 {
            return Err(SurfaceError::DegenerateGrid { columns, rows });
        }
        if out_width == 0 || out_height == 0 {
            return Err(SurfaceError::EmptyOutput {
                width: out_width,
                height: out_height,
            });
        }
        Ok(Self {
            columns,
            rows,
            step_x: out_width / (columns - 1) + 1,
            step_y: out_height / (rows - 1) + 1,
        })
    }

    /// Output pixel of anchor `(i, j)`.
    #[inline]
    pub fn anchor_position(&self, i: usize, j: usize) -> (usize, usize) {
        (self.step_x * i, self.step_y * j)
    }

    /// Lower-left anchor `(i, j)` of pixel `(x, y)` and the fractional offsets `(fx, fy)`.
    #[inline]
    pub fn locate(&self, x: usize, y: usize) -> (usize, usize, f32, f32) {
        let i = (x / self.step_x).min(self.columns - 2);
        let j = (y / self.step_y).min(self.rows - 2);
        let fx = (x - self.step_x * i) as f32 / self.step_x as f32;
        let fy = (y - self.step_y * j) as f32 / self.step_y as f32;
        (i, j, fx, fy)
    }
}

fn anchor_value(
    grid: &SampleGrid,
    sx: usize,
    sy: usize,
    unset: UnsetAnchors,
) -> Result<f32, SurfaceError> {
    match (grid.get(sx, sy), unset) {
        (Some(v), _) => Ok(v),
        (None, UnsetAnchors::ZeroFill) => Ok(0.0),
        (None, UnsetAnchors::Reject) => Err(SurfaceError::UnsetAnchor { sx, sy }),
    }
}

/// Bilinear value at output pixel `(x, y)`.
pub fn interpolate_at(
    grid: &SampleGrid,
    layout: &AnchorLayout,
    x: usize,
    y: usize,
    unset: UnsetAnchors,
) -> Result<f32, SurfaceError> {
    let (i, j, fx, fy) = layout.locate(x, y);
    let p00 = anchor_value(grid, i, j, unset)?;
    let p10 = anchor_value(grid, i + 1, j, unset)?;
    let p01 = anchor_value(grid, i, j + 1, unset)?;
    let p11 = anchor_value(grid, i + 1, j + 1, unset)?;

    let top = p00 * (1.0 - fx) + p10 * fx;
    let bot = p01 * (1.0 - fx) + p11 * fx;
    Ok(top * (1.0 - fy) + bot * fy)
}

/// Reconstruct a `out_width × out_height` surface from `grid`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(grid), fields(columns = grid.size().columns, rows = grid.size().rows))
)]
pub fn reconstruct(
    grid: &SampleGrid,
    out_width: usize,
    out_height: usize,
    unset: UnsetAnchors,
) -> Result<Surface, SurfaceError> {
    let size = grid.size();
    let layout = AnchorLayout::new(size.columns, size.rows, out_width, out_height)?;

    let mut data = Vec::with_capacity(out_width * out_height);
    for y in 0..out_height {
        for x in 0..out_width {
            data.push(interpolate_at(grid, &layout, x, y, unset)?);
        }
    }
    log::debug!("reconstructed {out_width}x{out_height} surface");

    Ok(Surface {
        width: out_width,
        height: out_height,
        data,
    })
}
