//! Sparse per-sector brightness samples.

use serde::{Deserialize, Serialize};

use crate::geometry::{GridSize, SectorCoords};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("sector ({sx}, {sy}) is outside the {columns}x{rows} sample grid")]
    CellOutOfRange {
        sx: usize,
        sy: usize,
        columns: usize,
        rows: usize,
    },
    #[error("sample value {0} is not a finite brightness")]
    InvalidValue(f32),
    #[error("insufficient data: the sample grid holds no samples")]
    InsufficientData,
    #[error("a {columns}x{rows} sample grid needs {expected} cells (got {got})")]
    CellCountMismatch {
        columns: usize,
        rows: usize,
        expected: usize,
        got: usize,
    },
}

/// One brightness sample assigned to a sector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub sector: SectorCoords,
    pub value: f32,
}

/// `columns × rows` matrix of optional brightness samples.
///
/// Cells are stored row-major (`sy * columns + sx`). A cell only changes
/// through [`SampleGrid::set`] or a full [`SampleGrid::reset`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSampleGrid")]
pub struct SampleGrid {
    size: GridSize,
    cells: Vec<Option<f32>>,
}

#[derive(Deserialize)]
struct RawSampleGrid {
    size: GridSize,
    cells: Vec<Option<f32>>,
}

impl TryFrom<RawSampleGrid> for SampleGrid {
    type Error = GridError;

    fn try_from(raw: RawSampleGrid) -> Result<Self, Self::Error> {
        let expected = raw.size.cell_count();
        if raw.cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                columns: raw.size.columns,
                rows: raw.size.rows,
                expected,
                got: raw.cells.len(),
            });
        }
        if let Some(bad) = raw.cells.iter().flatten().find(|v| !v.is_finite()) {
            return Err(GridError::InvalidValue(*bad));
        }
        Ok(Self {
            size: raw.size,
            cells: raw.cells,
        })
    }
}

impl SampleGrid {
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![None; size.cell_count()],
        }
    }

    /// Drop every sample and resize to `size`.
    pub fn reset(&mut self, size: GridSize) {
        self.size = size;
        self.cells.clear();
        self.cells.resize(size.cell_count(), None);
    }

    #[inline]
    pub fn size(&self) -> GridSize {
        self.size
    }

    fn index(&self, sx: usize, sy: usize) -> Result<usize, GridError> {
        if sx >= self.size.columns || sy >= self.size.rows {
            return Err(GridError::CellOutOfRange {
                sx,
                sy,
                columns: self.size.columns,
                rows: self.size.rows,
            });
        }
        Ok(sy * self.size.columns + sx)
    }

    /// Overwrite one cell, returning the value it held before.
    pub fn set(&mut self, sx: usize, sy: usize, value: f32) -> Result<Option<f32>, GridError> {
        if !value.is_finite() {
            return Err(GridError::InvalidValue(value));
        }
        let idx = self.index(sx, sy)?;
        Ok(self.cells[idx].replace(value))
    }

    pub fn apply(&mut self, sample: Sample) -> Result<Option<f32>, GridError> {
        self.set(sample.sector.sx, sample.sector.sy, sample.value)
    }

    /// Stored value, `None` when unset or out of range.
    #[inline]
    pub fn get(&self, sx: usize, sy: usize) -> Option<f32> {
        self.index(sx, sy).ok().and_then(|idx| self.cells[idx])
    }

    pub fn set_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Unset cells, scanned column by column.
    pub fn missing_cells(&self) -> Vec<SectorCoords> {
        let mut out = Vec::new();
        for sx in 0..self.size.columns {
            for sy in 0..self.size.rows {
                if self.get(sx, sy).is_none() {
                    out.push(SectorCoords { sx, sy });
                }
            }
        }
        out
    }

    /// Minimum over set cells only.
    pub fn darkest_value(&self) -> Result<f32, GridError> {
        self.cells
            .iter()
            .flatten()
            .copied()
            .reduce(f32::min)
            .ok_or(GridError::InsufficientData)
    }
}
