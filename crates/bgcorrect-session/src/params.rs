use bgcorrect_core::{GridSize, DEFAULT_BORDER};
use serde::{Deserialize, Serialize};

/// Rejected session configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("sector grid must be at least 2x2 (got {columns}x{rows})")]
    GridTooSmall { columns: usize, rows: usize },
    #[error("sampling border must be at least 1 pixel")]
    InvalidBorder,
    #[error("sampling border {border} exceeds the {max} pixel limit")]
    BorderTooLarge { border: u32, max: u32 },
    #[error("preview downscale factor must be at least 1")]
    InvalidPreviewScale,
}

/// Largest accepted sampling border (an 8192×8192 window).
pub const MAX_BORDER: u32 = 4096;

fn default_border() -> u32 {
    DEFAULT_BORDER
}

fn default_preview_scale() -> u32 {
    10
}

/// Parameters fixed for the lifetime of one collection session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParams {
    /// Sector count along x and y.
    #[serde(default)]
    pub grid: GridSize,
    /// Half-width of the square sampling window around a click.
    #[serde(default = "default_border")]
    pub border: u32,
    /// Live previews are rendered at `image / preview_scale` per axis.
    #[serde(default = "default_preview_scale")]
    pub preview_scale: u32,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            border: default_border(),
            preview_scale: default_preview_scale(),
        }
    }
}

impl SessionParams {
    pub fn new(columns: usize, rows: usize, border: u32) -> Self {
        Self {
            grid: GridSize::new(columns, rows),
            border,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.columns < 2 || self.grid.rows < 2 {
            return Err(ConfigError::GridTooSmall {
                columns: self.grid.columns,
                rows: self.grid.rows,
            });
        }
        if self.border < 1 {
            return Err(ConfigError::InvalidBorder);
        }
        if self.border > MAX_BORDER {
            return Err(ConfigError::BorderTooLarge {
                border: self.border,
                max: MAX_BORDER,
            });
        }
        if self.preview_scale < 1 {
            return Err(ConfigError::InvalidPreviewScale);
        }
        Ok(())
    }

    /// Preview resolution for an image of `width × height`, never below 1x1.
    pub fn preview_size(&self, width: usize, height: usize) -> (usize, usize) {
        let scale = self.preview_scale.max(1) as usize;
        ((width / scale).max(1), (height / scale).max(1))
    }
}
