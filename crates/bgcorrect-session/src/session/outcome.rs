use bgcorrect_core::{GrayImage, GridSize, Sample, Surface};
use serde::{Deserialize, Serialize};

/// Emitted on the first click for a new image identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSetup {
    pub identity: String,
    pub image_width: usize,
    pub image_height: usize,
    pub grid: GridSize,
    pub border: u32,
    /// Nominal sector size in pixels.
    pub sector_width: usize,
    pub sector_height: usize,
    pub preview_width: usize,
    pub preview_height: usize,
    /// `true` when a previous image was being annotated and got replaced.
    pub restarted: bool,
}

/// Final artifacts derived from a complete sample grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Correction {
    /// Darkest sample, the zero level of `background`.
    pub darkest: f32,
    /// Excess brightness above the darkest phase at full resolution.
    pub background: Surface,
    pub corrected: GrayImage,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionUpdate {
    /// Grid still incomplete; unset anchors rendered as 0.
    Preview(Surface),
    Complete(Correction),
}

/// Result of one accepted click.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickOutcome {
    pub sample: Sample,
    /// Value the sector held before this click.
    pub previous: Option<f32>,
    pub setup: Option<SessionSetup>,
    pub update: SessionUpdate,
}

impl ClickOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self.update, SessionUpdate::Complete(_))
    }

    pub fn preview(&self) -> Option<&Surface> {
        match &self.update {
            SessionUpdate::Preview(surface) => Some(surface),
            SessionUpdate::Complete(_) => None,
        }
    }

    pub fn correction(&self) -> Option<&Correction> {
        match &self.update {
            SessionUpdate::Preview(_) => None,
            SessionUpdate::Complete(correction) => Some(correction),
        }
    }
}
