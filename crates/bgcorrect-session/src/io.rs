//! JSON replay configuration and session report.

use bgcorrect_core::SectorCoords;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{ClickOutcome, CollectionSession, SessionError, SessionParams, SessionState};

#[derive(thiserror::Error, Debug)]
pub enum SessionIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A recorded annotation run: one image, fixed parameters, a list of clicks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    pub image_path: String,
    /// Image identity token; defaults to `image_path`.
    #[serde(default)]
    pub identity: Option<String>,
    #[serde(default)]
    pub params: SessionParams,
    /// Clicks in image pixel coordinates, `[x, y]`.
    pub clicks: Vec<[usize; 2]>,
    #[serde(default)]
    pub preview_path: Option<String>,
    #[serde(default)]
    pub background_path: Option<String>,
    #[serde(default)]
    pub corrected_path: Option<String>,
    #[serde(default)]
    pub report_path: Option<String>,
}

impl ReplayConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SessionIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SessionIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn identity(&self) -> &str {
        self.identity.as_deref().unwrap_or(&self.image_path)
    }

    /// Resolve the output report path.
    pub fn report_path(&self) -> PathBuf {
        self.report_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("bgcorrect_report.json"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportedSample {
    pub x: usize,
    pub y: usize,
    pub sector: SectorCoords,
    pub value: f32,
    #[serde(default)]
    pub replaced: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedClick {
    pub x: usize,
    pub y: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub image_path: String,
    pub config_path: String,
    pub params: SessionParams,
    pub samples: Vec<ReportedSample>,
    pub rejected: Vec<RejectedClick>,
    pub missing: Vec<SectorCoords>,
    pub state: SessionState,
    #[serde(default)]
    pub darkest: Option<f32>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SessionReport {
    /// Build an empty report for `cfg`.
    pub fn new(cfg: &ReplayConfig, config_path: &Path) -> Self {
        Self {
            image_path: cfg.image_path.clone(),
            config_path: config_path.to_string_lossy().into_owned(),
            params: cfg.params,
            samples: Vec::new(),
            rejected: Vec::new(),
            missing: Vec::new(),
            state: SessionState::AwaitingFirstSample,
            darkest: None,
            error: None,
        }
    }

    pub fn record_click(&mut self, x: usize, y: usize, outcome: &ClickOutcome) {
        self.samples.push(ReportedSample {
            x,
            y,
            sector: outcome.sample.sector,
            value: outcome.sample.value,
            replaced: outcome.previous,
        });
        if let Some(c) = outcome.correction() {
            self.darkest = Some(c.darkest);
        }
    }

    pub fn record_rejection(&mut self, x: usize, y: usize, err: &SessionError) {
        self.rejected.push(RejectedClick {
            x,
            y,
            reason: err.to_string(),
        });
    }

    /// Capture the final session state.
    pub fn finish(&mut self, session: &CollectionSession) {
        self.missing = session.grid().missing_cells();
        self.state = session.state();
        if self.darkest.is_none() {
            self.darkest = session.grid().darkest_value().ok();
        }
    }

    /// Record a fatal error.
    pub fn set_error(&mut self, err: impl std::fmt::Display) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SessionIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SessionIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
