//! Headless host: feed a recorded click list through a [`CollectionSession`].

use std::path::Path;

use crate::core::{GrayImageView, Surface};
use crate::session::{
    CollectionSession, ConfigError, Correction, ReplayConfig, SessionReport, SessionUpdate,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Everything a replay produced.
#[derive(Debug)]
pub struct ReplayOutput {
    pub session: CollectionSession,
    pub report: SessionReport,
    /// Preview emitted by the last click that left the grid incomplete.
    pub last_preview: Option<Surface>,
    /// Correction emitted by the last click that found the grid complete.
    pub correction: Option<Correction>,
}

/// Apply every click of `cfg` to `image`, in order.
///
/// Rejected clicks are logged and recorded in the report; they never abort
/// the replay.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(cfg, image), fields(clicks = cfg.clicks.len()))
)]
pub fn replay_clicks(
    cfg: &ReplayConfig,
    config_path: &Path,
    image: &GrayImageView<'_>,
) -> Result<ReplayOutput, ConfigError> {
    let mut session = CollectionSession::new(cfg.params)?;
    let mut report = SessionReport::new(cfg, config_path);
    let mut last_preview = None;
    let mut correction = None;

    for &[x, y] in &cfg.clicks {
        match session.on_click(cfg.identity(), image, x, y) {
            Ok(outcome) => {
                report.record_click(x, y, &outcome);
                match outcome.update {
                    SessionUpdate::Preview(surface) => last_preview = Some(surface),
                    SessionUpdate::Complete(c) => correction = Some(c),
                }
            }
            Err(err) => report.record_rejection(x, y, &err),
        }
    }
    report.finish(&session);

    Ok(ReplayOutput {
        session,
        report,
        last_preview,
        correction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GrayImage, GridSize};
    use crate::session::{SessionParams, SessionState};

    fn config(clicks: Vec<[usize; 2]>) -> ReplayConfig {
        ReplayConfig {
            image_path: "mem://flat".into(),
            identity: None,
            params: SessionParams {
                grid: GridSize::new(2, 2),
                border: 1,
                preview_scale: 4,
            },
            clicks,
            preview_path: None,
            background_path: None,
            corrected_path: None,
            report_path: None,
        }
    }

    #[test]
    fn incomplete_replay_keeps_preview_and_lists_missing_sectors() {
        let img = GrayImage::filled(40, 40, 90).unwrap();
        let out = replay_clicks(&config(vec![[3, 3], [35, 3]]), Path::new("c.json"), &img.view())
            .unwrap();
        assert_eq!(out.session.state(), SessionState::Collecting);
        assert!(out.correction.is_none());
        assert_eq!(out.last_preview.map(|p| p.width()), Some(10));
        assert_eq!(out.report.samples.len(), 2);
        assert_eq!(out.report.missing.len(), 2);
    }

    #[test]
    fn rejected_clicks_are_reported_not_fatal() {
        let img = GrayImage::filled(40, 40, 90).unwrap();
        let clicks = vec![[3, 3], [40, 3], [35, 3], [3, 35], [35, 35]];
        let out = replay_clicks(&config(clicks), Path::new("c.json"), &img.view()).unwrap();
        assert_eq!(out.report.rejected.len(), 1);
        assert_eq!(out.report.rejected[0].x, 40);
        assert_eq!(out.report.state, SessionState::Ready);
        let c = out.correction.expect("grid completed");
        assert!(c.corrected.data.iter().all(|&v| v == 90));
        assert_eq!(out.report.darkest, Some(90.0));
    }

    #[test]
    fn invalid_params_abort_before_any_click() {
        let img = GrayImage::filled(8, 8, 0).unwrap();
        let mut cfg = config(vec![[1, 1]]);
        cfg.params.grid = GridSize::new(1, 2);
        assert!(replay_clicks(&cfg, Path::new("c.json"), &img.view()).is_err());
    }
}
