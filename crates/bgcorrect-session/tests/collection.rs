use std::sync::{Mutex, Once};

use approx::assert_abs_diff_eq;
use bgcorrect_core::{GrayImage, SectorCoords};
use bgcorrect_session::{CollectionSession, SessionParams, SessionState, SessionUpdate};
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Keeps every record emitted by the tests in this binary.
struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

fn capture_logs() -> &'static CaptureLogger {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        log::set_logger(&CAPTURE).expect("no other logger in this test binary");
        log::set_max_level(LevelFilter::Trace);
    });
    &CAPTURE
}

/// 100x80 image with a horizontal illumination ramp: `60 + x / 2`.
fn ramp_image() -> GrayImage {
    let (w, h) = (100usize, 80usize);
    let data = (0..h)
        .flat_map(|_| (0..w).map(|x| (60 + x / 2) as u8))
        .collect();
    GrayImage::from_raw(w, h, data).unwrap()
}

const CORNER_CLICKS: [[usize; 2]; 4] = [[2, 2], [98, 2], [2, 78], [98, 78]];

#[test]
fn collecting_every_sector_flattens_the_ramp() {
    let img = ramp_image();
    let mut session = CollectionSession::new(SessionParams::new(2, 2, 2)).unwrap();

    let mut last = None;
    for (n, [x, y]) in CORNER_CLICKS.into_iter().enumerate() {
        let out = session.on_click("ramp", &img.view(), x, y).unwrap();
        assert_eq!(out.setup.is_some(), n == 0);
        if n < 3 {
            assert!(matches!(out.update, SessionUpdate::Preview(_)));
            assert_eq!(session.state(), SessionState::Collecting);
        }
        last = Some(out);
    }

    assert_eq!(session.state(), SessionState::Ready);
    let correction = last
        .as_ref()
        .and_then(|o| o.correction())
        .expect("complete grid yields a correction");

    // window x = 0..=3 -> 60, 60, 61, 61
    assert_abs_diff_eq!(correction.darkest, 60.5, epsilon = 1e-4);
    assert_abs_diff_eq!(correction.background.get(0, 0), 0.0, epsilon = 1e-4);
    assert!(correction.background.min_value() >= -1e-4);

    let flat = &correction.corrected;
    assert_eq!((flat.width, flat.height), (100, 80));
    let lo = *flat.data.iter().min().unwrap();
    let hi = *flat.data.iter().max().unwrap();
    assert!(lo >= 59 && hi <= 63, "corrected range {lo}..{hi}");
}

#[test]
fn refining_a_sector_after_completion_recomputes() {
    let img = ramp_image();
    let mut session = CollectionSession::new(SessionParams::new(2, 2, 2)).unwrap();
    for [x, y] in CORNER_CLICKS {
        session.on_click("ramp", &img.view(), x, y).unwrap();
    }
    let before = session.recompute(&img.view()).unwrap();

    let out = session.on_click("ramp", &img.view(), 30, 10).unwrap();
    assert_eq!(out.sample.sector, SectorCoords { sx: 0, sy: 0 });
    assert_abs_diff_eq!(out.previous.unwrap(), 60.5, epsilon = 1e-4);
    assert_eq!(session.state(), SessionState::Ready);

    let after = out.correction().expect("still complete");
    // window x = 28..=31 -> 74, 74, 75, 75
    assert_abs_diff_eq!(session.grid().get(0, 0).unwrap(), 74.5, epsilon = 1e-4);
    assert_abs_diff_eq!(after.darkest, before.darkest, epsilon = 1e-4);
    assert!(after.background.get(0, 0) > before.background.get(0, 0));
    assert_eq!(session.recompute(&img.view()).unwrap(), *after);
}

#[test]
fn switching_images_starts_over() {
    let img = ramp_image();
    let mut session = CollectionSession::new(SessionParams::default()).unwrap();
    session.on_click("first", &img.view(), 10, 10).unwrap();
    session.on_click("first", &img.view(), 50, 10).unwrap();
    assert_eq!(session.grid().set_count(), 2);

    let out = session.on_click("second", &img.view(), 90, 70).unwrap();
    let setup = out.setup.expect("identity change emits setup");
    assert!(setup.restarted);
    assert_eq!(setup.identity, "second");
    assert_eq!(session.grid().set_count(), 1);
    assert_eq!(out.sample.sector, SectorCoords { sx: 2, sy: 2 });
    assert_eq!(session.state(), SessionState::Collecting);
}

#[test]
fn preview_shows_partial_progress() {
    let img = GrayImage::filled(200, 100, 120).unwrap();
    let mut session = CollectionSession::new(SessionParams::new(2, 2, 2)).unwrap();
    let out = session.on_click("flat", &img.view(), 5, 5).unwrap();
    let preview = out.preview().expect("incomplete grid yields a preview");
    assert_eq!((preview.width(), preview.height()), (20, 10));
    assert_abs_diff_eq!(preview.get(0, 0), 120.0, epsilon = 1e-4);
    assert!(preview.get(19, 9) < 20.0);
}

#[test]
fn rejected_click_is_reported_as_a_warning() {
    let logs = capture_logs();
    let img = ramp_image();
    let mut session = CollectionSession::new(SessionParams::new(2, 2, 2)).unwrap();
    session.on_click("ramp", &img.view(), 2, 2).unwrap();

    assert!(session.on_click("ramp", &img.view(), 100, 7).is_err());
    assert_eq!(session.grid().set_count(), 1);

    let records = logs.records.lock().unwrap();
    let warning = records
        .iter()
        .find(|(_, msg)| msg.contains("pixel (100, 7)"))
        .expect("rejected click was logged");
    assert_eq!(warning.0, Level::Warn);
    assert!(warning.1.starts_with("ignoring click"), "{}", warning.1);

    // status text carries no console indentation or list markers
    for (_, msg) in records.iter() {
        assert!(!msg.starts_with(' ') && !msg.starts_with('-'), "{msg:?}");
    }
}
