use std::time::Duration;
use tracing::{debug, info, warn};

use crate::analysis::{AnalysisEvent, AnalysisKind, AnalysisRun};
use crate::classifier::{Classifier, DrawSource};
use crate::error::SimError;
use crate::report::{AnalysisReport, DetectionHistory};

/// Chance, in percent, that an idle live frame triggers an analysis
pub const LIVE_TRIGGER_PERCENT: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    Off,
    Live,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannerEvent {
    StageChanged(&'static str),
    Detected(AnalysisReport),
}

/// Simulated camera detector: at most one analysis in flight.
#[derive(Debug, Clone)]
pub struct Scanner {
    classifier: Classifier,
    camera: CameraState,
    live_detection: bool,
    in_flight: Option<AnalysisRun>,
    history: DetectionHistory,
    last_report: Option<AnalysisReport>,
}

impl Scanner {
    pub fn new(classifier: Classifier, live_detection: bool) -> Self {
        Self {
            classifier,
            camera: CameraState::Off,
            live_detection,
            in_flight: None,
            history: DetectionHistory::default(),
            last_report: None,
        }
    }

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|run| run.is_pending())
    }

    pub fn current_run(&self) -> Option<&AnalysisRun> {
        self.in_flight.as_ref()
    }

    pub fn history(&self) -> &DetectionHistory {
        &self.history
    }

    pub fn last_report(&self) -> Option<&AnalysisReport> {
        self.last_report.as_ref()
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn status_line(&self) -> &'static str {
        if let Some(stage) = self.in_flight.as_ref().and_then(|run| run.current_stage()) {
            return stage;
        }
        match (self.camera, self.last_report.is_some()) {
            (CameraState::Off, _) => "📷 Press c to start camera",
            (CameraState::Live, true) => "✅ Analysis complete!",
            (CameraState::Live, false) => "🎥 Camera live - scanning for waste...",
        }
    }

    /// Returns false if the camera was already live
    pub fn start_camera(&mut self) -> bool {
        if self.camera == CameraState::Live {
            return false;
        }
        info!("camera started");
        self.camera = CameraState::Live;
        true
    }

    /// Turns the camera off, cancelling any pending analysis
    pub fn stop_camera(&mut self) {
        if let Some(mut run) = self.in_flight.take() {
            run.cancel();
        }
        if self.camera == CameraState::Live {
            info!("camera stopped");
        }
        self.camera = CameraState::Off;
    }

    /// Forgets past detections. A run in flight keeps going.
    pub fn clear_history(&mut self) {
        info!(scans = self.history.len(), "history cleared");
        self.history.clear();
        self.last_report = None;
    }

    /// Starts a manual capture and returns the first stage label
    pub fn capture(&mut self) -> Result<&'static str, SimError> {
        self.begin(AnalysisKind::Capture)
    }

    fn begin(&mut self, kind: AnalysisKind) -> Result<&'static str, SimError> {
        if self.camera == CameraState::Off {
            return Err(SimError::CameraOff);
        }
        if self.is_analyzing() {
            warn!(?kind, "analysis requested while another is running");
            return Err(SimError::AnalysisInFlight);
        }

        let run = AnalysisRun::new(kind);
        let first = run.current_stage().unwrap_or_default();
        self.in_flight = Some(run);
        Ok(first)
    }

    /// One frame of the scanner loop.
    ///
    /// Advances the run in flight; when it finishes the classifier runs and
    /// the report lands in history. An idle live camera may trigger a new run.
    pub fn tick<D: DrawSource + ?Sized>(&mut self, dt: Duration, draws: &mut D) -> Vec<ScannerEvent> {
        let mut events = vec![];

        if let Some(run) = self.in_flight.as_mut() {
            for event in run.advance(dt) {
                match event {
                    AnalysisEvent::StageChanged(label) => events.push(ScannerEvent::StageChanged(label)),
                    AnalysisEvent::Finished => {
                        let report = AnalysisReport::from_results(self.classifier.detect(draws));
                        info!(items = report.items_detected, avg = report.avg_confidence, "detection finished");
                        self.history.record(report.clone());
                        self.last_report = Some(report.clone());
                        events.push(ScannerEvent::Detected(report));
                    }
                }
            }
            if !self.is_analyzing() {
                self.in_flight = None;
            }
            return events;
        }

        if self.camera == CameraState::Live && self.live_detection && draws.chance(LIVE_TRIGGER_PERCENT) {
            debug!("live frame triggered analysis");
            if let Ok(first) = self.begin(AnalysisKind::Live) {
                events.push(ScannerEvent::StageChanged(first));
            }
        }
        events
    }
}
