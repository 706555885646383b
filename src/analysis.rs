use std::time::Duration;
use tracing::debug;

/// One named step of an analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub label: &'static str,
    pub duration: Duration,
}

const fn stage(label: &'static str, millis: u64) -> Stage {
    Stage {
        label,
        duration: Duration::from_millis(millis),
    }
}

/// Manual capture: snapshot, then three analysis passes.
pub const CAPTURE_STAGES: [Stage; 4] = [
    stage("📸 Capturing high-resolution image...", 1000),
    stage("🔍 AI Processing - Analyzing material properties...", 1500),
    stage("🧬 Material Composition Analysis...", 1000),
    stage("📊 Generating detailed report...", 1000),
];

/// Triggered by the live feed spotting something.
pub const LIVE_STAGES: [Stage; 2] = [
    stage("🎯 Object spotted - locking on...", 1000),
    stage("🧠 AI Analyzing - Processing material composition...", 1500),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Capture,
    Live,
}

impl AnalysisKind {
    pub fn stages(&self) -> &'static [Stage] {
        match self {
            AnalysisKind::Capture => &CAPTURE_STAGES,
            AnalysisKind::Live => &LIVE_STAGES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisEvent {
    StageChanged(&'static str),
    Finished,
}

/// A single cancelable chain of timed stages.
///
/// Time only moves through [`AnalysisRun::advance`], so the host decides
/// what a tick is worth.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    kind: AnalysisKind,
    stage_idx: usize,
    elapsed_in_stage: Duration,
    cancelled: bool,
}

impl AnalysisRun {
    pub fn new(kind: AnalysisKind) -> Self {
        debug!(?kind, "analysis run created");
        Self {
            kind,
            stage_idx: 0,
            elapsed_in_stage: Duration::ZERO,
            cancelled: false,
        }
    }

    pub fn kind(&self) -> AnalysisKind {
        self.kind
    }

    /// Label of the stage in progress, `None` once finished or cancelled
    pub fn current_stage(&self) -> Option<&'static str> {
        if self.cancelled {
            return None;
        }
        self.kind.stages().get(self.stage_idx).map(|s| s.label)
    }

    pub fn is_finished(&self) -> bool {
        self.stage_idx >= self.kind.stages().len()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_pending(&self) -> bool {
        !self.cancelled && !self.is_finished()
    }

    pub fn cancel(&mut self) {
        if self.is_pending() {
            debug!(kind = ?self.kind, stage = self.stage_idx, "analysis run cancelled");
        }
        self.cancelled = true;
    }

    /// Fraction of the run's total time already spent, 0.0..=1.0
    pub fn progress(&self) -> f64 {
        let stages = self.kind.stages();
        let total: Duration = stages.iter().map(|s| s.duration).sum();
        if self.is_finished() || total.is_zero() {
            return 1.0;
        }
        let done: Duration = stages[..self.stage_idx].iter().map(|s| s.duration).sum();
        ((done + self.elapsed_in_stage).as_secs_f64() / total.as_secs_f64()).min(1.0)
    }

    /// Moves the run forward by `dt`, reporting every stage boundary crossed.
    /// A cancelled or finished run reports nothing.
    pub fn advance(&mut self, dt: Duration) -> Vec<AnalysisEvent> {
        let mut events = vec![];
        if !self.is_pending() {
            return events;
        }

        let stages = self.kind.stages();
        self.elapsed_in_stage += dt;
        while self.stage_idx < stages.len() && self.elapsed_in_stage >= stages[self.stage_idx].duration {
            self.elapsed_in_stage -= stages[self.stage_idx].duration;
            self.stage_idx += 1;
            match stages.get(self.stage_idx) {
                Some(next) => {
                    debug!(stage = next.label, "analysis stage");
                    events.push(AnalysisEvent::StageChanged(next.label));
                }
                None => events.push(AnalysisEvent::Finished),
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    #[test]
    fn capture_run_walks_every_stage() {
        let mut run = AnalysisRun::new(AnalysisKind::Capture);
        assert_eq!(run.current_stage(), Some(CAPTURE_STAGES[0].label));

        let mut events = vec![];
        for _ in 0..45 {
            events.extend(run.advance(TICK));
        }

        assert_eq!(
            events,
            vec![
                AnalysisEvent::StageChanged(CAPTURE_STAGES[1].label),
                AnalysisEvent::StageChanged(CAPTURE_STAGES[2].label),
                AnalysisEvent::StageChanged(CAPTURE_STAGES[3].label),
                AnalysisEvent::Finished,
            ]
        );
        assert!(run.is_finished());
        assert_eq!(run.current_stage(), None);
        assert!(run.advance(TICK).is_empty());
    }

    #[test]
    fn not_finished_one_tick_early() {
        let mut run = AnalysisRun::new(AnalysisKind::Capture);
        for _ in 0..44 {
            run.advance(TICK);
        }
        assert!(run.is_pending());
        assert_eq!(run.current_stage(), Some(CAPTURE_STAGES[3].label));
        assert_eq!(run.advance(TICK), vec![AnalysisEvent::Finished]);
    }

    #[test]
    fn large_step_crosses_several_stages() {
        let mut run = AnalysisRun::new(AnalysisKind::Live);
        assert_eq!(
            run.advance(Duration::from_secs(10)),
            vec![
                AnalysisEvent::StageChanged(LIVE_STAGES[1].label),
                AnalysisEvent::Finished
            ]
        );
    }

    #[test]
    fn cancelled_run_is_silent() {
        let mut run = AnalysisRun::new(AnalysisKind::Capture);
        run.advance(Duration::from_millis(1200));
        run.cancel();
        assert!(run.is_cancelled());
        assert!(!run.is_pending());
        assert_eq!(run.current_stage(), None);
        assert!(run.advance(Duration::from_secs(60)).is_empty());
        assert!(!run.is_finished());
    }

    #[test]
    fn progress_tracks_elapsed_time() {
        let mut run = AnalysisRun::new(AnalysisKind::Live);
        assert_eq!(run.progress(), 0.0);
        run.advance(Duration::from_millis(1250));
        assert!((run.progress() - 0.5).abs() < 1e-9);
        run.advance(Duration::from_secs(5));
        assert_eq!(run.progress(), 1.0);
    }
}
