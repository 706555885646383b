use std::time::Duration;
use tracing::warn;

use crate::catalog::{Catalog, CategoryTag};
use crate::classifier::{Classifier, DrawSource};
use crate::error::SimError;
use crate::notify::{Notification, Toasts};
use crate::report::AnalysisReport;
use crate::scanner::{Scanner, ScannerEvent};
use crate::scoreboard::{ChallengeEvent, CompletionCounting, Scoreboard};
use crate::sorting::{QuizDrop, SortingQuiz};

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    pub counting: CompletionCounting,
    pub live_detection: bool,
}

/// Everything one run of the app knows, owned by the host and mutated only
/// through the methods below. Each action leaves a toast behind.
#[derive(Debug, Clone)]
pub struct Session {
    pub scanner: Scanner,
    pub quiz: SortingQuiz,
    pub scoreboard: Scoreboard,
    pub toasts: Toasts,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, SimError> {
        Self::with_catalog(Catalog::standard(), config)
    }

    pub fn with_catalog(catalog: Catalog, config: SessionConfig) -> Result<Self, SimError> {
        let quiz = SortingQuiz::standard(&catalog);
        let classifier = Classifier::new(catalog)?;
        Ok(Self {
            scanner: Scanner::new(classifier, config.live_detection),
            quiz,
            scoreboard: Scoreboard::standard(config.counting),
            toasts: Toasts::default(),
        })
    }

    fn report_error(&mut self, err: &SimError) {
        warn!(%err, "session action refused");
        self.toasts.push(Notification::error(format!("⚠️ {err}")));
    }

    /// Advances timers by `dt`; returns the report if a detection finished
    pub fn tick<D: DrawSource + ?Sized>(&mut self, dt: Duration, draws: &mut D) -> Option<AnalysisReport> {
        self.toasts.tick(dt);

        let mut finished = None;
        for event in self.scanner.tick(dt, draws) {
            if let ScannerEvent::Detected(report) = event {
                self.toasts.push(Notification::success(report.headline()));
                finished = Some(report);
            }
        }
        finished
    }

    pub fn start_camera(&mut self) {
        if self.scanner.start_camera() {
            self.toasts
                .push(Notification::success("AI detection system activated!"));
        }
    }

    pub fn stop_camera(&mut self) {
        self.scanner.stop_camera();
        self.toasts.push(Notification::info("Camera stopped"));
    }

    pub fn capture(&mut self) -> Result<(), SimError> {
        match self.scanner.capture() {
            Ok(_) => Ok(()),
            Err(err) => {
                self.report_error(&err);
                Err(err)
            }
        }
    }

    pub fn drop_item(&mut self, index: usize, zone: CategoryTag) -> Result<QuizDrop, SimError> {
        let drop = match self.quiz.drop_item(index, zone) {
            Ok(drop) => drop,
            Err(err) => {
                self.report_error(&err);
                return Err(err);
            }
        };

        let message = if drop.outcome.correct {
            Notification::success(format!(
                "✅ Correct! {} belongs in {}",
                drop.item.name,
                zone.zone_title()
            ))
        } else {
            Notification::error(format!(
                "❌ Incorrect! {} doesn't belong in {}",
                drop.item.name,
                zone.zone_title()
            ))
        };
        self.toasts.push(message);

        if drop.completed {
            self.toasts.push(Notification::success(
                "🎉 Congratulations! You've successfully sorted all waste items!",
            ));
        }
        Ok(drop)
    }

    pub fn clear_history(&mut self) {
        if self.scanner.history().is_empty() {
            return;
        }
        self.scanner.clear_history();
        self.toasts.push(Notification::info("Scan history cleared"));
    }

    pub fn reset_quiz(&mut self) {
        self.quiz.reset();
        self.toasts.push(Notification::info("Sorting board reset"));
    }

    /// Starts or advances a challenge the way clicking its card does
    pub fn activate_challenge(&mut self, id: usize) -> Result<ChallengeEvent, SimError> {
        let event = match self.scoreboard.activate(id) {
            Ok(event) => event,
            Err(err) => {
                self.report_error(&err);
                return Err(err);
            }
        };

        match event {
            ChallengeEvent::Started { .. } => self
                .toasts
                .push(Notification::success("Challenge started! Good luck! 🍀")),
            ChallengeEvent::Advanced { id, .. } => {
                if let Ok(challenge) = self.scoreboard.challenge(id) {
                    let label = challenge.progress_label();
                    self.toasts.push(Notification::info(label));
                }
            }
            ChallengeEvent::Completed { bonus, .. } => self.toasts.push(Notification::success(
                format!("Challenge completed! 🎉 +{bonus} points earned!"),
            )),
        }
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ScriptedDraws;
    use crate::notify::NotificationKind;
    use assert_matches::assert_matches;

    #[test]
    fn empty_catalog_fails_at_startup() {
        let catalog = Catalog::new(vec![]);
        assert_matches!(catalog, Err(SimError::EmptyCatalog));
    }

    #[test]
    fn clearing_history_toasts_once() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        session.clear_history();
        assert!(session.toasts.is_empty());

        session.start_camera();
        session.capture().unwrap();
        session.tick(Duration::from_millis(4500), &mut ScriptedDraws::new([1, 42, 2]));
        assert_eq!(session.scanner.history().len(), 1);

        session.clear_history();
        assert!(session.scanner.history().is_empty());
        assert_eq!(
            session.toasts.latest().unwrap(),
            &Notification::info("Scan history cleared")
        );
    }

    #[test]
    fn correct_and_wrong_drops_toast() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        session.drop_item(0, CategoryTag::Dry).unwrap();
        assert_eq!(
            session.toasts.latest().unwrap().message,
            "❌ Incorrect! Banana Peel doesn't belong in Dry Waste"
        );
        session.drop_item(0, CategoryTag::Wet).unwrap();
        assert_eq!(
            session.toasts.latest().unwrap(),
            &Notification::success("✅ Correct! Banana Peel belongs in Wet Waste")
        );
    }

    #[test]
    fn refused_actions_leave_error_toast() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        assert_matches!(session.capture(), Err(SimError::CameraOff));
        assert_eq!(session.toasts.latest().unwrap().kind, NotificationKind::Error);
    }

    #[test]
    fn challenge_flow_toasts() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        session.activate_challenge(0).unwrap();
        assert_eq!(
            session.toasts.latest().unwrap().message,
            "Challenge started! Good luck! 🍀"
        );
        for _ in 0..5 {
            session.activate_challenge(0).unwrap();
        }
        assert_eq!(
            session.toasts.latest().unwrap().message,
            "Challenge completed! 🎉 +20 points earned!"
        );
        assert_matches!(session.activate_challenge(0), Err(SimError::NotInProgress { .. }));
        assert_eq!(session.scoreboard.profile().points, 2470);
    }

    #[test]
    fn tick_reports_finished_detection() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        session.start_camera();
        session.capture().unwrap();

        let mut draws = ScriptedDraws::new([1, 42, 2]);
        assert!(session.tick(Duration::from_millis(4400), &mut draws).is_none());
        let report = session.tick(Duration::from_millis(100), &mut draws).unwrap();
        assert_eq!(report.results[0].item.name, "Alkaline Battery (AA)");
        assert_eq!(report.avg_confidence, 99);
        assert_eq!(
            session.toasts.latest().unwrap().message,
            "Detected 1 waste item(s)!"
        );
    }
}
