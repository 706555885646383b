use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SimError;

pub const START_PROGRESS: u8 = 10;
pub const PROGRESS_STEP: u8 = 20;
pub const COMPLETION_BONUS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionProfile {
    pub level: u32,
    pub points: u32,
    pub streak: u32,
    pub weekly_goal: u8,
    pub challenges_completed: u32,
}

impl Default for SessionProfile {
    fn default() -> Self {
        Self {
            level: 7,
            points: 2450,
            streak: 12,
            weekly_goal: 85,
            challenges_completed: 23,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum ChallengeState {
    #[strum(serialize = "new")]
    New,
    #[strum(serialize = "in-progress")]
    InProgress,
    #[strum(serialize = "completed")]
    Completed,
}

/// When `challenges_completed` is bumped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompletionCounting {
    /// once, when a challenge completes
    #[default]
    OnCompletion,
    /// on start and again on completion, as the old challenges page did
    OnStartAndCompletion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Challenge {
    pub title: &'static str,
    pub goal_kg: u32,
    pub state: ChallengeState,
    pub progress: u8,
}

impl Challenge {
    pub fn new(title: &'static str, goal_kg: u32) -> Self {
        Self {
            title,
            goal_kg,
            state: ChallengeState::New,
            progress: 0,
        }
    }

    pub fn collected_kg(&self) -> u32 {
        (self.progress as f64 * self.goal_kg as f64 / 100.0).round() as u32
    }

    pub fn progress_label(&self) -> String {
        format!("{}/{}kg collected", self.collected_kg(), self.goal_kg)
    }
}

/// Outcome of a successful challenge transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeEvent {
    Started { id: usize },
    Advanced { id: usize, progress: u8 },
    Completed { id: usize, bonus: u32 },
}

pub fn standard_challenges() -> Vec<Challenge> {
    vec![
        Challenge::new("Plastic-Free Week", 15),
        Challenge::new("Compost Champion", 10),
        Challenge::new("E-Waste Roundup", 5),
        Challenge::new("Battery Drop-Off", 2),
    ]
}

/// Session-local profile and challenge board.
///
/// The only stateful part of the simulator; every mutation goes through
/// [`Scoreboard::start_challenge`] or [`Scoreboard::advance_challenge`].
#[derive(Debug, Clone)]
pub struct Scoreboard {
    profile: SessionProfile,
    challenges: Vec<Challenge>,
    counting: CompletionCounting,
}

impl Scoreboard {
    pub fn new(profile: SessionProfile, challenges: Vec<Challenge>, counting: CompletionCounting) -> Self {
        Self {
            profile,
            challenges,
            counting,
        }
    }

    pub fn standard(counting: CompletionCounting) -> Self {
        Self::new(SessionProfile::default(), standard_challenges(), counting)
    }

    pub fn profile(&self) -> &SessionProfile {
        &self.profile
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn challenge(&self, id: usize) -> Result<&Challenge, SimError> {
        self.challenges.get(id).ok_or(SimError::UnknownChallenge(id))
    }

    pub fn counting(&self) -> CompletionCounting {
        self.counting
    }

    pub fn start_challenge(&mut self, id: usize) -> Result<ChallengeEvent, SimError> {
        let challenge = self
            .challenges
            .get_mut(id)
            .ok_or(SimError::UnknownChallenge(id))?;

        if challenge.state != ChallengeState::New {
            warn!(id, state = %challenge.state, "challenge started twice");
            return Err(SimError::DoubleStart {
                id,
                state: challenge.state,
            });
        }

        challenge.state = ChallengeState::InProgress;
        challenge.progress = START_PROGRESS;
        if self.counting == CompletionCounting::OnStartAndCompletion {
            self.profile.challenges_completed += 1;
        }

        info!(id, title = challenge.title, "challenge started");
        Ok(ChallengeEvent::Started { id })
    }

    pub fn advance_challenge(&mut self, id: usize) -> Result<ChallengeEvent, SimError> {
        let challenge = self
            .challenges
            .get_mut(id)
            .ok_or(SimError::UnknownChallenge(id))?;

        if challenge.state != ChallengeState::InProgress {
            warn!(id, state = %challenge.state, "advance on a challenge not in progress");
            return Err(SimError::NotInProgress {
                id,
                state: challenge.state,
            });
        }

        challenge.progress = challenge.progress.saturating_add(PROGRESS_STEP).min(100);
        if challenge.progress < 100 {
            return Ok(ChallengeEvent::Advanced {
                id,
                progress: challenge.progress,
            });
        }

        challenge.state = ChallengeState::Completed;
        self.profile.points += COMPLETION_BONUS;
        self.profile.challenges_completed += 1;

        info!(id, title = challenge.title, points = self.profile.points, "challenge completed");
        Ok(ChallengeEvent::Completed {
            id,
            bonus: COMPLETION_BONUS,
        })
    }

    /// Starts a new challenge or advances one in progress
    pub fn activate(&mut self, id: usize) -> Result<ChallengeEvent, SimError> {
        match self.challenge(id)?.state {
            ChallengeState::New => self.start_challenge(id),
            _ => self.advance_challenge(id),
        }
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::standard(CompletionCounting::default())
    }
}
