use thiserror::Error;

use crate::scoreboard::ChallengeState;

/// Errors raised by the simulator core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("unknown waste category: {0:?}")]
    InvalidCategory(String),
    #[error("the waste catalog is empty")]
    EmptyCatalog,
    #[error("challenge {id} is already {state}")]
    DoubleStart { id: usize, state: ChallengeState },
    #[error("challenge {id} is {state}, not in progress")]
    NotInProgress { id: usize, state: ChallengeState },
    #[error("no challenge with index {0}")]
    UnknownChallenge(usize),
    #[error("an analysis is already running")]
    AnalysisInFlight,
    #[error("the camera is off")]
    CameraOff,
    #[error("no quiz item with index {0}")]
    UnknownItem(usize),
    #[error("quiz item {0} is already sorted")]
    AlreadySorted(usize),
}
