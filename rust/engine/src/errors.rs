use thiserror::Error;

use crate::player::PlayerId;

/// Errors returned by hand and session transitions.
///
/// Everything except [`GameError::Invariant`] and
/// [`GameError::Serialization`] is a rejection of what the caller asked
/// for: the input state is untouched and the caller decides what to tell
/// the user. The engine never retries or corrects an action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("it is not {actual}'s turn (expected {})", describe_expected(.expected))]
    OutOfTurn {
        expected: Option<PlayerId>,
        actual: PlayerId,
    },
    #[error("illegal {action}: {reason}")]
    IllegalAction {
        action: &'static str,
        reason: String,
    },
    #[error("invalid raise of {amount}: must be between {minimum} and {maximum}")]
    InvalidRaiseAmount {
        amount: u32,
        minimum: u32,
        maximum: u32,
    },
    #[error("hand already resolved")]
    HandAlreadyResolved,
    #[error("need at least two players with chips, found {available}")]
    InsufficientPlayers { available: usize },
    #[error("invalid hand setup: {0}")]
    InvalidSetup(String),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error("hand state serialization failed: {0}")]
    Serialization(String),
}

fn describe_expected(expected: &Option<PlayerId>) -> String {
    expected.map_or_else(|| "nobody".to_string(), |p| p.to_string())
}

impl GameError {
    /// True for caller mistakes, false for fatal engine faults.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, GameError::Invariant(_) | GameError::Serialization(_))
    }
}

/// A broken accounting invariant. This is a bug in the engine, never a
/// caller mistake: the hand is aborted and the session flagged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("pot is {pot} but players invested {invested}")]
    PotMismatch { pot: u32, invested: u32 },
    #[error("paid out {paid} from a pot of {pot}")]
    PayoutMismatch { pot: u32, paid: u32 },
    #[error("chips not conserved: {before} before the hand, {after} after")]
    ChipsNotConserved { before: u64, after: u64 },
    #[error("deck exhausted while dealing")]
    DeckExhausted,
    #[error("player {0} has no hole cards at showdown")]
    MissingHoleCards(PlayerId),
    #[error("chip count overflow paying player {0}")]
    ChipOverflow(PlayerId),
}
