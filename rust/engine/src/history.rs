use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::engine::{HandState, Street};
use crate::player::PlayerId;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ActionKind {
    PostSmallBlind,
    PostBigBlind,
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

/// A single step of a hand with the accounting it produced.
///
/// Keeping the actor's running investment and the pot after every step is
/// what lets a restored snapshot rebuild side pots exactly.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player_id: PlayerId,
    /// The betting street when this action occurred
    pub street: Street,
    pub kind: ActionKind,
    /// Chips moved from the stack by this action
    pub chips: u32,
    /// Street bet level the action raised to, for raises and all-ins
    #[serde(default)]
    pub raise_to: Option<u32>,
    /// Actor's total investment this hand after the action
    pub invested_after: u32,
    /// Pot after the action
    pub pot_after: u32,
}

/// Summary of a finished hand for collaborators that keep hand history.
/// Serialized one JSON object per line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// Chronological list of all actions, blinds included
    pub actions: Vec<ActionRecord>,
    /// Community cards on the board (up to 5 cards)
    pub board: Vec<Card>,
    pub pot: u32,
    /// Timestamp when the hand was recorded (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Showdown information if the hand was resolved
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

/// Who won and whether the hand was decided by cards or by folds.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    pub winners: Vec<PlayerId>,
    /// Optional notes about the showdown (e.g., "split pot", "uncontested")
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

impl HandRecord {
    pub fn from_state(state: &HandState) -> Self {
        let showdown = state.outcome().map(|o| {
            let split = o.pots.iter().any(|p| p.winners.len() > 1);
            let notes = if o.uncontested {
                Some("uncontested".to_string())
            } else if split {
                Some("split pot".to_string())
            } else {
                None
            };
            ShowdownInfo {
                winners: o.winners.clone(),
                notes,
            }
        });
        Self {
            hand_id: state.hand_id().to_string(),
            actions: state.actions().to_vec(),
            board: state.board().to_vec(),
            pot: state.pot(),
            ts: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            showdown,
        }
    }

    pub fn to_jsonl(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}
