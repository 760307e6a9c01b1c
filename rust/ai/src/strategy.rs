//! AI personalities.
//!
//! Hand strength arrives on `0.0..=1.0` from the evaluator. It is rescaled
//! here to category units (0 = high card up to 8 = straight flush, the
//! fraction being kickers), which is easier to set thresholds against.

use std::fmt;
use std::str::FromStr;

use rand::{Rng, RngCore};
use riverhold_engine::decision::DecisionInputs;
use riverhold_engine::player::PlayerAction;

use crate::{AIOpponent, UnknownStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Plays only strong hands, never bluffs.
    Conservative,
    /// Calls when estimated equity beats the pot odds.
    ProbabilityBased,
    /// Solid values with frequent bets on weak hands.
    Bluffing,
    /// Wide ranges, big sizing, shoves when shallow.
    LooseAggressive,
}

/// Thresholds in category units; `sizing` is a fraction of the pot.
#[derive(Debug, Clone, Copy)]
struct Profile {
    call_at: f64,
    raise_at: f64,
    bluff: f64,
    sizing: f64,
    /// Shove strong hands once the stack is this shallow relative to the pot
    shove_spr: f64,
    /// Call anything when the price is at most this share of the pot
    cheap_call: f64,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Conservative,
        Strategy::ProbabilityBased,
        Strategy::Bluffing,
        Strategy::LooseAggressive,
    ];

    fn profile(self) -> Profile {
        match self {
            Strategy::Conservative => Profile {
                call_at: 1.4,
                raise_at: 2.2,
                bluff: 0.0,
                sizing: 0.5,
                shove_spr: 1.0,
                cheap_call: 0.1,
            },
            Strategy::ProbabilityBased => Profile {
                call_at: 1.0,
                raise_at: 2.0,
                bluff: 0.0,
                sizing: 0.66,
                shove_spr: 1.5,
                cheap_call: 0.15,
            },
            Strategy::Bluffing => Profile {
                call_at: 1.2,
                raise_at: 2.0,
                bluff: 0.3,
                sizing: 0.75,
                shove_spr: 1.5,
                cheap_call: 0.2,
            },
            Strategy::LooseAggressive => Profile {
                call_at: 0.8,
                raise_at: 1.4,
                bluff: 0.15,
                sizing: 1.0,
                shove_spr: 3.0,
                cheap_call: 0.3,
            },
        }
    }
}

/// Strength in category units.
fn rating(inputs: &DecisionInputs) -> f64 {
    inputs.strength * 9.0
}

/// Rough chance of winning at showdown, for comparing with pot odds.
fn equity(inputs: &DecisionInputs) -> f64 {
    (rating(inputs) / 3.0).clamp(0.0, 1.0)
}

/// A bet or raise of `fraction` of the pot, never below the minimum raise.
/// Becomes an all-in once the stack cannot cover it with chips to spare.
fn sized_raise(inputs: &DecisionInputs, fraction: f64) -> PlayerAction {
    let want = ((f64::from(inputs.pot) * fraction) as u32)
        .max(inputs.min_raise)
        .max(inputs.big_blind);
    if want >= inputs.max_raise() {
        PlayerAction::AllIn
    } else {
        PlayerAction::Raise(want)
    }
}

impl AIOpponent for Strategy {
    fn decide(&self, inputs: &DecisionInputs, rng: &mut dyn RngCore) -> PlayerAction {
        let p = self.profile();
        let r = rating(inputs);
        let can_bet = inputs.can_raise && inputs.max_raise() > 0;
        let bluffing = can_bet && p.bluff > 0.0 && rng.random_bool(p.bluff);

        if inputs.to_call == 0 {
            return if can_bet && (r >= p.raise_at || bluffing) {
                sized_raise(inputs, p.sizing)
            } else {
                PlayerAction::Check
            };
        }

        if can_bet && r >= p.raise_at {
            return if inputs.spr <= p.shove_spr {
                PlayerAction::AllIn
            } else {
                sized_raise(inputs, p.sizing)
            };
        }

        let calls = match self {
            Strategy::ProbabilityBased => equity(inputs) >= inputs.pot_odds,
            _ => r >= p.call_at,
        };
        if calls || inputs.pot_odds <= p.cheap_call {
            PlayerAction::Call
        } else if bluffing {
            sized_raise(inputs, p.sizing)
        } else {
            PlayerAction::Fold
        }
    }

    fn name(&self) -> &str {
        match self {
            Strategy::Conservative => "Conservative",
            Strategy::ProbabilityBased => "ProbabilityBased",
            Strategy::Bluffing => "Bluffing",
            Strategy::LooseAggressive => "LooseAggressive",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "conservative" => Ok(Strategy::Conservative),
            "probability" | "probability-based" | "probabilitybased" => Ok(Strategy::ProbabilityBased),
            "bluffing" | "bluffer" => Ok(Strategy::Bluffing),
            "loose-aggressive" | "looseaggressive" | "lag" => Ok(Strategy::LooseAggressive),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}
