//! # riverhold-ai: AI Opponents for Riverhold
//!
//! AI players for the Texas Hold'em engine. Every personality reads the
//! same [`DecisionInputs`] (hand strength, pot odds, stack-to-pot ratio)
//! and differs only in the thresholds it applies to them.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait defining the interface for AI decision-making
//! - [`Strategy`] - The closed set of personalities
//! - [`create_ai`] - Factory function for creating AI opponents by name
//! - [`table::AiTable`] - Plays AI turns against a live hand
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use riverhold_ai::{create_ai, AIOpponent};
//! use riverhold_engine::decision::inputs;
//! use riverhold_engine::engine::{start_hand, Blinds};
//! use riverhold_engine::evaluator::MonteCarlo;
//! use riverhold_engine::player::Player;
//!
//! let ai = create_ai("conservative").unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let players = vec![Player::ai(0, "a", 1000), Player::ai(1, "b", 1000)];
//! let hand = start_hand("demo", players, 0, Blinds { small: 5, big: 10 }, &mut rng).unwrap();
//!
//! let player_id = hand.to_act().unwrap();
//! let di = inputs(&hand, player_id, &MonteCarlo::seeded(50, 1)).unwrap();
//! let action = ai.decide(&di, &mut rng);
//! assert!(hand.submit_action(player_id, action).is_ok());
//! ```

use rand::RngCore;
use riverhold_engine::decision::DecisionInputs;
use riverhold_engine::player::PlayerAction;
use thiserror::Error;

pub mod strategy;
pub mod table;

pub use strategy::Strategy;

/// Interface every AI personality implements.
///
/// Implementations must only return actions the engine accepts for the
/// given inputs: raises sized between the minimum raise and the stack,
/// no raise once action is closed to the player.
///
/// # Example Implementation
///
/// ```rust
/// use rand::RngCore;
/// use riverhold_ai::AIOpponent;
/// use riverhold_engine::decision::DecisionInputs;
/// use riverhold_engine::player::PlayerAction;
///
/// struct CallingStation;
///
/// impl AIOpponent for CallingStation {
///     fn decide(&self, _inputs: &DecisionInputs, _rng: &mut dyn RngCore) -> PlayerAction {
///         // a call with nothing to call is a check
///         PlayerAction::Call
///     }
///
///     fn name(&self) -> &str {
///         "CallingStation"
///     }
/// }
/// ```
pub trait AIOpponent: Send + Sync {
    /// Choose an action from the decision inputs. `rng` drives any
    /// randomized play such as bluffs.
    fn decide(&self, inputs: &DecisionInputs, rng: &mut dyn RngCore) -> PlayerAction;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown AI strategy: {0}")]
pub struct UnknownStrategy(pub String);

/// Creates an AI opponent by name.
///
/// # Supported AI Types
///
/// - `"conservative"`
/// - `"probability"` (or `"probability-based"`)
/// - `"bluffing"`
/// - `"loose-aggressive"` (or `"lag"`)
///
/// # Example
///
/// ```rust
/// use riverhold_ai::{create_ai, AIOpponent, Strategy};
///
/// let ai = create_ai("lag").unwrap();
/// assert_eq!(ai, Strategy::LooseAggressive);
/// assert_eq!(ai.name(), "LooseAggressive");
/// assert!(create_ai("random").is_err());
/// ```
pub fn create_ai(name: &str) -> Result<Strategy, UnknownStrategy> {
    name.parse()
}
