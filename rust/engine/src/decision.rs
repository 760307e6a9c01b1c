//! Numbers an AI strategy decides from.
//!
//! The engine does not pick actions. It only guarantees that hand strength,
//! stack-to-pot ratio and pot odds are computed from the same pot and bet
//! levels the betting state machine enforces.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::engine::{HandState, Street};
use crate::evaluator::{evaluate, unseen_cards, Evaluation, MonteCarlo};
use crate::player::PlayerId;

/// Hand strength from what `hole`'s owner can see. Opponents' hole cards
/// stay in the unseen pool.
pub fn score(hole: &[Card], board: &[Card], mc: &MonteCarlo) -> Evaluation {
    let mut visible = hole.to_vec();
    visible.extend_from_slice(board);
    evaluate(hole, board, &unseen_cards(&visible), mc)
}

/// `stack / pot`; infinite with an empty pot.
pub fn stack_to_pot_ratio(stack: u32, pot: u32) -> f64 {
    if pot == 0 {
        f64::INFINITY
    } else {
        f64::from(stack) / f64::from(pot)
    }
}

/// Share of the final pot a call pays for: `to_call / (pot + to_call)`.
pub fn pot_odds(to_call: u32, pot: u32) -> f64 {
    if to_call == 0 {
        0.0
    } else {
        f64::from(to_call) / (f64::from(pot) + f64::from(to_call))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionInputs {
    pub player_id: PlayerId,
    pub street: Street,
    pub evaluation: Evaluation,
    /// `evaluation` on `0.0..=1.0`, higher is stronger
    pub strength: f64,
    pub spr: f64,
    pub pot_odds: f64,
    pub to_call: u32,
    pub min_raise: u32,
    pub stack: u32,
    pub pot: u32,
    pub big_blind: u32,
    /// False when only calling or folding is allowed
    pub can_raise: bool,
}

impl DecisionInputs {
    /// Largest raise increment the stack covers after calling.
    pub fn max_raise(&self) -> u32 {
        self.stack.saturating_sub(self.to_call)
    }
}

/// Gathers the inputs for `player_id` in `state`, or `None` if the player
/// is not seated in this hand.
pub fn inputs(state: &HandState, player_id: PlayerId, mc: &MonteCarlo) -> Option<DecisionInputs> {
    let player = state.player(player_id)?;
    let ctx = state.betting_context(player_id)?;
    let hole: Vec<Card> = player.hole_cards().map(|h| h.to_vec()).unwrap_or_default();
    let evaluation = score(&hole, state.board(), mc);
    let to_call = ctx.to_call().min(ctx.stack);
    Some(DecisionInputs {
        player_id,
        street: state.street(),
        evaluation,
        strength: evaluation.strength(),
        spr: stack_to_pot_ratio(ctx.stack, state.pot()),
        pot_odds: pot_odds(to_call, state.pot()),
        to_call,
        min_raise: ctx.min_raise,
        stack: ctx.stack,
        pot: state.pot(),
        big_blind: state.blinds().big,
        can_raise: ctx.can_raise,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::deck::Deck;
    use crate::engine::Blinds;
    use crate::evaluator::EvaluationKind;
    use crate::player::Player;

    #[test]
    fn ratios_handle_empty_pot_and_free_check() {
        assert!(stack_to_pot_ratio(500, 0).is_infinite());
        assert_eq!(stack_to_pot_ratio(500, 250), 2.0);
        assert_eq!(pot_odds(0, 300), 0.0);
        assert_eq!(pot_odds(100, 300), 0.25);
    }

    #[test]
    fn inputs_follow_the_betting_state() {
        // seat 1 is dealt first: Kh, As, Kd, Ad
        let top = parse_cards("Kh As Kd Ad").unwrap();
        let players = vec![Player::ai(0, "a", 1000), Player::ai(1, "b", 1000)];
        let hand = HandState::start_with_deck(
            "t",
            players,
            0,
            Blinds { small: 10, big: 20 },
            Deck::stacked(&top),
        )
        .unwrap();

        let di = inputs(&hand, PlayerId(0), &MonteCarlo::seeded(50, 3)).unwrap();
        assert_eq!(di.street, Street::Preflop);
        assert_eq!(di.to_call, 10);
        assert_eq!(di.pot, 30);
        assert_eq!(di.stack, 990);
        assert_eq!(di.min_raise, 20);
        assert!(di.can_raise);
        assert_eq!(di.pot_odds, 0.25);
        assert_eq!(di.spr, 33.0);
        assert_eq!(di.evaluation.kind, EvaluationKind::MonteCarlo { trials: 50 });
        assert!(inputs(&hand, PlayerId(9), &MonteCarlo::default()).is_none());
    }
}
