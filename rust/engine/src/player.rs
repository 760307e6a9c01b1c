use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::InvariantViolation;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Who makes the decisions for a seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Ai,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Dealt in and still able to act
    Active,
    /// Gave up the hand; chips already invested stay in the pot
    Folded,
    /// Whole stack committed; no further actions this hand
    AllIn,
    /// Not dealt into the current hand
    SittingOut,
}

/// A player action during a betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid with nothing to call)
    Check,
    /// Match the highest bet, or go all-in if the stack is smaller
    Call,
    /// Raise the highest bet by the given increment
    Raise(u32),
    /// Commit the whole remaining stack
    AllIn,
}

/// Default starting stack size for each player in chips
pub const STARTING_STACK: u32 = 20_000;

/// A seat at the table: chip stack, per-street and per-hand commitments,
/// and hole cards.
///
/// `current_bet + stack` is everything the player could have in front of
/// them this street; `total_invested` only grows within a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    kind: PlayerKind,
    /// Chips behind, not yet committed
    stack: u32,
    /// Chips committed on the current street
    current_bet: u32,
    /// Chips committed over the whole hand
    total_invested: u32,
    status: PlayerStatus,
    /// Acted since the last full raise
    acted: bool,
    hole: Option<[Card; 2]>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, kind: PlayerKind, stack: u32) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            stack,
            current_bet: 0,
            total_invested: 0,
            status: PlayerStatus::Active,
            acted: false,
            hole: None,
        }
    }

    pub fn human(id: u32, name: impl Into<String>, stack: u32) -> Self {
        Self::new(PlayerId(id), name, PlayerKind::Human, stack)
    }

    pub fn ai(id: u32, name: impl Into<String>, stack: u32) -> Self {
        Self::new(PlayerId(id), name, PlayerKind::Ai, stack)
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn kind(&self) -> PlayerKind {
        self.kind
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn total_invested(&self) -> u32 {
        self.total_invested
    }
    pub fn status(&self) -> PlayerStatus {
        self.status
    }
    pub fn has_acted(&self) -> bool {
        self.acted
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }

    /// Neither folded nor sitting out.
    pub fn is_live(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Clears per-hand state and seats the player for a new hand, or sits
    /// them out when they have no chips.
    pub(crate) fn reset_for_hand(&mut self) {
        self.current_bet = 0;
        self.total_invested = 0;
        self.acted = false;
        self.hole = None;
        self.status = if self.status == PlayerStatus::SittingOut || self.stack == 0 {
            PlayerStatus::SittingOut
        } else {
            PlayerStatus::Active
        };
    }

    pub(crate) fn reset_for_street(&mut self) {
        self.current_bet = 0;
        self.acted = false;
    }

    pub(crate) fn set_status(&mut self, status: PlayerStatus) {
        self.status = status;
    }

    pub(crate) fn set_acted(&mut self, acted: bool) {
        self.acted = acted;
    }

    pub(crate) fn give_cards(&mut self, cards: [Card; 2]) {
        self.hole = Some(cards);
    }

    pub(crate) fn add_chips(&mut self, amount: u32) -> Result<(), InvariantViolation> {
        self.stack = self
            .stack
            .checked_add(amount)
            .ok_or(InvariantViolation::ChipOverflow(self.id))?;
        Ok(())
    }

    /// Moves `amount` from the stack into the current bet. Committing the
    /// last chip turns the player all-in. Callers validate `amount` first;
    /// it is capped at the stack so chips can never be created here.
    pub(crate) fn commit(&mut self, amount: u32) -> u32 {
        let amount = amount.min(self.stack);
        self.stack -= amount;
        self.current_bet += amount;
        self.total_invested += amount;
        if self.stack == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        amount
    }

    /// Session-level status change between hands.
    pub(crate) fn sit_out(&mut self) {
        self.status = PlayerStatus::SittingOut;
    }

    pub(crate) fn sit_in(&mut self) {
        if self.stack > 0 {
            self.status = PlayerStatus::Active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_moves_chips_and_goes_all_in_on_last_chip() {
        let mut p = Player::ai(1, "bot", 100);
        assert_eq!(p.commit(40), 40);
        assert_eq!((p.stack(), p.current_bet(), p.total_invested()), (60, 40, 40));
        assert_eq!(p.status(), PlayerStatus::Active);
        assert_eq!(p.commit(500), 60);
        assert_eq!(p.stack(), 0);
        assert_eq!(p.total_invested(), 100);
        assert_eq!(p.status(), PlayerStatus::AllIn);
    }

    #[test]
    fn street_reset_keeps_hand_total() {
        let mut p = Player::human(0, "you", 100);
        p.commit(30);
        p.set_acted(true);
        p.reset_for_street();
        assert_eq!(p.current_bet(), 0);
        assert_eq!(p.total_invested(), 30);
        assert!(!p.has_acted());
    }

    #[test]
    fn adding_chips_past_the_limit_is_an_error() {
        let mut p = Player::ai(3, "bot", u32::MAX - 1);
        assert_eq!(p.add_chips(1), Ok(()));
        assert_eq!(p.add_chips(1), Err(InvariantViolation::ChipOverflow(PlayerId(3))));
        assert_eq!(p.stack(), u32::MAX);
    }

    #[test]
    fn broke_player_sits_out_for_next_hand() {
        let mut p = Player::ai(2, "bot", 10);
        p.commit(10);
        p.reset_for_hand();
        assert_eq!(p.status(), PlayerStatus::SittingOut);
        p.add_chips(5).unwrap();
        p.sit_in();
        p.reset_for_hand();
        assert_eq!(p.status(), PlayerStatus::Active);
    }
}
