use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::{GameError, InvariantViolation};
use crate::hand::{best_five_card_hand, evaluate_hand, HandStrength};
use crate::history::{ActionKind, ActionRecord};
use crate::player::{Player, PlayerAction, PlayerId, PlayerStatus};
use crate::pot::{odd_chip_order, Contribution, PotManager};
use crate::rules::{validate_action, BettingContext, ValidatedAction};

/// Most seats a hand can deal: 2 hole cards each plus 5 board and 3 burns.
pub const MAX_SEATS: usize = 10;

/// Betting street of a Texas Hold'em hand. `Showdown` is terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
    /// Betting is over; hands are compared
    Showdown,
}

impl Street {
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }

    fn board_cards(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::Showdown => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blinds {
    pub small: u32,
    pub big: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotResult {
    pub amount: u32,
    pub eligible: Vec<PlayerId>,
    /// In odd-chip order
    pub winners: Vec<PlayerId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub player_id: PlayerId,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShownHand {
    pub player_id: PlayerId,
    pub hole: [Card; 2],
    pub best_five: [Card; 5],
    pub strength: HandStrength,
}

/// How a finished hand was paid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownResult {
    /// Main pot first, then side pots
    pub pots: Vec<PotResult>,
    /// Everyone who won chips, in seat order
    pub winners: Vec<PlayerId>,
    pub payouts: Vec<Payout>,
    /// Every seat's stack after the payout
    pub updated_stacks: Vec<(PlayerId, u32)>,
    /// Empty when the hand ended without a showdown
    pub shown_hands: Vec<ShownHand>,
    /// Everyone else folded
    pub uncontested: bool,
}

/// Complete state of one hand.
///
/// Transitions never mutate in place: each takes `&self` and returns the
/// next state, so a rejected action leaves the caller's state untouched and
/// any earlier snapshot can be kept for undo or replay. The whole value is
/// serializable so a hand can survive a process restart.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
/// use riverhold_engine::engine::{start_hand, Blinds};
/// use riverhold_engine::player::{Player, PlayerAction};
///
/// let players = vec![Player::human(0, "you", 1000), Player::ai(1, "bot", 1000)];
/// let mut rng = ChaCha20Rng::seed_from_u64(7);
/// let hand = start_hand("h1", players, 0, Blinds { small: 5, big: 10 }, &mut rng).unwrap();
///
/// // heads-up: the dealer posts the small blind and acts first
/// let actor = hand.to_act().unwrap();
/// let hand = hand.submit_action(actor, PlayerAction::Fold).unwrap();
/// assert!(hand.is_resolved());
/// assert_eq!(hand.pot(), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandState {
    hand_id: String,
    street: Street,
    /// Seating order; seat index = position in this vector
    players: Vec<Player>,
    deck: Deck,
    board: Vec<Card>,
    pot: u32,
    highest_bet: u32,
    min_raise: u32,
    blinds: Blinds,
    dealer: usize,
    small_blind_seat: usize,
    big_blind_seat: usize,
    to_act: Option<usize>,
    last_aggressor: Option<usize>,
    /// Sum of all stacks before the blinds
    starting_chips: u64,
    actions: Vec<ActionRecord>,
    outcome: Option<ShowdownResult>,
}

/// Shuffles a fresh deck from `rng` and starts a hand.
/// See [`HandState::start_with_deck`].
pub fn start_hand<R: Rng + ?Sized>(
    hand_id: impl Into<String>,
    players: Vec<Player>,
    dealer_seat: usize,
    blinds: Blinds,
    rng: &mut R,
) -> Result<HandState, GameError> {
    HandState::start_with_deck(hand_id, players, dealer_seat, blinds, Deck::shuffled(rng))
}

fn next_seat_where(players: &[Player], from: usize, pred: impl Fn(&Player) -> bool) -> Option<usize> {
    let n = players.len();
    (1..=n).map(|i| (from + i) % n).find(|&s| pred(&players[s]))
}

/// Pots and payouts are `u32`, so every chip on the table must fit in one.
pub(crate) fn check_table_total(players: &[Player]) -> Result<(), GameError> {
    let total: u64 = players
        .iter()
        .map(|p| u64::from(p.stack()) + u64::from(p.total_invested()))
        .sum();
    if total > u64::from(u32::MAX) {
        return Err(GameError::InvalidSetup(format!(
            "{total} chips on the table exceeds the maximum of {}",
            u32::MAX
        )));
    }
    Ok(())
}

fn fatal(hand_id: &str, violation: InvariantViolation) -> GameError {
    error!(hand_id, %violation, "hand aborted on invariant violation");
    GameError::Invariant(violation)
}

impl HandState {
    /// Starts a hand: seats everyone with chips, posts blinds and deals two
    /// hole cards to each dealt player starting left of the dealer.
    ///
    /// Players with no chips, or already marked sitting out, are not dealt
    /// in. A blind larger than the poster's stack is posted all-in. If the
    /// dealer seat is not dealt in, the button moves to the next dealt seat.
    pub fn start_with_deck(
        hand_id: impl Into<String>,
        mut players: Vec<Player>,
        dealer_seat: usize,
        blinds: Blinds,
        deck: Deck,
    ) -> Result<Self, GameError> {
        let hand_id = hand_id.into();
        if blinds.big == 0 || blinds.small > blinds.big {
            return Err(GameError::InvalidSetup(format!(
                "blinds {}/{} must have 0 < big and small <= big",
                blinds.small, blinds.big
            )));
        }
        if players.len() > MAX_SEATS {
            return Err(GameError::InvalidSetup(format!(
                "{} seats exceeds the table maximum of {MAX_SEATS}",
                players.len()
            )));
        }
        if dealer_seat >= players.len() && !players.is_empty() {
            return Err(GameError::InvalidSetup(format!(
                "dealer seat {dealer_seat} out of range"
            )));
        }
        for (i, p) in players.iter().enumerate() {
            if players[..i].iter().any(|q| q.id() == p.id()) {
                return Err(GameError::InvalidSetup(format!("duplicate player id {}", p.id())));
            }
        }
        check_table_total(&players)?;

        for p in &mut players {
            p.reset_for_hand();
        }
        let dealt = players
            .iter()
            .filter(|p| p.status() == PlayerStatus::Active)
            .count();
        if dealt < 2 {
            return Err(GameError::InsufficientPlayers { available: dealt });
        }

        let is_dealt = |p: &Player| p.status() == PlayerStatus::Active;
        let dealer = if is_dealt(&players[dealer_seat]) {
            dealer_seat
        } else {
            next_seat_where(&players, dealer_seat, is_dealt).unwrap_or(dealer_seat)
        };
        let next_dealt = |from: usize| next_seat_where(&players, from, is_dealt).unwrap_or(from);
        let (small_blind_seat, big_blind_seat) = if dealt == 2 {
            (dealer, next_dealt(dealer))
        } else {
            let sb = next_dealt(dealer);
            (sb, next_dealt(sb))
        };

        let starting_chips = players.iter().map(|p| u64::from(p.stack())).sum();
        let mut state = Self {
            hand_id,
            street: Street::Preflop,
            players,
            deck,
            board: Vec::with_capacity(5),
            pot: 0,
            highest_bet: 0,
            min_raise: blinds.big,
            blinds,
            dealer,
            small_blind_seat,
            big_blind_seat,
            to_act: None,
            last_aggressor: None,
            starting_chips,
            actions: Vec::new(),
            outcome: None,
        };

        state.post_blind(small_blind_seat, blinds.small, ActionKind::PostSmallBlind);
        state.post_blind(big_blind_seat, blinds.big, ActionKind::PostBigBlind);
        state.highest_bet = state
            .players
            .iter()
            .map(Player::current_bet)
            .max()
            .unwrap_or(0);
        state.deal_hole_cards()?;
        state.check_pot()?;
        state.to_act = state.next_to_act(big_blind_seat);

        info!(
            hand_id = %state.hand_id,
            players = dealt,
            dealer = %state.players[dealer].id(),
            small_blind = blinds.small,
            big_blind = blinds.big,
            "hand started"
        );
        Ok(state)
    }

    pub fn hand_id(&self) -> &str {
        &self.hand_id
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn highest_bet(&self) -> u32 {
        self.highest_bet
    }
    pub fn min_raise(&self) -> u32 {
        self.min_raise
    }
    pub fn blinds(&self) -> Blinds {
        self.blinds
    }
    pub fn dealer_seat(&self) -> usize {
        self.dealer
    }
    pub fn small_blind_seat(&self) -> usize {
        self.small_blind_seat
    }
    pub fn big_blind_seat(&self) -> usize {
        self.big_blind_seat
    }
    pub fn to_act_seat(&self) -> Option<usize> {
        self.to_act
    }
    /// Player whose turn it is; `None` when the street's betting is
    /// complete or the hand is over.
    pub fn to_act(&self) -> Option<PlayerId> {
        self.to_act.map(|s| self.players[s].id())
    }
    pub fn last_aggressor(&self) -> Option<PlayerId> {
        self.last_aggressor.map(|s| self.players[s].id())
    }
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }
    pub fn outcome(&self) -> Option<&ShowdownResult> {
        self.outcome.as_ref()
    }
    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }
    /// Cards still in the deck. Opponents' hole cards are already out of
    /// it, so this is not what a player may use for decisions.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Betting view for `id`, or `None` if the player is not at the table.
    pub fn betting_context(&self, id: PlayerId) -> Option<BettingContext> {
        let p = self.player(id)?;
        Some(BettingContext {
            stack: p.stack(),
            current_bet: p.current_bet(),
            highest_bet: self.highest_bet,
            min_raise: self.min_raise,
            can_raise: !p.has_acted(),
        })
    }

    /// Applies `action` for `player_id`, the only way a hand changes
    /// besides dealing.
    ///
    /// # Errors
    ///
    /// - [`GameError::HandAlreadyResolved`] after the hand is over
    /// - [`GameError::OutOfTurn`] when `player_id` is not the seat to act
    /// - [`GameError::IllegalAction`] / [`GameError::InvalidRaiseAmount`]
    ///   from [`validate_action`]
    pub fn submit_action(&self, player_id: PlayerId, action: PlayerAction) -> Result<Self, GameError> {
        if self.is_resolved() {
            return Err(GameError::HandAlreadyResolved);
        }
        let seat = match self.to_act {
            Some(s) if self.players[s].id() == player_id => s,
            expected => {
                let expected = expected.map(|s| self.players[s].id());
                warn!(hand_id = %self.hand_id, player = %player_id, ?expected, "action out of turn");
                return Err(GameError::OutOfTurn {
                    expected,
                    actual: player_id,
                });
            }
        };

        let ctx = BettingContext {
            stack: self.players[seat].stack(),
            current_bet: self.players[seat].current_bet(),
            highest_bet: self.highest_bet,
            min_raise: self.min_raise,
            can_raise: !self.players[seat].has_acted(),
        };
        let validated = validate_action(&ctx, action).inspect_err(|e| {
            warn!(hand_id = %self.hand_id, player = %player_id, ?action, error = %e, "action rejected");
        })?;

        let mut next = self.clone();
        next.apply(seat, validated);
        next.check_pot()?;
        debug!(
            hand_id = %next.hand_id,
            player = %player_id,
            street = ?next.street,
            ?validated,
            pot = next.pot,
            highest_bet = next.highest_bet,
            "action applied"
        );

        if next.live_seats().count() == 1 {
            next.award_uncontested()?;
        } else {
            next.to_act = next.next_to_act(seat);
        }
        Ok(next)
    }

    /// Deals the next street once betting on the current one is complete.
    /// From the river the hand moves to [`Street::Showdown`] unresolved;
    /// advancing from there settles it like [`HandState::resolve_showdown`].
    /// Returns an unchanged copy while someone still has to act.
    pub fn advance_if_complete(&self) -> Result<Self, GameError> {
        if self.is_resolved() {
            return Err(GameError::HandAlreadyResolved);
        }
        if self.to_act.is_some() {
            return Ok(self.clone());
        }
        match self.street {
            Street::Preflop | Street::Flop | Street::Turn => {
                let mut next = self.clone();
                next.deal_street(self.street.next())?;
                Ok(next)
            }
            Street::River => {
                let mut next = self.clone();
                next.street = Street::Showdown;
                debug!(hand_id = %next.hand_id, "betting closed, showdown pending");
                Ok(next)
            }
            Street::Showdown => self.resolve_showdown(),
        }
    }

    /// Compares hands and pays every pot. Valid once river betting is
    /// complete, whether or not the hand was already moved to
    /// [`Street::Showdown`].
    ///
    /// # Errors
    ///
    /// - [`GameError::HandAlreadyResolved`] after the hand is over
    /// - [`GameError::IllegalAction`] while betting is open or board cards
    ///   are still to come
    pub fn resolve_showdown(&self) -> Result<Self, GameError> {
        if self.is_resolved() {
            return Err(GameError::HandAlreadyResolved);
        }
        let ready = match self.street {
            Street::Showdown => true,
            Street::River => self.to_act.is_none(),
            _ => false,
        };
        if !ready {
            let reason = if self.to_act.is_some() {
                format!("betting is still open on the {:?}", self.street)
            } else {
                format!("board is incomplete on the {:?}", self.street)
            };
            return Err(GameError::IllegalAction {
                action: "showdown",
                reason,
            });
        }
        let mut next = self.clone();
        next.street = Street::Showdown;
        next.settle_showdown()?;
        Ok(next)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        serde_json::to_string(self).map_err(|e| GameError::Serialization(e.to_string()))
    }

    /// Restores a snapshot, re-checking that its pot matches the recorded
    /// investments.
    pub fn from_json(s: &str) -> Result<Self, GameError> {
        let state: Self = serde_json::from_str(s).map_err(|e| GameError::Serialization(e.to_string()))?;
        check_table_total(&state.players)?;
        state.check_pot()?;
        Ok(state)
    }

    fn live_seats(&self) -> impl Iterator<Item = usize> + '_ {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_live())
            .map(|(s, _)| s)
    }

    fn active_count(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.status() == PlayerStatus::Active)
            .count()
    }

    /// Active and either facing a bet, or not yet acted since the last full
    /// raise while someone else could still respond.
    fn needs_action(&self, seat: usize) -> bool {
        let p = &self.players[seat];
        if p.status() != PlayerStatus::Active {
            return false;
        }
        p.current_bet() < self.highest_bet || (!p.has_acted() && self.active_count() > 1)
    }

    fn next_to_act(&self, from: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n).map(|i| (from + i) % n).find(|&s| self.needs_action(s))
    }

    fn draw(&mut self) -> Result<Card, GameError> {
        self.deck
            .deal_card()
            .ok_or_else(|| fatal(&self.hand_id, InvariantViolation::DeckExhausted))
    }

    fn post_blind(&mut self, seat: usize, amount: u32, kind: ActionKind) {
        let chips = self.players[seat].commit(amount);
        self.pot += chips;
        self.record(seat, kind, chips, None);
    }

    fn deal_hole_cards(&mut self) -> Result<(), GameError> {
        let n = self.players.len();
        let order: Vec<usize> = (1..=n)
            .map(|i| (self.dealer + i) % n)
            .filter(|&s| self.players[s].is_live())
            .collect();
        let mut first = Vec::with_capacity(order.len());
        for _ in &order {
            first.push(self.draw()?);
        }
        for (&seat, &card) in order.iter().zip(&first) {
            let second = self.draw()?;
            self.players[seat].give_cards([card, second]);
        }
        Ok(())
    }

    fn deal_street(&mut self, street: Street) -> Result<(), GameError> {
        self.deck.burn_card();
        for _ in 0..street.board_cards() {
            let card = self.draw()?;
            self.board.push(card);
        }
        self.street = street;
        for p in &mut self.players {
            p.reset_for_street();
        }
        self.highest_bet = 0;
        self.min_raise = self.blinds.big;
        self.last_aggressor = None;
        self.to_act = self.next_to_act(self.dealer);
        debug!(
            hand_id = %self.hand_id,
            ?street,
            board = ?self.board,
            to_act = ?self.to_act(),
            "street dealt"
        );
        Ok(())
    }

    fn apply(&mut self, seat: usize, action: ValidatedAction) {
        let highest_before = self.highest_bet;
        let (kind, chips, raise_to) = match action {
            ValidatedAction::Fold => {
                self.players[seat].set_status(PlayerStatus::Folded);
                (ActionKind::Fold, 0, None)
            }
            ValidatedAction::Check => (ActionKind::Check, 0, None),
            ValidatedAction::Call(chips) => (ActionKind::Call, self.players[seat].commit(chips), None),
            ValidatedAction::Raise { chips, raise_to } => {
                let chips = self.players[seat].commit(chips);
                self.raise_to(seat, raise_to);
                (ActionKind::Raise, chips, Some(raise_to))
            }
            ValidatedAction::AllIn { chips, raise_to } => {
                let chips = self.players[seat].commit(chips);
                if raise_to > highest_before {
                    self.raise_to(seat, raise_to);
                }
                (ActionKind::AllIn, chips, (raise_to > highest_before).then_some(raise_to))
            }
        };
        self.players[seat].set_acted(true);
        self.pot += chips;
        self.record(seat, kind, chips, raise_to);
    }

    /// Lifts the bet level. A full raise resets the minimum increment and
    /// reopens action for everyone still active; a short all-in raise does
    /// neither, so players who already acted may only call or fold.
    fn raise_to(&mut self, seat: usize, level: u32) {
        let increment = level - self.highest_bet;
        if increment >= self.min_raise {
            self.min_raise = increment;
            self.last_aggressor = Some(seat);
            for (i, p) in self.players.iter_mut().enumerate() {
                if i != seat && p.status() == PlayerStatus::Active {
                    p.set_acted(false);
                }
            }
        }
        self.highest_bet = level;
    }

    fn record(&mut self, seat: usize, kind: ActionKind, chips: u32, raise_to: Option<u32>) {
        let p = &self.players[seat];
        self.actions.push(ActionRecord {
            player_id: p.id(),
            street: self.street,
            kind,
            chips,
            raise_to,
            invested_after: p.total_invested(),
            pot_after: self.pot,
        });
    }

    fn check_pot(&self) -> Result<(), GameError> {
        let invested: u64 = self
            .players
            .iter()
            .map(|p| u64::from(p.total_invested()))
            .sum();
        if invested != u64::from(self.pot) {
            return Err(fatal(
                &self.hand_id,
                InvariantViolation::PotMismatch {
                    pot: self.pot,
                    invested: u32::try_from(invested).unwrap_or(u32::MAX),
                },
            ));
        }
        Ok(())
    }

    fn check_conservation(&self) -> Result<(), GameError> {
        let after: u64 = self.players.iter().map(|p| u64::from(p.stack())).sum();
        if after != self.starting_chips {
            return Err(fatal(
                &self.hand_id,
                InvariantViolation::ChipsNotConserved {
                    before: self.starting_chips,
                    after,
                },
            ));
        }
        Ok(())
    }

    fn updated_stacks(&self) -> Vec<(PlayerId, u32)> {
        self.players.iter().map(|p| (p.id(), p.stack())).collect()
    }

    fn award_uncontested(&mut self) -> Result<(), GameError> {
        let seat = self
            .live_seats()
            .next()
            .ok_or_else(|| fatal(&self.hand_id, InvariantViolation::PayoutMismatch { pot: self.pot, paid: 0 }))?;
        let id = self.players[seat].id();
        let amount = self.pot;
        self.players[seat]
            .add_chips(amount)
            .map_err(|v| fatal(&self.hand_id, v))?;
        self.to_act = None;
        self.check_conservation()?;
        self.outcome = Some(ShowdownResult {
            pots: vec![PotResult {
                amount,
                eligible: vec![id],
                winners: vec![id],
            }],
            winners: vec![id],
            payouts: vec![Payout {
                player_id: id,
                amount,
            }],
            updated_stacks: self.updated_stacks(),
            shown_hands: Vec::new(),
            uncontested: true,
        });
        info!(hand_id = %self.hand_id, winner = %id, pot = amount, street = ?self.street, "hand won uncontested");
        Ok(())
    }

    fn settle_showdown(&mut self) -> Result<(), GameError> {
        let n = self.players.len();
        let mut strengths: Vec<Option<HandStrength>> = vec![None; n];
        let mut shown_hands = Vec::new();
        for seat in self.live_seats().collect::<Vec<_>>() {
            let p = &self.players[seat];
            let hole = p
                .hole_cards()
                .ok_or_else(|| fatal(&self.hand_id, InvariantViolation::MissingHoleCards(p.id())))?;
            let mut cards = hole.to_vec();
            cards.extend_from_slice(&self.board);
            let strength = evaluate_hand(&cards);
            strengths[seat] = Some(strength);
            if let Some(best_five) = best_five_card_hand(&hole, &self.board) {
                shown_hands.push(ShownHand {
                    player_id: p.id(),
                    hole,
                    best_five,
                    strength,
                });
            }
        }

        let contributions: Vec<Contribution> = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| Contribution {
                seat,
                invested: p.total_invested(),
                folded: !p.is_live(),
            })
            .collect();
        let pots = PotManager::from_contributions(&contributions);
        if pots.total() != self.pot {
            return Err(fatal(
                &self.hand_id,
                InvariantViolation::PayoutMismatch {
                    pot: self.pot,
                    paid: pots.total(),
                },
            ));
        }
        let order = odd_chip_order(self.dealer, n);
        let awards = pots
            .award(&order, |eligible| {
                let best = eligible.iter().filter_map(|&s| strengths[s]).max();
                eligible
                    .iter()
                    .copied()
                    .filter(|&s| best.is_some() && strengths[s] == best)
                    .collect()
            })
            .map_err(|v| fatal(&self.hand_id, v))?;

        let mut won = vec![0u32; n];
        for award in &awards {
            for &(seat, chips) in &award.shares {
                won[seat] = won[seat].checked_add(chips).ok_or_else(|| {
                    fatal(
                        &self.hand_id,
                        InvariantViolation::ChipOverflow(self.players[seat].id()),
                    )
                })?;
            }
        }
        for (seat, &chips) in won.iter().enumerate() {
            self.players[seat]
                .add_chips(chips)
                .map_err(|v| fatal(&self.hand_id, v))?;
        }
        self.to_act = None;
        self.check_conservation()?;

        let id = |s: usize| self.players[s].id();
        let result = ShowdownResult {
            pots: awards
                .iter()
                .map(|a| PotResult {
                    amount: a.amount,
                    eligible: a.eligible.iter().map(|&s| id(s)).collect(),
                    winners: a.shares.iter().map(|&(s, _)| id(s)).collect(),
                })
                .collect(),
            winners: (0..n).filter(|&s| won[s] > 0).map(id).collect(),
            payouts: (0..n)
                .filter(|&s| won[s] > 0)
                .map(|s| Payout {
                    player_id: id(s),
                    amount: won[s],
                })
                .collect(),
            updated_stacks: self.updated_stacks(),
            shown_hands,
            uncontested: false,
        };
        info!(
            hand_id = %self.hand_id,
            pot = self.pot,
            pots = result.pots.len(),
            winners = ?result.winners,
            "showdown resolved"
        );
        self.outcome = Some(result);
        Ok(())
    }
}
