use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{error, info};

use crate::config::EngineConfig;
use crate::deck::Deck;
use crate::engine::{check_table_total, HandState, MAX_SEATS};
use crate::errors::{GameError, InvariantViolation};
use crate::history::{format_hand_id, HandRecord};
use crate::player::{Player, PlayerAction, PlayerId, PlayerKind, PlayerStatus};

/// A table playing hand after hand: button rotation, sitting out, busted
/// players leaving, and chip conservation across hands.
///
/// The session owns the stacks between hands. Each hand works on its own
/// copy inside [`HandState`]; [`Session::finish_hand`] takes the results
/// back once the hand is resolved.
#[derive(Debug, Clone)]
pub struct Session {
    config: EngineConfig,
    players: Vec<Player>,
    button: Option<PlayerId>,
    rng: ChaCha20Rng,
    hands_started: u32,
    current_hand: Option<String>,
    /// At zero chips when the previous hand started
    busted: Vec<PlayerId>,
    /// Asked to sit out by the caller
    sitting_out: Vec<PlayerId>,
    total_chips: u64,
    flagged: Option<InvariantViolation>,
}

impl Session {
    pub fn new(config: EngineConfig, players: Vec<Player>) -> Result<Self, GameError> {
        config
            .validate()
            .map_err(|e| GameError::InvalidSetup(e.to_string()))?;
        if players.len() > MAX_SEATS {
            return Err(GameError::InvalidSetup(format!(
                "{} seats exceeds the table maximum of {MAX_SEATS}",
                players.len()
            )));
        }
        for (i, p) in players.iter().enumerate() {
            if players[..i].iter().any(|q| q.id() == p.id()) {
                return Err(GameError::InvalidSetup(format!("duplicate player id {}", p.id())));
            }
        }
        check_table_total(&players)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let total_chips = players.iter().map(|p| u64::from(p.stack())).sum();
        Ok(Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            config,
            players,
            button: None,
            hands_started: 0,
            current_hand: None,
            busted: Vec::new(),
            sitting_out: Vec::new(),
            total_chips,
            flagged: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }
    pub fn button(&self) -> Option<PlayerId> {
        self.button
    }
    pub fn hands_started(&self) -> u32 {
        self.hands_started
    }
    pub fn total_chips(&self) -> u64 {
        self.total_chips
    }
    pub fn flagged(&self) -> Option<&InvariantViolation> {
        self.flagged.as_ref()
    }

    /// Keeps `id` out of upcoming hands until [`Session::sit_in`].
    pub fn sit_out(&mut self, id: PlayerId) {
        if !self.sitting_out.contains(&id) {
            self.sitting_out.push(id);
        }
    }

    pub fn sit_in(&mut self, id: PlayerId) {
        self.sitting_out.retain(|&p| p != id);
    }

    /// Marks the session unusable when `err` is an engine fault. Returns
    /// whether it did.
    pub fn flag_if_fatal(&mut self, err: &GameError) -> bool {
        match err {
            GameError::Invariant(v) => {
                error!(violation = %v, "session flagged");
                self.flagged = Some(v.clone());
                true
            }
            _ => false,
        }
    }

    /// Seats a new player with the configured starting stack. Only
    /// allowed between hands.
    pub fn seat(&mut self, id: PlayerId, name: impl Into<String>, kind: PlayerKind) -> Result<(), GameError> {
        if self.current_hand.is_some() {
            return Err(GameError::IllegalAction {
                action: "seat player",
                reason: "a hand is in progress".into(),
            });
        }
        if self.players.len() >= MAX_SEATS {
            return Err(GameError::InvalidSetup(format!("table is full at {MAX_SEATS} seats")));
        }
        if self.player(id).is_some() {
            return Err(GameError::InvalidSetup(format!("duplicate player id {id}")));
        }
        let mut players = self.players.clone();
        players.push(Player::new(id, name, kind, self.config.starting_stack));
        check_table_total(&players)?;
        self.total_chips += u64::from(self.config.starting_stack);
        self.players = players;
        info!(player = %id, stack = self.config.starting_stack, "player seated");
        Ok(())
    }

    /// Starts the next hand with a freshly shuffled deck.
    ///
    /// Players who were already at zero chips when the previous hand
    /// started are removed. Stacks below `min_continuable_stack` and players
    /// who asked to sit out are not dealt in. The button moves to the next
    /// seat that is dealt in. Nothing about the session changes if the hand
    /// cannot start.
    pub fn start_hand(&mut self) -> Result<HandState, GameError> {
        if let Some(v) = &self.flagged {
            return Err(GameError::Invariant(v.clone()));
        }

        let min_stack = self.config.min_continuable_stack;
        let mut players = self.players.clone();
        for p in &mut players {
            if p.stack() < min_stack || self.sitting_out.contains(&p.id()) {
                p.sit_out();
            } else {
                p.sit_in();
            }
        }
        let leaving: Vec<PlayerId> = players
            .iter()
            .filter(|p| p.stack() == 0 && self.busted.contains(&p.id()))
            .map(Player::id)
            .collect();
        let dealt = |p: &Player| p.status() == PlayerStatus::Active && !leaving.contains(&p.id());
        let available = players.iter().filter(|&p| dealt(p)).count();
        if available < 2 {
            return Err(GameError::InsufficientPlayers { available });
        }

        let n = players.len();
        let from = self
            .button
            .and_then(|id| players.iter().position(|p| p.id() == id))
            .unwrap_or(n - 1);
        let button = (1..=n)
            .map(|i| (from + i) % n)
            .find(|&s| dealt(&players[s]))
            .map(|s| players[s].id());

        players.retain(|p| !leaving.contains(&p.id()));
        let dealer_seat = button
            .and_then(|id| players.iter().position(|p| p.id() == id))
            .unwrap_or(0);
        let hand_number = self.hands_started + 1;
        let date = Utc::now().format("%Y%m%d").to_string();
        let hand_id = format_hand_id(&date, hand_number);
        let mut rng = self.rng.clone();
        let deck = Deck::shuffled(&mut rng);

        let state = HandState::start_with_deck(
            hand_id.clone(),
            players.clone(),
            dealer_seat,
            self.config.blinds(),
            deck,
        )?;

        for id in &leaving {
            info!(player = %id, "busted player removed");
        }
        self.busted = players
            .iter()
            .filter(|p| p.stack() == 0)
            .map(Player::id)
            .collect();
        self.players = players;
        self.button = button;
        self.hands_started = hand_number;
        self.rng = rng;
        self.current_hand = Some(hand_id);
        Ok(state)
    }

    /// [`HandState::submit_action`] for the hand in progress. An engine
    /// fault flags the session.
    pub fn submit_action(
        &mut self,
        state: &HandState,
        player_id: PlayerId,
        action: PlayerAction,
    ) -> Result<HandState, GameError> {
        self.check_current(state)?;
        state
            .submit_action(player_id, action)
            .inspect_err(|e| {
                self.flag_if_fatal(e);
            })
    }

    /// [`HandState::advance_if_complete`] for the hand in progress. An
    /// engine fault flags the session.
    pub fn advance(&mut self, state: &HandState) -> Result<HandState, GameError> {
        self.check_current(state)?;
        state.advance_if_complete().inspect_err(|e| {
            self.flag_if_fatal(e);
        })
    }

    fn check_current(&self, state: &HandState) -> Result<(), GameError> {
        if let Some(v) = &self.flagged {
            return Err(GameError::Invariant(v.clone()));
        }
        if self.current_hand.as_deref() != Some(state.hand_id()) {
            return Err(GameError::IllegalAction {
                action: "play hand",
                reason: format!("{} is not the hand in progress", state.hand_id()),
            });
        }
        Ok(())
    }

    /// Takes the stacks of a resolved hand back into the session.
    ///
    /// # Errors
    ///
    /// [`GameError::IllegalAction`] if `state` is not this session's current
    /// hand or is not resolved yet; [`GameError::Invariant`] (and a flagged
    /// session) if the table's chip total changed.
    pub fn finish_hand(&mut self, state: &HandState) -> Result<HandRecord, GameError> {
        if self.current_hand.as_deref() != Some(state.hand_id()) {
            return Err(GameError::IllegalAction {
                action: "finish hand",
                reason: format!("{} is not the hand in progress", state.hand_id()),
            });
        }
        if !state.is_resolved() {
            return Err(GameError::IllegalAction {
                action: "finish hand",
                reason: "hand is not resolved".into(),
            });
        }
        let after: u64 = state.players().iter().map(|p| u64::from(p.stack())).sum();
        if after != self.total_chips {
            let err = GameError::Invariant(InvariantViolation::ChipsNotConserved {
                before: self.total_chips,
                after,
            });
            self.flag_if_fatal(&err);
            return Err(err);
        }

        self.players = state.players().to_vec();
        self.current_hand = None;
        let record = HandRecord::from_state(state);
        info!(
            hand_id = %record.hand_id,
            pot = record.pot,
            winners = ?record.showdown.as_ref().map(|s| &s.winners),
            "hand finished"
        );
        Ok(record)
    }
}
