use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use riverhold_engine::config::EngineConfig;
use riverhold_engine::decision::{self, DecisionInputs};
use riverhold_engine::engine::HandState;
use riverhold_engine::errors::GameError;
use riverhold_engine::evaluator::MonteCarlo;
use riverhold_engine::game::Session;
use riverhold_engine::player::{PlayerAction, PlayerId};
use tracing::{debug, warn};

use crate::{AIOpponent, Strategy};

/// Plays the AI seats of a table.
///
/// Seats without a strategy are treated as human: [`AiTable::run`] stops
/// and hands the state back when one of them is to act.
#[derive(Debug, Clone)]
pub struct AiTable {
    seats: Vec<(PlayerId, Strategy)>,
    trials: usize,
    rng: ChaCha8Rng,
}

impl AiTable {
    pub fn new(trials: usize, seed: u64) -> Self {
        Self {
            seats: Vec::new(),
            trials,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Monte-Carlo trials and seed taken from the table configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mc = config.monte_carlo();
        Self::new(mc.trials, mc.seed.unwrap_or_else(rand::random))
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Assigns (or replaces) the strategy playing `id`.
    pub fn seat(&mut self, id: PlayerId, strategy: Strategy) {
        match self.seats.iter_mut().find(|(p, _)| *p == id) {
            Some(entry) => entry.1 = strategy,
            None => self.seats.push((id, strategy)),
        }
    }

    pub fn strategy_for(&self, id: PlayerId) -> Option<Strategy> {
        self.seats.iter().find(|(p, _)| *p == id).map(|&(_, s)| s)
    }

    /// What `id` would be deciding from right now.
    pub fn inputs(&mut self, state: &HandState, id: PlayerId) -> Option<DecisionInputs> {
        let mc = MonteCarlo::seeded(self.trials, self.rng.random());
        decision::inputs(state, id, &mc)
    }

    /// Plays AI turns, dealing streets as betting completes, until a human
    /// seat is to act or the hand is resolved.
    ///
    /// A decision the engine rejects is replaced by a check or call; only
    /// engine faults are returned as errors.
    pub fn run(&mut self, state: HandState) -> Result<HandState, GameError> {
        self.drive(&mut Standalone, state)
    }

    /// [`AiTable::run`] for a session's hand in progress. Engine faults
    /// flag the session.
    pub fn play(&mut self, session: &mut Session, state: HandState) -> Result<HandState, GameError> {
        self.drive(session, state)
    }

    fn drive<T: Table>(&mut self, table: &mut T, mut state: HandState) -> Result<HandState, GameError> {
        loop {
            if state.is_resolved() {
                return Ok(state);
            }
            let Some(id) = state.to_act() else {
                state = table.deal(&state)?;
                continue;
            };
            let Some(strategy) = self.strategy_for(id) else {
                return Ok(state);
            };
            let inputs = self
                .inputs(&state, id)
                .ok_or_else(|| GameError::InvalidSetup(format!("{id} is not seated")))?;
            let action = strategy.decide(&inputs, &mut self.rng);
            debug!(
                hand_id = state.hand_id(),
                player = %id,
                strategy = strategy.name(),
                strength = inputs.strength,
                pot_odds = inputs.pot_odds,
                ?action,
                "ai decided"
            );

            state = match table.act(&state, id, action) {
                Ok(next) => next,
                Err(e) if e.is_rejection() => {
                    let fallback = if inputs.to_call == 0 {
                        PlayerAction::Check
                    } else {
                        PlayerAction::Call
                    };
                    warn!(player = %id, strategy = strategy.name(), ?action, ?fallback, error = %e, "ai action rejected");
                    table.act(&state, id, fallback)?
                }
                Err(e) => return Err(e),
            };
        }
    }
}

/// Where a hand's transitions are applied.
trait Table {
    fn act(&mut self, state: &HandState, id: PlayerId, action: PlayerAction) -> Result<HandState, GameError>;
    fn deal(&mut self, state: &HandState) -> Result<HandState, GameError>;
}

/// A bare hand with no session around it.
struct Standalone;

impl Table for Standalone {
    fn act(&mut self, state: &HandState, id: PlayerId, action: PlayerAction) -> Result<HandState, GameError> {
        state.submit_action(id, action)
    }
    fn deal(&mut self, state: &HandState) -> Result<HandState, GameError> {
        state.advance_if_complete()
    }
}

impl Table for Session {
    fn act(&mut self, state: &HandState, id: PlayerId, action: PlayerAction) -> Result<HandState, GameError> {
        self.submit_action(state, id, action)
    }
    fn deal(&mut self, state: &HandState) -> Result<HandState, GameError> {
        self.advance(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riverhold_engine::deck::Deck;
    use riverhold_engine::engine::Blinds;
    use riverhold_engine::player::Player;

    #[test]
    fn stops_when_the_human_is_to_act() {
        let players = vec![
            Player::ai(0, "bot", 1000),
            Player::ai(1, "bot", 1000),
            Player::human(2, "you", 1000),
        ];
        // dealer 1: small blind 2, big blind 0, seat 1 opens
        let hand =
            HandState::start_with_deck("t", players, 1, Blinds { small: 5, big: 10 }, Deck::new_with_seed(9))
                .unwrap();
        let mut table = AiTable::new(50, 1);
        table.seat(PlayerId(0), Strategy::Conservative);
        table.seat(PlayerId(1), Strategy::LooseAggressive);
        assert_eq!(table.strategy_for(PlayerId(2)), None);

        let after = table.run(hand).unwrap();
        assert!(after.is_resolved() || after.to_act() == Some(PlayerId(2)));
    }

    #[test]
    fn trials_come_from_the_config() {
        let config = EngineConfig {
            monte_carlo_trials: 37,
            seed: Some(4),
            ..EngineConfig::default()
        };
        assert_eq!(AiTable::from_config(&config).trials(), 37);
    }

    #[test]
    fn reseating_replaces_the_strategy() {
        let mut table = AiTable::new(10, 0);
        table.seat(PlayerId(3), Strategy::Bluffing);
        table.seat(PlayerId(3), Strategy::ProbabilityBased);
        assert_eq!(table.strategy_for(PlayerId(3)), Some(Strategy::ProbabilityBased));
    }
}
