//! # riverhold-engine: Texas Hold'em Engine Core
//!
//! Runs multi-hand No-Limit Texas Hold'em between a human and AI opponents:
//! betting rules, chip stacks, side pots and showdowns, plus the hand
//! strength signal AI strategies decide from.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text parsing
//! - [`deck`] - Deck dealing, burning and seeded ChaCha shuffles
//! - [`hand`] - Exact hand ranking with kicker tie-breaks
//! - [`evaluator`] - Exact or Monte-Carlo hand strength scores
//! - [`player`] - Player state, actions, and stack management
//! - [`rules`] - Action validation against the betting round
//! - [`engine`] - Hand state machine: blinds, streets, turn order, showdown
//! - [`pot`] - Main and side pot construction and payouts
//! - [`decision`] - Strength, pot odds and SPR for AI strategies
//! - [`game`] - Multi-hand session: button, sitting out, busted players
//! - [`history`] - Action records and JSONL hand records
//! - [`config`] - Table configuration from TOML and environment
//! - [`logging`] - tracing subscriber setup and a capturing test layer
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use riverhold_engine::cards::parse_cards;
//! use riverhold_engine::hand::{evaluate_hand, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let strength = evaluate_hand(&cards);
//! assert_eq!(strength.category, Category::StraightFlush);
//! ```
//!
//! ## Playing a Hand
//!
//! Every transition returns a new [`engine::HandState`]; a rejected action
//! leaves the old one untouched.
//!
//! ```rust
//! use riverhold_engine::config::EngineConfig;
//! use riverhold_engine::game::Session;
//! use riverhold_engine::player::{Player, PlayerAction};
//!
//! let config = EngineConfig { seed: Some(42), ..EngineConfig::default() };
//! let players = vec![Player::human(0, "you", 20_000), Player::ai(1, "bot", 20_000)];
//! let mut session = Session::new(config, players).unwrap();
//!
//! let mut hand = session.start_hand().unwrap();
//! while !hand.is_resolved() {
//!     hand = match hand.to_act() {
//!         Some(id) => hand.submit_action(id, PlayerAction::Call).unwrap(),
//!         None => hand.advance_if_complete().unwrap(),
//!     };
//! }
//! let record = session.finish_hand(&hand).unwrap();
//! assert_eq!(record.board.len(), 5);
//! ```

pub mod cards;
pub mod config;
pub mod decision;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod history;
pub mod logging;
pub mod player;
pub mod pot;
pub mod rules;
