//! Hand-strength evaluation for decisions made before all cards are known.
//!
//! With five or more visible cards the result is exact. With fewer, boards
//! are completed at random from the cards the evaluating player cannot see
//! and the exact scores are averaged. Trials are independent, so they are
//! spread across rayon workers, each chunk with its own ChaCha8 stream.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card};
use crate::hand::{category_of_score, evaluate_hand, Category, WORST_SCORE};

pub const DEFAULT_TRIALS: usize = 100;

const TRIALS_PER_CHUNK: usize = 32;

/// Monte-Carlo settings. `seed` makes the averaged score reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonteCarlo {
    pub trials: usize,
    pub seed: Option<u64>,
}

impl Default for MonteCarlo {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
        }
    }
}

impl MonteCarlo {
    pub fn seeded(trials: usize, seed: u64) -> Self {
        Self {
            trials,
            seed: Some(seed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationKind {
    /// Best five of at least five known cards.
    Exact,
    /// Average over simulated boards.
    MonteCarlo { trials: usize },
    /// Too little unseen deck to simulate; only visible cards ranked.
    Partial,
    /// Nothing to evaluate.
    Sentinel,
}

/// Evaluator output. `score` follows the crate-wide convention: lower is
/// stronger, [`WORST_SCORE`] is the weakest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: f64,
    pub category: Category,
    pub kind: EvaluationKind,
}

impl Evaluation {
    pub fn worst() -> Self {
        Self {
            score: WORST_SCORE as f64,
            category: Category::HighCard,
            kind: EvaluationKind::Sentinel,
        }
    }

    /// Score mapped onto `0.0..=1.0`, higher is stronger.
    pub fn strength(&self) -> f64 {
        (1.0 - self.score / WORST_SCORE as f64).clamp(0.0, 1.0)
    }

    fn exact(cards: &[Card], kind: EvaluationKind) -> Self {
        let hs = evaluate_hand(cards);
        Self {
            score: hs.score() as f64,
            category: hs.category,
            kind,
        }
    }
}

/// Full deck minus every card in `visible`.
pub fn unseen_cards(visible: &[Card]) -> Vec<Card> {
    full_deck()
        .into_iter()
        .filter(|c| !visible.contains(c))
        .collect()
}

/// Scores `hole` + `board`, simulating the rest of the board from `unseen`
/// when fewer than five cards are known. Cards in `unseen` that are
/// actually visible are ignored, so no card is ever dealt twice.
pub fn evaluate(hole: &[Card], board: &[Card], unseen: &[Card], mc: &MonteCarlo) -> Evaluation {
    let mut known: Vec<Card> = Vec::with_capacity(7);
    known.extend_from_slice(hole);
    known.extend_from_slice(board);

    if known.is_empty() {
        return Evaluation::worst();
    }
    if known.len() >= 5 {
        return Evaluation::exact(&known, EvaluationKind::Exact);
    }

    let needed = 5usize.saturating_sub(board.len());
    let pool: Vec<Card> = unseen
        .iter()
        .copied()
        .filter(|c| !known.contains(c))
        .collect();
    if mc.trials == 0 || pool.len() < needed {
        return Evaluation::exact(&known, EvaluationKind::Partial);
    }

    let base_seed = mc.seed.unwrap_or_else(rand::random);
    let chunks = mc.trials.div_ceil(TRIALS_PER_CHUNK);
    let total: u64 = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let trials = TRIALS_PER_CHUNK.min(mc.trials - chunk * TRIALS_PER_CHUNK);
            let mut rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(chunk as u64));
            let mut pool = pool.clone();
            let mut cards: Vec<Card> = Vec::with_capacity(known.len() + needed);
            let mut sum = 0u64;
            for _ in 0..trials {
                let (drawn, _) = pool.partial_shuffle(&mut rng, needed);
                cards.clear();
                cards.extend_from_slice(&known);
                cards.extend_from_slice(drawn);
                sum += u64::from(evaluate_hand(&cards).score());
            }
            sum
        })
        .sum();

    let score = total as f64 / mc.trials as f64;
    Evaluation {
        score,
        category: category_of_score(score),
        kind: EvaluationKind::MonteCarlo { trials: mc.trials },
    }
}
