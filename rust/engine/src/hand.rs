use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn from_index(i: u32) -> Category {
        match i {
            0 => Category::HighCard,
            1 => Category::OnePair,
            2 => Category::TwoPair,
            3 => Category::ThreeOfAKind,
            4 => Category::Straight,
            5 => Category::Flush,
            6 => Category::FullHouse,
            7 => Category::FourOfAKind,
            _ => Category::StraightFlush,
        }
    }
}

/// Bits reserved below the category in a packed hand value.
const CATEGORY_SHIFT: u32 = 20;

/// Score of the weakest possible hand, and the sentinel for "nothing known".
///
/// Scores follow one convention everywhere: lower is stronger.
pub const WORST_SCORE: u32 = 9 << CATEGORY_SHIFT;

/// Exact strength of a hand. The derived ordering compares category first,
/// then kickers high to low, so `a > b` means `a` wins.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks, 0 when unused
    pub kickers: [u8; 5],
}

impl HandStrength {
    /// Category in the high bits, each kicker in a 4-bit nibble.
    pub fn packed(&self) -> u32 {
        let kick = self
            .kickers
            .iter()
            .fold(0u32, |acc, &k| (acc << 4) | u32::from(k & 0x0f));
        ((self.category as u32) << CATEGORY_SHIFT) | kick
    }

    /// Numeric score, lower = stronger.
    pub fn score(&self) -> u32 {
        WORST_SCORE - self.packed()
    }
}

/// Category a (possibly averaged) score falls into.
pub fn category_of_score(score: f64) -> Category {
    let clamped = score.clamp(0.0, WORST_SCORE as f64);
    let packed = (WORST_SCORE as f64 - clamped) as u32;
    Category::from_index(packed >> CATEGORY_SHIFT)
}

/// Ranks the best five-card hand available in `cards`.
///
/// Works on any number of cards: with fewer than five, straights and
/// flushes are impossible and missing kickers are zero, which ranks a
/// partial holding (e.g. a pocket pair) by what it already contains.
pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut suit_masks = [0u16; 4];
    let mut rank_mask = 0u16;
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        suit_masks[c.suit.index()] |= 1 << r;
        rank_mask |= 1 << r;
    }

    let flush_masks = suit_masks.iter().copied().filter(|m| m.count_ones() >= 5);

    // Straight flush
    if let Some(high) = flush_masks.clone().filter_map(straight_high).max() {
        return HandStrength {
            category: Category::StraightFlush,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    let (quads, trips, pairs) = classify_multiples(&rank_counts);

    if let Some(&quad) = quads.first() {
        let kicker = top_ranks(&rank_counts, &[quad], 1);
        return HandStrength {
            category: Category::FourOfAKind,
            kickers: [quad, kicker[0], 0, 0, 0],
        };
    }

    if let Some(&trip) = trips.first() {
        let pair = trips.get(1).copied().max(pairs.first().copied());
        if let Some(pair) = pair {
            return HandStrength {
                category: Category::FullHouse,
                kickers: [trip, pair, 0, 0, 0],
            };
        }
    }

    if let Some(kickers) = flush_masks.map(top_five_of_mask).max() {
        return HandStrength {
            category: Category::Flush,
            kickers,
        };
    }

    if let Some(high) = straight_high(rank_mask) {
        return HandStrength {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    if let Some(&trip) = trips.first() {
        let k = top_ranks(&rank_counts, &[trip], 2);
        return HandStrength {
            category: Category::ThreeOfAKind,
            kickers: [trip, k[0], k[1], 0, 0],
        };
    }

    if pairs.len() >= 2 {
        let (high, low) = (pairs[0], pairs[1]);
        // a third pair still plays as the kicker
        let k = top_ranks(&rank_counts, &[high, low], 1);
        return HandStrength {
            category: Category::TwoPair,
            kickers: [high, low, k[0], 0, 0],
        };
    }

    if let Some(&pair) = pairs.first() {
        let k = top_ranks(&rank_counts, &[pair], 3);
        return HandStrength {
            category: Category::OnePair,
            kickers: [pair, k[0], k[1], k[2], 0],
        };
    }

    let k = top_ranks(&rank_counts, &[], 5);
    HandStrength {
        category: Category::HighCard,
        kickers: [k[0], k[1], k[2], k[3], k[4]],
    }
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    a.cmp(b)
}

/// The literal best five cards out of hole + board, found by trying every
/// five-card combination. `None` when fewer than five cards are known.
pub fn best_five_card_hand(hole: &[Card; 2], board: &[Card]) -> Option<[Card; 5]> {
    let mut all: Vec<Card> = Vec::with_capacity(2 + board.len());
    all.extend_from_slice(hole);
    all.extend_from_slice(board);
    let n = all.len();
    if n < 5 {
        return None;
    }

    let mut best: Option<(HandStrength, [Card; 5])> = None;
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let five = [all[a], all[b], all[c], all[d], all[e]];
                        let strength = evaluate_hand(&five);
                        if best.as_ref().map_or(true, |(s, _)| strength > *s) {
                            best = Some((strength, five));
                        }
                    }
                }
            }
        }
    }
    best.map(|(_, mut five)| {
        five.sort_by(|x, y| y.rank.cmp(&x.rank).then(y.suit.cmp(&x.suit)));
        five
    })
}

fn straight_high(mask: u16) -> Option<u8> {
    let mut m = mask;
    // Ace also plays low
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    (5..=14u8).rev().find(|&high| {
        let window = 0b1_1111u16 << (high - 4);
        (m & window) == window
    })
}

fn top_five_of_mask(mask: u16) -> [u8; 5] {
    let mut k = [0u8; 5];
    let mut i = 0;
    for r in (2..=14u8).rev() {
        if i == 5 {
            break;
        }
        if mask & (1 << r) != 0 {
            k[i] = r;
            i += 1;
        }
    }
    k
}

/// Highest `n` distinct ranks present, skipping `exclude`, zero padded.
fn top_ranks(rank_counts: &[u8; 15], exclude: &[u8], n: usize) -> [u8; 5] {
    let mut k = [0u8; 5];
    let ranks = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0 && !exclude.contains(&r));
    for (slot, r) in k.iter_mut().take(n).zip(ranks) {
        *slot = r;
    }
    k
}

/// (quads, trips, pairs), each ordered high to low.
fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut quads = vec![];
    let mut trips = vec![];
    let mut pairs = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            0 | 1 => {}
            2 => pairs.push(r),
            3 => trips.push(r),
            _ => quads.push(r),
        }
    }
    (quads, trips, pairs)
}
