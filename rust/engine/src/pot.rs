//! Side-pot construction and payout.
//!
//! Pots are rebuilt from each player's total investment for the hand, so the
//! result only depends on who put in how much and who is still live.

use serde::{Deserialize, Serialize};

use crate::errors::InvariantViolation;

/// One seat's chips in the pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub seat: usize,
    pub invested: u32,
    pub folded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    /// Non-folded seats that invested at least this pot's tier
    pub eligible: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PotManager {
    pots: Vec<Pot>,
}

impl PotManager {
    /// Builds main and side pots from investment tiers.
    ///
    /// Every distinct invested amount is a tier; its pot is the tier step
    /// times the number of players who reached it, folded ones included.
    /// Only non-folded players are eligible to win. A tier nobody live
    /// reached (only folded players put that much in) is added to the pot
    /// below it, so folded chips always go to a live winner.
    pub fn from_contributions(contributions: &[Contribution]) -> Self {
        let mut tiers: Vec<u32> = contributions
            .iter()
            .map(|c| c.invested)
            .filter(|&v| v > 0)
            .collect();
        tiers.sort_unstable();
        tiers.dedup();

        let mut pots: Vec<Pot> = Vec::with_capacity(tiers.len());
        let mut prev = 0u32;
        for tier in tiers {
            let contributors = contributions.iter().filter(|c| c.invested >= tier).count() as u32;
            let amount = (tier - prev) * contributors;
            let mut eligible: Vec<usize> = contributions
                .iter()
                .filter(|c| c.invested >= tier && !c.folded)
                .map(|c| c.seat)
                .collect();
            eligible.sort_unstable();
            prev = tier;

            match pots.last_mut() {
                Some(last) if eligible.is_empty() || last.eligible == eligible => {
                    last.amount += amount
                }
                _ => pots.push(Pot { amount, eligible }),
            }
        }
        Self { pots }
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn total(&self) -> u32 {
        self.pots.iter().map(|p| p.amount).sum()
    }

    pub fn main_pot(&self) -> u32 {
        self.pots.first().map_or(0, |p| p.amount)
    }

    pub fn side_pots(&self) -> Vec<u32> {
        self.pots.iter().skip(1).map(|p| p.amount).collect()
    }

    /// Pays every pot to its winners.
    ///
    /// `winners_of` picks the winning seats among a pot's eligible seats.
    /// `order` is the odd-chip order (seats clockwise from the dealer's
    /// left): a remainder that does not split evenly goes one chip at a
    /// time to tied winners in that order.
    pub fn award<F>(
        &self,
        order: &[usize],
        mut winners_of: F,
    ) -> Result<Vec<PotAward>, InvariantViolation>
    where
        F: FnMut(&[usize]) -> Vec<usize>,
    {
        let mut awards = Vec::with_capacity(self.pots.len());
        for pot in &self.pots {
            let mut winners = winners_of(&pot.eligible);
            winners.sort_by_key(|s| order.iter().position(|o| o == s).unwrap_or(usize::MAX));
            winners.dedup();
            if winners.is_empty() {
                return Err(InvariantViolation::PayoutMismatch {
                    pot: pot.amount,
                    paid: 0,
                });
            }
            let shares = split_pot(pot.amount, &winners);
            awards.push(PotAward {
                amount: pot.amount,
                eligible: pot.eligible.clone(),
                shares,
            });
        }

        let total = self.total();
        let paid: u32 = awards
            .iter()
            .flat_map(|a| a.shares.iter())
            .map(|(_, chips)| chips)
            .sum();
        if paid != total {
            return Err(InvariantViolation::PayoutMismatch { pot: total, paid });
        }
        Ok(awards)
    }
}

/// How one pot was paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotAward {
    pub amount: u32,
    pub eligible: Vec<usize>,
    /// (seat, chips) in odd-chip order
    pub shares: Vec<(usize, u32)>,
}

/// Splits `amount` evenly; the remainder goes one chip each to the first
/// winners in the given order.
pub fn split_pot(amount: u32, winners_in_order: &[usize]) -> Vec<(usize, u32)> {
    let n = winners_in_order.len() as u32;
    if n == 0 {
        return Vec::new();
    }
    let share = amount / n;
    let remainder = (amount % n) as usize;
    winners_in_order
        .iter()
        .enumerate()
        .map(|(i, &seat)| (seat, share + u32::from(i < remainder)))
        .collect()
}

/// Seats clockwise starting left of the dealer.
pub fn odd_chip_order(dealer: usize, seats: usize) -> Vec<usize> {
    (1..=seats).map(|i| (dealer + i) % seats).collect()
}
