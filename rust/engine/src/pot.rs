//! Showdown payouts with all-in capping.
//!
//! Tiers are paid strongest first. A winner can only take from each player
//! as much as the winners of its tier committed, so a short all-in wins a
//! capped share and the rest flows down to the next tier.

/// Payout of one hand, indexed by seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// Points credited to each seat, refunds included
    pub returns: Vec<u32>,
    /// Part of `returns` that no tier could claim and went back to its owner
    pub refunded: Vec<u32>,
}

impl Settlement {
    pub fn total(&self) -> u64 {
        self.returns.iter().map(|&r| r as u64).sum()
    }
}

/// Distributes `committed` (per seat, folded seats included) over `tiers`
/// of seat indices, strongest tier first.
///
/// Within a tier each winner receives a share of the tier's take
/// proportional to its own commitment, rounded down; the rounding
/// remainder goes to the first seat listed in the tier. Points no tier can
/// claim are refunded, so the returns always add up to the commitments.
///
/// ```
/// use holdem_engine::pot::settle;
///
/// // seat 0 is all-in for 100 and wins; seat 1 had 500 in and is second best
/// let s = settle(&[100, 500], &[vec![0], vec![1]]);
/// assert_eq!(s.returns, vec![200, 400]);
/// ```
pub fn settle(committed: &[u32], tiers: &[Vec<usize>]) -> Settlement {
    let mut remaining: Vec<u64> = committed.iter().map(|&c| c as u64).collect();
    let mut returns = vec![0u64; committed.len()];

    for tier in tiers {
        if remaining.iter().all(|&r| r == 0) {
            break;
        }
        let tier_total: u64 = tier.iter().map(|&i| committed[i] as u64).sum();
        if tier_total == 0 {
            continue;
        }
        let mut awarded = 0u64;
        for r in remaining.iter_mut() {
            let take = (*r).min(tier_total);
            *r -= take;
            awarded += take;
        }
        let mut paid = 0u64;
        for &w in tier {
            let share = awarded * committed[w] as u64 / tier_total;
            returns[w] += share;
            paid += share;
        }
        if let Some(&first) = tier.first() {
            returns[first] += awarded - paid;
        }
    }

    for (ret, left) in returns.iter_mut().zip(&remaining) {
        *ret += left;
    }
    Settlement {
        returns: returns.into_iter().map(clamp).collect(),
        refunded: remaining.into_iter().map(clamp).collect(),
    }
}

fn clamp(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_winner_takes_everything() {
        let s = settle(&[50, 50, 20], &[vec![1], vec![0]]);
        assert_eq!(s.returns, vec![0, 120, 0]);
        assert_eq!(s.total(), 120);
    }

    #[test]
    fn equal_split_between_tied_winners() {
        let s = settle(&[40, 40, 40], &[vec![0, 2], vec![1]]);
        assert_eq!(s.returns, vec![60, 0, 60]);
    }

    #[test]
    fn odd_chip_goes_to_first_listed_winner() {
        let s = settle(&[3, 3, 1], &[vec![0, 1], vec![2]]);
        assert_eq!(s.returns, vec![4, 3, 0]);
    }

    #[test]
    fn all_in_winner_is_capped() {
        // seat 0 all-in for 100 wins, seats 1 and 2 put in 300 each
        let s = settle(&[100, 300, 300], &[vec![0], vec![2], vec![1]]);
        assert_eq!(s.returns, vec![300, 0, 400]);
        assert_eq!(s.total(), 700);
    }

    #[test]
    fn unclaimed_points_are_refunded() {
        // the only contender committed 10; a folded seat left 50 in
        let s = settle(&[10, 50], &[vec![0]]);
        assert_eq!(s.returns, vec![20, 40]);
        assert_eq!(s.refunded, vec![0, 40]);
    }

    #[test]
    fn zero_commitment_tier_is_skipped() {
        let s = settle(&[0, 10, 10], &[vec![0], vec![1], vec![2]]);
        assert_eq!(s.returns, vec![0, 20, 0]);
    }
}
