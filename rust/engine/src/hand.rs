use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::HandError;

/// Hand categories, weakest first. Discriminants are the category values
/// reported to players (1 = high card .. 10 = royal flush).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::OnePair => "one pair",
            Category::TwoPair => "two pairs",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
            Category::RoyalFlush => "royal flush",
        }
    }
}

/// Category plus tie-break values, ordered high -> low.
///
/// Ordering compares the category first and then the kickers
/// lexicographically, which makes `HandRank` a total order over hands.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    pub kickers: Vec<u8>,
}

impl HandRank {
    fn new(category: Category, kickers: Vec<u8>) -> Self {
        Self { category, kickers }
    }
}

pub fn compare_hands(a: &HandRank, b: &HandRank) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

/// Ranks exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    let mut values: Vec<u8> = cards.iter().map(|c| c.value()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let groups = group_by_count(&values);
    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = detect_straight_high(&values);

    if let (true, Some(high)) = (flush, straight) {
        return if high == 14 {
            HandRank::new(Category::RoyalFlush, vec![14])
        } else {
            HandRank::new(Category::StraightFlush, vec![high])
        };
    }

    let shape: Vec<u8> = groups.iter().map(|&(count, _)| count).collect();
    if shape[0] >= 4 {
        let quad = groups[0].1;
        // five of a kind only exists with several packs; the fifth card kicks
        let kicker = groups.get(1).map_or(quad, |&(_, v)| v);
        return HandRank::new(Category::FourOfAKind, vec![quad, kicker]);
    }
    if shape == [3, 2] {
        return HandRank::new(Category::FullHouse, vec![groups[0].1, groups[1].1]);
    }
    if flush {
        return HandRank::new(Category::Flush, values);
    }
    if let Some(high) = straight {
        return HandRank::new(Category::Straight, vec![high]);
    }

    let category = match shape.as_slice() {
        [3, 1, 1] => Category::ThreeOfAKind,
        [2, 2, 1] => Category::TwoPair,
        [2, 1, 1, 1] => Category::OnePair,
        _ => return HandRank::new(Category::HighCard, values),
    };
    HandRank::new(category, groups.iter().map(|&(_, v)| v).collect())
}

/// Best hand out of a 5 to 7 card pool, trying every 5-card subset.
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::hand::{rank_hand, Category};
///
/// let pool = parse_cards("AH KH QH JH 10H 2C 3D").unwrap();
/// assert_eq!(rank_hand(&pool).unwrap().category, Category::RoyalFlush);
/// ```
pub fn rank_hand(cards: &[Card]) -> Result<HandRank, HandError> {
    best_five(cards).map(|(_, rank)| rank)
}

/// The winning 5-card subset of a pool together with its rank.
pub fn best_five(cards: &[Card]) -> Result<([Card; 5], HandRank), HandError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(HandError::PoolSize(cards.len()));
    }
    let mut best: Option<([Card; 5], HandRank)> = None;
    for five in five_card_subsets(cards) {
        let rank = evaluate_five(&five);
        let better = best
            .as_ref()
            .is_none_or(|(_, current)| compare_hands(&rank, current).is_gt());
        if better {
            best = Some((five, rank));
        }
    }
    best.ok_or(HandError::PoolSize(cards.len()))
}

/// Round-robin ranking: for every unordered pair of pools the strictly
/// stronger one earns a point. Returns `(pool index, points)` with the most
/// points first; equal points keep pool order.
pub fn rank_players(pools: &[Vec<Card>]) -> Result<Vec<(usize, u32)>, HandError> {
    let ranks = pools
        .iter()
        .map(|p| rank_hand(p))
        .collect::<Result<Vec<_>, _>>()?;
    let mut points = vec![0u32; ranks.len()];
    for i in 0..ranks.len() {
        for j in (i + 1)..ranks.len() {
            match compare_hands(&ranks[i], &ranks[j]) {
                Ordering::Greater => points[i] += 1,
                Ordering::Less => points[j] += 1,
                Ordering::Equal => {}
            }
        }
    }
    let mut order: Vec<(usize, u32)> = points.into_iter().enumerate().collect();
    order.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(order)
}

/// Groups pool indices into tiers of exactly equal hands, strongest tier
/// first. Indices inside a tier stay in pool order.
pub fn rank_tiers(pools: &[Vec<Card>]) -> Result<Vec<Vec<usize>>, HandError> {
    let mut tiers: BTreeMap<HandRank, Vec<usize>> = BTreeMap::new();
    for (idx, pool) in pools.iter().enumerate() {
        tiers.entry(rank_hand(pool)?).or_default().push(idx);
    }
    Ok(tiers.into_values().rev().collect())
}

fn five_card_subsets(cards: &[Card]) -> impl Iterator<Item = [Card; 5]> + '_ {
    let n = cards.len() as u32;
    (0u32..(1 << n))
        .filter(|mask| mask.count_ones() == 5)
        .map(move |mask| {
            let mut five = [cards[0]; 5];
            let chosen = cards
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, c)| *c);
            for (slot, card) in five.iter_mut().zip(chosen) {
                *slot = card;
            }
            five
        })
}

/// `(count, value)` pairs, most frequent first, then highest value.
fn group_by_count(values_desc: &[u8]) -> Vec<(u8, u8)> {
    let mut counts = [0u8; 15];
    for &v in values_desc {
        counts[v as usize] += 1;
    }
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&v| counts[v as usize] > 0)
        .map(|v| (counts[v as usize], v))
        .collect();
    groups.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
    groups
}

/// Top value of a five-card straight, 5 for the wheel (ace plays low).
fn detect_straight_high(values_desc: &[u8]) -> Option<u8> {
    let mut v = values_desc.to_vec();
    v.dedup();
    if v.len() != 5 {
        return None;
    }
    if v[0] - v[4] == 4 {
        return Some(v[0]);
    }
    if v == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn rank(s: &str) -> HandRank {
        rank_hand(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn groups_order_by_count_then_value() {
        assert_eq!(group_by_count(&[9, 9, 5, 5, 2]), vec![(2, 9), (2, 5), (1, 2)]);
        assert_eq!(group_by_count(&[13, 4, 4, 4, 2]), vec![(3, 4), (1, 13), (1, 2)]);
    }

    #[test]
    fn wheel_is_five_high() {
        assert_eq!(detect_straight_high(&[14, 5, 4, 3, 2]), Some(5));
        assert_eq!(detect_straight_high(&[14, 13, 12, 11, 10]), Some(14));
        assert_eq!(detect_straight_high(&[14, 13, 12, 11, 9]), None);
        assert_eq!(detect_straight_high(&[6, 5, 4, 3, 3]), None);
    }

    #[test]
    fn seven_card_pool_has_21_subsets() {
        let pool = parse_cards("AH KH QH JH 10H 2C 3D").unwrap();
        assert_eq!(five_card_subsets(&pool).count(), 21);
        assert_eq!(five_card_subsets(&pool[..6]).count(), 6);
        assert_eq!(five_card_subsets(&pool[..5]).count(), 1);
    }

    #[test]
    fn pool_size_is_checked() {
        let pool = parse_cards("AH KH QH JH").unwrap();
        assert_eq!(rank_hand(&pool), Err(HandError::PoolSize(4)));
    }

    #[test]
    fn best_five_picks_the_flush_cards() {
        let pool = parse_cards("2H 7H JH QH 9H AC KD").unwrap();
        let (five, r) = best_five(&pool).unwrap();
        assert_eq!(r.category, Category::Flush);
        assert!(five.iter().all(|c| c.suit == crate::cards::Suit::Hearts));
    }

    #[test]
    fn five_of_a_kind_from_two_packs_ranks_as_quads() {
        let r = rank("9C 9D 9H 9S 9C");
        assert_eq!(r.category, Category::FourOfAKind);
        assert_eq!(r.kickers, vec![9, 9]);
    }

    #[test]
    fn steel_wheel_is_a_straight_flush() {
        let r = rank("AH 2H 3H 4H 5H");
        assert_eq!(r.category, Category::StraightFlush);
        assert_eq!(r.kickers, vec![5]);
    }
}
