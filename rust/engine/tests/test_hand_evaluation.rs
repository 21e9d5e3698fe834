use std::cmp::Ordering;

use holdem_engine::cards::{full_deck, parse_cards, Card};
use holdem_engine::deck::Deck;
use holdem_engine::hand::{compare_hands, rank_hand, rank_players, rank_tiers, Category};

fn rank(s: &str) -> holdem_engine::hand::HandRank {
    rank_hand(&parse_cards(s).unwrap()).unwrap()
}

#[test]
fn detects_royal_flush() {
    let r = rank("AH KH QH JH 10H");
    assert_eq!(r.category, Category::RoyalFlush);
    assert_eq!(r.category.value(), 10);
}

#[test]
fn four_of_a_kind_keeps_its_kicker() {
    let r = rank("9C 9D 9H 9S 2C");
    assert_eq!(r.category, Category::FourOfAKind);
    assert_eq!(r.kickers, vec![9, 2]);
}

#[test]
fn wheel_plays_ace_low() {
    let r = rank("AC 2H 3D 4S 5H");
    assert_eq!(r.category, Category::Straight);
    assert_eq!(r.kickers, vec![5]);
    // a six-high straight beats the wheel
    assert!(compare_hands(&rank("2C 3H 4D 5S 6H"), &r).is_gt());
}

#[test]
fn two_pair_kickers_are_high_low_kicker() {
    let r = rank("2C 2D 5H 5S 9C");
    assert_eq!(r.category, Category::TwoPair);
    assert_eq!(r.kickers, vec![5, 2, 9]);
}

#[test]
fn kicker_shapes_per_category() {
    assert_eq!(rank("KC KD 7H 4S 2C").kickers, vec![13, 7, 4, 2]);
    assert_eq!(rank("8C 8D 8H KS 2C").kickers, vec![8, 13, 2]);
    assert_eq!(rank("8C 8D 8H KS KC").kickers, vec![8, 13]);
    assert_eq!(rank("2H 9H JH 4H KH").kickers, vec![13, 11, 9, 4, 2]);
    assert_eq!(rank("2H 9C JH 4D KH").kickers, vec![13, 11, 9, 4, 2]);
}

#[test]
fn category_ordering_is_correct() {
    let ladder = [
        "2C 5D 9H JS KC",
        "2C 2D 9H JS KC",
        "2C 2D 9H 9S KC",
        "2C 2D 2H JS KC",
        "5C 6D 7H 8S 9C",
        "2H 5H 9H JH KH",
        "2C 2D 2H KS KC",
        "2C 2D 2H 2S KC",
        "5C 6C 7C 8C 9C",
        "10S JS QS KS AS",
    ];
    let ranks: Vec<_> = ladder.iter().map(|h| rank(h)).collect();
    for pair in ranks.windows(2) {
        assert_eq!(compare_hands(&pair[1], &pair[0]), Ordering::Greater);
    }
}

#[test]
fn seven_card_pool_picks_best_subset() {
    // trip sevens lose to the heart flush
    let r = rank("AH 7H 7C 2H 9H KH 7D");
    assert_eq!(r.category, Category::Flush);
    assert_eq!(r.kickers, vec![14, 13, 9, 7, 2]);

    let r = rank("7H 7S 7C 2H 2D KH KD");
    assert_eq!(r.category, Category::FullHouse);
    assert_eq!(r.kickers, vec![7, 13]);
}

#[test]
fn ordering_is_total_over_random_pools() {
    let mut deck = Deck::with_seed(1, 2024);
    let mut pools: Vec<Vec<Card>> = Vec::new();
    for _ in 0..200 {
        deck.reset();
        deck.shuffle();
        pools.push(deck.draw_n(7).unwrap());
    }
    let ranks: Vec<_> = pools.iter().map(|p| rank_hand(p).unwrap()).collect();
    for a in &ranks {
        for b in &ranks {
            // antisymmetric and consistent with equality
            assert_eq!(compare_hands(a, b), compare_hands(b, a).reverse());
            assert_eq!(compare_hands(a, b) == Ordering::Equal, a == b);
        }
    }
    let mut sorted = ranks.clone();
    sorted.sort();
    for w in sorted.windows(2) {
        assert_ne!(compare_hands(&w[0], &w[1]), Ordering::Greater);
    }
}

#[test]
fn tiers_group_exact_ties() {
    let board = "2C 7D 9H JS KC";
    let pools: Vec<Vec<Card>> = ["AH 3D", "AS 4D", "QH QD", "AC 3S"]
        .iter()
        .map(|hole| parse_cards(&format!("{hole} {board}")).unwrap())
        .collect();
    let tiers = rank_tiers(&pools).unwrap();
    // queens beat every ace-high; the three ace-high hands play the same five cards
    assert_eq!(tiers, vec![vec![2], vec![0, 1, 3]]);
}

#[test]
fn round_robin_agrees_with_tiers_on_distinct_hands() {
    let board = "2C 7D 9H JS 4C";
    let pools: Vec<Vec<Card>> = ["AH KD", "QH QD", "9C 9S", "8H 10D"]
        .iter()
        .map(|hole| parse_cards(&format!("{hole} {board}")).unwrap())
        .collect();
    let order: Vec<usize> = rank_players(&pools).unwrap().into_iter().map(|(i, _)| i).collect();
    let tiers: Vec<usize> = rank_tiers(&pools).unwrap().into_iter().flatten().collect();
    assert_eq!(order, tiers);
    assert_eq!(order, vec![3, 2, 1, 0]);
}

#[test]
fn full_deck_has_no_duplicates() {
    let mut cards = full_deck();
    cards.sort();
    cards.dedup();
    assert_eq!(cards.len(), 52);
}
