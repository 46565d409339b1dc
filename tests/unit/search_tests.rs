//! Unit tests for fuzzy ranking and listing order.

use std::cmp::Ordering;

use after8_deals::models::deal::{Deal, DealMutation};
use after8_deals::store::search::{
    filter_deals, listing_order, rank_deal, rank_str, Ranking, SearchKey,
};
use chrono::{Duration, Utc};

fn deal(id: &str, title: &str, restaurant: Option<&str>) -> Deal {
    Deal::new(
        id.into(),
        Utc::now(),
        DealMutation {
            title: Some(title.into()),
            restaurant: restaurant.map(str::to_owned),
            ..DealMutation::default()
        },
    )
}

// ─── ranking ladder ──────────────────────────────────────────

#[test]
fn exact_match_is_case_sensitive_equal() {
    assert_eq!(rank_str("Beef Tacos", "Beef Tacos"), Ranking::CaseSensitiveEqual);
}

#[test]
fn case_insensitive_match_is_equal() {
    assert_eq!(rank_str("Beef Tacos", "beef tacos"), Ranking::Equal);
}

#[test]
fn prefix_is_starts_with() {
    assert_eq!(rank_str("Beef Tacos", "bee"), Ranking::StartsWith);
}

#[test]
fn later_word_prefix_is_word_starts_with() {
    assert_eq!(rank_str("Beef Tacos", "tac"), Ranking::WordStartsWith);
}

#[test]
fn infix_is_contains() {
    assert_eq!(rank_str("Beef Tacos", "aco"), Ranking::Contains);
}

#[test]
fn word_initials_are_acronym() {
    assert_eq!(rank_str("Pan-Seared Scallops", "pss"), Ranking::Acronym);
}

#[test]
fn scattered_letters_are_matches() {
    assert_eq!(rank_str("Beef Tacos", "bftc"), Ranking::Matches);
}

#[test]
fn out_of_order_letters_do_not_match() {
    assert_eq!(rank_str("Beef Tacos", "ctfb"), Ranking::NoMatch);
}

#[test]
fn query_longer_than_candidate_does_not_match() {
    assert_eq!(rank_str("Ziti", "Baked Ziti"), Ranking::NoMatch);
}

#[test]
fn single_character_must_be_contained() {
    assert_eq!(rank_str("Miso Soup", "x"), Ranking::NoMatch);
    assert_eq!(rank_str("Miso Soup", "p"), Ranking::Contains);
}

#[test]
fn accents_are_ignored_on_both_sides() {
    assert_eq!(rank_str("Café Latte", "cafe"), Ranking::StartsWith);
    assert_eq!(rank_str("Cafe Latte", "café"), Ranking::StartsWith);
    assert_eq!(rank_str("Crème Brûlée", "Creme Brulee"), Ranking::CaseSensitiveEqual);
}

#[test]
fn ladder_order_is_total() {
    assert!(Ranking::CaseSensitiveEqual > Ranking::Equal);
    assert!(Ranking::Equal > Ranking::StartsWith);
    assert!(Ranking::StartsWith > Ranking::WordStartsWith);
    assert!(Ranking::WordStartsWith > Ranking::Contains);
    assert!(Ranking::Contains > Ranking::Acronym);
    assert!(Ranking::Acronym > Ranking::Matches);
    assert!(Ranking::Matches > Ranking::NoMatch);
}

// ─── per-deal ranking ────────────────────────────────────────

#[test]
fn rank_deal_takes_best_key() {
    let d = deal("1", "Miso Soup", Some("Bite Labs"));
    let keys = [SearchKey::Title, SearchKey::Restaurant];
    assert_eq!(rank_deal(&d, "bite labs", &keys), Ranking::Equal);
}

#[test]
fn rank_deal_ignores_absent_fields() {
    let d = deal("1", "Miso Soup", None);
    assert_eq!(rank_deal(&d, "bite", &[SearchKey::Restaurant]), Ranking::NoMatch);
}

#[test]
fn filter_keeps_input_order_of_matches() {
    let deals = vec![
        deal("1", "Shrimp Tacos", None),
        deal("2", "Miso Soup", None),
        deal("3", "Beef Tacos", None),
    ];
    let kept = filter_deals(deals, "tacos", &[SearchKey::Title]);
    let ids: Vec<_> = kept.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

// ─── listing order ───────────────────────────────────────────

#[test]
fn listing_order_sorts_by_restaurant_first() {
    let a = deal("a", "x", Some("Bistro Bliss"));
    let b = deal("b", "x", Some("Taste Haven"));
    assert_eq!(listing_order(&a, &b), Ordering::Less);
    assert_eq!(listing_order(&b, &a), Ordering::Greater);
}

#[test]
fn listing_order_breaks_ties_by_older_first() {
    let mut older = deal("a", "x", Some("Bite Labs"));
    let newer = deal("b", "x", Some("Bite Labs"));
    older.created_at = newer.created_at - Duration::seconds(5);
    assert_eq!(listing_order(&older, &newer), Ordering::Less);
}

#[test]
fn listing_order_puts_missing_restaurant_last() {
    let named = deal("a", "x", Some("Taste Haven"));
    let unnamed = deal("b", "x", None);
    assert_eq!(listing_order(&named, &unnamed), Ordering::Less);
}
