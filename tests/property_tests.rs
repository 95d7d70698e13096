//! Property-based tests for the fixture grammar
//!
//! These use proptest to verify the grammar's round-trip contract across
//! many randomly generated values, catching edge cases that hand-written
//! tests might miss.

use cph::TypeTag;
use cph::grammar::{self, Value};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Strings that can appear inside fixture quotes. `=` is excluded because a
/// bare line treats the first `=` as an assignment separator, and quote
/// characters are excluded because items are stored quoted.
fn fixture_str_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.,:+-]{0,24}"
}

fn tree_cells_strategy() -> impl Strategy<Value = Vec<Option<i64>>> {
    prop::collection::vec(prop::option::of(-1000i64..1000), 0..16)
}

fn matrix_strategy() -> impl Strategy<Value = Vec<Vec<i64>>> {
    prop::collection::vec(prop::collection::vec(any::<i64>(), 0..6), 0..6)
}

// =============================================================================
// Round-Trip Properties
// =============================================================================

proptest! {
    /// Property: decode(encode(v)) == v for every supported value shape
    #[test]
    fn int_round_trips(v in any::<i64>()) {
        let value = Value::Int(v);
        let decoded = grammar::decode(&grammar::encode(&value), &TypeTag::Int).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn bool_round_trips(v in any::<bool>()) {
        let value = Value::Bool(v);
        let decoded = grammar::decode(&grammar::encode(&value), &TypeTag::Bool).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn char_round_trips(v in proptest::char::range('0', 'z')) {
        prop_assume!(v != '=');
        let value = Value::Char(v);
        let decoded = grammar::decode(&grammar::encode(&value), &TypeTag::Char).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn str_round_trips(v in fixture_str_strategy()) {
        let value = Value::Str(v);
        let decoded = grammar::decode(&grammar::encode(&value), &TypeTag::Str).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn int_list_round_trips(items in prop::collection::vec(any::<i64>(), 0..32)) {
        let value = Value::IntList(items);
        let decoded = grammar::decode(&grammar::encode(&value), &TypeTag::IntList).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn str_list_round_trips(items in prop::collection::vec(fixture_str_strategy(), 0..8)) {
        let value = Value::StrList(items);
        let decoded = grammar::decode(&grammar::encode(&value), &TypeTag::StrList).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn matrix_round_trips(rows in matrix_strategy()) {
        let value = Value::IntMatrix(rows);
        let decoded = grammar::decode(&grammar::encode(&value), &TypeTag::IntMatrix).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn tree_round_trips(cells in tree_cells_strategy()) {
        let value = Value::Tree(cells);
        let decoded = grammar::decode(&grammar::encode(&value), &TypeTag::Tree).unwrap();
        prop_assert_eq!(decoded, value);
    }

    /// Property: a linked list shares the flat integer-sequence form, so an
    /// encoded IntList decodes identically under the LinkedList tag.
    #[test]
    fn linked_list_shares_int_list_form(items in prop::collection::vec(any::<i64>(), 0..16)) {
        let value = Value::IntList(items);
        let decoded = grammar::decode(&grammar::encode(&value), &TypeTag::LinkedList).unwrap();
        prop_assert_eq!(decoded, value);
    }
}

// =============================================================================
// Normalization Properties
// =============================================================================

proptest! {
    /// Property: encode(decode(s)) == normalize(s) for noisy list text,
    /// whatever spacing or assignment prefix the scraped fixture carried.
    #[test]
    fn noisy_list_text_canonicalizes(
        items in prop::collection::vec(-10_000i64..10_000, 0..12),
        name in "[a-z][a-z0-9]{0,6}",
        spaced in any::<bool>(),
    ) {
        let sep = if spaced { ", " } else { "," };
        let body: Vec<String> = items.iter().map(|v| v.to_string()).collect();
        let raw = format!("{} = [{}]", name, body.join(sep));

        let decoded = grammar::decode(&raw, &TypeTag::IntList).unwrap();
        prop_assert_eq!(grammar::encode(&decoded), grammar::normalize(&raw));
    }

    /// Property: normalize is idempotent
    #[test]
    fn normalize_is_idempotent(
        items in prop::collection::vec(any::<i64>(), 0..12),
        spaced in any::<bool>(),
    ) {
        let sep = if spaced { ",  " } else { "," };
        let body: Vec<String> = items.iter().map(|v| v.to_string()).collect();
        let raw = format!("[ {} ]", body.join(sep));

        let once = grammar::normalize(&raw);
        prop_assert_eq!(grammar::normalize(&once), once);
    }

    /// Property: encoded canonical text is already normalized
    #[test]
    fn encoded_text_is_normal_form(items in prop::collection::vec(any::<i64>(), 0..12)) {
        let encoded = grammar::encode(&Value::IntList(items));
        prop_assert_eq!(grammar::normalize(&encoded), encoded);
    }
}
