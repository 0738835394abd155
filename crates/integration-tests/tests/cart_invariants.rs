//! Aggregate invariants over randomized action sequences.
//!
//! Sequences are generated from fixed seeds so failures reproduce.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use techstore_cart::{CartAction, CartLineItem, CartStore, MemoryStorage, ProductDescriptor, ProductId};
use techstore_core::MAX_PRICE_UNITS;

const IDS: [&str; 5] = ["A", "B", "C", "D", "E"];
const PRICES: [&str; 5] = ["1000", "299.99", "0.01", "49.5", "abc"];

/// Prices and quantities at the edges of what the store accepts.
const EXTREME_PRICES: [&str; 5] = [
    "79228162514264337593543950335",
    "1e20",
    "0.12345678901234567890123",
    "999999999999.995",
    "0.004",
];
const EXTREME_QUANTITIES: [i64; 6] = [
    i64::MAX,
    i64::MIN,
    4_294_967_295,
    4_294_967_294,
    4_294_967_296,
    1_000_000_000_000,
];

fn random_action(rng: &mut StdRng) -> CartAction {
    let index = rng.random_range(0..IDS.len());
    let id = ProductId::new(IDS[index]);
    match rng.random_range(0..10) {
        0..=3 => CartAction::Add(CartLineItem::from_descriptor(&ProductDescriptor::new(
            IDS[index],
            IDS[index],
            PRICES[index],
        ))),
        4 | 5 => CartAction::SetQuantity {
            id,
            quantity: rng.random_range(-2..8),
        },
        6 => CartAction::Remove(id),
        7 | 8 => CartAction::Decrement(id),
        _ => CartAction::Clear,
    }
}

fn random_extreme_action(rng: &mut StdRng) -> CartAction {
    let index = rng.random_range(0..IDS.len());
    let id = ProductId::new(IDS[index]);
    match rng.random_range(0..8) {
        0..=2 => CartAction::Add(CartLineItem::from_descriptor(&ProductDescriptor::new(
            IDS[index],
            IDS[index],
            EXTREME_PRICES[index],
        ))),
        3..=5 => CartAction::SetQuantity {
            id,
            quantity: EXTREME_QUANTITIES[rng.random_range(0..EXTREME_QUANTITIES.len())],
        },
        6 => CartAction::Decrement(id),
        _ => CartAction::Remove(id),
    }
}

fn assert_invariants(cart: &CartStore) {
    let state = cart.state();
    let quantity: u64 = state.items().iter().map(|i| u64::from(i.quantity)).sum();
    let amount: Decimal = state.items().iter().map(CartLineItem::line_total).sum();

    assert_eq!(state.total_quantity(), quantity);
    assert_eq!(state.total_amount(), amount);
    assert!(state.total_amount() >= Decimal::ZERO);
    assert!(state.items().iter().all(|i| i.quantity >= 1));

    let mut ids: Vec<_> = state.items().iter().map(|i| i.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), state.items().len(), "duplicate line ids");
}

#[test]
fn test_aggregates_match_items_for_random_sequences() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cart = CartStore::new();
        for _ in 0..200 {
            cart.dispatch(random_action(&mut rng));
            assert_invariants(&cart);
        }
    }
}

#[test]
fn test_restored_state_matches_for_random_sequences() {
    for seed in 100..120 {
        let mut rng = StdRng::seed_from_u64(seed);
        let storage = MemoryStorage::new();
        let mut cart = CartStore::with_storage(storage.clone(), "cart");
        for _ in 0..60 {
            cart.dispatch(random_action(&mut rng));
        }

        let mut restored = CartStore::with_storage(storage, "cart");
        restored.load_persisted();
        assert_eq!(restored.state(), cart.state(), "seed {seed}");
        assert_invariants(&restored);
    }
}

#[test]
fn test_invariants_hold_at_numeric_extremes() {
    for seed in 300..330 {
        let mut rng = StdRng::seed_from_u64(seed);
        let storage = MemoryStorage::new();
        let mut cart = CartStore::with_storage(storage.clone(), "cart");
        for _ in 0..80 {
            cart.dispatch(random_extreme_action(&mut rng));
            assert_invariants(&cart);
            assert!(cart.items().iter().all(|i| i.price.amount() <= Decimal::from(MAX_PRICE_UNITS)));
        }

        let mut restored = CartStore::with_storage(storage, "cart");
        restored.load_persisted();
        assert_eq!(restored.state(), cart.state(), "seed {seed}");
    }
}

#[test]
fn test_remove_is_idempotent_for_random_states() {
    for seed in 200..220 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cart = CartStore::new();
        for _ in 0..30 {
            cart.dispatch(random_action(&mut rng));
        }

        let target = ProductId::new(IDS[rng.random_range(0..IDS.len())]);
        cart.remove_item(&target);
        let once = cart.state().clone();
        cart.remove_item(&target);
        assert_eq!(cart.state(), &once);
    }
}
