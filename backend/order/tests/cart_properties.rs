use std::sync::Arc;

use order::{Cart, MenuItem, Session, static_menu};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Action {
    Add(usize, u32),
    Remove(usize),
    Clear,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0..8usize, 1..5u32).prop_map(|(item, qty)| Action::Add(item, qty)),
        4 => (0..9usize).prop_map(Action::Remove),
        1 => Just(Action::Clear),
    ]
}

fn apply(cart: &Cart, action: &Action) -> Cart {
    let menu = static_menu();

    match action {
        Action::Add(index, qty) => cart.add(&menu.items()[*index], *qty),
        // index 8 is an id that is not on the menu
        Action::Remove(index) => match menu.items().get(*index) {
            Some(item) => cart.remove(&item.id),
            None => cart.remove("not-on-menu"),
        },
        Action::Clear => cart.clear(),
    }
}

fn expected_total(cart: &Cart) -> u64 {
    cart.lines()
        .iter()
        .map(|line| u64::from(line.item().price) * u64::from(line.qty()))
        .sum()
}

proptest! {
    #[test]
    fn prop_lines_stay_positive_and_unique(actions in prop::collection::vec(action(), 0..64)) {
        let mut cart = Cart::new();

        for action in &actions {
            cart = apply(&cart, action);

            prop_assert!(cart.lines().iter().all(|line| line.qty() >= 1));

            for (i, line) in cart.lines().iter().enumerate() {
                prop_assert!(cart.lines()[i + 1..].iter().all(|other| other.item().id != line.item().id));
            }

            prop_assert_eq!(cart.total(), expected_total(&cart));
        }
    }

    #[test]
    fn prop_add_then_remove_restores(
        actions in prop::collection::vec(action(), 0..32),
        index in 0..8usize,
        n in 1..10u32,
    ) {
        let mut before = Cart::new();
        for action in &actions {
            before = apply(&before, action);
        }

        let item = Arc::clone(&static_menu().items()[index]);
        let mut cart = before.add(&item, n);
        for _ in 0..n {
            cart = cart.remove(&item.id);
        }

        prop_assert_eq!(cart, before);
    }

    #[test]
    fn prop_clear_zeroes(actions in prop::collection::vec(action(), 0..32)) {
        let mut cart = Cart::new();
        for action in &actions {
            cart = apply(&cart, action);
        }

        let cleared = cart.clear();
        prop_assert_eq!(cleared.total(), 0);
        prop_assert!(cleared.is_empty());
    }

    #[test]
    fn prop_checkout_open_close_keep_cart(actions in prop::collection::vec(action(), 0..32)) {
        let mut cart = Cart::new();
        for action in &actions {
            cart = apply(&cart, action);
        }

        let mut session = Session::new();
        for line in cart.lines() {
            session = session.add(line.item(), line.qty());
        }

        let opened = session.open_checkout();
        prop_assert_eq!(opened.cart(), session.cart());
        let closed = opened.close_checkout();
        prop_assert_eq!(closed.cart(), session.cart());

        let confirmed = opened.confirm_checkout();
        prop_assert!(confirmed.cart().is_empty());
        prop_assert!(!confirmed.checkout().is_visible());
    }
}

#[test]
fn test_add_single_item_by_value() {
    let item = Arc::new(MenuItem::new("momo", "モモ", 180));
    let cart = Cart::new().add(&item, 2);

    assert_eq!(cart.lines()[0].subtotal(), 360);
}
