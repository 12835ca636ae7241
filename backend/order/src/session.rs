//! # Session
//!
//! State owned by one page: the cart and the checkout modal. Each transition returns the next
//! session, the caller decides where it lives.
use std::sync::Arc;

use crate::{cart::Cart, checkout::Checkout, menu::MenuItem};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    cart: Cart,
    checkout: Checkout,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn checkout(&self) -> Checkout {
        self.checkout
    }

    pub fn total(&self) -> u64 {
        self.cart.total()
    }

    #[must_use]
    pub fn add(&self, item: &Arc<MenuItem>, qty: u32) -> Self {
        self.with_cart(self.cart.add(item, qty))
    }

    #[must_use]
    pub fn add_one(&self, item: &Arc<MenuItem>) -> Self {
        self.add(item, 1)
    }

    #[must_use]
    pub fn remove(&self, item_id: &str) -> Self {
        self.with_cart(self.cart.remove(item_id))
    }

    #[must_use]
    pub fn clear_cart(&self) -> Self {
        self.with_cart(self.cart.clear())
    }

    #[must_use]
    pub fn open_checkout(&self) -> Self {
        Self {
            cart: self.cart.clone(),
            checkout: self.checkout.open(),
        }
    }

    /// Hides the modal and empties the cart in one step. Does nothing while the modal is hidden.
    #[must_use]
    pub fn confirm_checkout(&self) -> Self {
        if !self.checkout.is_visible() {
            return self.clone();
        }

        Self {
            cart: self.cart.clear(),
            checkout: self.checkout.close(),
        }
    }

    #[must_use]
    pub fn close_checkout(&self) -> Self {
        Self {
            cart: self.cart.clone(),
            checkout: self.checkout.close(),
        }
    }

    fn with_cart(&self, cart: Cart) -> Self {
        Self {
            cart,
            checkout: self.checkout,
        }
    }
}
