//! # Cart
//!
//! Value type. Every operation hands back a new cart and leaves the old one alone, so callers can
//! keep the previous value around for undo or to diff renders.
//!
//! ## Invariants
//! - At most one line per item id
//! - Quantity is never zero, a line that would hit zero is dropped
//! - Lines keep first-add order
//! - Total is always derived from the lines, never stored
use std::sync::Arc;

use serde::Serialize;

use crate::menu::MenuItem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    item: Arc<MenuItem>,
    qty: u32,
}

impl CartLine {
    pub fn item(&self) -> &Arc<MenuItem> {
        &self.item
    }

    pub fn qty(&self) -> u32 {
        self.qty
    }

    pub fn subtotal(&self) -> u64 {
        u64::from(self.item.price) * u64::from(self.qty)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumps the line for `item.id` by `qty`, or appends one. Adding zero changes nothing.
    #[must_use]
    pub fn add(&self, item: &Arc<MenuItem>, qty: u32) -> Self {
        if qty == 0 {
            return self.clone();
        }

        let mut lines = self.lines.clone();

        match lines.iter_mut().find(|line| line.item.id == item.id) {
            Some(line) => line.qty = line.qty.saturating_add(qty),
            None => lines.push(CartLine {
                item: Arc::clone(item),
                qty,
            }),
        }

        Self { lines }
    }

    #[must_use]
    pub fn add_one(&self, item: &Arc<MenuItem>) -> Self {
        self.add(item, 1)
    }

    /// Takes one off the line for `item_id`. The last one removes the line. Unknown ids are ignored.
    #[must_use]
    pub fn remove(&self, item_id: &str) -> Self {
        let lines = self
            .lines
            .iter()
            .filter_map(|line| {
                if line.item.id != item_id {
                    return Some(line.clone());
                }

                (line.qty > 1).then(|| CartLine {
                    item: Arc::clone(&line.item),
                    qty: line.qty - 1,
                })
            })
            .collect();

        Self { lines }
    }

    #[must_use]
    pub fn clear(&self) -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, item_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id == item_id)
    }

    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.line(item_id).map_or(0, CartLine::qty)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
