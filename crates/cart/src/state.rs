//! Cart state and the reducer that transitions it.
//!
//! Every cart mutation is a [`CartAction`] applied by [`CartState::apply`].
//! The aggregates are adjusted incrementally alongside the item list and
//! clamped at zero afterwards; a clamp that actually changes a value means the
//! bookkeeping drifted and is logged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use techstore_core::{ProductId, format_amount};

use crate::item::CartLineItem;

/// A cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of an already-normalized product. The item's own
    /// `quantity` is ignored: a new line starts at 1, an existing one grows
    /// by 1.
    Add(CartLineItem),
    /// Set a line's quantity; zero or below removes it.
    SetQuantity { id: ProductId, quantity: i64 },
    /// Remove a line regardless of its quantity.
    Remove(ProductId),
    /// Take one unit off a line, removing it at quantity 1.
    Decrement(ProductId),
    /// Empty the cart.
    Clear,
}

impl CartAction {
    /// Short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::SetQuantity { .. } => "set_quantity",
            Self::Remove(_) => "remove",
            Self::Decrement(_) => "decrement",
            Self::Clear => "clear",
        }
    }
}

/// The full cart: line items plus running totals.
///
/// Serializes to the persisted shape
/// `{ "items": [...], "totalQuantity": n, "totalAmount": x }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartLineItem>,
    total_quantity: u64,
    #[serde(with = "rust_decimal::serde::float")]
    total_amount: Decimal,
}

/// Reasons a persisted cart is rejected on restore.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCart {
    #[error("duplicate line item id: {0}")]
    DuplicateId(ProductId),
    #[error("line item {0} has zero quantity")]
    ZeroQuantity(ProductId),
    #[error("line item {0} has a negative price")]
    NegativePrice(ProductId),
    #[error("total amount is negative")]
    NegativeTotal,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Sum of all line quantities.
    #[must_use]
    pub const fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    /// Sum of all `price * quantity`.
    #[must_use]
    pub const fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line by id.
    #[must_use]
    pub fn item(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Apply an action, returning `true` if the state changed.
    ///
    /// Actions on ids that are not in the cart are no-ops.
    pub fn apply(&mut self, action: CartAction) -> bool {
        let changed = match action {
            CartAction::Add(item) => self.add(item),
            CartAction::SetQuantity { id, quantity } => self.set_quantity(&id, quantity),
            CartAction::Remove(id) => self.remove(&id),
            CartAction::Decrement(id) => self.decrement(&id),
            CartAction::Clear => self.clear(),
        };
        if changed {
            self.clamp_aggregates();
        }
        changed
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    fn add(&mut self, mut item: CartLineItem) -> bool {
        if let Some(line) = self.items.iter_mut().find(|line| line.id == item.id) {
            let Some(quantity) = line.quantity.checked_add(1) else {
                tracing::warn!(id = %line.id, "Cart line is at its maximum quantity, ignoring add");
                return false;
            };
            let Some(amount) = checked_total(self.total_amount, line.price.amount(), 1) else {
                return false;
            };
            line.quantity = quantity;
            self.total_quantity = self.total_quantity.saturating_add(1);
            self.total_amount = amount;
        } else {
            let Some(amount) = checked_total(self.total_amount, item.price.amount(), 1) else {
                return false;
            };
            // New lines always start at one unit
            item.quantity = 1;
            self.total_quantity = self.total_quantity.saturating_add(1);
            self.total_amount = amount;
            self.items.push(item);
        }
        true
    }

    fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if quantity <= 0 {
            return self.remove(id);
        }
        let Some(line) = self.items.get_mut(index) else {
            return false;
        };

        let prior = line.quantity;
        let target = u32::try_from(quantity).unwrap_or(u32::MAX);
        if target == prior {
            return false;
        }
        let price = line.price.amount();

        if target > prior {
            let delta = target - prior;
            let Some(amount) = checked_total(self.total_amount, price, delta) else {
                return false;
            };
            line.quantity = target;
            self.total_quantity = self.total_quantity.saturating_add(u64::from(delta));
            self.total_amount = amount;
        } else {
            let delta = prior - target;
            line.quantity = target;
            self.total_quantity = self.subtract_quantity(u64::from(delta));
            self.total_amount -= price.saturating_mul(Decimal::from(delta));
        }
        true
    }

    fn remove(&mut self, id: &ProductId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let line = self.items.remove(index);
        self.total_quantity = self.subtract_quantity(u64::from(line.quantity));
        self.total_amount -= line.line_total();
        true
    }

    fn decrement(&mut self, id: &ProductId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let Some(line) = self.items.get_mut(index) else {
            return false;
        };
        if line.quantity <= 1 {
            return self.remove(id);
        }
        line.quantity -= 1;
        let price = line.price.amount();
        self.total_quantity = self.subtract_quantity(1);
        self.total_amount -= price;
        true
    }

    fn clear(&mut self) -> bool {
        if self.items.is_empty() && self.total_quantity == 0 && self.total_amount.is_zero() {
            return false;
        }
        self.items.clear();
        self.total_quantity = 0;
        self.total_amount = Decimal::ZERO;
        true
    }

    fn subtract_quantity(&self, by: u64) -> u64 {
        self.total_quantity.checked_sub(by).unwrap_or_else(|| {
            tracing::warn!(
                total_quantity = self.total_quantity,
                subtract = by,
                "Cart total quantity would go negative, clamping to zero"
            );
            0
        })
    }

    fn clamp_aggregates(&mut self) {
        if self.total_amount.is_sign_negative() && !self.total_amount.is_zero() {
            tracing::warn!(
                total_amount = %format_amount(self.total_amount),
                "Cart total amount went negative, clamping to zero"
            );
            self.total_amount = Decimal::ZERO;
        }
    }

    /// Recompute both aggregates from the item list.
    ///
    /// Sums saturate rather than overflow.
    #[must_use]
    pub fn computed_totals(&self) -> (u64, Decimal) {
        self.items.iter().fold((0, Decimal::ZERO), |(qty, amount), item| {
            (
                qty.saturating_add(u64::from(item.quantity)),
                amount.saturating_add(item.line_total()),
            )
        })
    }

    /// Whether the stored aggregates match the item list.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.computed_totals() == (self.total_quantity, self.total_amount)
    }

    /// Check a deserialized cart before it is allowed to replace live state.
    ///
    /// Stored aggregates that disagree with the items are not an error: they
    /// are recomputed, since the items are the authoritative part.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCart`] if the item list breaks a line-item invariant.
    pub fn validated(mut self) -> Result<Self, InvalidCart> {
        let mut seen = std::collections::HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(&item.id) {
                return Err(InvalidCart::DuplicateId(item.id.clone()));
            }
            if item.quantity == 0 {
                return Err(InvalidCart::ZeroQuantity(item.id.clone()));
            }
            if item.price.amount().is_sign_negative() && !item.price.amount().is_zero() {
                return Err(InvalidCart::NegativePrice(item.id.clone()));
            }
        }
        if self.total_amount.is_sign_negative() && !self.total_amount.is_zero() {
            return Err(InvalidCart::NegativeTotal);
        }

        let (quantity, amount) = self.computed_totals();
        if (quantity, amount) != (self.total_quantity, self.total_amount) {
            tracing::warn!(
                stored_quantity = self.total_quantity,
                computed_quantity = quantity,
                stored_amount = %format_amount(self.total_amount),
                computed_amount = %format_amount(amount),
                "Persisted cart totals disagree with items, recomputing"
            );
            self.total_quantity = quantity;
            self.total_amount = amount;
        }
        Ok(self)
    }
}

/// `total + price * units`, or `None` (logged) if that would overflow. The
/// mutation is then dropped so the aggregates stay in step with the items.
fn checked_total(total: Decimal, price: Decimal, units: u32) -> Option<Decimal> {
    let sum = price
        .checked_mul(Decimal::from(units))
        .and_then(|added| total.checked_add(added));
    if sum.is_none() {
        tracing::warn!(
            total_amount = %format_amount(total),
            price = %format_amount(price),
            units,
            "Cart total amount would overflow, ignoring change"
        );
    }
    sum
}
