//! Order book - the exclusive owner of submitted orders.
//!
//! The book is an append-only list in submission order: orders are never
//! removed, quantities are never reduced, and the executed flag of each
//! order flips to true exactly once, when the order fully crosses against a
//! counter-order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::WalletId;

/// Order side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy GRN coins for fiat
    Buy,
    /// Sell GRN coins for fiat
    Sell,
}

impl Side {
    /// Returns the opposite side
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// A submitted order.
///
/// `quantity` is the full order size and is never drawn down: an order
/// either fully executes in one cross or stays in the book unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub side: Side,
    pub wallet: WalletId,
    /// GRN coins (positive)
    pub quantity: Decimal,
    pub executed: bool,
}

/// Owns the sequence of submitted orders and their executed flags.
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Rebuild a book from persisted records, executed flags included.
    pub fn from_records(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// The order records in submission order.
    pub fn records(&self) -> &[Order] {
        &self.orders
    }

    /// Append a new unexecuted order. Validation is the submitter's step;
    /// see [`Exchange::submit_order`](crate::Exchange::submit_order).
    pub fn push(&mut self, side: Side, wallet: WalletId, quantity: Decimal) {
        self.orders.push(Order {
            side,
            wallet,
            quantity,
            executed: false,
        });
    }

    /// Number of orders ever submitted.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the book holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// The order at submission index `i`.
    #[inline]
    pub fn order(&self, i: usize) -> &Order {
        &self.orders[i]
    }

    /// Flip an order's executed flag. Called once per order, by the
    /// crossing pass.
    pub(crate) fn mark_executed(&mut self, i: usize) {
        self.orders[i].executed = true;
    }

    // ========================================================================
    // Reservation queries
    // ========================================================================

    /// Coins promised to the wallet's own unexecuted orders of one side.
    ///
    /// For buy orders the reservation is in coins here; the fiat reservation
    /// is this sum times the exchange rate (see [`crate::funds`]).
    pub fn reserved_coins(&self, wallet: WalletId, side: Side) -> Decimal {
        self.orders
            .iter()
            .filter(|o| o.wallet == wallet && o.side == side && !o.executed)
            .map(|o| o.quantity)
            .sum()
    }

    /// Number of executed orders owned by the wallet.
    pub fn executed_count(&self, wallet: WalletId) -> usize {
        self.orders
            .iter()
            .filter(|o| o.wallet == wallet && o.executed)
            .count()
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OrderBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let open = self.orders.iter().filter(|o| !o.executed).count();
        f.debug_struct("OrderBook")
            .field("orders", &self.orders.len())
            .field("open", &open)
            .finish()
    }
}
