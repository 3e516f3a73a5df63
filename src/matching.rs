//! Crossing pass - matches buy orders against sell orders and settles.
//!
//! Matching is index-order, not price-priority: every cross settles at the
//! single fixed exchange rate, so no price discovery is needed. The pass
//! re-runs over the entire order list after every accepted submission,
//! bounding each submission's matching cost at O(n²).

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::ledger::{transfer, TransactionLog};
use crate::order_book::{OrderBook, Side};
use crate::wallet::WalletRegistry;
use crate::{exchange_rate, WalletId};

/// One settled crossing event: coins moved seller to buyer, fiat buyer to
/// seller, atomically with the ledger transaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settlement {
    pub buyer: WalletId,
    pub seller: WalletId,
    /// Settled GRN coins: the smaller of the two order quantities
    pub coins: Decimal,
    /// Settled fiat: `coins` times the exchange rate
    pub fiat: Decimal,
}

/// Run the crossing pass over the whole book.
///
/// For each unexecuted order in submission order, later unexecuted
/// counter-orders are tried in submission order. A cross settles the
/// smaller quantity; the smaller order is marked executed (both orders on a
/// tie) and the larger order keeps its original quantity, staying eligible
/// for later crosses. The inner scan stops as soon as the outer order has
/// executed, so no order is ever consumed by more than one settlement.
pub fn run_pass(
    book: &mut OrderBook,
    wallets: &mut WalletRegistry,
    ledger: &mut TransactionLog,
) -> Vec<Settlement> {
    let mut settlements = Vec::new();
    let count = book.len();

    for i in 0..count {
        if book.order(i).executed {
            continue;
        }
        let counter_side = book.order(i).side.opposite();

        for j in (i + 1)..count {
            if book.order(i).executed {
                break;
            }
            let candidate = book.order(j);
            if candidate.executed || candidate.side != counter_side {
                continue;
            }
            if let Some(settlement) = try_cross(book, wallets, ledger, i, j) {
                settlements.push(settlement);
            }
        }
    }

    settlements
}

/// Attempt to settle the pair at indexes `i` (outer) and `j` (inner).
///
/// Returns `None` without touching any state if the settlement transfer is
/// refused - a pending sell's coins can have been drained by a manual
/// transfer after the order reserved them.
fn try_cross(
    book: &mut OrderBook,
    wallets: &mut WalletRegistry,
    ledger: &mut TransactionLog,
    i: usize,
    j: usize,
) -> Option<Settlement> {
    let (buy_idx, sell_idx) = match book.order(i).side {
        Side::Buy => (i, j),
        Side::Sell => (j, i),
    };
    let buyer = book.order(buy_idx).wallet;
    let seller = book.order(sell_idx).wallet;
    let buy_qty = book.order(buy_idx).quantity;
    let sell_qty = book.order(sell_idx).quantity;
    let coins = buy_qty.min(sell_qty);

    if let Err(err) = transfer(wallets, ledger, seller, buyer, coins) {
        warn!(seller, buyer, %coins, %err, "cross skipped: settlement transfer refused");
        return None;
    }

    let fiat = coins * exchange_rate();
    // Both wallets were validated at submission and are never removed.
    wallets.adjust_fiat(buyer, -fiat).unwrap();
    wallets.adjust_fiat(seller, fiat).unwrap();

    if sell_qty <= buy_qty {
        book.mark_executed(sell_idx);
    }
    if buy_qty <= sell_qty {
        book.mark_executed(buy_idx);
    }

    info!(buyer, seller, %coins, %fiat, "cross settled");
    Some(Settlement {
        buyer,
        seller,
        coins,
        fiat,
    })
}
