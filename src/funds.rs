//! Usable-balance accounting.
//!
//! Pending orders reserve funds before they execute. A wallet's usable
//! balance is its raw balance minus everything already promised to that
//! wallet's own unexecuted orders - and only that wallet's: reservations
//! never leak across wallets.

use rust_decimal::Decimal;

use crate::ledger::TransactionLog;
use crate::order_book::{OrderBook, Side};
use crate::wallet::Wallet;
use crate::{exchange_rate, WalletId};

/// Fiat the wallet can still commit to new buy orders: raw fiat balance
/// minus the fiat value of its unexecuted buy orders.
pub fn usable_fiat(wallet: &Wallet, book: &OrderBook) -> Decimal {
    wallet.fiat - book.reserved_coins(wallet.id, Side::Buy) * exchange_rate()
}

/// Coins the wallet can still commit to new sell orders: derived coin
/// balance minus the quantity of its unexecuted sell orders.
pub fn usable_coins(wallet: WalletId, ledger: &TransactionLog, book: &OrderBook) -> Decimal {
    ledger.coin_balance(wallet) - book.reserved_coins(wallet, Side::Sell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SYSTEM_WALLET_ID;
    use rust_decimal_macros::dec;

    fn wallet(id: WalletId, fiat: Decimal) -> Wallet {
        Wallet {
            id,
            owner: format!("w{id}"),
            fiat,
        }
    }

    #[test]
    fn test_no_pending_orders_equals_raw_balances() {
        let book = OrderBook::new();
        let mut ledger = TransactionLog::new();
        ledger.append(SYSTEM_WALLET_ID, 1, dec!(10));
        let w = wallet(1, dec!(3750));

        assert_eq!(usable_fiat(&w, &book), dec!(3750));
        assert_eq!(usable_coins(1, &ledger, &book), dec!(10));
    }

    #[test]
    fn test_buy_orders_reserve_fiat() {
        let mut book = OrderBook::new();
        book.push(Side::Buy, 1, dec!(2)); // reserves 2 * 375 = 750
        book.push(Side::Buy, 1, dec!(1)); // reserves 375
        let w = wallet(1, dec!(3750));

        assert_eq!(usable_fiat(&w, &book), dec!(2625));
    }

    #[test]
    fn test_sell_orders_reserve_coins() {
        let mut book = OrderBook::new();
        book.push(Side::Sell, 1, dec!(4));
        let mut ledger = TransactionLog::new();
        ledger.append(SYSTEM_WALLET_ID, 1, dec!(10));

        assert_eq!(usable_coins(1, &ledger, &book), dec!(6));
    }

    #[test]
    fn test_reservations_are_scoped_to_the_wallet() {
        let mut book = OrderBook::new();
        book.push(Side::Buy, 2, dec!(100));
        book.push(Side::Sell, 2, dec!(100));
        let mut ledger = TransactionLog::new();
        ledger.append(SYSTEM_WALLET_ID, 1, dec!(10));
        let w = wallet(1, dec!(3750));

        // Wallet 2's pending orders must not encumber wallet 1.
        assert_eq!(usable_fiat(&w, &book), dec!(3750));
        assert_eq!(usable_coins(1, &ledger, &book), dec!(10));
    }

    #[test]
    fn test_executed_orders_release_reservations() {
        let mut book = OrderBook::new();
        book.push(Side::Sell, 1, dec!(4));
        book.push(Side::Buy, 1, dec!(2));
        book.mark_executed(0);
        book.mark_executed(1);
        let mut ledger = TransactionLog::new();
        ledger.append(SYSTEM_WALLET_ID, 1, dec!(10));
        let w = wallet(1, dec!(3750));

        assert_eq!(usable_fiat(&w, &book), dec!(3750));
        assert_eq!(usable_coins(1, &ledger, &book), dec!(10));
    }
}
