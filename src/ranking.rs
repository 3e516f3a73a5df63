//! Investor ranking - the richest wallets by derived coin balance.

use rust_decimal::Decimal;

use crate::ledger::TransactionLog;
use crate::wallet::{Wallet, WalletRegistry};

/// Select the top `n` wallets by coin balance, descending.
///
/// Read-only: derives every balance once, then stable-sorts a scratch
/// vector, so ties keep their wallet-creation encounter order. Asking for
/// more wallets than exist returns the whole population.
pub fn top_investors<'a>(
    wallets: &'a WalletRegistry,
    ledger: &TransactionLog,
    n: usize,
) -> Vec<(&'a Wallet, Decimal)> {
    let mut ranked: Vec<(&Wallet, Decimal)> = wallets
        .iter()
        .map(|w| (w, ledger.coin_balance(w.id)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}
