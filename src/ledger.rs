//! Transaction log - append-only sequence of settled coin transfers.
//!
//! The log is the sole source of truth for coin balances: a wallet's coins
//! are the sum of amounts received minus amounts sent, computed by replaying
//! the whole log. O(n) per query, acceptable for the in-memory single-session
//! scope.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ExchangeError;
use crate::wallet::WalletRegistry;
use crate::{WalletId, SYSTEM_WALLET_ID};

/// A settled coin transfer. Immutable once appended.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unix timestamp (seconds) at settlement time
    pub timestamp: i64,
    pub sender: WalletId,
    pub receiver: WalletId,
    /// Transferred GRN coins (non-negative)
    pub amount: Decimal,
}

/// Exclusive owner of the transaction records. Grow-only for the session.
pub struct TransactionLog {
    transactions: Vec<Transaction>,
}

impl TransactionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
        }
    }

    /// Rebuild a log from persisted records.
    pub fn from_records(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// The transaction records in settlement order.
    pub fn records(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of settled transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the log holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Append a settled transfer, stamped with the current wall clock.
    ///
    /// Trusts the caller to have validated funds and wallet existence; see
    /// [`transfer`] for the validating entry point.
    pub fn append(&mut self, sender: WalletId, receiver: WalletId, amount: Decimal) {
        let transaction = Transaction {
            timestamp: Utc::now().timestamp(),
            sender,
            receiver,
            amount,
        };
        debug!(sender, receiver, %amount, "transaction appended");
        self.transactions.push(transaction);
    }

    /// Derive a wallet's coin balance by replaying the whole log: amounts
    /// received minus amounts sent. A self-transfer appears on both sides
    /// and nets to zero.
    pub fn coin_balance(&self, wallet: WalletId) -> Decimal {
        let mut balance = Decimal::ZERO;
        for t in &self.transactions {
            if t.sender == wallet {
                balance -= t.amount;
            }
            if t.receiver == wallet {
                balance += t.amount;
            }
        }
        balance
    }

    /// Timestamp of the earliest transaction touching the wallet.
    pub fn first_activity(&self, wallet: WalletId) -> Option<i64> {
        self.transactions
            .iter()
            .find(|t| t.sender == wallet || t.receiver == wallet)
            .map(|t| t.timestamp)
    }

    /// Timestamp of the latest transaction touching the wallet.
    pub fn last_activity(&self, wallet: WalletId) -> Option<i64> {
        self.transactions
            .iter()
            .rev()
            .find(|t| t.sender == wallet || t.receiver == wallet)
            .map(|t| t.timestamp)
    }
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Validated coin transfer between wallets.
///
/// Refused if the receiver is unknown, if the sender is unknown (unless it
/// is the system wallet, which bypasses existence and balance checks), if
/// the amount is negative, or if the sender's coin balance cannot cover the
/// amount. The amount moves exactly or not at all; a refusal leaves the log
/// untouched.
pub fn transfer(
    wallets: &WalletRegistry,
    ledger: &mut TransactionLog,
    sender: WalletId,
    receiver: WalletId,
    amount: Decimal,
) -> Result<(), ExchangeError> {
    if amount < Decimal::ZERO {
        return Err(ExchangeError::InvalidAmount(amount));
    }
    if !wallets.contains(receiver) {
        return Err(ExchangeError::UnknownWallet(receiver));
    }
    if sender != SYSTEM_WALLET_ID {
        if !wallets.contains(sender) {
            return Err(ExchangeError::UnknownWallet(sender));
        }
        let available = ledger.coin_balance(sender);
        if available < amount {
            return Err(ExchangeError::InsufficientCoins {
                wallet: sender,
                needed: amount,
                available,
            });
        }
    }
    ledger.append(sender, receiver, amount);
    Ok(())
}
