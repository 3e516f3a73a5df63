//! Exchange - the facade owning the whole ledger state tree.
//!
//! One command is fully processed (validated, applied, settlement written)
//! before the next is accepted. All mutation happens to this process-local,
//! exclusively-owned state; a refused operation leaves every collection
//! unchanged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ExchangeError;
use crate::funds::{usable_coins, usable_fiat};
use crate::ledger::{transfer, Transaction, TransactionLog};
use crate::matching::{run_pass, Settlement};
use crate::order_book::{Order, OrderBook, Side};
use crate::ranking::top_investors;
use crate::wallet::{Wallet, WalletRegistry};
use crate::{exchange_rate, WalletId, SYSTEM_WALLET_ID};

/// Plain-record snapshot of the three entity collections - the unit of
/// persistence import and export. The file format lives in [`crate::store`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub wallets: Vec<Wallet>,
    pub transactions: Vec<Transaction>,
    pub orders: Vec<Order>,
}

/// Read-only view of one wallet for display.
#[derive(Clone, Debug, PartialEq)]
pub struct WalletSnapshot {
    pub owner: String,
    pub fiat: Decimal,
    pub coins: Decimal,
}

/// One row of the richest-investors report.
#[derive(Clone, Debug, PartialEq)]
pub struct InvestorSummary {
    pub owner: String,
    pub wallet: WalletId,
    pub coins: Decimal,
    pub executed_orders: usize,
    /// Unix timestamps of the wallet's earliest/latest transactions, absent
    /// when the wallet has never transacted
    pub first_activity: Option<i64>,
    pub last_activity: Option<i64>,
}

/// The exchange: wallet registry, transaction log and order book behind the
/// operation surface the CLI and persistence layers consume.
pub struct Exchange {
    wallets: WalletRegistry,
    ledger: TransactionLog,
    book: OrderBook,
}

impl Exchange {
    /// Create an empty exchange.
    pub fn new() -> Self {
        Self {
            wallets: WalletRegistry::new(),
            ledger: TransactionLog::new(),
            book: OrderBook::new(),
        }
    }

    /// Rebuild an exchange from persisted records.
    pub fn from_state(state: State) -> Self {
        Self {
            wallets: WalletRegistry::from_records(state.wallets),
            ledger: TransactionLog::from_records(state.transactions),
            book: OrderBook::from_records(state.orders),
        }
    }

    /// Export the entity collections as plain records.
    pub fn dump_state(&self) -> State {
        State {
            wallets: self.wallets.records().to_vec(),
            transactions: self.ledger.records().to_vec(),
            orders: self.book.records().to_vec(),
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Register a wallet and seed it with `initial_fiat / EXCHANGE_RATE`
    /// coins from the system wallet.
    ///
    /// Creation and seeding are a single atomic step: a refused seed
    /// transfer cancels the enrollment and no wallet is retained.
    pub fn create_wallet(
        &mut self,
        owner: &str,
        initial_fiat: Decimal,
    ) -> Result<WalletId, ExchangeError> {
        let id = self.wallets.create(owner, initial_fiat)?;
        let seed = initial_fiat / exchange_rate();
        if let Err(err) = transfer(&self.wallets, &mut self.ledger, SYSTEM_WALLET_ID, id, seed) {
            self.wallets.remove(id);
            return Err(err);
        }
        info!(id, owner, %initial_fiat, %seed, "wallet created");
        Ok(id)
    }

    /// Move coins between wallets. See [`crate::ledger::transfer`] for the
    /// refusal rules.
    pub fn transfer(
        &mut self,
        sender: WalletId,
        receiver: WalletId,
        amount: Decimal,
    ) -> Result<(), ExchangeError> {
        transfer(&self.wallets, &mut self.ledger, sender, receiver, amount)
    }

    /// Submit an order and immediately run the crossing pass.
    ///
    /// A buy order must fit within the wallet's usable fiat, a sell order
    /// within its usable coins - both net of the wallet's own pending
    /// orders, which prevents double-spending funds across submissions.
    /// Returns the settlements the crossing pass produced.
    pub fn submit_order(
        &mut self,
        wallet: WalletId,
        side: Side,
        quantity: Decimal,
    ) -> Result<Vec<Settlement>, ExchangeError> {
        if quantity <= Decimal::ZERO {
            return Err(ExchangeError::InvalidAmount(quantity));
        }
        let w = self
            .wallets
            .get(wallet)
            .ok_or(ExchangeError::UnknownWallet(wallet))?;
        match side {
            Side::Buy => {
                let needed = quantity * exchange_rate();
                let usable = usable_fiat(w, &self.book);
                if usable < needed {
                    return Err(ExchangeError::InsufficientFiat {
                        wallet,
                        needed,
                        usable,
                    });
                }
            }
            Side::Sell => {
                let usable = usable_coins(wallet, &self.ledger, &self.book);
                if usable < quantity {
                    return Err(ExchangeError::InsufficientCoins {
                        wallet,
                        needed: quantity,
                        available: usable,
                    });
                }
            }
        }

        self.book.push(side, wallet, quantity);
        info!(wallet, ?side, %quantity, "order accepted");
        Ok(run_pass(&mut self.book, &mut self.wallets, &mut self.ledger))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Owner, fiat and derived coin balance of one wallet.
    pub fn wallet_snapshot(&self, wallet: WalletId) -> Option<WalletSnapshot> {
        let w = self.wallets.get(wallet)?;
        Some(WalletSnapshot {
            owner: w.owner.clone(),
            fiat: w.fiat,
            coins: self.ledger.coin_balance(wallet),
        })
    }

    /// The top `n` wallets by coin balance, richest first, with their
    /// executed-order counts and activity times. Clamped to the population
    /// size.
    pub fn richest_investors(&self, n: usize) -> Vec<InvestorSummary> {
        top_investors(&self.wallets, &self.ledger, n)
            .into_iter()
            .map(|(w, coins)| InvestorSummary {
                owner: w.owner.clone(),
                wallet: w.id,
                coins,
                executed_orders: self.book.executed_count(w.id),
                first_activity: self.ledger.first_activity(w.id),
                last_activity: self.ledger.last_activity(w.id),
            })
            .collect()
    }

    /// The wallet registry (read-only).
    pub fn wallets(&self) -> &WalletRegistry {
        &self.wallets
    }

    /// The transaction log (read-only).
    pub fn ledger(&self) -> &TransactionLog {
        &self.ledger
    }

    /// The order book (read-only).
    pub fn book(&self) -> &OrderBook {
        &self.book
    }
}

impl Default for Exchange {
    fn default() -> Self {
        Self::new()
    }
}
