//! # GRN Exchange
//!
//! A single-process ledger and order-matching engine for a toy fiat/GRN-coin
//! exchange.
//!
//! ## Design Principles
//!
//! - **Single-Writer**: one command is fully processed before the next is
//!   accepted; the whole state tree is exclusively owned
//! - **Derived Balances**: no wallet stores a coin balance; coins are derived
//!   by replaying the append-only transaction log
//! - **Validate-Then-Apply**: refusals are `Err` values and never leave a
//!   partial write behind
//! - **Fixed Rate**: a single implicit price (375 fiat per coin) everywhere
//!   fiat and coins are converted, so matching needs no price discovery
//!
//! ## Architecture
//!
//! ```text
//! [CLI] --> [Exchange] --> [WalletRegistry]  (fiat balances)
//!               |          [TransactionLog]  (derived coin balances)
//!               |          [OrderBook]       (pending orders, reservations)
//!               +--> crossing pass --> settlements
//! ```

use rust_decimal::Decimal;

pub mod command;
pub mod engine;
pub mod error;
pub mod funds;
pub mod ledger;
pub mod matching;
pub mod order_book;
pub mod ranking;
pub mod report;
pub mod store;
pub mod wallet;

// Re-exports for convenience
pub use command::{Command, ParseError};
pub use engine::{Exchange, InvestorSummary, State, WalletSnapshot};
pub use error::ExchangeError;
pub use ledger::{Transaction, TransactionLog};
pub use matching::Settlement;
pub use order_book::{Order, OrderBook, Side};
pub use wallet::{Wallet, WalletRegistry};

/// Wallet identifier. Ids are drawn uniformly from the 32-bit space.
pub type WalletId = u32;

/// Sentinel id of the implicit issuing wallet with unlimited coins, used only
/// as the source of seed issuance on wallet creation. The id generator never
/// assigns it, keeping it outside the normal id space.
pub const SYSTEM_WALLET_ID: WalletId = WalletId::MAX;

/// Fixed exchange rate: fiat units per GRN coin.
pub const EXCHANGE_RATE: u32 = 375;

/// The exchange rate as a decimal, for settlement math.
#[inline]
pub fn exchange_rate() -> Decimal {
    Decimal::from(EXCHANGE_RATE)
}
