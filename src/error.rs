//! Error taxonomy for exchange operations.
//!
//! Every operation is validate-then-apply: a failed validation is reported
//! as a refusal value and leaves all state unchanged. There is no retry
//! policy; callers decide whether to resubmit.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::wallet::MAX_OWNER_NAME_BYTES;
use crate::WalletId;

/// A refused exchange operation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ExchangeError {
    /// The id does not resolve to a known wallet.
    #[error("no wallet with id {0}")]
    UnknownWallet(WalletId),

    /// A buy order exceeds the wallet's usable fiat (balance net of its own
    /// pending buy orders).
    #[error("wallet {wallet} has {usable} usable fiat, order needs {needed}")]
    InsufficientFiat {
        wallet: WalletId,
        needed: Decimal,
        usable: Decimal,
    },

    /// A transfer or sell order exceeds the wallet's coins.
    #[error("wallet {wallet} has {available} coins, needs {needed}")]
    InsufficientCoins {
        wallet: WalletId,
        needed: Decimal,
        available: Decimal,
    },

    /// Owner name exceeds the storable length.
    #[error("owner name exceeds {} bytes", MAX_OWNER_NAME_BYTES)]
    NameTooLong,

    /// Negative transfer amount or non-positive order quantity.
    #[error("invalid amount: {0}")]
    InvalidAmount(Decimal),
}
