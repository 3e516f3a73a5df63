//! Wallet registry - the exclusive owner of all wallet records.
//!
//! A wallet holds its owner name and a fiat balance only. Coin holdings are
//! never stored; they are derived from the transaction log by replay.
//! Maintains an id -> index map for O(1) lookup.

use rand::Rng;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ExchangeError;
use crate::{WalletId, SYSTEM_WALLET_ID};

/// Longest owner name the registry accepts, in bytes.
pub const MAX_OWNER_NAME_BYTES: usize = 255;

/// A participant's wallet.
///
/// `id` is immutable once assigned; `fiat` is mutated only by order
/// settlement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,
    pub owner: String,
    pub fiat: Decimal,
}

/// Owns the set of wallets. Append-only for the session: wallets are never
/// removed once their creation has fully succeeded.
pub struct WalletRegistry {
    wallets: Vec<Wallet>,
    /// WalletId -> index into `wallets`
    index: FxHashMap<WalletId, usize>,
}

impl WalletRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            wallets: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Rebuild a registry from persisted records.
    pub fn from_records(wallets: Vec<Wallet>) -> Self {
        let index = wallets
            .iter()
            .enumerate()
            .map(|(i, w)| (w.id, i))
            .collect();
        Self { wallets, index }
    }

    /// The wallet records in creation order.
    pub fn records(&self) -> &[Wallet] {
        &self.wallets
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Register a new wallet with the given fiat balance.
    ///
    /// Rejects owner names longer than [`MAX_OWNER_NAME_BYTES`]. The id is a
    /// fresh uniform random u32, redrawn on collision and on the system
    /// sentinel. The seed coin issuance is the caller's step; see
    /// [`Exchange::create_wallet`](crate::Exchange::create_wallet).
    pub fn create(&mut self, owner: &str, fiat: Decimal) -> Result<WalletId, ExchangeError> {
        if owner.len() > MAX_OWNER_NAME_BYTES {
            return Err(ExchangeError::NameTooLong);
        }
        let id = self.generate_id();
        self.index.insert(id, self.wallets.len());
        self.wallets.push(Wallet {
            id,
            owner: owner.to_string(),
            fiat,
        });
        Ok(id)
    }

    /// Draw a registry-unique random id. Collisions are recovered here by
    /// redrawing, so they never surface to callers.
    fn generate_id(&self) -> WalletId {
        let mut rng = rand::thread_rng();
        loop {
            let id: WalletId = rng.gen();
            if id != SYSTEM_WALLET_ID && !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    /// Roll back a wallet whose creation could not be completed.
    ///
    /// Only valid for a record that has not been observed outside the
    /// creation step.
    pub(crate) fn remove(&mut self, id: WalletId) {
        if let Some(idx) = self.index.remove(&id) {
            self.wallets.remove(idx);
            for (i, w) in self.wallets.iter().enumerate().skip(idx) {
                self.index.insert(w.id, i);
            }
        }
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Look up a wallet by id.
    #[inline]
    pub fn get(&self, id: WalletId) -> Option<&Wallet> {
        self.index.get(&id).map(|&i| &self.wallets[i])
    }

    /// Check whether an id resolves to a known wallet.
    #[inline]
    pub fn contains(&self, id: WalletId) -> bool {
        self.index.contains_key(&id)
    }

    /// Iterate wallets in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Wallet> {
        self.wallets.iter()
    }

    /// Number of registered wallets.
    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    /// Whether the registry holds no wallets.
    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Apply a fiat delta to a wallet. Used only by order settlement.
    pub fn adjust_fiat(&mut self, id: WalletId, delta: Decimal) -> Result<(), ExchangeError> {
        let idx = *self
            .index
            .get(&id)
            .ok_or(ExchangeError::UnknownWallet(id))?;
        self.wallets[idx].fiat += delta;
        Ok(())
    }
}

impl Default for WalletRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_and_lookup() {
        let mut registry = WalletRegistry::new();
        let id = registry.create("alice", dec!(3750)).unwrap();

        assert_ne!(id, SYSTEM_WALLET_ID);
        assert!(registry.contains(id));
        let wallet = registry.get(id).unwrap();
        assert_eq!(wallet.owner, "alice");
        assert_eq!(wallet.fiat, dec!(3750));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_name_too_long_rejected() {
        let mut registry = WalletRegistry::new();
        let name = "x".repeat(MAX_OWNER_NAME_BYTES + 1);

        assert_eq!(
            registry.create(&name, dec!(0)),
            Err(ExchangeError::NameTooLong)
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_name_at_limit_accepted() {
        let mut registry = WalletRegistry::new();
        let name = "x".repeat(MAX_OWNER_NAME_BYTES);

        assert!(registry.create(&name, dec!(0)).is_ok());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut registry = WalletRegistry::new();
        let a = registry.create("a", dec!(0)).unwrap();
        let b = registry.create("b", dec!(0)).unwrap();

        assert_ne!(a, b);
        assert_eq!(registry.get(a).unwrap().owner, "a");
        assert_eq!(registry.get(b).unwrap().owner, "b");
    }

    #[test]
    fn test_adjust_fiat() {
        let mut registry = WalletRegistry::new();
        let id = registry.create("alice", dec!(100)).unwrap();

        registry.adjust_fiat(id, dec!(-25.5)).unwrap();
        assert_eq!(registry.get(id).unwrap().fiat, dec!(74.5));

        registry.adjust_fiat(id, dec!(0.5)).unwrap();
        assert_eq!(registry.get(id).unwrap().fiat, dec!(75));
    }

    #[test]
    fn test_adjust_fiat_unknown_wallet() {
        let mut registry = WalletRegistry::new();
        assert_eq!(
            registry.adjust_fiat(7, dec!(1)),
            Err(ExchangeError::UnknownWallet(7))
        );
    }

    #[test]
    fn test_remove_rolls_back_creation() {
        let mut registry = WalletRegistry::new();
        let keep = registry.create("keep", dec!(1)).unwrap();
        let drop = registry.create("drop", dec!(2)).unwrap();

        registry.remove(drop);

        assert_eq!(registry.len(), 1);
        assert!(!registry.contains(drop));
        // The surviving wallet is still reachable through the index.
        assert_eq!(registry.get(keep).unwrap().owner, "keep");
    }

    #[test]
    fn test_from_records_rebuilds_index() {
        let records = vec![
            Wallet {
                id: 10,
                owner: "a".to_string(),
                fiat: dec!(1),
            },
            Wallet {
                id: 20,
                owner: "b".to_string(),
                fiat: dec!(2),
            },
        ];
        let registry = WalletRegistry::from_records(records);

        assert_eq!(registry.get(20).unwrap().owner, "b");
        assert_eq!(registry.get(10).unwrap().fiat, dec!(1));
        assert!(!registry.contains(30));
    }
}
