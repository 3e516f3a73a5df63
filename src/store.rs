//! Binary persistence - one state file per entity collection.
//!
//! The engine treats this as an opaque record import/export boundary: it
//! consumes and produces [`State`]; the encoding and file names live here.
//! Load and save run once at process start and stop, never interleaved with
//! command processing.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::engine::State;

pub const WALLETS_FILE: &str = "wallets.dat";
pub const TRANSACTIONS_FILE: &str = "transactions.dat";
pub const ORDERS_FILE: &str = "orders.dat";

/// A failed state load or save.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("state file is corrupt: {0}")]
    Codec(#[from] bincode::Error),
}

/// Load the exchange state from `dir`.
///
/// A missing file loads as an empty collection, so a fresh data directory
/// yields a fresh exchange. Executed order flags are part of the encoding
/// and survive the round trip.
pub fn load(dir: &Path) -> Result<State, StoreError> {
    Ok(State {
        wallets: load_records(&dir.join(WALLETS_FILE))?,
        transactions: load_records(&dir.join(TRANSACTIONS_FILE))?,
        orders: load_records(&dir.join(ORDERS_FILE))?,
    })
}

/// Save all three collections into `dir`, creating it if needed.
pub fn save(dir: &Path, state: &State) -> Result<(), StoreError> {
    fs::create_dir_all(dir)?;
    save_records(&dir.join(WALLETS_FILE), &state.wallets)?;
    save_records(&dir.join(TRANSACTIONS_FILE), &state.transactions)?;
    save_records(&dir.join(ORDERS_FILE), &state.orders)?;
    Ok(())
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    match fs::read(path) {
        Ok(bytes) => {
            let records: Vec<T> = bincode::deserialize(&bytes)?;
            debug!(path = %path.display(), count = records.len(), "state file loaded");
            Ok(records)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(err) => Err(err.into()),
    }
}

fn save_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    let bytes = bincode::serialize(records)?;
    fs::write(path, bytes)?;
    debug!(path = %path.display(), count = records.len(), "state file written");
    Ok(())
}
