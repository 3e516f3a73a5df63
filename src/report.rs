//! Wallet report export - a CSV snapshot of every wallet.

use std::path::Path;

use chrono::DateTime;

use crate::engine::Exchange;

/// Render a unix timestamp for the report, UTC.
pub fn format_timestamp(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

/// Write a CSV report of all wallets, richest first, to `path`.
///
/// Columns: owner, wallet id, fiat balance, coin balance, executed orders,
/// first/last activity (blank for wallets that never transacted).
pub fn write_csv(exchange: &Exchange, path: &Path) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "owner",
        "wallet_id",
        "fiat",
        "grn_coins",
        "executed_orders",
        "first_activity",
        "last_activity",
    ])?;

    for summary in exchange.richest_investors(exchange.wallets().len()) {
        let fiat = exchange
            .wallets()
            .get(summary.wallet)
            .map(|w| w.fiat.to_string())
            .unwrap_or_default();
        writer.write_record([
            summary.owner.clone(),
            summary.wallet.to_string(),
            fiat,
            summary.coins.to_string(),
            summary.executed_orders.to_string(),
            summary.first_activity.map(format_timestamp).unwrap_or_default(),
            summary.last_activity.map(format_timestamp).unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
