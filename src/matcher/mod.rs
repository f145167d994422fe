pub mod expense;
pub mod fee;
pub mod property;

use rusqlite::Connection;

use crate::error::Result;
use crate::models::TransactionRecord;
use crate::store;

/// A transaction is a duplicate if a payment already carries its
/// fingerprint, or a payment exists on the same day with the same amount
/// and description (re-exported statements often rewrite references).
pub fn is_duplicate(conn: &Connection, record: &TransactionRecord) -> Result<bool> {
    if store::payment_exists_with_fingerprint(conn, &record.fingerprint)? {
        return Ok(true);
    }
    store::payment_exists_on_day(
        conn,
        &record.date.format("%Y-%m-%d").to_string(),
        record.amount,
        &record.description,
    )
}
