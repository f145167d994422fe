use chrono::NaiveDate;
use rusqlite::Connection;

use crate::error::Result;
use crate::matcher;
use crate::models::TransactionRecord;
use crate::{ingest, store};

/// Run one uploaded statement end-to-end: decode and normalize, then
/// annotate every record with its duplicate state and best-effort
/// suggestions. Only genuinely incoming amounts are candidates for a
/// property/fee linkage; only outgoing amounts are candidates for an
/// expense linkage. Nothing here mutates the store — every suggestion
/// waits for human confirmation.
///
/// A structurally valid statement always produces a full result: a failed
/// match is a `None` suggestion, never an error. Store failures abort the
/// run.
pub fn reconcile_statement(
    conn: &Connection,
    bytes: &[u8],
    today: NaiveDate,
) -> Result<Vec<TransactionRecord>> {
    let mut records = ingest::ingest(bytes, today)?;
    let properties = store::list_properties(conn)?;

    for record in &mut records {
        record.is_duplicate = matcher::is_duplicate(conn, record)?;

        if record.amount > 0.0 {
            record.suggested_property = matcher::property::match_property(
                &record.reference,
                &record.description,
                &properties,
            );
            if let Some(suggested) = &record.suggested_property {
                let fees = store::unpaid_fees_for_property(conn, suggested.property_id)?;
                record.suggested_fee = matcher::fee::match_fee(&fees, record.amount);
            }
        } else {
            record.suggested_expense =
                matcher::expense::match_expense(conn, record.amount.abs())?;
        }
    }
    Ok(records)
}
