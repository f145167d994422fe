use rusqlite::Connection;

use crate::error::Result;
use crate::models::TransactionRecord;

#[derive(Debug, Default)]
pub struct ConfirmSummary {
    pub payments_created: usize,
    pub fees_settled: usize,
    pub expenses_settled: usize,
}

/// Commit one human-accepted record: create the durable payment row
/// (carrying the fingerprint for future duplicate checks) and flip the
/// linked fee/expense paid state. Everything for one record happens in a
/// single SQLite transaction so an interrupted run cannot leave a payment
/// without its ledger effects.
pub fn apply_record(conn: &mut Connection, record: &TransactionRecord) -> Result<ConfirmSummary> {
    let mut summary = ConfirmSummary::default();
    let tx = conn.transaction()?;

    let property_id = record.suggested_property.as_ref().map(|p| p.property_id);
    let fee_id = record.suggested_fee.as_ref().map(|f| f.fee_id);
    let expense_id = record.suggested_expense.as_ref().map(|e| e.expense_id);

    tx.execute(
        "INSERT INTO payments \
         (property_id, fee_id, expense_id, amount, date, description, reference, \
          reconciled, is_duplicate, confirmed, transaction_id) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8, 1, ?9)",
        rusqlite::params![
            property_id,
            fee_id,
            expense_id,
            record.amount,
            record.date.format("%Y-%m-%d").to_string(),
            record.description,
            record.reference,
            record.is_duplicate,
            record.fingerprint,
        ],
    )?;
    summary.payments_created = 1;

    if let Some(property_id) = property_id {
        tx.execute(
            "UPDATE properties SET balance = balance + ?1 WHERE id = ?2",
            rusqlite::params![record.amount, property_id],
        )?;
    }

    if let Some(fee_id) = fee_id {
        // Advance the running paid amount; the fee closes once payments
        // cover it to the cent.
        tx.execute(
            "UPDATE fees SET paid_amount = paid_amount + ?1, \
             paid = CASE WHEN paid_amount + ?1 >= amount - 0.01 THEN 1 ELSE paid END \
             WHERE id = ?2",
            rusqlite::params![record.amount, fee_id],
        )?;
        let paid: bool = tx.query_row("SELECT paid FROM fees WHERE id = ?1", [fee_id], |r| {
            r.get(0)
        })?;
        if paid {
            summary.fees_settled = 1;
        }
    }

    if let Some(expense_id) = expense_id {
        tx.execute("UPDATE expenses SET paid = 1 WHERE id = ?1", [expense_id])?;
        summary.expenses_settled = 1;
    }

    tx.commit()?;
    Ok(summary)
}

/// Commit a batch of accepted records, one transaction each. Returns the
/// summed outcome.
pub fn apply_records(conn: &mut Connection, records: &[&TransactionRecord]) -> Result<ConfirmSummary> {
    let mut total = ConfirmSummary::default();
    for record in records {
        let one = apply_record(conn, record)?;
        total.payments_created += one.payments_created;
        total.fees_settled += one.fees_settled;
        total.expenses_settled += one.expenses_settled;
    }
    Ok(total)
}
