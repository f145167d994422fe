use rusqlite::Connection;

use crate::error::Result;
use crate::models::{Expense, Fee, Property};

pub fn list_properties(conn: &Connection) -> Result<Vec<Property>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, unit_number, owner_name, owner_email, balance, entitlement \
         FROM properties ORDER BY id",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Property {
                id: row.get(0)?,
                unit_number: row.get(1)?,
                owner_name: row.get(2)?,
                owner_email: row.get(3)?,
                balance: row.get(4)?,
                entitlement: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Unpaid fees for one property, oldest issue date first. The ordering is
/// what gives fee matching its FIFO application policy.
pub fn unpaid_fees_for_property(conn: &Connection, property_id: i64) -> Result<Vec<Fee>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, property_id, amount, date, due_date, period, paid, paid_amount \
         FROM fees WHERE property_id = ?1 AND paid = 0 ORDER BY date ASC, id ASC",
    )?;
    let rows = stmt
        .query_map([property_id], |row| {
            Ok(Fee {
                id: row.get(0)?,
                property_id: row.get(1)?,
                amount: row.get(2)?,
                date: row.get(3)?,
                due_date: row.get(4)?,
                period: row.get(5)?,
                paid: row.get(6)?,
                paid_amount: row.get(7)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn expense_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        due_date: row.get(3)?,
        paid: row.get(4)?,
    })
}

/// First unpaid expense whose amount matches to the cent.
pub fn unpaid_expense_by_amount(conn: &Connection, amount: f64) -> Result<Option<Expense>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, description, amount, due_date, paid FROM expenses \
         WHERE paid = 0 AND ABS(amount - ?1) < 0.01 ORDER BY id LIMIT 1",
    )?;
    let found = stmt.query_row([amount], expense_from_row);
    match found {
        Ok(e) => Ok(Some(e)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// First unpaid expense with an amount inside [low, high], in persisted order.
pub fn unpaid_expense_in_range(conn: &Connection, low: f64, high: f64) -> Result<Option<Expense>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, description, amount, due_date, paid FROM expenses \
         WHERE paid = 0 AND amount >= ?1 AND amount <= ?2 ORDER BY id LIMIT 1",
    )?;
    let found = stmt.query_row([low, high], expense_from_row);
    match found {
        Ok(e) => Ok(Some(e)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn payment_exists_with_fingerprint(conn: &Connection, fingerprint: &str) -> Result<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM payments WHERE transaction_id = ?1")?;
    Ok(stmt.exists([fingerprint])?)
}

/// Defends against statements re-exported with a different reference
/// format: same calendar day, same amount, same description.
pub fn payment_exists_on_day(
    conn: &Connection,
    date: &str,
    amount: f64,
    description: &str,
) -> Result<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM payments WHERE date = ?1 AND amount = ?2 AND description = ?3",
    )?;
    Ok(stmt.exists(rusqlite::params![date, amount, description])?)
}
