use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::{Result, StrataError};
use crate::fmt::money;
use crate::settings::db_path;
use crate::store;

/// Create a billing period and raise one fee per property, split pro-rata
/// by entitlement. Property balances are debited by the raised amount.
pub fn raise(period: &str, start: &str, end: &str, total: f64) -> Result<()> {
    let mut conn = get_connection(&db_path())?;
    let properties = store::list_properties(&conn)?;
    if properties.is_empty() {
        return Err(StrataError::Other(
            "no properties registered; add properties before raising fees".to_string(),
        ));
    }
    let total_entitlement: f64 = properties.iter().map(|p| p.entitlement).sum();
    if total_entitlement <= 0.0 {
        return Err(StrataError::Other("total entitlement is zero".to_string()));
    }

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO billing_periods (name, start_date, end_date, total_amount) \
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![period, start, end, total],
    )?;
    for p in &properties {
        let fee_amount = (p.entitlement / total_entitlement) * total;
        tx.execute(
            "INSERT INTO fees (property_id, amount, date, due_date, description, period) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                p.id,
                fee_amount,
                start,
                end,
                format!("Strata fee for {period}"),
                period,
            ],
        )?;
        tx.execute(
            "UPDATE properties SET balance = balance - ?1 WHERE id = ?2",
            rusqlite::params![fee_amount, p.id],
        )?;
    }
    tx.commit()?;

    println!(
        "Raised {} across {} properties for {period}",
        money(total),
        properties.len()
    );
    Ok(())
}

/// Close a fee settled outside bank reconciliation (cash, direct
/// transfer handled elsewhere).
pub fn mark_paid(id: i64) -> Result<()> {
    let conn = get_connection(&db_path())?;
    let updated = conn.execute(
        "UPDATE fees SET paid = 1, paid_amount = amount WHERE id = ?1",
        [id],
    )?;
    if updated == 0 {
        return Err(StrataError::Other(format!("no fee with id {id}")));
    }
    println!("Marked fee {id} as paid");
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&db_path())?;
    let mut stmt = conn.prepare(
        "SELECT f.id, p.unit_number, f.amount, f.date, f.period, f.paid, f.paid_amount \
         FROM fees f JOIN properties p ON f.property_id = p.id \
         ORDER BY f.date, p.unit_number",
    )?;
    let rows: Vec<(i64, String, f64, String, Option<String>, bool, f64)> = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Unit", "Amount", "Issued", "Period", "Status"]);
    for (id, unit, amount, date, period, paid, paid_amount) in rows {
        let status = if paid {
            "paid".to_string()
        } else if paid_amount > 0.0 {
            format!("partial ({})", money(paid_amount))
        } else {
            "unpaid".to_string()
        };
        table.add_row(vec![
            Cell::new(id),
            Cell::new(unit),
            Cell::new(money(amount)),
            Cell::new(date),
            Cell::new(period.unwrap_or_default()),
            Cell::new(status),
        ]);
    }
    println!("Fees\n{table}");
    Ok(())
}
