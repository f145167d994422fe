use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::settings::db_path;

pub fn list() -> Result<()> {
    let conn = get_connection(&db_path())?;
    let mut stmt = conn.prepare(
        "SELECT pay.id, pay.date, pay.amount, pay.description, p.unit_number, \
                pay.reconciled, pay.is_duplicate \
         FROM payments pay LEFT JOIN properties p ON pay.property_id = p.id \
         ORDER BY pay.date DESC, pay.id DESC",
    )?;
    let rows: Vec<(i64, String, f64, Option<String>, Option<String>, bool, bool)> = stmt
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
    table.set_header(vec!["ID", "Date", "Amount", "Description", "Unit", "Flags"]);
    for (id, date, amount, description, unit, reconciled, is_duplicate) in rows {
        let mut flags = Vec::new();
        if reconciled {
            flags.push("reconciled");
        }
        if is_duplicate {
            flags.push("duplicate");
        }
        table.add_row(vec![
            Cell::new(id),
            Cell::new(date),
            Cell::new(money(amount)),
            Cell::new(description.unwrap_or_default()),
            Cell::new(unit.unwrap_or_default()),
            Cell::new(flags.join(", ")),
        ]);
    }
    println!("Payments\n{table}");
    Ok(())
}
