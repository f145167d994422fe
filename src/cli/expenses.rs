use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::settings::db_path;

pub fn add(description: &str, amount: f64, due: Option<&str>) -> Result<()> {
    let conn = get_connection(&db_path())?;
    conn.execute(
        "INSERT INTO expenses (description, amount, due_date) VALUES (?1, ?2, ?3)",
        rusqlite::params![description, amount, due],
    )?;
    println!("Added expense: {description} ({})", money(amount));
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&db_path())?;
    let mut stmt = conn.prepare(
        "SELECT id, description, amount, due_date, paid FROM expenses ORDER BY due_date, id",
    )?;
    let rows: Vec<(i64, String, f64, Option<String>, bool)> = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Description", "Amount", "Due", "Status"]);
    for (id, description, amount, due, paid) in rows {
        table.add_row(vec![
            Cell::new(id),
            Cell::new(description),
            Cell::new(money(amount)),
            Cell::new(due.unwrap_or_default()),
            Cell::new(if paid { "paid" } else { "unpaid" }),
        ]);
    }
    println!("Expenses\n{table}");
    Ok(())
}
