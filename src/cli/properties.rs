use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::settings::db_path;
use crate::store;

pub fn add(
    unit: &str,
    owner: Option<&str>,
    email: Option<&str>,
    entitlement: f64,
) -> Result<()> {
    let conn = get_connection(&db_path())?;
    conn.execute(
        "INSERT INTO properties (unit_number, owner_name, owner_email, entitlement) \
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![unit, owner, email, entitlement],
    )?;
    println!("Added property: unit {unit}");
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&db_path())?;
    let properties = store::list_properties(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Unit", "Owner", "Entitlement", "Balance"]);
    for p in properties {
        table.add_row(vec![
            Cell::new(p.id),
            Cell::new(&p.unit_number),
            Cell::new(p.owner_name.unwrap_or_default()),
            Cell::new(format!("{:.2}", p.entitlement)),
            Cell::new(money(p.balance)),
        ]);
    }
    println!("Properties\n{table}");
    Ok(())
}
