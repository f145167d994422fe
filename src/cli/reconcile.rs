use chrono::Local;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::parse_row_list;
use crate::confirm;
use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::models::TransactionRecord;
use crate::reconciler;
use crate::settings::db_path;

fn property_cell(record: &TransactionRecord) -> String {
    match &record.suggested_property {
        Some(p) => format!("unit {} ({}%)", p.unit_number, p.confidence),
        None => String::new(),
    }
}

fn fee_cell(record: &TransactionRecord) -> String {
    match &record.suggested_fee {
        Some(f) => format!(
            "{} {} {}",
            money(f.amount),
            f.period.as_deref().unwrap_or("-"),
            if f.exact_match { "exact" } else { "near" }
        ),
        None => String::new(),
    }
}

fn expense_cell(record: &TransactionRecord) -> String {
    match &record.suggested_expense {
        Some(e) => format!(
            "{} {} {}",
            e.description,
            money(e.amount),
            if e.exact_match { "exact" } else { "near" }
        ),
        None => String::new(),
    }
}

fn flags_cell(record: &TransactionRecord) -> String {
    let mut flags = Vec::new();
    if record.is_duplicate {
        flags.push("duplicate");
    }
    if record.date_fallback {
        flags.push("check date");
    }
    flags.join(", ")
}

pub fn run(file: &str, accept: Option<&str>, include_duplicates: bool) -> Result<()> {
    let bytes = std::fs::read(file)?;
    let mut conn = get_connection(&db_path())?;
    let today = Local::now().date_naive();

    let records = reconciler::reconcile_statement(&conn, &bytes, today)?;
    if records.is_empty() {
        println!("No usable rows in {file}.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "#", "Date", "Amount", "Description", "Property", "Fee", "Expense", "Flags",
    ]);
    for (i, record) in records.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(record.date.format("%Y-%m-%d")),
            Cell::new(money(record.amount)),
            Cell::new(&record.description),
            Cell::new(property_cell(record)),
            Cell::new(fee_cell(record)),
            Cell::new(expense_cell(record)),
            Cell::new(flags_cell(record)),
        ]);
    }
    println!("Suggestions for {file}\n{table}");

    let duplicates = records.iter().filter(|r| r.is_duplicate).count();
    if duplicates > 0 {
        println!(
            "{}",
            format!("{duplicates} row(s) look like already-recorded payments.").yellow()
        );
    }

    let Some(accept) = accept else {
        println!("Nothing recorded. Re-run with --accept <rows> to commit selected rows.");
        return Ok(());
    };

    let rows = parse_row_list(accept);
    let mut selected: Vec<&TransactionRecord> = Vec::new();
    let mut refused = 0usize;
    for row in &rows {
        match records.get(row.wrapping_sub(1)) {
            Some(r) if r.is_duplicate && !include_duplicates => refused += 1,
            Some(r) => selected.push(r),
            None => println!("{}", format!("No such row: {row}").red()),
        }
    }
    if refused > 0 {
        println!(
            "{}",
            format!("{refused} duplicate row(s) refused; pass --include-duplicates to force.").red()
        );
    }

    let summary = confirm::apply_records(&mut conn, &selected)?;
    println!(
        "{}",
        format!(
            "Recorded {} payment(s); {} fee(s) and {} expense(s) settled.",
            summary.payments_created, summary.fees_settled, summary.expenses_settled
        )
        .green()
    );
    Ok(())
}
