use rusqlite::Connection;

use crate::error::Result;
use crate::models::{Expense, ExpenseSuggestion};
use crate::store;

/// Relative tolerance for a near match against an outgoing amount.
const NEAR_WINDOW: f64 = 0.05;

fn suggestion(expense: Expense, exact_match: bool) -> ExpenseSuggestion {
    ExpenseSuggestion {
        expense_id: expense.id,
        description: expense.description,
        amount: expense.amount,
        due_date: expense.due_date,
        exact_match,
    }
}

/// Suggest the unpaid expense an outgoing payment settles. `amount` is the
/// magnitude of the outgoing transaction. Exact amount first, then the
/// first unpaid expense within ±5%, in persisted query order; no further
/// tie-breaking.
pub fn match_expense(conn: &Connection, amount: f64) -> Result<Option<ExpenseSuggestion>> {
    if let Some(expense) = store::unpaid_expense_by_amount(conn, amount)? {
        return Ok(Some(suggestion(expense, true)));
    }
    let near = store::unpaid_expense_in_range(
        conn,
        amount * (1.0 - NEAR_WINDOW),
        amount * (1.0 + NEAR_WINDOW),
    )?;
    Ok(near.map(|e| suggestion(e, false)))
}
