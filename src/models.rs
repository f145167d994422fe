use chrono::NaiveDate;

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Property {
    pub id: i64,
    pub unit_number: String,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
    pub balance: f64,
    pub entitlement: f64,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Fee {
    pub id: i64,
    pub property_id: i64,
    pub amount: f64,
    pub date: String,
    pub due_date: Option<String>,
    pub period: Option<String>,
    pub paid: bool,
    pub paid_amount: f64,
}

#[derive(Debug, Clone)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub due_date: Option<String>,
    pub paid: bool,
}

/// Suggested property linkage for an incoming transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySuggestion {
    pub property_id: i64,
    pub unit_number: String,
    pub owner_name: Option<String>,
    /// 0-100; approximate classifier output, surfaced so a human can override.
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeeSuggestion {
    pub fee_id: i64,
    pub amount: f64,
    pub period: Option<String>,
    pub exact_match: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSuggestion {
    pub expense_id: i64,
    pub description: String,
    pub amount: f64,
    pub due_date: Option<String>,
    pub exact_match: bool,
}

/// One normalized statement row, annotated by the matching pipeline.
/// Lives only for a single reconciliation run; a confirmed row becomes a
/// durable payment via `confirm`.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub reference: String,
    pub fingerprint: String,
    /// Set when the statement date could not be parsed and the processing
    /// date was substituted; such rows need human review.
    pub date_fallback: bool,
    pub is_duplicate: bool,
    pub suggested_property: Option<PropertySuggestion>,
    pub suggested_fee: Option<FeeSuggestion>,
    pub suggested_expense: Option<ExpenseSuggestion>,
}

impl TransactionRecord {
    pub fn new(date: NaiveDate, amount: f64, description: String, reference: String) -> Self {
        let fingerprint = crate::fingerprint::fingerprint(date, amount, &description, &reference);
        Self {
            date,
            amount,
            description,
            reference,
            fingerprint,
            date_fallback: false,
            is_duplicate: false,
            suggested_property: None,
            suggested_fee: None,
            suggested_expense: None,
        }
    }
}
