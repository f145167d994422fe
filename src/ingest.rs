use chrono::NaiveDate;

use crate::error::{Result, StrataError};
use crate::models::TransactionRecord;

// ---------------------------------------------------------------------------
// Byte decoding
// ---------------------------------------------------------------------------

/// Decode a raw statement upload to a string. Strict UTF-8 is tried first;
/// anything else falls through to Windows-1252, which also covers the
/// Latin-1/ISO-8859-1 exports banks produce (single-byte decoding cannot
/// fail, so the fallback chain collapses into one step).
pub fn decode_statement(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// Coerce a statement amount cell to a signed value. Strips currency
/// symbols, thousands separators and stray quotes; parenthesized values
/// are negative. Unparseable cells yield None so the row can be dropped.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return inner.trim().parse::<f64>().ok().map(|v| -v);
    }
    s.parse().ok()
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%m/%d/%Y"];

/// Parse a statement date, trying formats in fixed priority order. A cell
/// no format accepts falls back to the processing date; the flag tells the
/// caller the row needs review.
pub fn parse_statement_date(raw: &str, today: NaiveDate) -> (NaiveDate, bool) {
    let raw = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return (date, false);
        }
    }
    (today, true)
}

// ---------------------------------------------------------------------------
// Column detection
// ---------------------------------------------------------------------------

struct ColumnMap {
    date: usize,
    amount: usize,
    description: Option<usize>,
    reference: Option<usize>,
}

fn find_column(headers: &csv::StringRecord, needles: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim().to_lowercase();
        needles.iter().any(|n| h.contains(n))
    })
}

fn detect_columns(headers: &csv::StringRecord) -> Result<ColumnMap> {
    let date = find_column(headers, &["date"]);
    let amount = find_column(headers, &["amount", "credit"]);
    let (Some(date), Some(amount)) = (date, amount) else {
        return Err(StrataError::MalformedInput(
            "statement must contain a date column and an amount column".to_string(),
        ));
    };
    Ok(ColumnMap {
        date,
        amount,
        description: find_column(headers, &["description", "particulars", "narration"]),
        reference: find_column(headers, &["reference"]),
    })
}

// ---------------------------------------------------------------------------
// Statement ingestion
// ---------------------------------------------------------------------------

/// Normalize decoded CSV text into transaction records, in input order.
/// Rows whose amount is zero or unparseable are dropped; signed amounts
/// are preserved so downstream matchers can filter by direction. `today`
/// is injected so date-fallback behavior is deterministic under test.
pub fn parse_statement(text: &str, today: NaiveDate) -> Result<Vec<TransactionRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|_| StrataError::MalformedInput("statement is not valid CSV".to_string()))?
        .clone();
    let cols = detect_columns(&headers)?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let Ok(row) = row else { continue };
        let Some(amount) = row.get(cols.amount).and_then(parse_amount) else {
            continue;
        };
        if amount == 0.0 {
            continue;
        }

        let (date, date_fallback) =
            parse_statement_date(row.get(cols.date).unwrap_or(""), today);
        let description = cols
            .description
            .and_then(|i| row.get(i))
            .unwrap_or("")
            .trim()
            .to_string();
        // Statements without a reference column reuse the description so
        // the search text and fingerprint still carry something.
        let reference = cols
            .reference
            .and_then(|i| row.get(i))
            .map(|r| r.trim().to_string())
            .unwrap_or_else(|| description.clone());

        let mut record = TransactionRecord::new(date, amount, description, reference);
        record.date_fallback = date_fallback;
        records.push(record);
    }
    Ok(records)
}

/// Decode and ingest one uploaded statement.
pub fn ingest(bytes: &[u8], today: NaiveDate) -> Result<Vec<TransactionRecord>> {
    parse_statement(&decode_statement(bytes), today)
}
