use chrono::NaiveDate;
use sha2::{Digest, Sha256};

/// Stable identity for a statement row: SHA-256 over the ISO date, the
/// amount at two decimal places, the description, and the reference.
/// Fields are separated so adjacent values cannot alias ("12|3.00" vs
/// "1|23.00"). Re-uploading the same statement yields the same prints.
pub fn fingerprint(date: NaiveDate, amount: f64, description: &str, reference: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.format("%Y-%m-%d").to_string());
    hasher.update(b"|");
    hasher.update(format!("{amount:.2}"));
    hasher.update(b"|");
    hasher.update(description);
    hasher.update(b"|");
    hasher.update(reference);
    hex::encode(hasher.finalize())
}
