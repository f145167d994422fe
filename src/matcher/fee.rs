use crate::models::{Fee, FeeSuggestion};

/// Relative tolerance for a near match against a fee's amount.
const NEAR_WINDOW: f64 = 0.05;

fn suggestion(fee: &Fee, exact_match: bool) -> FeeSuggestion {
    FeeSuggestion {
        fee_id: fee.id,
        amount: fee.amount,
        period: fee.period.clone(),
        exact_match,
    }
}

/// Pick the fee an incoming payment should be applied against. `fees` must
/// be the property's unpaid fees oldest-first; scanning in that order is
/// what makes both the near-match and the final fallback FIFO.
///
/// An exact amount match (to the cent) stops the scan. Otherwise the first
/// fee within 5% relative difference is remembered, and failing that the
/// oldest unpaid fee is suggested. A fee whose amount makes the relative
/// difference non-finite is skipped, never fatal.
pub fn match_fee(fees: &[Fee], amount: f64) -> Option<FeeSuggestion> {
    let mut near: Option<&Fee> = None;
    for fee in fees {
        if (amount - fee.amount).abs() < 0.01 {
            return Some(suggestion(fee, true));
        }
        if near.is_none() {
            let rel = (amount - fee.amount).abs() / fee.amount;
            if rel.is_finite() && rel <= NEAR_WINDOW {
                near = Some(fee);
            }
        }
    }
    near.or_else(|| fees.first()).map(|f| suggestion(f, false))
}
