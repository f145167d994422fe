use regex::Regex;

use crate::models::{Property, PropertySuggestion};

/// Below this many properties the matcher is willing to use the loose
/// last-resort heuristics for an unrecognized "unit N" token.
const SMALL_PORTFOLIO: usize = 10;

/// Everything a rule may consult besides the candidate property itself.
struct SearchContext<'a> {
    /// Lowercased `reference + " " + description`.
    text: String,
    /// N from the first "unit N" phrase in the text, if any.
    extracted_unit: Option<String>,
    /// Whether that N names any unit in the portfolio.
    extracted_is_known: bool,
    properties: &'a [Property],
}

impl<'a> SearchContext<'a> {
    fn new(reference: &str, description: &str, properties: &'a [Property]) -> Self {
        let text = format!("{reference} {description}").to_lowercase();
        let extracted_unit = Regex::new(r"unit\s+([a-z0-9]+)")
            .ok()
            .and_then(|re| re.captures(&text).map(|c| c[1].to_string()));
        let extracted_is_known = extracted_unit.as_deref().map_or(false, |n| {
            properties.iter().any(|p| p.unit_number.to_lowercase() == n)
        });
        Self {
            text,
            extracted_unit,
            extracted_is_known,
            properties,
        }
    }

    fn small_portfolio(&self) -> bool {
        self.properties.len() < SMALL_PORTFOLIO
    }

    fn is_first(&self, prop: &Property) -> bool {
        self.properties.first().map_or(false, |p| p.id == prop.id)
    }
}

type Rule = fn(&Property, &SearchContext) -> Option<u8>;

/// The unit label appears as a standalone word anywhere in the text.
fn rule_unit_token(prop: &Property, ctx: &SearchContext) -> Option<u8> {
    let pattern = format!(r"\b{}\b", regex::escape(&prop.unit_number.to_lowercase()));
    let re = Regex::new(&pattern).ok()?;
    re.is_match(&ctx.text).then_some(90)
}

/// A literal "unit <label>" phrase.
fn rule_unit_phrase(prop: &Property, ctx: &SearchContext) -> Option<u8> {
    let phrase = format!("unit {}", prop.unit_number.to_lowercase());
    ctx.text.contains(&phrase).then_some(90)
}

/// Reconcile an extracted "unit N" token against the portfolio: an exact
/// label match is near-certain; an N nobody owns degrades, for small
/// portfolios only, to substring containment or the first property.
fn rule_extracted_unit(prop: &Property, ctx: &SearchContext) -> Option<u8> {
    let n = ctx.extracted_unit.as_deref()?;
    let unit = prop.unit_number.to_lowercase();
    if n == unit {
        return Some(95);
    }
    if !ctx.extracted_is_known && ctx.small_portfolio() {
        if ctx.text.contains(&unit) {
            return Some(60);
        }
        if ctx.is_first(prop) {
            return Some(50);
        }
    }
    None
}

/// A bare numeric label in a very short text is usually the unit alone.
fn rule_bare_number_short_text(prop: &Property, ctx: &SearchContext) -> Option<u8> {
    let unit = prop.unit_number.to_lowercase();
    (unit.chars().all(|c| c.is_ascii_digit())
        && ctx.text.len() < 10
        && ctx.text.contains(&unit))
    .then_some(80)
}

/// Every substantial word of the owner's name appears in the text.
fn rule_owner_name(prop: &Property, ctx: &SearchContext) -> Option<u8> {
    let owner = prop.owner_name.as_deref()?.to_lowercase();
    let words: Vec<&str> = owner.split_whitespace().filter(|w| w.len() > 2).collect();
    if words.is_empty() {
        return None;
    }
    words.iter().all(|w| ctx.text.contains(w)).then_some(70)
}

/// Ordered rule list; for each property the first rule that fires sets its
/// confidence.
const RULES: &[Rule] = &[
    rule_unit_token,
    rule_unit_phrase,
    rule_extracted_unit,
    rule_bare_number_short_text,
    rule_owner_name,
];

/// Best-effort property classifier over the statement text. Every property
/// is scored; the highest confidence wins and ties resolve to the property
/// encountered first. False positives are expected, which is why the
/// confidence travels with the suggestion.
pub fn match_property(
    reference: &str,
    description: &str,
    properties: &[Property],
) -> Option<PropertySuggestion> {
    let ctx = SearchContext::new(reference, description, properties);
    let mut best: Option<PropertySuggestion> = None;
    for prop in properties {
        let confidence = RULES.iter().find_map(|rule| rule(prop, &ctx));
        if let Some(confidence) = confidence {
            let beats = best.as_ref().map_or(true, |b| confidence > b.confidence);
            if beats {
                best = Some(PropertySuggestion {
                    property_id: prop.id,
                    unit_number: prop.unit_number.clone(),
                    owner_name: prop.owner_name.clone(),
                    confidence,
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(id: i64, unit: &str, owner: Option<&str>) -> Property {
        Property {
            id,
            unit_number: unit.to_string(),
            owner_name: owner.map(|s| s.to_string()),
            owner_email: None,
            balance: 0.0,
            entitlement: 1.0,
        }
    }

    #[test]
    fn test_unit_phrase_scores_at_least_90() {
        let props = vec![prop(1, "101", None), prop(2, "102", None)];
        let m = match_property("", "Payment unit 101 March", &props).unwrap();
        assert_eq!(m.property_id, 1);
        assert!(m.confidence >= 90, "confidence {} below 90", m.confidence);
    }

    #[test]
    fn test_standalone_token_matches() {
        let props = vec![prop(1, "12", None), prop(2, "101", None)];
        let m = match_property("REF 101", "quarterly levy", &props).unwrap();
        assert_eq!(m.property_id, 2);
        assert_eq!(m.confidence, 90);
    }

    #[test]
    fn test_token_boundary_prevents_substring_hits() {
        // "1012" must not match unit "101"
        let props = vec![prop(1, "101", None)];
        assert!(match_property("REF 1012", "levy", &props).is_none());
    }

    #[test]
    fn test_extracted_unit_names_later_property() {
        // The extracted token names unit 8, a property further down the
        // list; the earlier property must not hijack it. The standalone
        // token already scores 90 here.
        let props = vec![prop(1, "ground", None), prop(2, "8", None)];
        let m = match_property("", "levy unit 8 march", &props).unwrap();
        assert_eq!(m.property_id, 2);
        assert!(m.confidence >= 90);
    }

    #[test]
    fn test_extracted_unit_exact_is_95() {
        let props = vec![prop(1, "12", None), prop(2, "34", None)];
        // A tab after "unit" defeats the literal-phrase rule and the batch
        // stamp glued onto the digits defeats the word-boundary rule, so
        // only the extracted token identifies unit 12.
        let m = match_property("", "levy unit\t12_20240301", &props).unwrap();
        assert_eq!(m.property_id, 1);
        assert_eq!(m.confidence, 95);
    }

    #[test]
    fn test_unknown_unit_small_portfolio_falls_back_to_first() {
        let props = vec![prop(1, "alpha", None), prop(2, "beta", None)];
        let m = match_property("", "payment unit 999", &props).unwrap();
        assert_eq!(m.property_id, 1);
        assert_eq!(m.confidence, 50);
    }

    #[test]
    fn test_unknown_unit_substring_containment_beats_first_fallback() {
        let props = vec![prop(1, "alpha", None), prop(2, "beta", None)];
        // "beta" appears as a substring of the text while "unit 999" is
        // unknown; containment at 60 outranks the first-property 50.
        let m = match_property("", "unit 999 betamax levy", &props).unwrap();
        assert_eq!(m.property_id, 2);
        assert_eq!(m.confidence, 60);
    }

    #[test]
    fn test_no_small_portfolio_fallback_at_ten_properties() {
        let props: Vec<Property> = (1..=10).map(|i| prop(i, &format!("u{i}"), None)).collect();
        assert!(match_property("", "payment unit 999", &props).is_none());
    }

    #[test]
    fn test_bare_number_in_short_text() {
        let props = vec![prop(1, "101", None)];
        // Reference and description are both just the unit digits inside a
        // short text. Standalone-token rule also fires here at 90.
        let m = match_property("101", "", &props).unwrap();
        assert_eq!(m.confidence, 90);
    }

    #[test]
    fn test_bare_number_without_word_boundary_is_80() {
        let props = vec![prop(1, "101", None)];
        // Glued digits defeat the word-boundary rule; the short-text rule
        // still catches them.
        let m = match_property("x101y", "", &props).unwrap();
        assert_eq!(m.confidence, 80);
    }

    #[test]
    fn test_owner_name_match_is_70() {
        let props = vec![prop(1, "101", Some("Jane van Dyke"))];
        let m = match_property("", "transfer from jane van dyke", &props).unwrap();
        assert_eq!(m.confidence, 70);
        // Two-letter particles are skipped, so "souza" alone is enough
        let props = vec![prop(1, "101", Some("Li de Souza"))];
        let m = match_property("", "souza payment", &props).unwrap();
        assert_eq!(m.confidence, 70);
    }

    #[test]
    fn test_highest_confidence_wins_across_properties() {
        // Property 1 hits only on owner name (70); property 2 hits on its
        // unit token (90). Later-but-stronger must win.
        let props = vec![prop(1, "7", Some("March Levy")), prop(2, "205", None)];
        let m = match_property("", "march levy for 205", &props).unwrap();
        assert_eq!(m.property_id, 2);
        assert_eq!(m.confidence, 90);
    }

    #[test]
    fn test_equal_confidence_first_encountered_wins() {
        let props = vec![prop(1, "101", None), prop(2, "102", None)];
        let m = match_property("", "levy 101 and 102", &props).unwrap();
        assert_eq!(m.property_id, 1);
    }

    #[test]
    fn test_no_match_yields_none() {
        let props = vec![prop(1, "101", Some("Jane Doe"))];
        assert!(match_property("REF555", "mystery transfer", &props).is_none());
    }
}
