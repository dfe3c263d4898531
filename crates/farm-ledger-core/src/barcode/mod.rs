//! Animal barcode identifiers.
//!
//! An id is the category prefix, the millisecond timestamp and a 0-999
//! random suffix, e.g. `PIG1742457600000417`. No counter is persisted and
//! collisions are not checked.

pub mod code128;

pub use code128::{BarcodeError, SvgOptions};

use rand::Rng;
use strsim::{jaro_winkler, normalized_levenshtein};

use crate::models::AnimalCategory;

/// Minimum similarity for a registered barcode to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Generate a barcode for a new animal of `category` using the current time.
pub fn generate_barcode(category: &str) -> String {
    generate_barcode_at(
        category,
        chrono::Utc::now().timestamp_millis(),
        &mut rand::thread_rng(),
    )
}

/// Generate a barcode from an explicit timestamp and random source.
pub fn generate_barcode_at<R: Rng + ?Sized>(category: &str, timestamp_ms: i64, rng: &mut R) -> String {
    let prefix = AnimalCategory::from_label(category).barcode_prefix();
    let suffix: u16 = rng.gen_range(0..1000);
    format!("{prefix}{timestamp_ms}{suffix}")
}

/// Registered barcodes resembling `query`, best match first.
///
/// Used when a typed or scanned barcode misses, to offer likely intended ones.
pub fn suggest_barcodes<'a, I>(query: &str, registered: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = query.trim().to_ascii_uppercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(f64, &str)> = registered
        .into_iter()
        .map(|candidate| (similarity(&query, &candidate.to_ascii_uppercase()), candidate))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

/// Combined Jaro-Winkler (prefix-sensitive) and Levenshtein similarity.
fn similarity(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_prefix_by_category() {
        assert!(generate_barcode("Pig").starts_with("PIG"));
        assert!(generate_barcode("Poultry").starts_with("PLT"));
        assert!(generate_barcode("Goat").starts_with("PLT"));
    }

    #[test]
    fn test_layout() {
        let mut rng = StdRng::seed_from_u64(7);
        let barcode = generate_barcode_at("Pig", 1_742_457_600_000, &mut rng);

        assert!(barcode.starts_with("PIG1742457600000"));
        let suffix: u32 = barcode["PIG1742457600000".len()..].parse().unwrap();
        assert!(suffix < 1000);
    }

    #[test]
    fn test_suggest_typo() {
        let registered = ["PIG001234567", "PIG001234568", "PLT001234569"];
        let suggestions = suggest_barcodes("PIG00123456", registered, 3);

        assert!(!suggestions.is_empty());
        assert!(suggestions[0].starts_with("PIG00123456"));
    }

    #[test]
    fn test_suggest_case_insensitive() {
        let registered = ["PIG001234567"];
        assert_eq!(
            suggest_barcodes("pig001234567", registered, 3),
            vec!["PIG001234567".to_string()]
        );
    }

    #[test]
    fn test_suggest_nothing_similar() {
        let registered = ["PIG001234567", "PLT001234569"];
        assert!(suggest_barcodes("XYZ", registered, 3).is_empty());
        assert!(suggest_barcodes("   ", registered, 3).is_empty());
    }

    #[test]
    fn test_suggest_respects_limit() {
        let registered = ["PIG001234561", "PIG001234562", "PIG001234563"];
        assert_eq!(suggest_barcodes("PIG001234560", registered, 2).len(), 2);
    }
}
