//! Header similarity scoring.
//!
//! Rules are evaluated in a fixed order and the first one that fires decides
//! the score:
//!
//! 1. exact match after normalization (1.0)
//! 2. substring containment (0.9)
//! 3. exact match after abbreviation expansion (0.95)
//! 4. substring containment after abbreviation expansion (0.85)
//! 5. normalized Levenshtein similarity of the unexpanded strings
//!
//! Every rule is symmetric, so `similarity(a, b) == similarity(b, a)`.

use std::fmt;

use rapidfuzz::distance::levenshtein;
use serde::{Deserialize, Serialize};

const EXACT_SCORE: f64 = 1.0;
const SUBSTRING_SCORE: f64 = 0.9;
const EXPANDED_EXACT_SCORE: f64 = 0.95;
const EXPANDED_SUBSTRING_SCORE: f64 = 0.85;

/// Abbreviations expanded before the expanded-form comparison.
///
/// Applied in this order, each replacing every occurrence.
const ABBREVIATIONS: [(&str, &str); 7] = [
    ("temp", "temperature"),
    ("press", "pressure"),
    ("flow", "flowrate"),
    ("in", "inlet"),
    ("out", "outlet"),
    ("hot", "h"),
    ("cold", "c"),
];

/// Which rule produced a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    Exact,
    Substring,
    ExpandedExact,
    ExpandedSubstring,
    EditDistance,
}

impl MatchRule {
    pub fn description(self) -> &'static str {
        match self {
            Self::Exact => "exact match",
            Self::Substring => "substring match",
            Self::ExpandedExact => "exact match after abbreviation expansion",
            Self::ExpandedSubstring => "substring match after abbreviation expansion",
            Self::EditDistance => "edit distance",
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Similarity of two strings together with the rule that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    /// Score in `[0.0, 1.0]`.
    pub value: f64,
    pub rule: MatchRule,
}

impl SimilarityScore {
    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        format!("{}: {:.0}%", self.rule, self.value * 100.0)
    }
}

/// Lowercases and drops everything that is not an ASCII letter or digit.
///
/// Non-ASCII letters such as `Δ` are dropped too.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Applies the abbreviation table to an already normalized string.
pub fn expand_abbreviations(normalized: &str) -> String {
    let mut expanded = normalized.to_string();
    for (short, long) in ABBREVIATIONS {
        if expanded.contains(short) {
            expanded = expanded.replace(short, long);
        }
    }
    expanded
}

/// Scores two header strings and reports which rule fired.
pub fn score(a: &str, b: &str) -> SimilarityScore {
    let left = normalize(a);
    let right = normalize(b);

    if left == right {
        return SimilarityScore {
            value: EXACT_SCORE,
            rule: MatchRule::Exact,
        };
    }
    if contains_either(&left, &right) {
        return SimilarityScore {
            value: SUBSTRING_SCORE,
            rule: MatchRule::Substring,
        };
    }

    let left_expanded = expand_abbreviations(&left);
    let right_expanded = expand_abbreviations(&right);
    if left_expanded == right_expanded {
        return SimilarityScore {
            value: EXPANDED_EXACT_SCORE,
            rule: MatchRule::ExpandedExact,
        };
    }
    if contains_either(&left_expanded, &right_expanded) {
        return SimilarityScore {
            value: EXPANDED_SUBSTRING_SCORE,
            rule: MatchRule::ExpandedSubstring,
        };
    }

    SimilarityScore {
        value: edit_similarity(&left, &right),
        rule: MatchRule::EditDistance,
    }
}

/// Similarity of two header strings in `[0.0, 1.0]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    score(a, b).value
}

fn contains_either(left: &str, right: &str) -> bool {
    left.contains(right) || right.contains(left)
}

/// `1 - distance / max_len`; normalized strings are ASCII so byte length is
/// the character count.
fn edit_similarity(left: &str, right: &str) -> f64 {
    let max_len = left.len().max(right.len());
    if max_len == 0 {
        return EXACT_SCORE;
    }
    let distance = levenshtein::distance(left.chars(), right.chars());
    1.0 - distance as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_non_ascii() {
        assert_eq!(normalize("T_hot-in (°C)"), "thotinc");
        assert_eq!(normalize("ΔP"), "p");
        assert_eq!(normalize("  "), "");
    }

    #[test]
    fn test_expand_replaces_every_occurrence() {
        assert_eq!(expand_abbreviations("tempin"), "temperatureinlet");
        assert_eq!(expand_abbreviations("inin"), "inletinlet");
        assert_eq!(expand_abbreviations("hotcold"), "hc");
        assert_eq!(expand_abbreviations("xyz"), "xyz");
    }

    #[test]
    fn test_exact_match_after_normalization() {
        let s = score("Th_in", "th-IN");
        assert_eq!(s.rule, MatchRule::Exact);
        assert_eq!(s.value, 1.0);
    }

    #[test]
    fn test_substring_match() {
        let s = score("hot_inlet_temp_degC", "hot_inlet_temp");
        assert_eq!(s.rule, MatchRule::Substring);
        assert_eq!(s.value, 0.9);
    }

    #[test]
    fn test_empty_header_is_contained_in_everything() {
        let s = score("", "flow_hot");
        assert_eq!(s.rule, MatchRule::Substring);
        assert_eq!(s.value, 0.9);
        assert_eq!(similarity("", "--"), 1.0);
    }

    #[test]
    fn test_expanded_exact_match() {
        // both expand to "temperaturehinlet"
        let s = score("temp_h_in", "temp_hot_in");
        assert_eq!(s.rule, MatchRule::ExpandedExact);
        assert_eq!(s.value, 0.95);
    }

    #[test]
    fn test_expanded_substring_match() {
        // "massflowrateh" contains "flowrateh"
        let s = score("mass_flow_h", "flow_hot");
        assert_eq!(s.rule, MatchRule::ExpandedSubstring);
        assert_eq!(s.value, 0.85);
    }

    #[test]
    fn test_edit_distance_fallback() {
        let s = score("fouling_resistnce", "fouling_resistance");
        assert_eq!(s.rule, MatchRule::EditDistance);
        assert!((s.value - (1.0 - 1.0 / 17.0)).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_strings_score_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_explain() {
        let s = score("dP", "dp");
        assert_eq!(s.explain(), "exact match: 100%");
    }
}
