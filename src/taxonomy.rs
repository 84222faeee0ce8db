//! The closed set of emotion labels the classifier may emit.

/// Permitted sentiment labels, in presentation order.
pub const SENTIMENTS: [&str; 28] = [
    "admiration",
    "amusement",
    "anger",
    "annoyance",
    "approval",
    "caring",
    "confusion",
    "curiosity",
    "desire",
    "disappointment",
    "disapproval",
    "disgust",
    "embarrassment",
    "excitement",
    "fear",
    "gratitude",
    "grief",
    "joy",
    "love",
    "nervousness",
    "optimism",
    "pride",
    "realization",
    "relief",
    "remorse",
    "sadness",
    "surprise",
    "neutral",
];

/// Label substituted when a segment ends up with no valid labels.
pub const FALLBACK_LABEL: &str = "neutral";

/// Look up a model-reported label, returning its canonical spelling.
///
/// Matching trims surrounding whitespace and ignores ASCII case.
pub fn canonical_label(label: &str) -> Option<&'static str> {
    let label = label.trim();
    SENTIMENTS
        .iter()
        .copied()
        .find(|s| s.eq_ignore_ascii_case(label))
}

/// Whether `label` is a member of the taxonomy (exact, canonical spelling).
pub fn contains(label: &str) -> bool {
    SENTIMENTS.contains(&label)
}

/// Intersect model-reported labels with the taxonomy.
///
/// Unknown labels are dropped and duplicates collapsed; first occurrence
/// wins. An empty intersection yields `[FALLBACK_LABEL]`, so the result is
/// never empty.
pub fn validate_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let mut valid: Vec<String> = Vec::new();
    for label in labels {
        if let Some(canonical) = canonical_label(label.as_ref()) {
            if !valid.iter().any(|v| v == canonical) {
                valid.push(canonical.to_string());
            }
        }
    }
    if valid.is_empty() {
        valid.push(FALLBACK_LABEL.to_string());
    }
    valid
}

/// Comma-joined label list for prompt construction.
pub fn joined() -> String {
    SENTIMENTS.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_label() {
        assert_eq!(canonical_label("joy"), Some("joy"));
        assert_eq!(canonical_label("  JOY \n"), Some("joy"));
        assert_eq!(canonical_label("Nervousness"), Some("nervousness"));
        assert_eq!(canonical_label("ecstatic"), None);
        assert_eq!(canonical_label(""), None);
    }

    #[test]
    fn test_validate_labels_filters_unknown() {
        assert_eq!(validate_labels(&["ecstatic", "Joy"]), vec!["joy"]);
        assert_eq!(validate_labels(&["ecstatic"]), vec!["neutral"]);
        assert_eq!(validate_labels::<&str>(&[]), vec!["neutral"]);
    }

    #[test]
    fn test_validate_labels_dedups_in_order() {
        assert_eq!(
            validate_labels(&["fear", "joy", "FEAR", " joy"]),
            vec!["fear", "joy"]
        );
    }

    #[test]
    fn test_fallback_is_member() {
        assert!(contains(FALLBACK_LABEL));
        assert_eq!(SENTIMENTS.last(), Some(&FALLBACK_LABEL));
        assert!(joined().starts_with("admiration, amusement"));
    }
}
