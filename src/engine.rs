//! Exact-count text replacement.
//!
//! A `Rule` pairs a literal search string with a replacement and the number
//! of occurrences it must match. Rules either apply cleanly or not at all:
//! a count mismatch rejects the whole text unchanged, which is the guardrail
//! against templates that have drifted from their expected markers.

use serde::{Deserialize, Serialize};

/// One exact-text replacement with a required occurrence count.
///
/// `expected = 0` is a valid guard meaning "this text must be absent".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub find: String,
    pub replace: String,
    #[serde(default = "default_expected")]
    pub expected: usize,
}

fn default_expected() -> usize {
    1
}

impl Rule {
    pub fn new(find: impl Into<String>, replace: impl Into<String>, expected: usize) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
            expected,
        }
    }

    /// Guard rule asserting that `find` does not occur in the text.
    pub fn absent(find: impl Into<String>) -> Self {
        Self::new(find, "", 0)
    }
}

/// Result of applying a rule or chain to a text.
///
/// `Rejected` always carries the original input text, never a partially
/// transformed intermediate, so callers can treat a rejection as a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied(String),
    Rejected { data: String, errors: Vec<String> },
}

impl Outcome {
    pub fn rejected(original: &str, errors: Vec<String>) -> Self {
        Outcome::Rejected {
            data: original.to_string(),
            errors,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    /// The carried text: transformed on success, original on rejection.
    pub fn text(&self) -> &str {
        match self {
            Outcome::Applied(data) => data,
            Outcome::Rejected { data, .. } => data,
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            Outcome::Applied(_) => &[],
            Outcome::Rejected { errors, .. } => errors,
        }
    }
}

/// Apply a single rule to `text`.
///
/// Counts exact, non-overlapping occurrences of `rule.find`. If the count
/// differs from `rule.expected`, the text is returned unchanged together
/// with a diagnostic naming the literal search text and both counts.
pub fn apply_rule(text: &str, rule: &Rule) -> Outcome {
    if rule.find.is_empty() {
        return Outcome::rejected(
            text,
            vec!["Replacement rule has an empty search text".to_string()],
        );
    }

    let found = text.matches(&rule.find).count();
    if found != rule.expected {
        let error = format!(
            "Expected {} occurrences of '{}', found {}",
            rule.expected, rule.find, found
        );
        return Outcome::rejected(text, vec![error]);
    }

    Outcome::Applied(text.replace(&rule.find, &rule.replace))
}

/// Apply rules in sequence, feeding each result into the next rule.
///
/// Aborts on the first rule that fails: the rejection carries the original
/// pre-chain text (not the partially transformed intermediate) and exactly
/// the failing rule's diagnostics. Ordering is preserved because later rules
/// may target text introduced or removed by earlier ones.
pub fn apply_chain(text: &str, rules: &[Rule]) -> Outcome {
    let mut current = text.to_string();

    for rule in rules {
        match apply_rule(&current, rule) {
            Outcome::Applied(data) => current = data,
            Outcome::Rejected { errors, .. } => return Outcome::rejected(text, errors),
        }
    }

    Outcome::Applied(current)
}
