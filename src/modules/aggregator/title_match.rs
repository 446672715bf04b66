use strsim::jaro_winkler;

/// Duplicate-title detection used by the search merge.
///
/// The predicate is pluggable so the merge never has to know whether exact
/// or fuzzy matching is installed.
pub trait TitleMatcher: Send + Sync {
    /// Whether two display titles refer to the same underlying title
    fn is_same_title(&self, a: &str, b: &str) -> bool;

    fn name(&self) -> &'static str;
}

/// Normalize a title for comparison: lowercase, strip everything that is
/// not alphanumeric or whitespace, collapse whitespace runs.
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The minimum bar: case-insensitive, whitespace-normalized exact match.
/// This is the default matcher.
#[derive(Debug, Clone, Default)]
pub struct NormalizedExactMatcher;

impl TitleMatcher for NormalizedExactMatcher {
    fn is_same_title(&self, a: &str, b: &str) -> bool {
        let normalized_a = normalize_title(a);
        if normalized_a.is_empty() {
            return false;
        }
        normalized_a == normalize_title(b)
    }

    fn name(&self) -> &'static str {
        "NormalizedExact"
    }
}

/// Fuzzy extension: Jaro-Winkler over normalized titles. Good for short
/// name-like strings and tolerant of single-character damage.
#[derive(Debug, Clone)]
pub struct JaroWinklerMatcher {
    threshold: f64,
}

impl JaroWinklerMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for JaroWinklerMatcher {
    fn default() -> Self {
        // High bar: distinct titles sharing a prefix must not collapse
        Self::new(0.92)
    }
}

impl TitleMatcher for JaroWinklerMatcher {
    fn is_same_title(&self, a: &str, b: &str) -> bool {
        let normalized_a = normalize_title(a);
        let normalized_b = normalize_title(b);
        if normalized_a.is_empty() || normalized_b.is_empty() {
            return false;
        }
        jaro_winkler(&normalized_a, &normalized_b) >= self.threshold
    }

    fn name(&self) -> &'static str {
        "JaroWinkler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_lowercases_and_collapses_whitespace() {
        assert_eq!(normalize_title("  Naruto   SHIPPUDEN  "), "naruto shippuden");
        assert_eq!(normalize_title("naruto "), "naruto");
    }

    #[test]
    fn normalization_strips_punctuation() {
        assert_eq!(normalize_title("Re:Zero"), "rezero");
        assert_eq!(normalize_title("K-On!"), "kon");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_title("Fate/Stay Night (TV)");
        assert_eq!(normalize_title(&once), once);
    }

    #[test]
    fn exact_matcher_ignores_case_and_trailing_space() {
        let matcher = NormalizedExactMatcher;
        assert!(matcher.is_same_title("Naruto", "naruto "));
        assert!(matcher.is_same_title("ATTACK ON TITAN", "attack  on  titan"));
    }

    #[test]
    fn exact_matcher_keeps_different_titles_apart() {
        let matcher = NormalizedExactMatcher;
        assert!(!matcher.is_same_title("Naruto", "Naruto Shippuden"));
        assert!(!matcher.is_same_title("Bleach", "Naruto"));
    }

    #[test]
    fn empty_titles_never_match() {
        let matcher = NormalizedExactMatcher;
        assert!(!matcher.is_same_title("", ""));
        assert!(!matcher.is_same_title("!!!", "???"));
    }

    #[test]
    fn fuzzy_matcher_tolerates_a_typo() {
        let matcher = JaroWinklerMatcher::default();
        assert!(matcher.is_same_title("Attack on Titan", "Atack on Titan"));
    }

    #[test]
    fn fuzzy_matcher_keeps_sequels_apart() {
        let matcher = JaroWinklerMatcher::default();
        assert!(!matcher.is_same_title("Naruto", "Naruto Shippuden"));
    }

    #[test]
    fn matchers_are_commutative() {
        let exact = NormalizedExactMatcher;
        let fuzzy = JaroWinklerMatcher::default();
        for (a, b) in [("Naruto", "naruto "), ("Bleach", "Breach")] {
            assert_eq!(exact.is_same_title(a, b), exact.is_same_title(b, a));
            assert_eq!(fuzzy.is_same_title(a, b), fuzzy.is_same_title(b, a));
        }
    }
}
