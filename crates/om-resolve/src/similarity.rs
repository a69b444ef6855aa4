//! Company name similarity.
//!
//! This is a cheap character-overlap heuristic, not an edit distance. The
//! default clear-match threshold of 0.85 is tuned against this function; a
//! Levenshtein-style metric would need a different threshold.

/// Score assigned when one normalized name contains the other.
pub const CONTAINMENT_SCORE: f64 = 0.8;

/// Lower-case `name` and drop everything that is not alphanumeric.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Score how well two organization names match, in `[0, 1]`.
///
/// - `1.0` when the normalized names are equal
/// - [`CONTAINMENT_SCORE`] when one contains the other
/// - otherwise the number of characters of the shorter name that occur
///   anywhere in the longer one, divided by the longer name's length
///
/// Either name normalizing to nothing scores `0.0`. The overlap ratio is only
/// symmetric up to which side counts as "shorter" when lengths tie.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize_name(a);
    let b = normalize_name(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    if a.contains(&b) || b.contains(&a) {
        return CONTAINMENT_SCORE;
    }

    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (&a, &b)
    } else {
        (&b, &a)
    };
    let shared = shorter.chars().filter(|c| longer.contains(*c)).count();
    #[allow(clippy::cast_precision_loss)]
    let ratio = shared as f64 / longer.chars().count() as f64;
    ratio.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[rstest]
    #[case("Acme")]
    #[case("ACME Corp S.L.")]
    #[case("Société Générale")]
    #[case("3M")]
    fn identical_names_score_one(#[case] name: &str) {
        assert!(approx(similarity(name, name), 1.0));
    }

    #[test]
    fn normalization_ignores_case_and_punctuation() {
        assert_eq!(normalize_name("ACME Corp, S.L."), "acmecorpsl");
        assert!(approx(similarity("Acme-Corp", "acme corp"), 1.0));
    }

    #[test]
    fn containment_scores_point_eight() {
        assert!(similarity("Acme Corp", "ACME CORP S.L.") >= 0.8);
        assert!(approx(similarity("Acme", "Acme Tools Ltd"), CONTAINMENT_SCORE));
        assert!(approx(similarity("Acme Tools Ltd", "Acme"), CONTAINMENT_SCORE));
    }

    #[test]
    fn overlap_ratio_divides_by_longer_length() {
        // "abc" vs "axbyz": a and b occur, c does not → 2 / 5.
        assert!(approx(similarity("abc", "axbyz"), 0.4));
        assert!(approx(similarity("xyz", "abcdef"), 0.0));
    }

    #[test]
    fn empty_names_score_zero() {
        assert!(approx(similarity("", "Acme"), 0.0));
        assert!(approx(similarity("--", "Acme"), 0.0));
        assert!(approx(similarity("", ""), 0.0));
    }

    #[rstest]
    #[case("Acme Tools Ltd", "Acme Services Inc")]
    #[case("Globex", "Initech")]
    #[case("aaaa", "a")]
    #[case("Umbrella Corporation", "Umbrella Corp")]
    #[case("abcd", "dcba")]
    fn scores_stay_within_bounds(#[case] a: &str, #[case] b: &str) {
        for score in [similarity(a, b), similarity(b, a)] {
            assert!((0.0..=1.0).contains(&score), "{a} / {b}: {score}");
        }
    }
}
