//! Normalized string similarity on a 0 to 100 scale.
//!
//! The score is the indel ratio: `2 * LCS / (len(a) + len(b))`, where LCS is the
//! longest common subsequence of characters. Insertions and deletions are the only
//! edit operations, so a substitution costs two. The result is rounded to the nearest
//! integer, which makes threshold comparisons exact.

/// Similarity of two strings in `0..=100`.
///
/// Comparison is on `char`s and is case-sensitive; callers normalize first.
/// Returns 0 if either side is empty.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let common = longest_common_subsequence(&a, &b);
    let total = (a.len() + b.len()) as f64;

    ((200.0 * common as f64) / total).round() as u8
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(ratio("track my order", "track my order"), 100);
    }

    #[test]
    fn disjoint_strings_score_0() {
        assert_eq!(ratio("abc", "xyz"), 0);
    }

    #[test]
    fn empty_side_scores_0() {
        assert_eq!(ratio("", "abc"), 0);
        assert_eq!(ratio("abc", ""), 0);
        assert_eq!(ratio("", ""), 0);
    }

    #[test]
    fn substitution_counts_as_two_edits() {
        // LCS("kitten", "sitting") = 4 ("ittn"), total length 13.
        assert_eq!(ratio("kitten", "sitting"), 62);
    }

    #[test]
    fn exact_boundary_values() {
        // 17 shared chars, 3 unique on each side: 34/40.
        assert_eq!(ratio("abcdefghijklmnopqrst", "abcdefghijklmnopquvw"), 85);
        // 21 shared chars, 4 unique on each side: 42/50.
        assert_eq!(
            ratio("abcdefghijklmnopqrstuvwxy", "abcdefghijklmnopqrstuz123"),
            84
        );
    }

    #[test]
    fn rounds_half_fractions_to_nearest() {
        // 8 shared chars of 18 total: 88.9
        assert_eq!(ratio("abcdefghx", "abcdefghy"), 89);
    }

    proptest! {
        #[test]
        fn ratio_is_symmetric(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
            prop_assert_eq!(ratio(&a, &b), ratio(&b, &a));
        }

        #[test]
        fn ratio_is_bounded(a in "\\PC{0,30}", b in "\\PC{0,30}") {
            prop_assert!(ratio(&a, &b) <= 100);
        }
    }
}
