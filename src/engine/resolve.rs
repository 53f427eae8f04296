//! Fuzzy title resolution.

use crate::index::TitleIndex;
use crate::types::{RecError, RecResult, Resolution, ResolvedTitle, DEFAULT_THRESHOLD};

/// Levenshtein ratio on a 0-100 scale:
/// `round((1 - distance / max(len_a, len_b)) * 100)`, lengths in chars.
/// Two empty strings are identical (100).
pub fn ratio(a: &str, b: &str) -> u8 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100;
    }
    let distance = strsim::levenshtein(a, b);
    ((1.0 - distance as f64 / max_len as f64) * 100.0).round() as u8
}

/// Maps free text to the best-scoring catalog title.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyResolver {
    threshold: u8,
}

impl FuzzyResolver {
    /// Create a resolver that accepts scores strictly above `threshold`.
    pub fn new(threshold: u8) -> RecResult<Self> {
        if threshold > 100 {
            return Err(RecError::InvalidThreshold(threshold as u32));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Scan every title and keep the first one with the highest score above
    /// the threshold. Input is only lowercased; an empty input is scored
    /// like any other string.
    pub fn resolve(&self, input: &str, titles: &TitleIndex) -> Resolution {
        let needle = input.to_lowercase();

        let mut best: Option<(&str, u8)> = None;
        for (title, folded) in titles.iter_folded() {
            let score = ratio(folded, &needle);
            let beats_best = best.map_or(true, |(_, max)| score > max);
            if score > self.threshold && beats_best {
                best = Some((title, score));
            }
        }

        match best {
            Some((title, score)) => {
                log::debug!("Resolved {:?} to {:?} (score {})", input, title, score);
                Resolution::Resolved(ResolvedTitle {
                    title: title.to_string(),
                    score,
                })
            }
            None => {
                log::debug!("No title above {} for {:?}", self.threshold, input);
                Resolution::NoMatch {
                    input: input.to_string(),
                }
            }
        }
    }
}

impl Default for FuzzyResolver {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_bounds() {
        assert_eq!(ratio("abc", "abc"), 100);
        assert_eq!(ratio("abc", "xyz"), 0);
        assert_eq!(ratio("", ""), 100);
        assert_eq!(ratio("", "abc"), 0);
    }

    #[test]
    fn ratio_one_typo() {
        // 1 edit over 11 chars
        assert_eq!(ratio("life of pi", "life of pie"), 91);
    }

    #[test]
    fn ratio_counts_chars_not_bytes() {
        // 1 substitution over 4 chars
        assert_eq!(ratio("café", "cafe"), 75);
    }

    #[test]
    fn threshold_over_100_rejected() {
        assert!(FuzzyResolver::new(101).is_err());
        assert_eq!(FuzzyResolver::new(80).unwrap().threshold(), 80);
    }
}
