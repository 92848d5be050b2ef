//! Cosmetic normalization of command words.
//!
//! Modded terminals register names like `"Shotgun Shells"`, `"shotgun-shells"`
//! or `"shotgun_shells!"` for what players type the same way. With the policy
//! enabled every space becomes a dash and everything that is not a letter, a
//! digit, or kept punctuation is dropped.

use std::borrow::Cow;

/// Punctuation that survives normalization unless configured otherwise
pub const DEFAULT_KEPT_PUNCTUATION: &str = "-";

/// Whether and how words are normalized before comparison.
///
/// Read-only for the duration of a match pass: the matcher borrows it, so the
/// input and every candidate of one pass see the same policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationPolicy {
    enabled: bool,
    kept_punctuation: Vec<char>,
}

impl Default for NormalizationPolicy {
    fn default() -> Self {
        Self::new(true, DEFAULT_KEPT_PUNCTUATION)
    }
}

impl NormalizationPolicy {
    pub fn new(enabled: bool, kept_punctuation: &str) -> Self {
        let mut kept: Vec<char> = kept_punctuation.chars().collect();
        kept.sort_unstable();
        kept.dedup();
        Self {
            enabled,
            kept_punctuation: kept,
        }
    }

    /// Policy that compares words exactly as written
    pub fn disabled() -> Self {
        Self::new(false, DEFAULT_KEPT_PUNCTUATION)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn kept_punctuation(&self) -> &[char] {
        &self.kept_punctuation
    }

    /// Normalize a word or phrase. Identity when the policy is disabled.
    pub fn normalize<'a>(&self, s: &'a str) -> Cow<'a, str> {
        if !self.enabled {
            return Cow::Borrowed(s);
        }

        let normalized: String = s
            .chars()
            .map(|ch| if ch == ' ' { '-' } else { ch })
            .filter(|ch| ch.is_alphanumeric() || self.keeps(*ch))
            .collect();

        if normalized == s {
            Cow::Borrowed(s)
        } else {
            Cow::Owned(normalized)
        }
    }

    fn keeps(&self, ch: char) -> bool {
        // Spaces are rewritten before filtering, so a kept ' ' never survives.
        ch != ' ' && self.kept_punctuation.binary_search(&ch).is_ok()
    }
}
