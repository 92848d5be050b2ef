//! Longest-prefix matching over an ordered candidate sequence.
//!
//! A candidate qualifies only when its whole (normalized) key is a prefix of
//! the (normalized) input, and it replaces the current best only when it is
//! strictly longer. The first candidate to reach a given length therefore
//! keeps it.

use crate::normalize::NormalizationPolicy;
use tracing::{debug, trace};

/// Index reported to hosts that expect `-1` for "nothing matched"
pub const NO_MATCH_INDEX: isize = -1;

/// The winning candidate of a match pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<T> {
    pub payload: T,
    /// Letters of the input consumed by the winning key
    pub matched_length: usize,
    /// Position of the winner in the candidate sequence
    pub index: usize,
}

impl<T> Match<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Match<U> {
        Match {
            payload: f(self.payload),
            matched_length: self.matched_length,
            index: self.index,
        }
    }
}

/// Host-style index of a match result: the winner's position, or `-1`.
pub fn index_or_sentinel<T>(result: Option<&Match<T>>) -> isize {
    result.map_or(NO_MATCH_INDEX, |m| m.index as isize)
}

/// Accumulator for a single match pass.
///
/// Built fresh for every call and consumed by [`MatchState::finish`], so no
/// progress leaks from one parse into the next.
#[derive(Debug)]
pub struct MatchState<T> {
    best: Option<T>,
    best_length: usize,
    best_index: Option<usize>,
}

impl<T> Default for MatchState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MatchState<T> {
    pub fn new() -> Self {
        Self {
            best: None,
            best_length: 0,
            best_index: None,
        }
    }

    pub fn best_length(&self) -> usize {
        self.best_length
    }

    pub fn best_index(&self) -> Option<usize> {
        self.best_index
    }

    /// Offer one already-normalized candidate key.
    pub fn consider(mut self, index: usize, input: &str, key: &str, payload: T) -> Self {
        let key_length = key.chars().count();
        // A key no longer than the current best can never beat it.
        if key_length <= self.best_length {
            return self;
        }

        let length = common_prefix_length(input, key);
        trace!(index, key, length, "Compared candidate");

        if length == key_length {
            debug!(index, length, "New longest match \"{}\"", key);
            self.best = Some(payload);
            self.best_length = length;
            self.best_index = Some(index);
        }
        self
    }

    pub fn finish(self) -> Option<Match<T>> {
        let index = self.best_index?;
        self.best.map(|payload| Match {
            payload,
            matched_length: self.best_length,
            index,
        })
    }
}

/// Number of leading chars `a` and `b` share.
pub fn common_prefix_length(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Find the candidate whose key is the longest prefix of `input`.
///
/// `policy` is applied to the input and to every key. Candidates are visited
/// in iteration order; ties go to the earliest.
pub fn find_best_match<T, K, I>(
    policy: &NormalizationPolicy,
    input: &str,
    candidates: I,
) -> Option<Match<T>>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, T)>,
{
    let input = policy.normalize(input);
    if input.is_empty() {
        return None;
    }

    candidates
        .into_iter()
        .enumerate()
        .fold(MatchState::new(), |state, (index, (key, payload))| {
            let key = policy.normalize(key.as_ref());
            state.consider(index, &input, &key, payload)
        })
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> NormalizationPolicy {
        NormalizationPolicy::disabled()
    }

    #[test]
    fn test_longest_fully_consumed_key_wins() {
        let candidates = [("a", 'X'), ("ab", 'Y'), ("abc", 'Z')];
        let m = find_best_match(&raw(), "abcdef", candidates).unwrap();
        assert_eq!(m.payload, 'Z');
        assert_eq!(m.matched_length, 3);
        assert_eq!(m.index, 2);
    }

    #[test]
    fn test_order_does_not_beat_length() {
        let candidates = [("abc", 'Z'), ("ab", 'Y'), ("a", 'X')];
        let m = find_best_match(&raw(), "abcdef", candidates).unwrap();
        assert_eq!(m.payload, 'Z');
        assert_eq!(m.matched_length, 3);
    }

    #[test]
    fn test_first_seen_wins_ties() {
        let m = find_best_match(&raw(), "ab", [("ab", 'X'), ("ab", 'Y')]).unwrap();
        assert_eq!(m.payload, 'X');
        assert_eq!(m.matched_length, 2);
        assert_eq!(m.index, 0);

        // Ties are decided by position, not by key text.
        let candidates = [("a-x", 1), ("a-", 2), ("a-b", 3), ("a-b", 4)];
        let m = find_best_match(&raw(), "a-b", candidates).unwrap();
        assert_eq!(m.payload, 3);
    }

    #[test]
    fn test_key_longer_than_input_never_wins() {
        assert!(find_best_match(&raw(), "mo", [("moons", ())]).is_none());

        let m = find_best_match(&raw(), "moo", [("moons", 1), ("m", 2)]).unwrap();
        assert_eq!(m.payload, 2);
        assert_eq!(m.matched_length, 1);
    }

    #[test]
    fn test_partial_key_does_not_qualify() {
        // "abx" shares two letters with "abc" but is not consumed.
        assert!(find_best_match(&raw(), "abc", [("abx", ())]).is_none());
    }

    #[test]
    fn test_empty_input_never_matches() {
        assert!(find_best_match(&raw(), "", [("a", ()), ("b", ())]).is_none());
        assert!(find_best_match(&NormalizationPolicy::default(), "", [("a", ())]).is_none());
    }

    #[test]
    fn test_input_normalizing_to_empty_never_matches() {
        let policy = NormalizationPolicy::default();
        assert!(find_best_match(&policy, "?!", [("a", ())]).is_none());
    }

    #[test]
    fn test_key_normalizing_to_empty_never_qualifies() {
        let policy = NormalizationPolicy::default();
        let m = find_best_match(&policy, "go", [("!!", 1), ("g", 2)]).unwrap();
        assert_eq!(m.payload, 2);
    }

    #[test]
    fn test_no_candidates() {
        let none: [(&str, ()); 0] = [];
        assert!(find_best_match(&raw(), "look", none).is_none());
    }

    #[test]
    fn test_normalization_applies_to_keys() {
        let enabled = NormalizationPolicy::default();
        let m = find_best_match(&enabled, "go-north", [("go north", 'A')]).unwrap();
        assert_eq!(m.payload, 'A');
        assert_eq!(m.matched_length, 8);

        assert!(find_best_match(&raw(), "go-north", [("go north", 'A')]).is_none());
    }

    #[test]
    fn test_normalization_applies_to_input() {
        let enabled = NormalizationPolicy::default();
        let m = find_best_match(&enabled, "go north!", [("go-north", 'A')]).unwrap();
        assert_eq!(m.matched_length, 8);
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let m = find_best_match(&raw(), "überfall", [("üb", ())]).unwrap();
        assert_eq!(m.matched_length, 2);
    }

    #[test]
    fn test_deterministic() {
        let candidates = vec![("sc", 1), ("scan", 2), ("s", 3), ("scan", 4), ("store", 5)];
        let first = find_best_match(&raw(), "scanner", candidates.clone());
        for _ in 0..10 {
            assert_eq!(find_best_match(&raw(), "scanner", candidates.clone()), first);
        }
        assert_eq!(first.map(|m| m.payload), Some(2));
    }

    #[test]
    fn test_state_tracks_best() {
        let state = MatchState::new()
            .consider(0, "abc", "a", 'a')
            .consider(1, "abc", "ab", 'b')
            .consider(2, "abc", "ab", 'c');
        assert_eq!(state.best_length(), 2);
        assert_eq!(state.best_index(), Some(1));
        assert_eq!(state.finish().map(|m| m.payload), Some('b'));

        assert!(MatchState::<()>::new().finish().is_none());
    }

    #[test]
    fn test_index_or_sentinel() {
        let m = find_best_match(&raw(), "bob", [("alice", ()), ("bob", ())]);
        assert_eq!(index_or_sentinel(m.as_ref()), 1);
        assert_eq!(index_or_sentinel::<()>(None), NO_MATCH_INDEX);
    }

    #[test]
    fn test_common_prefix_length() {
        assert_eq!(common_prefix_length("abc", "abd"), 2);
        assert_eq!(common_prefix_length("", "abc"), 0);
        assert_eq!(common_prefix_length("abc", "abc"), 3);
        assert_eq!(common_prefix_length("ab", "abc"), 2);
    }
}
