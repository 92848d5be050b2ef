//! Terminal-facing lookups built on [`find_best_match`].
//!
//! Each lookup only chooses which candidates to offer and how to project the
//! winner; the comparison itself always happens in the matcher.

use crate::config::MatcherConfig;
use crate::error::MatcherError;
use crate::matcher::{find_best_match, Match};
use crate::normalize::NormalizationPolicy;
use crate::table::{validate_words, CompatibleNoun, Keyword, KeywordTable};
use tracing::info;

/// Resolves typed words against keyword tables under one normalization policy
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    policy: NormalizationPolicy,
}

impl KeywordMatcher {
    pub fn new(policy: NormalizationPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &MatcherConfig) -> Self {
        Self::new(config.policy())
    }

    pub fn policy(&self) -> &NormalizationPolicy {
        &self.policy
    }

    /// Swap the policy between parses. Needs `&mut self`, so no lookup can be
    /// running against the old one.
    pub fn set_policy(&mut self, policy: NormalizationPolicy) {
        self.policy = policy;
    }

    /// Resolve a single typed word against the global keyword table.
    pub fn parse_word<'t, T>(
        &self,
        word: &str,
        table: &'t KeywordTable<T>,
    ) -> Option<Match<&'t Keyword<T>>> {
        let found = find_best_match(
            &self.policy,
            word,
            table.iter().map(|keyword| (keyword.word.as_str(), keyword)),
        )?;
        self.log_parsed(&found.payload.word, found.matched_length);
        Some(found)
    }

    /// Resolve a typed word against the nouns valid in the current context,
    /// yielding the node the winning noun leads to.
    ///
    /// Fails with [`MatcherError::InvalidCandidate`] if any noun is empty.
    pub fn parse_word_override_options<'o, T>(
        &self,
        word: &str,
        options: &'o [CompatibleNoun<T>],
    ) -> Result<Option<Match<&'o T>>, MatcherError> {
        validate_words(options.iter().map(|option| option.noun.as_str()))?;

        let found = find_best_match(
            &self.policy,
            word,
            options.iter().map(|option| (option.noun.as_str(), option)),
        );
        Ok(found.map(|found| {
            self.log_parsed(&found.payload.noun, found.matched_length);
            found.map(|option| &option.result)
        }))
    }

    /// Resolve a whole sentence against keyword phrases. Only a phrase that
    /// consumes the entire normalized sentence counts.
    pub fn check_for_exact_sentence<'t, T>(
        &self,
        sentence: &str,
        table: &'t KeywordTable<T>,
    ) -> Option<Match<&'t Keyword<T>>> {
        let sentence_length = self.policy.normalize(sentence).chars().count();
        let found = find_best_match(
            &self.policy,
            sentence,
            table.iter().map(|keyword| (keyword.word.as_str(), keyword)),
        )
        .filter(|m| m.matched_length == sentence_length)?;
        self.log_parsed(&found.payload.word, found.matched_length);
        Some(found)
    }

    /// Resolve a player name typed after a command. Names compare
    /// case-insensitively; the match carries the winner's position in `names`.
    ///
    /// Fails with [`MatcherError::InvalidCandidate`] if any name is empty.
    pub fn check_for_player_name<'n, S: AsRef<str>>(
        &self,
        typed: &str,
        names: &'n [S],
    ) -> Result<Option<Match<&'n str>>, MatcherError> {
        validate_words(names.iter().map(|name| name.as_ref()))?;

        let typed = fold_case(typed);
        let found = find_best_match(
            &self.policy,
            &typed,
            names
                .iter()
                .map(|name| (fold_case(name.as_ref()), name.as_ref())),
        );
        if let Some(found) = &found {
            info!(
                "Parsed player name \"{}\" with {} letters",
                found.payload, found.matched_length
            );
        }
        Ok(found)
    }

    fn log_parsed(&self, word: &str, length: usize) {
        info!(
            "Parsed \"{}\" with {} letters",
            self.policy.normalize(word),
            length
        );
    }
}

/// Lowercase char by char, leaving chars whose lowercase form is longer
/// than one char (`'İ'`) as typed, so letter counts match the original name.
fn fold_case(s: &str) -> String {
    s.chars()
        .map(|ch| {
            let mut lower = ch.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(single), None) => single,
                _ => ch,
            }
        })
        .collect()
}
