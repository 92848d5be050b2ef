//! Keyword Matcher - longest-prefix command matching for terminal parsers
//!
//! Given a typed word or sentence, pick the known keyword whose whole name is
//! the longest prefix of it. Equal lengths go to the keyword declared first.
//! Optionally both sides are normalized first (spaces become dashes, other
//! punctuation is dropped) so `shotgun-shells` finds `"Shotgun Shells"`.
//!
//! # Lookups
//! - [`KeywordMatcher::parse_word`]: one word against the keyword table
//! - [`KeywordMatcher::parse_word_override_options`]: one word against context nouns
//! - [`KeywordMatcher::check_for_exact_sentence`]: a whole sentence against keyword phrases
//! - [`KeywordMatcher::check_for_player_name`]: a name against the crew list

pub mod config;
pub mod error;
pub mod lookup;
pub mod matcher;
pub mod normalize;
pub mod table;

pub use config::MatcherConfig;
pub use error::MatcherError;
pub use lookup::KeywordMatcher;
pub use matcher::{find_best_match, index_or_sentinel, Match, MatchState, NO_MATCH_INDEX};
pub use normalize::NormalizationPolicy;
pub use table::{CompatibleNoun, Keyword, KeywordTable};
