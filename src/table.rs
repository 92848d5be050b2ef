//! Keyword tables: the ordered candidate sets the matcher walks.
//!
//! Order is significant. When two keywords match the same number of letters
//! the one declared first wins, so tables preserve insertion order and never
//! sort or deduplicate.

use crate::error::MatcherError;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A known command word and what it resolves to
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword<T> {
    pub word: String,
    pub result: T,
}

impl<T> Keyword<T> {
    pub fn new(word: impl Into<String>, result: T) -> Self {
        Self {
            word: word.into(),
            result,
        }
    }
}

/// A noun accepted in the current context together with the node it leads to
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibleNoun<T> {
    pub noun: String,
    pub result: T,
}

impl<T> CompatibleNoun<T> {
    pub fn new(noun: impl Into<String>, result: T) -> Self {
        Self {
            noun: noun.into(),
            result,
        }
    }
}

/// Reject empty words, reporting the position of the first offender.
pub fn validate_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Result<(), MatcherError> {
    match words.into_iter().position(str::is_empty) {
        Some(position) => Err(MatcherError::empty_word(position)),
        None => Ok(()),
    }
}

/// Validated, ordered keyword table
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordTable<T> {
    keywords: Vec<Keyword<T>>,
}

impl<T> Default for KeywordTable<T> {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
        }
    }
}

impl<T> KeywordTable<T> {
    pub fn new(keywords: impl IntoIterator<Item = Keyword<T>>) -> Result<Self, MatcherError> {
        let keywords: Vec<Keyword<T>> = keywords.into_iter().collect();
        validate_words(keywords.iter().map(|k| k.word.as_str()))?;
        Ok(Self { keywords })
    }

    pub fn from_pairs<S: Into<String>>(
        pairs: impl IntoIterator<Item = (S, T)>,
    ) -> Result<Self, MatcherError> {
        Self::new(pairs.into_iter().map(|(word, result)| Keyword::new(word, result)))
    }

    pub fn keywords(&self) -> &[Keyword<T>] {
        &self.keywords
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Keyword<T>> {
        self.keywords.iter()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a KeywordTable<T> {
    type Item = &'a Keyword<T>;
    type IntoIter = std::slice::Iter<'a, Keyword<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keywords.iter()
    }
}

// ============================================================================
// Table Files
// ============================================================================

/// On-disk keyword table
#[derive(Debug, Deserialize)]
pub struct KeywordFile {
    /// Table format version
    #[serde(default)]
    pub version: String,

    /// Keywords in priority order
    pub keywords: Vec<KeywordEntry>,
}

/// A single keyword entry in a table file
#[derive(Debug, Deserialize)]
pub struct KeywordEntry {
    pub word: String,

    /// Arbitrary node payload handed back on a match
    #[serde(default)]
    pub result: Value,
}

impl KeywordFile {
    pub fn into_table(self) -> Result<KeywordTable<Value>, MatcherError> {
        KeywordTable::new(
            self.keywords
                .into_iter()
                .map(|entry| Keyword::new(entry.word, entry.result)),
        )
    }
}

/// Load, parse and validate a keyword table file
pub fn load_table(path: &Path) -> Result<KeywordTable<Value>, MatcherError> {
    if !path.exists() {
        return Err(MatcherError::TableNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| MatcherError::TableRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let file: KeywordFile =
        serde_json::from_str(&content).map_err(|e| MatcherError::TableParse(e.to_string()))?;

    file.into_table()
}
