//! kwm - resolve terminal input against a keyword table
//!
//! # Input (via stdin)
//! JSON with fields: input, context (word, options, sentence, name), options, names.
//! With `--batch`, a JSON array of such requests.
//!
//! # Output (via stdout)
//! JSON with the matched keyword, its result node, the matched letter count
//! and the winner's index (`-1` when nothing matched).

use clap::Parser;
use colored::Colorize;
use keyword_matcher::config::{default_config_path, default_table_path};
use keyword_matcher::table::load_table;
use keyword_matcher::{
    index_or_sentinel, CompatibleNoun, KeywordMatcher, KeywordTable, MatcherConfig, MatcherError,
    NormalizationPolicy,
};
use lazy_static::lazy_static;
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// Response format version
const RESPONSE_VERSION: &str = "1.0";

// ============================================================================
// Command Line
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "kwm", version, about = "Longest-prefix keyword matching for terminal input")]
struct Cli {
    /// Keyword table file (defaults to <config dir>/keyword-matcher/keywords.json)
    #[arg(long)]
    table: Option<PathBuf>,

    /// Config file (defaults to <config dir>/keyword-matcher/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Compare words exactly as typed, ignoring removeCommandPunctuation
    #[arg(long)]
    raw: bool,

    /// Read a JSON array of requests and answer with an array
    #[arg(long)]
    batch: bool,
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Which lookup a request runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum LookupContext {
    /// First typed word against the keyword table
    #[default]
    Word,
    /// First typed word against the request's options
    Options,
    /// Whole sentence against keyword phrases
    Sentence,
    /// Whole input against the request's player names
    Name,
}

#[derive(Debug, Deserialize)]
struct ParseRequest {
    /// What the player typed
    input: String,

    #[serde(default)]
    context: LookupContext,

    /// Nouns valid in the current context (options lookups)
    #[serde(default)]
    options: Vec<OptionEntry>,

    /// Player names (name lookups)
    #[serde(default)]
    names: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct OptionEntry {
    noun: String,

    #[serde(default)]
    result: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ParseResponse {
    version: String,

    matched: bool,

    /// Keyword, noun or player name that won
    #[serde(skip_serializing_if = "Option::is_none")]
    keyword: Option<String>,

    /// Result node of the winning keyword or noun
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,

    matched_length: usize,

    /// Winner's position among its candidates, -1 if none
    index: isize,
}

impl ParseResponse {
    fn unmatched() -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            matched: false,
            keyword: None,
            result: None,
            matched_length: 0,
            index: index_or_sentinel::<()>(None),
        }
    }

    fn matched(keyword: &str, result: Option<Value>, matched_length: usize, index: usize) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            matched: true,
            keyword: Some(keyword.to_string()),
            result,
            matched_length,
            index: index as isize,
        }
    }
}

// ============================================================================
// Tokenizing
// ============================================================================

lazy_static! {
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Trim and collapse whitespace runs to single spaces
fn tokenize(raw: &str) -> String {
    RE_WHITESPACE.replace_all(raw.trim(), " ").into_owned()
}

fn first_word(sentence: &str) -> &str {
    sentence.split(' ').next().unwrap_or_default()
}

// ============================================================================
// Resolving
// ============================================================================

fn resolve(
    matcher: &KeywordMatcher,
    table: &KeywordTable<Value>,
    request: &ParseRequest,
) -> Result<ParseResponse, MatcherError> {
    let sentence = tokenize(&request.input);
    debug!("Resolving {:?} as {:?}", sentence, request.context);

    let response = match request.context {
        LookupContext::Word => matcher
            .parse_word(first_word(&sentence), table)
            .map(|m| {
                ParseResponse::matched(
                    &m.payload.word,
                    Some(m.payload.result.clone()),
                    m.matched_length,
                    m.index,
                )
            }),
        LookupContext::Options => {
            let options: Vec<CompatibleNoun<&Value>> = request
                .options
                .iter()
                .map(|o| CompatibleNoun::new(o.noun.as_str(), &o.result))
                .collect();
            matcher
                .parse_word_override_options(first_word(&sentence), &options)?
                .map(|m| {
                    ParseResponse::matched(
                        &options[m.index].noun,
                        Some((*m.payload).clone()),
                        m.matched_length,
                        m.index,
                    )
                })
        }
        LookupContext::Sentence => matcher.check_for_exact_sentence(&sentence, table).map(|m| {
            ParseResponse::matched(
                &m.payload.word,
                Some(m.payload.result.clone()),
                m.matched_length,
                m.index,
            )
        }),
        LookupContext::Name => {
            matcher
                .check_for_player_name(&sentence, &request.names)?
                .map(|m| ParseResponse::matched(m.payload, None, m.matched_length, m.index))
        }
    };

    Ok(response.unwrap_or_else(ParseResponse::unmatched))
}

/// Resolve independently; a failing request answers unmatched.
fn resolve_batch(
    matcher: &KeywordMatcher,
    table: &KeywordTable<Value>,
    requests: &[ParseRequest],
) -> Vec<ParseResponse> {
    requests
        .par_iter()
        .map(|request| {
            resolve(matcher, table, request).unwrap_or_else(|e| {
                warn!("Request {:?} failed: {}", request.input, e);
                ParseResponse::unmatched()
            })
        })
        .collect()
}

fn load_matcher(cli: &Cli) -> Result<KeywordMatcher, MatcherError> {
    if cli.raw {
        return Ok(KeywordMatcher::new(NormalizationPolicy::disabled()));
    }

    let config = match &cli.config {
        Some(path) => MatcherConfig::load(path)?,
        None => MatcherConfig::load_or_default(&default_config_path()?)?,
    };
    debug!("Using config: {:?}", config);
    Ok(KeywordMatcher::from_config(&config))
}

fn load_keywords(cli: &Cli) -> Result<KeywordTable<Value>, MatcherError> {
    let path = match &cli.table {
        Some(path) => path.clone(),
        None => default_table_path()?,
    };
    debug!("Loading keyword table from: {:?}", path);

    match load_table(&path) {
        Ok(table) => Ok(table),
        Err(MatcherError::TableNotFound(path)) => {
            warn!("Keyword table not found at {:?}, matching against nothing", path);
            Ok(KeywordTable::default())
        }
        Err(e) => Err(e),
    }
}

fn log_response(response: &ParseResponse) {
    match &response.keyword {
        Some(keyword) => info!(
            "{} {} - {} letters (index {})",
            "⚡".yellow(),
            keyword.bold(),
            response.matched_length,
            response.index
        ),
        None => info!("{} no match", "∅".red()),
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    // Initialize tracing if RUST_LOG is set
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        // Answer "no match" rather than block the host parser
        let fallback = if cli.batch {
            "[]".to_string()
        } else {
            serde_json::to_string(&ParseResponse::unmatched()).unwrap_or_default()
        };
        println!("{}", fallback);
        std::process::exit(0);
    }
}

fn run(cli: &Cli) -> Result<(), MatcherError> {
    let mut input_json = String::new();
    io::stdin().read_to_string(&mut input_json)?;

    debug!("Received input: {}", input_json);

    let matcher = load_matcher(cli)?;
    let table = load_keywords(cli)?;
    info!("Loaded {} keywords", table.len());

    if cli.batch {
        let requests: Vec<ParseRequest> = serde_json::from_str(&input_json)?;
        let responses = resolve_batch(&matcher, &table, &requests);
        responses.iter().for_each(log_response);
        println!("{}", serde_json::to_string(&responses)?);
    } else {
        let request: ParseRequest = serde_json::from_str(&input_json)?;
        let response = resolve(&matcher, &table, &request)?;
        log_response(&response);
        println!("{}", serde_json::to_string(&response)?);
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
