//! Tag sets and content filters that drive extraction.
//!
//! The built-in rules keep `script` and `meta` in the document: invitation
//! builders often embed their data as JSON inside scripts, which the model
//! can read.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use scraper::Selector;
use thiserror::Error;

/// Elements removed (with their whole subtree) before anything is collected.
pub const EXCLUDED_TAGS: &[&str] = &["style", "noscript", "link"];

/// Elements whose flattened text becomes a text fragment candidate.
pub const TEXT_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "div", "script", "meta", "title",
];

/// Hangul syllables block.
pub const HANGUL_SYLLABLES: RangeInclusive<char> = '\u{AC00}'..='\u{D7A3}';

/// Text fragments shorter than this (in characters) are dropped.
pub const MIN_TEXT_CHARS: usize = 2;

static DEFAULT_RULES: LazyLock<ExtractionRules> = LazyLock::new(|| {
    ExtractionRules::new(
        EXCLUDED_TAGS,
        TEXT_TAGS,
        ScriptFilter::Range(HANGUL_SYLLABLES),
        MIN_TEXT_CHARS,
    )
    .expect("built-in tag lists are valid selectors")
});

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("invalid tag name {tag:?}: {reason}")]
    InvalidTag { tag: String, reason: String },
}

/// Relevance predicate for text fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptFilter {
    /// Keep any text.
    Any,
    /// Keep text containing at least one character in the range.
    Range(RangeInclusive<char>),
}

impl ScriptFilter {
    pub fn admits(&self, text: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Range(range) => text.chars().any(|c| range.contains(&c)),
        }
    }
}

/// Compiled extraction configuration.
#[derive(Debug)]
pub struct ExtractionRules {
    excluded: Option<Selector>,
    text: Option<Selector>,
    script_filter: ScriptFilter,
    min_text_chars: usize,
}

impl ExtractionRules {
    pub fn new(
        excluded_tags: &[&str],
        text_tags: &[&str],
        script_filter: ScriptFilter,
        min_text_chars: usize,
    ) -> Result<Self, RulesError> {
        Ok(Self {
            excluded: tag_selector(excluded_tags)?,
            text: tag_selector(text_tags)?,
            script_filter,
            min_text_chars,
        })
    }

    /// The reference rules, compiled once per process.
    pub fn shared() -> &'static ExtractionRules {
        &DEFAULT_RULES
    }

    pub(crate) fn excluded(&self) -> Option<&Selector> {
        self.excluded.as_ref()
    }

    pub(crate) fn text(&self) -> Option<&Selector> {
        self.text.as_ref()
    }

    pub fn script_filter(&self) -> &ScriptFilter {
        &self.script_filter
    }

    /// Whether flattened element text qualifies as a text fragment.
    pub fn admits_text(&self, text: &str) -> bool {
        text.chars().count() >= self.min_text_chars.max(1) && self.script_filter.admits(text)
    }
}

/// Build a selector list (`a, b, c`) for plain tag names. An empty list matches nothing.
fn tag_selector(tags: &[&str]) -> Result<Option<Selector>, RulesError> {
    if let Some(bad) = tags
        .iter()
        .find(|tag| tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
    {
        return Err(RulesError::InvalidTag {
            tag: bad.to_string(),
            reason: "expected a bare element name".to_string(),
        });
    }
    if tags.is_empty() {
        return Ok(None);
    }

    let joined = tags.join(", ");
    Selector::parse(&joined)
        .map(Some)
        .map_err(|e| RulesError::InvalidTag {
            tag: joined.clone(),
            reason: e.to_string(),
        })
}
