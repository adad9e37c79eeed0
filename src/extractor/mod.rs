//! Turns a page's HTML into canonical text: one fragment per line, sorted.
//!
//! The pipeline is parse → [`normalizer::normalize`] → [`text::collect_text`]
//! and [`media::collect_media`] into one [`FragmentSet`] →
//! [`model::canonicalize`]. Output depends only on which fragments exist,
//! never on where they sit in the document.

pub mod media;
pub mod model;
pub mod normalizer;
pub mod rules;
pub mod text;

#[cfg(test)]
mod tests;

pub use model::{FragmentSet, MediaFragment, canonicalize};
pub use rules::{ExtractionRules, ScriptFilter};

use scraper::Html;
use tracing::debug;

/// Collect every fragment of `html` under `rules`.
pub fn extract_fragments(html: &str, rules: &ExtractionRules) -> FragmentSet {
    let mut fragments = FragmentSet::new();
    if html.trim().is_empty() {
        return fragments;
    }

    let mut document = Html::parse_document(html);
    let removed = normalizer::normalize(&mut document, rules);

    text::collect_text(&document, rules, &mut fragments);
    media::collect_media(&document, &mut fragments);

    debug!(removed, fragments = fragments.len(), "extracted fragments");
    fragments
}

/// Canonical text of `html`. Empty input gives an empty string.
pub fn extract_canonical(html: &str, rules: &ExtractionRules) -> String {
    canonicalize(&extract_fragments(html, rules))
}
