use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    completion::{CompletionClient, CompletionError, SYSTEM_PROMPT, build_prompt},
    extractor::{ExtractionRules, extract_canonical},
    fetcher::fetch_html,
};

/// Runs one invitation link through fetch, extraction and the model.
///
/// Holds no per-request state; every call builds and drops its own document.
pub struct VoucherService {
    completion: Arc<dyn CompletionClient>,
    rules: &'static ExtractionRules,
}

impl VoucherService {
    pub fn new(completion: Arc<dyn CompletionClient>) -> Self {
        Self {
            completion,
            rules: ExtractionRules::shared(),
        }
    }

    pub fn completion_configured(&self) -> bool {
        self.completion.is_configured()
    }

    /// Canonical text of the page at `link`; empty when the fetch failed.
    pub async fn canonical_text(&self, link: &str) -> String {
        let html = fetch_html(link).await;
        extract_canonical(&html, self.rules)
    }

    /// The model's answer for `link`, verbatim.
    #[instrument(skip(self))]
    pub async fn parse(&self, link: &str) -> Result<String, CompletionError> {
        let canonical = self.canonical_text(link).await;
        if canonical.is_empty() {
            warn!("no fragments extracted, sending instructions only");
        } else {
            info!(lines = canonical.lines().count(), "page extracted");
        }

        let prompt = build_prompt(&canonical);
        self.completion.complete(SYSTEM_PROMPT, &prompt).await
    }
}
