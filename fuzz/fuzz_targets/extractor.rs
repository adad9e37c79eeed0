#![no_main]

use libfuzzer_sys::fuzz_target;

use voucher_parser::extractor::{ExtractionRules, extract_canonical, extract_fragments};

fuzz_target!(|data: &[u8]| {
    // Convert raw bytes to string, handling invalid UTF-8 gracefully
    let html = String::from_utf8_lossy(data);

    // The extractor should never panic regardless of input
    let fragments = extract_fragments(&html, ExtractionRules::shared());
    assert!(fragments.iter().all(|fragment| !fragment.is_empty()));

    let canonical = extract_canonical(&html, ExtractionRules::shared());
    assert_eq!(canonical.is_empty(), fragments.is_empty());
});
