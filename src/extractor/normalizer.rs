use scraper::Html;

use crate::extractor::rules::ExtractionRules;

/// Detach every excluded element from the tree; returns how many were removed.
///
/// Descendants go with their parent. Nested matches inside an already removed
/// subtree are detached again, which is harmless. Running twice is a no-op.
pub fn normalize(document: &mut Html, rules: &ExtractionRules) -> usize {
    let Some(selector) = rules.excluded() else {
        return 0;
    };

    // Select from the root element, not the document: `Html::select` walks
    // every node in the arena, detached ones included.
    let ids: Vec<_> = document
        .root_element()
        .select(selector)
        .map(|element| element.id())
        .collect();

    for id in &ids {
        if let Some(mut node) = document.tree.get_mut(*id) {
            node.detach();
        }
    }

    ids.len()
}
