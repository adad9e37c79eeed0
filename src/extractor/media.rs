use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::extractor::{
    model::{FragmentSet, MediaFragment},
    text::flatten_text,
};

static IMG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("link").unwrap());
static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// Add image sources, `<link>` targets and anchors as tagged fragments.
///
/// `<link>` is normally removed by the normalizer already; the scan stays so
/// the collector gives the same answer under any rule set.
pub fn collect_media(document: &Html, out: &mut FragmentSet) {
    let root = document.root_element();

    for img in root.select(&IMG_SELECTOR) {
        if let Some(src) = img.value().attr("src").filter(|s| !s.is_empty()) {
            out.insert_media(MediaFragment::Image { src });
        }
    }

    for link in root.select(&LINK_SELECTOR) {
        if let Some(href) = link.value().attr("href").filter(|h| !h.is_empty()) {
            out.insert_media(MediaFragment::Link { href });
        }
    }

    for anchor in root.select(&ANCHOR_SELECTOR) {
        let href = anchor.value().attr("href").unwrap_or_default().trim();
        if href.is_empty() {
            continue;
        }
        let text = flatten_text(anchor);
        out.insert_media(MediaFragment::Anchor { text: &text, href });
    }
}
