use scraper::{ElementRef, Html, Node};

use crate::extractor::{model::FragmentSet, rules::ExtractionRules};

/// Add the flattened text of every text-bearing element that passes the rules.
///
/// Nested matches each contribute their own fragment, so a `div` wrapping a
/// `p` yields both the outer and the inner text.
pub fn collect_text(document: &Html, rules: &ExtractionRules, out: &mut FragmentSet) {
    let Some(selector) = rules.text() else {
        return;
    };

    for element in document.root_element().select(selector) {
        let text = flatten_text(element);
        if rules.admits_text(&text) {
            out.insert(text);
        }
    }
}

/// Concatenate the element's text nodes, each trimmed, skipping blank ones.
///
/// Script bodies count only for the `script` element itself, never for the
/// containers around it. Text inside `<template>` is never rendered and is
/// skipped entirely.
pub fn flatten_text(element: ElementRef<'_>) -> String {
    let own_id = element.id();
    let mut flattened = String::new();

    for node in element.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let inside_foreign_script = node.parent().is_some_and(|parent| {
            parent.id() != own_id
                && parent
                    .value()
                    .as_element()
                    .is_some_and(|e| e.name() == "script")
        });
        let inside_template = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(is_template);
        if inside_foreign_script || inside_template {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            flattened.push_str(trimmed);
        }
    }

    flattened
}

fn is_template(element: ElementRef<'_>) -> bool {
    element.value().name() == "template"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::rules::{HANGUL_SYLLABLES, ScriptFilter, TEXT_TAGS};

    fn collect(html: &str) -> FragmentSet {
        let document = Html::parse_document(html);
        let mut set = FragmentSet::new();
        collect_text(&document, ExtractionRules::shared(), &mut set);
        set
    }

    #[test]
    fn keeps_hangul_and_drops_other_scripts() {
        let set = collect("<div>안녕하세요</div><div>hello</div>");

        assert!(set.contains("안녕하세요"));
        assert!(!set.contains("hello"));
    }

    #[test]
    fn flattens_with_trimmed_pieces_and_no_separator() {
        let set = collect("<p>  신랑 <b> 김민수 </b>\n 신부 <i>이지은</i>  </p>");

        assert!(set.contains("신랑김민수신부이지은"));
    }

    #[test]
    fn drops_single_character_text() {
        let set = collect("<li>집</li><li>예식</li>");

        assert!(!set.contains("집"));
        assert!(set.contains("예식"));
    }

    #[test]
    fn nested_elements_each_contribute() {
        let set = collect("<div><p>예식 안내</p><p>오시는 길</p></div>");

        assert!(set.contains("예식 안내"));
        assert!(set.contains("오시는 길"));
        assert!(set.contains("예식 안내오시는 길"));
    }

    #[test]
    fn script_text_counts_only_for_the_script() {
        let set = collect(
            r#"<div>초대장<script>window.__DATA__ = {"groom":"민수"}</script></div>"#,
        );

        assert!(set.contains(r#"window.__DATA__ = {"groom":"민수"}"#));
        assert!(set.contains("초대장"));
    }

    #[test]
    fn template_contents_are_not_text() {
        let set = collect("<div>청첩장<template><p>템플릿</p></template></div>");

        assert!(set.contains("청첩장"));
        assert!(!set.contains("템플릿"));
        assert!(!set.contains("청첩장템플릿"));
    }

    #[test]
    fn title_is_collected() {
        let set = collect("<html><head><title>민수 ♥ 지은 결혼합니다</title></head><body></body></html>");

        assert!(set.contains("민수 ♥ 지은 결혼합니다"));
    }

    #[test]
    fn custom_rules_can_disable_the_script_filter() {
        let rules = ExtractionRules::new(&[], TEXT_TAGS, ScriptFilter::Any, 2).unwrap();
        let document = Html::parse_document("<p>hello</p><p>x</p>");
        let mut set = FragmentSet::new();

        collect_text(&document, &rules, &mut set);

        assert!(set.contains("hello"));
        assert!(!set.contains("x"));
        assert_eq!(
            rules.script_filter(),
            &ScriptFilter::Any,
            "filter is configurable"
        );
        assert_ne!(ScriptFilter::Range(HANGUL_SYLLABLES), ScriptFilter::Any);
    }
}
