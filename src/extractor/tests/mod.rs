use std::fs;

use crate::extractor::{ExtractionRules, extract_canonical, extract_fragments};
use crate::extractor::rules::HANGUL_SYLLABLES;

fn rules() -> &'static ExtractionRules {
    ExtractionRules::shared()
}

#[test]
fn test_extract_invitation_fixture() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/invitation.html")
        .expect("Failed to read test fixture");

    let canonical = extract_canonical(&html, rules());

    let expected = [
        "2025년 5월 17일 토요일 오후 12시 30분",
        "We are getting married김민수 & 이지은",
        "[ANCHOR] https://kakao.example.com/share",
        "[ANCHOR] 네이버 지도 → https://map.naver.com/p/entry/place/1234",
        "[IMAGE] https://cdn.example.com/cards/minsu-jieun/cover.jpg",
        "[IMAGE] https://cdn.example.com/cards/minsu-jieun/gallery-1.jpg",
        r#"{"groom":"김민수","bride":"이지은","date":"2025-05-17 12:30"}"#,
        "김민수 & 이지은",
        "김민수 ♥ 이지은 결혼합니다",
        "네이버 지도빈 링크",
        "더채플앳청담 3층 커티지홀",
        "서울 강남구 청담동 12-3",
        "신랑 김민수",
        "신부 이지은",
    ]
    .join("\n");
    assert_eq!(canonical, expected);
}

#[test]
fn test_fixture_drops_noise() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/invitation.html")
        .expect("Failed to read test fixture");

    let canonical = extract_canonical(&html, rules());

    assert!(!canonical.contains("card.css"), "stylesheet links are removed");
    assert!(!canonical.contains("background"), "style bodies are removed");
    assert!(!canonical.contains("자바스크립트가"), "noscript fallback is removed");
    assert!(!canonical.contains("Thank you"));
    assert!(!canonical.lines().any(|line| line == "♥"));
}

#[test]
fn test_hangul_text_kept_latin_dropped() {
    let fragments = extract_fragments("<div>안녕하세요</div><div>hello</div>", rules());

    assert!(fragments.contains("안녕하세요"));
    assert!(!fragments.contains("hello"));
}

#[test]
fn test_image_and_anchor_lines_are_sorted() {
    let canonical = extract_canonical(
        r#"<html><body><img src="a.png"><a href="b.html">click</a></body></html>"#,
        rules(),
    );

    assert_eq!(canonical, "[ANCHOR] click → b.html\n[IMAGE] a.png");
}

#[test]
fn test_output_independent_of_element_order() {
    let blocks = [
        "<p>신랑 김민수</p>",
        "<p>신부 이지은</p>",
        r#"<img src="cover.jpg">"#,
        r#"<a href="https://map.example.com">오시는 길</a>"#,
        "<li>예식장 3층</li>",
        "<h3>Save the date</h3>",
    ];
    let forward = format!("<html><body>{}</body></html>", blocks.concat());
    let reversed: String = blocks.iter().rev().copied().collect();
    let reversed = format!("<html><body>{reversed}</body></html>");
    let rotated = format!(
        "<html><body>{}{}</body></html>",
        blocks[3..].concat(),
        blocks[..3].concat()
    );

    let expected = extract_canonical(&forward, rules());
    assert!(!expected.is_empty());
    assert_eq!(extract_canonical(&reversed, rules()), expected);
    assert_eq!(extract_canonical(&rotated, rules()), expected);
}

#[test]
fn test_text_fragments_obey_filter() {
    let html = r#"<div>
        <p>가</p><p>ok</p><p>좋아요</p><h4>Venue 홀</h4><li>  </li><title>x</title>
    </div>"#;

    let fragments = extract_fragments(html, rules());

    for fragment in fragments.iter().filter(|f| !f.starts_with('[')) {
        assert!(fragment.chars().count() >= 2, "{fragment:?} too short");
        assert!(
            fragment.chars().any(|c| HANGUL_SYLLABLES.contains(&c)),
            "{fragment:?} has no Hangul"
        );
    }
    assert!(fragments.contains("좋아요"));
    assert!(fragments.contains("Venue 홀"));
    assert!(!fragments.contains("가"));
    assert!(!fragments.contains("ok"));
}

#[test]
fn test_empty_html_yields_empty_text() {
    assert_eq!(extract_canonical("", rules()), "");
    assert_eq!(extract_canonical("   \n ", rules()), "");
    assert!(extract_fragments("<html></html>", rules()).is_empty());
}

#[test]
fn test_malformed_html() {
    let html = "<html><head><title>깨진 페이지<body><p>닫히지 않은 태그<div>추가 내용";

    // Should handle malformed HTML gracefully
    let canonical = extract_canonical(html, rules());
    assert!(canonical.contains("추가 내용"));
}

#[test]
fn test_fragments_own_their_text() {
    let fragments = {
        let html = String::from("<p>문서가 사라져도</p>");
        extract_fragments(&html, rules())
    };

    assert!(fragments.contains("문서가 사라져도"));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(html in ".*") {
            let _ = extract_canonical(&html, rules());
        }

        #[test]
        fn test_canonical_lines_are_sorted_and_unique(html in "(<p>[가-힣a-z ]{0,8}</p>|<img src=\"[a-z]{1,4}\">){0,12}") {
            let canonical = extract_canonical(&html, rules());
            let lines: Vec<&str> = canonical.lines().collect();
            for pair in lines.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }
}
