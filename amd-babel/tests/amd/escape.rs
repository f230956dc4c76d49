use amd_babel::{escape, unescape};
use proptest::prelude::*;

#[test]
fn test_escape_leaves_no_bare_reserved_characters() {
    let escaped = escape(r"100% of $5 & #2_x {y} \ ~ ^");
    assert_eq!(
        escaped,
        r"100\% of \$5 \& \#2\_x \{y\} \textbackslash{} \textasciitilde{} \textasciicircum{}"
    );
}

#[test]
fn test_unbalanced_markers_are_literal() {
    assert_eq!(escape("5 * 3"), "5 * 3");
    assert_eq!(unescape(&escape("**open")), "**open");
}

/// Author text without emphasis markers, possibly spanning lines
fn plain(min: usize) -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("[a-zA-Z0-9 .,:;!?()\\\\~^&%$#_{{}}\\n-]{{{min},16}}"))
        .unwrap()
}

/// `*x*`, `**x**` or `***x***` around one line of text
fn emphasized() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("*"), Just("**"), Just("***")],
        "[a-zA-Z0-9 .,:;!?()\\\\~^&%$#_{}-]{1,16}",
    )
        .prop_map(|(marker, body)| format!("{marker}{body}{marker}"))
}

/// Emphasis spans separated by plain text, so no two spans touch
fn marked_up() -> impl Strategy<Value = String> {
    (plain(0), prop::collection::vec((emphasized(), plain(1)), 0..4)).prop_map(|(lead, spans)| {
        spans.into_iter().fold(lead, |mut text, (span, gap)| {
            text.push_str(&span);
            text.push_str(&gap);
            text
        })
    })
}

proptest! {
    #[test]
    fn unescape_reverses_escape(text in "[a-zA-Z0-9 .,:;!?()\\\\~^&%$#_{}-]{0,64}") {
        prop_assert_eq!(unescape(&escape(&text)), text);
    }

    #[test]
    fn escape_is_stable_through_a_round_trip(text in "[a-zA-Z0-9 .,:;!?()\\\\~^&%$#_{}-]{0,64}") {
        let escaped = escape(&text);
        prop_assert_eq!(escape(&unescape(&escaped)), escaped);
    }

    #[test]
    fn unescape_reverses_emphasis(text in marked_up()) {
        let escaped = escape(&text);
        prop_assert!(!escaped.contains('*'), "markers left in {}", escaped);
        prop_assert_eq!(unescape(&escaped), text);
    }
}
