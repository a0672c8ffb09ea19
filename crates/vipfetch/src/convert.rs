//! HTML to text reduction

use scraper::Html;

/// Elements whose text is never visible
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Reduce an HTML document to its visible text
///
/// Every non-empty text node outside [`SKIP_TAGS`] becomes one line of
/// output, in document order. Parsing is tolerant: broken markup yields
/// whatever text the parser could recover, never an error.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut lines: Vec<&str> = Vec::new();
    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIP_TAGS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed);
        }
    }

    lines.join("\n")
}

/// Cut `text` to at most `max_chars` characters
///
/// Returns the kept text and whether anything was dropped. The cut is
/// not word-aware.
pub fn truncate_chars(text: String, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut text = text;
            text.truncate(byte_idx);
            (text, true)
        }
        None => (text, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_simple() {
        let html = "<html><body><p>Hello</p><p>World</p></body></html>";
        assert_eq!(html_to_text(html), "Hello\nWorld");
    }

    #[test]
    fn test_text_nodes_split_by_newline() {
        let html = "<p>Leilão <strong>1</strong> aberto</p>";
        assert_eq!(html_to_text(html), "Leilão\n1\naberto");
    }

    #[test]
    fn test_skip_script_and_style() {
        let html = r#"<html><head><style>body { color: red; }</style>
            <script>alert('bad');</script></head>
            <body><p>Before</p><noscript>enable js</noscript><p>After</p></body></html>"#;
        let text = html_to_text(html);
        assert_eq!(text, "Before\nAfter");
    }

    #[test]
    fn test_title_kept() {
        let html = "<html><head><title>Leilões</title></head><body>Lote 7</body></html>";
        assert_eq!(html_to_text(html), "Leilões\nLote 7");
    }

    #[test]
    fn test_entities_decoded() {
        let html = "<p>Tom &amp; Jerry &lt;3 &quot;quoted&quot; &copy;</p>";
        assert_eq!(html_to_text(html), "Tom & Jerry <3 \"quoted\" ©");
    }

    #[test]
    fn test_comments_dropped() {
        let html = "<div>a<!-- hidden -->b</div>";
        assert_eq!(html_to_text(html), "a\nb");
    }

    #[test]
    fn test_malformed_markup_degrades() {
        let html = "<div><p>Unclosed <b>bold<p>Next</div></span>tail <<>";
        let text = html_to_text(html);
        assert!(text.contains("Unclosed"));
        assert!(text.contains("bold"));
        assert!(text.contains("Next"));
        assert!(text.contains("tail"));
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(html_to_text("just some text"), "just some text");
        assert_eq!(html_to_text(r#"{"key": "value"}"#), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(html_to_text(""), "");
        assert_eq!(html_to_text("<html><body>   </body></html>"), "");
    }

    #[test]
    fn test_truncate_chars_short() {
        let (text, truncated) = truncate_chars("abc".to_string(), 5);
        assert_eq!(text, "abc");
        assert!(!truncated);
    }

    #[test]
    fn test_truncate_chars_exact_limit() {
        let (text, truncated) = truncate_chars("abcde".to_string(), 5);
        assert_eq!(text, "abcde");
        assert!(!truncated);
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        let (text, truncated) = truncate_chars("ãéíõú!".to_string(), 4);
        assert_eq!(text, "ãéíõ");
        assert_eq!(text.chars().count(), 4);
        assert!(truncated);
    }

    #[test]
    fn test_truncate_is_not_word_aware() {
        let (text, truncated) = truncate_chars("hello world".to_string(), 7);
        assert_eq!(text, "hello w");
        assert!(truncated);
    }
}
