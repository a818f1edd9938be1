use crate::parsers::text;
use regex::Regex;
use std::sync::LazyLock;

static TEXT_NODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<text[^>]*>([^<]*)</text>").unwrap());

/// Extracts the spoken text from a timed-text caption document.
///
/// Text nodes are unescaped, flattened to one line, trimmed and joined with
/// single spaces in document order. Returns `None` when no node has text.
pub fn extract_caption_text(xml: &str) -> Option<String> {
    let texts: Vec<String> = TEXT_NODE_RE
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            text::decode_entities(m.as_str())
                .replace('\n', " ")
                .trim()
                .to_string()
        })
        .filter(|t| !t.is_empty())
        .collect();

    ::log::debug!("Caption document has {} text nodes", texts.len());

    if texts.is_empty() {
        None
    } else {
        Some(texts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_nodes_in_order() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="0.1" dur="2">Hello</text><text start="2.1" dur="1.5">world</text></transcript>"#;
        assert_eq!(extract_caption_text(xml).as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_unescapes_and_flattens() {
        let xml = "<transcript><text start=\"0\">Tom &amp; Jerry\nsay &#39;hi&#39;</text><text start=\"1\">  &quot;ok&quot;  </text></transcript>";
        assert_eq!(
            extract_caption_text(xml).as_deref(),
            Some("Tom & Jerry say 'hi' \"ok\"")
        );
    }

    #[test]
    fn test_skips_empty_nodes() {
        let xml = "<transcript><text start=\"0\"> </text><text start=\"1\">only</text><text start=\"2\"></text></transcript>";
        assert_eq!(extract_caption_text(xml).as_deref(), Some("only"));
    }

    #[test]
    fn test_no_text_is_none() {
        assert_eq!(extract_caption_text("<transcript></transcript>"), None);
        assert_eq!(extract_caption_text(""), None);
    }
}
