/// The only entities decoded by the text pipeline, in decoding order.
///
/// Not a full HTML entity table.
pub const ENTITIES: [(&str, &str); 7] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
];

/// Decodes the minimal entity set with one pass per entity, in table order
pub fn decode_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, replacement)| {
            acc.replace(entity, replacement)
        })
}

/// Decodes repeatedly until no listed entity remains.
///
/// Every replacement shortens the text, so this terminates. Double-encoded
/// input such as `&amp;lt;` ends up fully decoded.
pub fn decode_entities_fully(text: &str) -> String {
    let mut current = decode_entities(text);
    loop {
        let next = decode_entities(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Collapses every whitespace run (newlines included) into one space and trims.
///
/// A byte order mark counts as whitespace, so BOM-prefixed pages come out clean.
pub fn normalize_whitespace(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '\u{feff}')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unescapes the `\n` and `\"` sequences left in a JSON string literal
/// that was captured with a regex instead of a JSON parser
pub fn unescape_newlines_and_quotes(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\\"", "\"")
}
