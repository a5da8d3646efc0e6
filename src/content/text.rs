//! Plain-text helpers for rendering rich-text fields in summaries.

/// Remove anything that looks like an HTML tag.
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Strip tags and cut the text to `limit` words.
///
/// Returns the (possibly shortened) text and whether anything was cut. A cut
/// text ends with `...`.
pub fn truncate_words(text: &str, limit: usize) -> (String, bool) {
    let plain = strip_tags(text);
    let words: Vec<&str> = plain.split_whitespace().collect();
    if words.len() <= limit {
        return (plain, false);
    }
    (format!("{}...", words[..limit].join(" ")), true)
}
