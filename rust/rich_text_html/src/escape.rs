// HTML escaping and tag stripping shared by both directions.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Same notion of "a tag" as a browser: `<` followed by a name, `/`, `!` or `?`.
    static ref TAG: Regex = Regex::new(r"<[A-Za-z/!?][^>]*>").unwrap();
}

pub fn escape_html(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for ch in unsafe_text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

pub fn has_tags(html: &str) -> bool {
    TAG.is_match(html)
}
