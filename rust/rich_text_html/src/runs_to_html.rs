// Spreadsheet rich text -> HTML fragment for the web editor.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::color::{is_black, normalize_run_color, rgb_part};
use crate::escape::{escape_html, strip_tags};
use crate::model::{CellText, RichText, RunStyle, TextRun};

lazy_static! {
    static ref PARAGRAPH_BREAK: Regex = Regex::new(r"(?:<br\s*/?>\s*){2,}").unwrap();
    static ref EDGE_BREAKS: Regex =
        Regex::new(r"^(?:\s*<br\s*/?>)+|(?:<br\s*/?>\s*)+$").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n(?:[ \t]*\n)+").unwrap();
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn run_html(run: &TextRun) -> String {
    let text = normalize_newlines(&run.text);
    let Some(style) = &run.style else {
        return escape_html(&text);
    };

    // Blank lines become paragraph breaks later; keep them outside the tags
    // so every paragraph gets balanced markup.
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for m in BLANK_LINES.find_iter(&text) {
        out.push_str(&wrap_piece(&text[last..m.start()], style));
        out.push_str(m.as_str());
        last = m.end();
    }
    out.push_str(&wrap_piece(&text[last..], style));
    out
}

fn wrap_piece(text: &str, style: &RunStyle) -> String {
    if text.is_empty() {
        return String::new();
    }
    wrap_styled(escape_html(text), style)
}

fn wrap_styled(mut html: String, style: &RunStyle) -> String {
    let tags = [
        (style.bold, "strong"),
        (style.italic, "em"),
        (style.underline, "u"),
        (style.strikethrough, "s"),
        (style.superscript, "sup"),
        (style.subscript, "sub"),
    ];
    // Innermost first, so bold ends up just inside the color span.
    for (on, tag) in tags.iter().rev() {
        if *on {
            html = format!("<{tag}>{html}</{tag}>");
        }
    }
    // Anything but RRGGBB/AARRGGBB hex is dropped rather than copied into the attribute.
    if let Some(color) = style.color.as_deref().and_then(normalize_run_color) {
        if !is_black(&color) {
            html = format!("<span style=\"color: #{}\">{html}</span>", rgb_part(&color));
        }
    }
    html
}

fn is_blank(html: &str) -> bool {
    strip_tags(html).trim().is_empty()
}

fn paragraphs(inline: &str) -> String {
    let with_breaks = normalize_newlines(inline).replace('\n', "<br>");

    let mut out = String::new();
    for segment in PARAGRAPH_BREAK.split(&with_breaks) {
        let segment = EDGE_BREAKS.replace_all(segment.trim(), "");
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        out.push_str("<p>");
        out.push_str(segment);
        out.push_str("</p>");
    }

    if is_blank(&out) {
        return String::new();
    }
    out
}

fn rich_to_html(rt: &RichText) -> String {
    let inline: String = rt.runs().iter().map(run_html).collect();
    let out = paragraphs(&inline);
    debug!(runs = rt.len(), html_len = out.len(), "converted rich text to html");
    out
}

/// Renders cell text as an HTML fragment of `<p>` blocks.
///
/// Blank lines split paragraphs, single newlines become `<br>`. Black run
/// colors are dropped since black is the sheet's default font color.
pub fn rich_text_to_html(value: &CellText) -> String {
    match value {
        CellText::Plain(s) if s.is_empty() => String::new(),
        CellText::Plain(s) => format!("<p>{}</p>", escape_html(s)),
        CellText::Rich(rt) => rich_to_html(rt),
    }
}
