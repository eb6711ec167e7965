// HTML fragment -> spreadsheet rich text.

use markup5ever_rcdom::{Handle, NodeData};
use tracing::debug;

use crate::dom::{body_children, parse_fragment, tag_lower};
use crate::escape::has_tags;
use crate::model::{CellText, RichText, TextRun};
use crate::style::StyleContext;

const BULLET: &str = "• ";

fn is_drop_content_tag(tag: &str) -> bool {
    matches!(tag, "script" | "style" | "template" | "noscript" | "head")
}

struct RunBuilder {
    out: RichText,
}

impl RunBuilder {
    fn emit(&mut self, text: &str, ctx: &StyleContext) {
        self.out.push(TextRun::with_style(text, ctx.style()));
    }

    fn walk_children(&mut self, node: &Handle, ctx: &StyleContext) {
        for c in node.children.borrow().iter() {
            self.walk(c, ctx);
        }
    }

    fn walk(&mut self, node: &Handle, ctx: &StyleContext) {
        match &node.data {
            NodeData::Text { contents } => {
                let text = contents.borrow();
                if !text.trim().is_empty() {
                    self.emit(&text, ctx);
                }
            }
            NodeData::Element { .. } => {
                let Some(tag) = tag_lower(node) else { return };
                if is_drop_content_tag(&tag) {
                    return;
                }
                let inner = ctx.for_element(node);

                match tag.as_str() {
                    "br" => self.emit("\n", ctx),
                    "p" | "div" => {
                        if !self.out.is_empty() {
                            self.emit("\n", ctx);
                        }
                        self.walk_children(node, &inner);
                        self.emit("\n", ctx);
                    }
                    "li" => {
                        self.emit(BULLET, &inner);
                        self.walk_children(node, &inner);
                        self.emit("\n", ctx);
                    }
                    // ul/ol and everything unknown: transparent containers.
                    _ => self.walk_children(node, &inner),
                }
            }
            _ => {}
        }
    }
}

/// Converts an HTML fragment to cell text.
///
/// Input without any tags comes back untouched as [`CellText::Plain`], as
/// does input that renders to nothing (as an empty string). Malformed markup
/// is repaired, never rejected.
pub fn html_to_rich_text(html: &str) -> CellText {
    if html.is_empty() {
        return CellText::Plain(String::new());
    }
    if !has_tags(html) {
        debug!(len = html.len(), "no markup, keeping plain text");
        return CellText::Plain(html.to_string());
    }

    let mut builder = RunBuilder {
        out: RichText::new(),
    };
    let root = StyleContext::default();
    let dom = parse_fragment(html);
    for n in body_children(&dom) {
        builder.walk(&n, &root);
    }

    if builder.out.is_empty() {
        debug!("html rendered no runs");
        return CellText::Plain(String::new());
    }
    debug!(runs = builder.out.len(), "converted html to rich text");
    CellText::Rich(builder.out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RunStyle;

    fn runs(html: &str) -> Vec<TextRun> {
        match html_to_rich_text(html) {
            CellText::Rich(rt) => rt.runs().to_vec(),
            CellText::Plain(s) => panic!("expected rich text, got plain {s:?}"),
        }
    }

    fn bold() -> RunStyle {
        RunStyle {
            bold: true,
            ..Default::default()
        }
    }

    #[test]
    fn empty_and_plain_inputs_pass_through() {
        assert_eq!(html_to_rich_text(""), CellText::from(""));
        assert_eq!(html_to_rich_text("just text"), CellText::from("just text"));
        assert_eq!(html_to_rich_text("a &amp; b < c"), CellText::from("a &amp; b < c"));
    }

    #[test]
    fn bold_tag_yields_one_styled_run() {
        assert_eq!(runs("<b>x</b>"), vec![TextRun::styled("x", bold())]);
    }

    #[test]
    fn nested_styles_accumulate_and_siblings_stay_isolated() {
        let r = runs("<b>a<i>b</i></b>c");
        assert_eq!(r.len(), 3);
        assert_eq!(r[0], TextRun::styled("a", bold()));
        let bi = r[1].style.as_ref().unwrap();
        assert!(bi.bold && bi.italic);
        assert_eq!(r[2], TextRun::plain("c"));
    }

    #[test]
    fn paragraphs_are_separated_by_newlines() {
        let r = runs("<p>a</p><p>b</p>");
        let texts: Vec<&str> = r.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "\n", "\n", "b", "\n"]);
        assert!(r.iter().all(|r| r.style.is_none()));
    }

    #[test]
    fn first_block_has_no_leading_newline() {
        let r = runs("<div>a</div>");
        assert_eq!(r[0].text, "a");
    }

    #[test]
    fn br_keeps_inherited_style() {
        let r = runs("<b>a<br>b</b>");
        assert_eq!(r[1], TextRun::styled("\n", bold()));
    }

    #[test]
    fn list_items_get_bullets() {
        let r = runs("<li>item</li>");
        assert_eq!(r[0].text, "• ");
        assert_eq!(r[1].text, "item");
        assert_eq!(r[2].text, "\n");
    }

    #[test]
    fn ordered_lists_use_bullets_too() {
        let r = runs("<ol><li>one</li><li>two</li></ol>");
        let text: String = r.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(text, "• one\n• two\n");
    }

    #[test]
    fn styled_li_styles_bullet_but_not_trailing_newline() {
        let r = runs(r#"<ul><li style="font-weight:bold">x</li></ul>"#);
        assert_eq!(r[0], TextRun::styled(BULLET, bold()));
        assert_eq!(r[2], TextRun::plain("\n"));
    }

    #[test]
    fn whitespace_only_text_is_skipped() {
        let r = runs("<p>a</p>\n   <p>b</p>");
        assert!(r.iter().all(|r| r.text == "\n" || !r.text.trim().is_empty()));
    }

    #[test]
    fn span_color_is_parsed() {
        let r = runs(r#"<span style="color:#ff0000">x</span>"#);
        assert_eq!(r[0].style.as_ref().unwrap().color.as_deref(), Some("FF0000"));
    }

    #[test]
    fn explicit_black_is_kept() {
        let r = runs(r#"<span style="color: rgb(0,0,0)">x</span>"#);
        assert_eq!(r[0].style.as_ref().unwrap().color.as_deref(), Some("000000"));
    }

    #[test]
    fn script_and_style_contents_are_dropped() {
        let r = runs("<style>p{color:red}</style><script>alert(1)</script><u>x</u>");
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].text, "x");
    }

    #[test]
    fn markup_with_no_text_is_empty() {
        assert_eq!(html_to_rich_text("<span>  </span>"), CellText::from(""));
        assert_eq!(html_to_rich_text("<!-- only a comment -->"), CellText::from(""));
    }

    #[test]
    fn malformed_markup_does_not_panic() {
        let r = runs("<b>open <x-unknown>deep <i>never closed");
        let text: String = r.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(text, "open deep never closed");
        assert!(r.iter().all(|r| r.style.as_ref().map(|s| s.bold).unwrap_or(false)));
    }

    #[test]
    fn text_inside_tags_survives_parsing() {
        assert_eq!(runs("<b>a\nb</b>"), vec![TextRun::styled("a\nb", bold())]);

        let r = runs("<p>a\nb</p>");
        let texts: Vec<&str> = r.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a\nb", "\n"]);
    }

    #[test]
    fn entities_are_decoded() {
        let r = runs("<i>a &amp; b</i>");
        assert_eq!(r[0].text, "a & b");
    }
}
