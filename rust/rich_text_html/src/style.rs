use markup5ever_rcdom::Handle;
use tracing::trace;

use crate::color::parse_css_color;
use crate::dom::{attr_get, tag_lower};
use crate::model::RunStyle;

/// Style attributes inherited from ancestor elements during the HTML walk.
///
/// Each element gets its own copy; nothing a child sets leaks into its
/// siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct StyleContext {
    style: RunStyle,
}

impl StyleContext {
    pub(crate) fn style(&self) -> &RunStyle {
        &self.style
    }

    /// The context in effect inside `node`: this context plus whatever the
    /// element's tag and inline `style` attribute add.
    pub(crate) fn for_element(&self, node: &Handle) -> StyleContext {
        let mut next = self.clone();
        if let Some(tag) = tag_lower(node) {
            next.apply_tag(&tag);
        }
        if let Some(css) = attr_get(node, "style") {
            next.apply_inline_style(&css);
        }
        next
    }

    fn apply_tag(&mut self, tag: &str) {
        let s = &mut self.style;
        match tag {
            "strong" | "b" => s.bold = true,
            "em" | "i" => s.italic = true,
            "u" => s.underline = true,
            "s" | "strike" | "del" => s.strikethrough = true,
            "sup" => s.superscript = true,
            "sub" => s.subscript = true,
            _ => {}
        }
    }

    fn apply_inline_style(&mut self, css: &str) {
        for decl in css.split(';') {
            let Some((prop, value)) = decl.split_once(':') else {
                continue;
            };
            let prop = prop.trim().to_ascii_lowercase();
            let value = value.trim();
            let value = value
                .strip_suffix("!important")
                .map(str::trim_end)
                .unwrap_or(value);
            let low = value.to_ascii_lowercase();

            match prop.as_str() {
                "color" => match parse_css_color(value) {
                    Some(hex) => self.style.color = Some(hex),
                    None => trace!(value, "ignoring unparseable color"),
                },
                "font-weight" => {
                    let heavy = match low.as_str() {
                        "bold" | "bolder" => true,
                        n => n.parse::<u32>().map(|w| w >= 600).unwrap_or(false),
                    };
                    if heavy {
                        self.style.bold = true;
                    }
                }
                "font-style" => {
                    if low == "italic" || low == "oblique" {
                        self.style.italic = true;
                    }
                }
                "text-decoration" | "text-decoration-line" => {
                    if low.contains("underline") {
                        self.style.underline = true;
                    }
                    if low.contains("line-through") {
                        self.style.strikethrough = true;
                    }
                }
                "vertical-align" => match low.as_str() {
                    "super" => self.style.superscript = true,
                    "sub" => self.style.subscript = true,
                    _ => {}
                },
                _ => trace!(property = %prop, "ignoring css property"),
            }
        }
    }
}
