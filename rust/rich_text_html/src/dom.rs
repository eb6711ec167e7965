use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use tracing::{debug, trace};

pub(crate) fn html5_parse(input: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(input)
}

pub(crate) fn tag_lower(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string().to_ascii_lowercase()),
        _ => None,
    }
}

pub(crate) fn attr_get(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.to_string().eq_ignore_ascii_case(name))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

fn find_body(node: &Handle) -> Option<Handle> {
    if let Some(tag) = tag_lower(node) {
        if tag == "body" {
            return Some(node.clone());
        }
    }
    for c in node.children.borrow().iter() {
        if let Some(b) = find_body(c) {
            return Some(b);
        }
    }
    None
}

/// Parses an HTML fragment (or full document). Never fails: html5ever
/// repairs whatever it is given, and the errors it records along the way
/// are only logged.
///
/// The returned dom must outlive every handle taken from it; dropping an
/// rcdom node empties its descendants' child lists.
pub(crate) fn parse_fragment(input_html: &str) -> RcDom {
    let wrapped = if input_html.to_ascii_lowercase().contains("<html") {
        input_html.to_string()
    } else {
        format!(
            "<!doctype html><html><head><meta charset=\"utf-8\"></head><body>{}</body></html>",
            input_html
        )
    };

    let dom = html5_parse(&wrapped);
    {
        let errors = dom.errors.borrow();
        if !errors.is_empty() {
            debug!(count = errors.len(), "discarding html parse errors");
            for e in errors.iter() {
                trace!(error = %e, "html parse error");
            }
        }
    }
    dom
}

/// The nodes that make up the document body.
pub(crate) fn body_children(dom: &RcDom) -> Vec<Handle> {
    match find_body(&dom.document) {
        Some(body) => body.children.borrow().clone(),
        None => dom.document.children.borrow().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_body_children_for_fragment() {
        let dom = parse_fragment("<b>x</b>tail");
        let nodes = body_children(&dom);
        assert_eq!(nodes.len(), 2);
        assert_eq!(tag_lower(&nodes[0]).as_deref(), Some("b"));
        assert_eq!(tag_lower(&nodes[1]), None);
    }

    #[test]
    fn body_children_keep_their_subtrees() {
        let dom = parse_fragment("<b>x</b>");
        let nodes = body_children(&dom);
        let kids = nodes[0].children.borrow();
        assert_eq!(kids.len(), 1);
        match &kids[0].data {
            NodeData::Text { contents } => assert_eq!(&**contents.borrow(), "x"),
            _ => panic!("expected a text node under <b>"),
        }
    }

    #[test]
    fn tolerates_unclosed_and_unknown_tags() {
        let dom = parse_fragment("<x-foo><p>open <i>never closed");
        let nodes = body_children(&dom);
        assert!(!nodes.is_empty());
        assert_eq!(tag_lower(&nodes[0]).as_deref(), Some("x-foo"));
        assert_eq!(nodes[0].children.borrow().len(), 1);
    }

    #[test]
    fn reads_attributes_case_insensitively() {
        let dom = parse_fragment(r#"<span STYLE="color: red">x</span>"#);
        let nodes = body_children(&dom);
        assert_eq!(attr_get(&nodes[0], "style").as_deref(), Some("color: red"));
        assert_eq!(attr_get(&nodes[0], "class"), None);
    }

    #[test]
    fn accepts_full_documents() {
        let dom = parse_fragment("<html><body><p>hi</p></body></html>");
        let nodes = body_children(&dom);
        assert_eq!(nodes.len(), 1);
        assert_eq!(tag_lower(&nodes[0]).as_deref(), Some("p"));
    }
}
