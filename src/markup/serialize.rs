//! Markup serializer: element tree → HTML text.
//!
//! Output is a single line with no inserted whitespace, so text children
//! render exactly as authored. Escaping is minimal: `&`, `<`, `>` in text,
//! `&` and `"` in attribute values. Values are emitted as written otherwise.

use crate::markup::element::{Attribute, Element, MarkupNode};

/// Tags that never take children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Render a sequence of markup nodes. An empty sequence renders as the
/// empty string.
pub fn serialize(nodes: &[MarkupNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out);
    }
    out
}

fn write_node(node: &MarkupNode, out: &mut String) {
    match node {
        MarkupNode::Text { content } => escape_text(content, out),
        MarkupNode::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag_name);
    for attribute in &element.attributes {
        write_attribute(attribute, out);
    }
    out.push('>');
    if is_void(&element.tag_name) {
        // Children of a void element have nowhere to go; they are dropped.
        return;
    }
    for child in &element.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&element.tag_name);
    out.push('>');
}

fn write_attribute(attribute: &Attribute, out: &mut String) {
    out.push(' ');
    out.push_str(&attribute.key);
    if let Some(value) = &attribute.value {
        out.push_str("=\"");
        escape_attribute(value, out);
        out.push('"');
    }
}

fn is_void(tag_name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(tag_name))
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
