//! Stylesheet serializer.
//!
//! Renders a [`Stylesheet`] rule tree back to CSS text in a single canonical
//! shape: two-space indentation per nesting level, one declaration per line,
//! `{}` for empty blocks, top-level nodes separated by a newline, no trailing
//! newline. Source formatting is not preserved — the parser already collapsed
//! it — so serializing is deterministic and its output re-parses to the same
//! tree.

use crate::css::model::{Node, NodeId, Stylesheet};

/// Render the whole sheet. An empty sheet renders as the empty string.
pub fn serialize(sheet: &Stylesheet) -> String {
    let mut out = String::new();
    for (index, &child) in sheet.children(sheet.root()).iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        write_node(sheet, child, 0, &mut out);
    }
    out
}

fn write_node(sheet: &Stylesheet, id: NodeId, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    match sheet.get(id) {
        Some(Node::Rule { selector }) => {
            out.push_str(&pad);
            out.push_str(selector);
            out.push(' ');
            write_block(sheet, id, depth, &pad, out);
        }
        Some(Node::AtRule {
            name,
            params,
            block,
        }) => {
            out.push_str(&pad);
            out.push('@');
            out.push_str(name);
            if !params.is_empty() {
                out.push(' ');
                out.push_str(params);
            }
            match block {
                true => {
                    out.push(' ');
                    write_block(sheet, id, depth, &pad, out);
                }
                false => out.push(';'),
            }
        }
        Some(Node::Declaration { property, value }) => {
            out.push_str(&pad);
            out.push_str(property);
            out.push_str(": ");
            out.push_str(value);
            out.push(';');
        }
        // Root is never a child; stale ids render nothing.
        _ => {}
    }
}

fn write_block(sheet: &Stylesheet, id: NodeId, depth: usize, pad: &str, out: &mut String) {
    let kids = sheet.children(id);
    if kids.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    for &kid in kids {
        write_node(sheet, kid, depth + 1, out);
        out.push('\n');
    }
    out.push_str(pad);
    out.push('}');
}
