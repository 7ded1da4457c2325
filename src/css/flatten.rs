//! Nesting flattener.
//!
//! Rewrites a nested rule tree into flat, nesting-free CSS the way pre-nesting
//! browsers expect it:
//!
//! ```css
//! ul {
//!   margin: 0;
//!   & li.item {
//!     color: blue;
//!   }
//! }
//! ```
//!
//! becomes
//!
//! ```css
//! ul {
//!   margin: 0;
//! }
//! ul li.item {
//!   color: blue;
//! }
//! ```
//!
//! A nested selector containing `&` splices its parent in at every marker; one
//! without a marker is joined as a descendant. Selector lists combine
//! pairwise, so `ul, ol` over `& li` yields `ul li, ol li`. A rule that ends
//! up with no declarations of its own is dropped from the flat output. Block
//! at-rules nested inside a rule are hoisted to the top with the enclosing
//! selector re-applied inside them.

use crate::css::model::{Node, NodeId, Stylesheet};

/// Flatten the sheet in place. Ids held before the call are invalidated.
pub fn flatten(sheet: &mut Stylesheet) {
    let mut flat = Stylesheet::new();
    let flat_root = flat.root();
    for &child in sheet.children(sheet.root()) {
        match sheet.get(child) {
            Some(Node::Rule { .. }) => flatten_rule(sheet, child, None, &mut flat, flat_root),
            Some(Node::AtRule { .. }) => flatten_at_rule(sheet, child, None, &mut flat, flat_root),
            _ => {}
        }
    }
    *sheet = flat;
}

/// Emit the flat form of one rule: its own declarations first (under the
/// combined selector), then every nested rule, then hoisted at-rules.
fn flatten_rule(
    src: &Stylesheet,
    rule: NodeId,
    context: Option<&str>,
    dst: &mut Stylesheet,
    dst_parent: NodeId,
) {
    let Some(selector) = src.selector(rule) else {
        return;
    };
    let combined = match context {
        Some(parent) => combine(parent, selector),
        None => selector.to_string(),
    };

    let declarations: Vec<(String, String)> = src
        .children(rule)
        .iter()
        .filter_map(|&child| match src.get(child) {
            Some(Node::Declaration { property, value }) => {
                Some((property.clone(), value.clone()))
            }
            _ => None,
        })
        .collect();
    if !declarations.is_empty() {
        let flat_rule = dst.append(dst_parent, Node::rule(combined.clone()));
        for (property, value) in declarations {
            dst.append(flat_rule, Node::declaration(property, value));
        }
    }

    for &child in src.children(rule) {
        match src.get(child) {
            Some(Node::Rule { .. }) => {
                flatten_rule(src, child, Some(&combined), dst, dst_parent);
            }
            Some(Node::AtRule { .. }) => {
                flatten_at_rule(src, child, Some(&combined), dst, dst_parent);
            }
            _ => {}
        }
    }
}

/// Copy an at-rule into the flat output. With a selector context (the at-rule
/// was nested inside a rule) its direct declarations are re-wrapped in a rule
/// carrying that selector; nested rules flatten against the same context.
fn flatten_at_rule(
    src: &Stylesheet,
    at: NodeId,
    context: Option<&str>,
    dst: &mut Stylesheet,
    dst_parent: NodeId,
) {
    let Some(Node::AtRule {
        name,
        params,
        block,
    }) = src.get(at)
    else {
        return;
    };
    let copy = dst.append(dst_parent, Node::at_rule(name.clone(), params.clone(), *block));

    let declarations: Vec<(String, String)> = src
        .children(at)
        .iter()
        .filter_map(|&child| match src.get(child) {
            Some(Node::Declaration { property, value }) => {
                Some((property.clone(), value.clone()))
            }
            _ => None,
        })
        .collect();
    if !declarations.is_empty() {
        match context {
            Some(selector) => {
                let wrapper = dst.append(copy, Node::rule(selector));
                for (property, value) in declarations {
                    dst.append(wrapper, Node::declaration(property, value));
                }
            }
            None => {
                for (property, value) in declarations {
                    dst.append(copy, Node::declaration(property, value));
                }
            }
        }
    }

    for &child in src.children(at) {
        match src.get(child) {
            Some(Node::Rule { .. }) => flatten_rule(src, child, context, dst, copy),
            Some(Node::AtRule { .. }) => flatten_at_rule(src, child, context, dst, copy),
            _ => {}
        }
    }
}

// ── Selector combination ─────────────────────────────────────────────

/// Combine a parent selector list with a nested selector list, pairwise.
fn combine(parent: &str, child: &str) -> String {
    let mut out = Vec::new();
    for p in split_list(parent) {
        for c in split_list(child) {
            out.push(combine_one(p, c));
        }
    }
    out.join(", ")
}

fn combine_one(parent: &str, child: &str) -> String {
    match has_marker(child) {
        true => substitute_marker(child, parent),
        false => format!("{parent} {child}"),
    }
}

/// Split a selector list on top-level commas. Commas inside quotes, brackets,
/// or parentheses do not split.
fn split_list(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in list.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '[' | '(' => depth += 1,
                ']' | ')' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    parts.push(list[start..i].trim());
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    parts.push(list[start..].trim());
    parts.retain(|part| !part.is_empty());
    parts
}

/// Whether the selector carries a nesting marker outside quotes and brackets.
fn has_marker(selector: &str) -> bool {
    scan_markers(selector, |_| {})
}

/// Replace every top-level `&` with the parent selector.
fn substitute_marker(selector: &str, parent: &str) -> String {
    let mut out = String::with_capacity(selector.len() + parent.len());
    let mut tail = 0;
    scan_markers(selector, |i| {
        out.push_str(&selector[tail..i]);
        out.push_str(parent);
        tail = i + 1;
    });
    out.push_str(&selector[tail..]);
    out
}

/// Scan for top-level `&` markers, invoking `found` with each byte offset.
/// Returns whether any marker was seen. Markers inside quotes or attribute
/// brackets are not markers; inside parentheses (`:is(&)`) they are.
fn scan_markers(selector: &str, mut found: impl FnMut(usize)) -> bool {
    let mut any = false;
    let mut bracket_depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in selector.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '[' => bracket_depth += 1,
                ']' => bracket_depth = bracket_depth.saturating_sub(1),
                '&' if bracket_depth == 0 => {
                    any = true;
                    found(i);
                }
                _ => {}
            },
        }
    }
    any
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::parse;
    use crate::css::serialize::serialize;

    /// Helper: parse, flatten, serialize.
    fn flat(source: &str) -> String {
        let mut sheet = parse(source).unwrap();
        flatten(&mut sheet);
        serialize(&sheet)
    }

    // ── Combination rules ────────────────────────────────────────────

    #[test]
    fn marker_splices_parent() {
        assert_eq!(combine_one("ul", "& li.item"), "ul li.item");
        assert_eq!(combine_one("button", "&:hover"), "button:hover");
    }

    #[test]
    fn marker_mid_selector() {
        assert_eq!(combine_one("a", "section &"), "section a");
    }

    #[test]
    fn every_marker_is_substituted() {
        assert_eq!(combine_one("p", "& + &"), "p + p");
    }

    #[test]
    fn no_marker_joins_as_descendant() {
        assert_eq!(combine_one("ul", "li"), "ul li");
        assert_eq!(combine_one("ul", "> li"), "ul > li");
    }

    #[test]
    fn marker_inside_attribute_is_literal() {
        assert_eq!(combine_one("a", "[data-x=\"&\"]"), "a [data-x=\"&\"]");
    }

    #[test]
    fn lists_combine_pairwise() {
        assert_eq!(combine("ul, ol", "& li, & dd"), "ul li, ul dd, ol li, ol dd");
    }

    #[test]
    fn split_list_respects_nesting() {
        assert_eq!(split_list("a, b"), vec!["a", "b"]);
        assert_eq!(split_list(":is(a, b), c"), vec![":is(a, b)", "c"]);
        assert_eq!(split_list("[data-x=\"a,b\"]"), vec!["[data-x=\"a,b\"]"]);
    }

    // ── Whole-sheet flattening ───────────────────────────────────────

    #[test]
    fn flattens_one_level() {
        assert_eq!(
            flat("ul { margin: 0; & li.item { color: blue; } }"),
            "ul {\n  margin: 0;\n}\nul li.item {\n  color: blue;\n}"
        );
    }

    #[test]
    fn flattens_deep_nesting() {
        assert_eq!(
            flat("a { b { c { color: red; } } }"),
            "a b c {\n  color: red;\n}"
        );
    }

    #[test]
    fn parent_list_distributes() {
        assert_eq!(
            flat("ul, ol { & li { color: red; } }"),
            "ul li, ol li {\n  color: red;\n}"
        );
    }

    #[test]
    fn rules_without_declarations_are_dropped() {
        assert_eq!(flat("ul { li { a { } } }"), "");
    }

    #[test]
    fn declaration_free_levels_vanish_but_leaves_stay() {
        assert_eq!(
            flat("ul { li { a { color: red; } } }"),
            "ul li a {\n  color: red;\n}"
        );
    }

    #[test]
    fn top_level_at_rule_passes_through() {
        assert_eq!(
            flat("@import url(x);\n@media print { a { color: red; } }"),
            "@import url(x);\n@media print {\n  a {\n    color: red;\n  }\n}"
        );
    }

    #[test]
    fn nested_rule_inside_at_rule_flattens() {
        assert_eq!(
            flat("@media print { a { & b { color: red; } } }"),
            "@media print {\n  a b {\n    color: red;\n  }\n}"
        );
    }

    #[test]
    fn at_rule_inside_rule_is_hoisted() {
        assert_eq!(
            flat("a { color: red; @media print { color: black; } }"),
            "a {\n  color: red;\n}\n@media print {\n  a {\n    color: black;\n  }\n}"
        );
    }

    #[test]
    fn hoisted_at_rule_flattens_its_nested_rules() {
        assert_eq!(
            flat("a { @media print { & b { color: red; } } }"),
            "@media print {\n  a b {\n    color: red;\n  }\n}"
        );
    }

    #[test]
    fn font_face_declarations_stay_bare() {
        assert_eq!(
            flat("@font-face { font-family: Mono; }"),
            "@font-face {\n  font-family: Mono;\n}"
        );
    }

    #[test]
    fn flat_sheet_is_unchanged() {
        let source = "a {\n  color: red;\n}\nb {\n  color: blue;\n}";
        assert_eq!(flat(source), source);
    }
}
