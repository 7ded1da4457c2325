//! Rule-tree walk: the markup-building pass.
//!
//! Walks a parsed stylesheet and produces the parallel markup tree. Each
//! rule yields as many elements as its multiplier asks for, each repetition
//! translated and descended into independently. A `content` declaration is
//! lifted out as a text node in its parent's children — unless the parent
//! rule targets `::before`/`::after`, where `content` is real CSS — and the
//! lifted declarations are removed from the sheet only after the whole walk
//! finishes, so every repetition of a multiplied rule sees them and the
//! clones come out identical.
//!
//! At-rules contribute no markup and their bodies are not entered.

use crate::css::model::{Node, NodeId, Stylesheet};
use crate::markup::MarkupNode;
use crate::scaffold::multiplier;
use crate::scaffold::translate::translate;
use crate::selector::SelectorError;

/// Build markup from the sheet's rule tree into `target`, removing the
/// lifted `content` declarations from the sheet as a side effect.
pub fn walk(sheet: &mut Stylesheet, target: &mut Vec<MarkupNode>) -> Result<(), SelectorError> {
    let mut lifted = Vec::new();
    collect(sheet, sheet.root(), target, &mut lifted)?;
    for id in lifted {
        // Repetitions push duplicate ids; stale ones degrade to no-ops.
        sheet.remove(id);
    }
    Ok(())
}

/// Whether the selector addresses a `::before`/`::after` pseudo-element,
/// in either the single- or double-colon spelling, anywhere in the text.
pub fn targets_before_after(selector: &str) -> bool {
    selector
        .split(':')
        .skip(1)
        .any(|segment| segment.starts_with("before") || segment.starts_with("after"))
}

fn collect(
    sheet: &Stylesheet,
    node: NodeId,
    target: &mut Vec<MarkupNode>,
    lifted: &mut Vec<NodeId>,
) -> Result<(), SelectorError> {
    let keeps_content = sheet
        .selector(node)
        .is_some_and(targets_before_after);
    for &child in sheet.children(node) {
        match sheet.get(child) {
            Some(Node::Declaration { property, value })
                if property == "content" && !keeps_content =>
            {
                target.push(MarkupNode::text(value.clone()));
                lifted.push(child);
            }
            Some(Node::Rule { selector }) => {
                for _ in 0..multiplier::extract(selector) {
                    let mut element = translate(selector)?;
                    collect(sheet, child, &mut element.children, lifted)?;
                    target.push(MarkupNode::Element(element));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::parse;
    use crate::markup::serialize;

    /// Helper: parse, walk, and render the markup. Returns the rendered
    /// HTML and the sheet as it stands after the walk.
    fn build(source: &str) -> (String, Stylesheet) {
        let mut sheet = parse(source).unwrap();
        let mut nodes = Vec::new();
        walk(&mut sheet, &mut nodes).unwrap();
        (serialize(&nodes), sheet)
    }

    // ── Predicate ────────────────────────────────────────────────────

    #[test]
    fn before_after_detection() {
        assert!(targets_before_after("&::before"));
        assert!(targets_before_after("::after"));
        assert!(targets_before_after(":before"));
        assert!(targets_before_after("h1::after"));
        assert!(targets_before_after("a:not(:before)"));
        assert!(!targets_before_after("h1"));
        assert!(!targets_before_after("li:hover"));
        assert!(!targets_before_after("before"));
    }

    // ── Structure ────────────────────────────────────────────────────

    #[test]
    fn walk_builds_nested_elements() {
        let (html, _) = build("ul { margin: 0; & li.item { a[href=\"#\"] { color: red; } } }");
        assert_eq!(html, "<ul><li class=\"item\"><a href=\"#\"></a></li></ul>");
    }

    #[test]
    fn walk_repeats_multiplied_rules() {
        let (html, _) = build("ul { li*3 {} }");
        assert_eq!(html, "<ul><li></li><li></li><li></li></ul>");
    }

    #[test]
    fn walk_zero_multiplier_yields_nothing() {
        let (html, _) = build("ul { li*0 { color: red; } a*2 {} }");
        assert_eq!(html, "<ul><a></a><a></a></ul>");
    }

    #[test]
    fn walk_skips_at_rules() {
        let (html, _) = build("@import url(x);\n@media print { main { color: red; } }");
        assert_eq!(html, "");
    }

    #[test]
    fn walk_rule_after_at_rule_still_builds() {
        let (html, _) = build("@import url(x);\nmain { color: red; }");
        assert_eq!(html, "<main></main>");
    }

    // ── Content lifting ──────────────────────────────────────────────

    #[test]
    fn walk_lifts_content_as_text() {
        let (html, sheet) = build("h1 { content: Hello world!; color: red; }");
        assert_eq!(html, "<h1>Hello world!</h1>");
        // The lifted declaration is gone; the other one stays.
        let rule = sheet.children(sheet.root())[0];
        assert_eq!(
            sheet.children(rule).len(),
            1,
            "content declaration should have been removed"
        );
    }

    #[test]
    fn walk_keeps_before_after_content() {
        let (html, sheet) = build("main { &::before { content: ''; } }");
        assert_eq!(html, "<main><div></div></main>");
        let main = sheet.children(sheet.root())[0];
        let before = sheet.children(main)[0];
        assert_eq!(sheet.children(before).len(), 1);
    }

    #[test]
    fn walk_interleaves_text_with_siblings() {
        let (html, _) = build("main { span {} content: tail; }");
        assert_eq!(html, "<main><span></span>tail</main>");
    }

    #[test]
    fn walk_repetitions_share_lifted_content() {
        // Removal is deferred until the walk completes, so every clone of a
        // multiplied rule carries the same text child.
        let (html, sheet) = build("ul { li*2 { content: Hi; } }");
        assert_eq!(html, "<ul><li>Hi</li><li>Hi</li></ul>");
        let ul = sheet.children(sheet.root())[0];
        let li = sheet.children(ul)[0];
        assert!(sheet.children(li).is_empty());
    }

    #[test]
    fn walk_lifts_content_value_verbatim() {
        let (html, _) = build("h1 { content: 'quoted'; }");
        assert_eq!(html, "<h1>'quoted'</h1>");
    }

    // ── Errors ───────────────────────────────────────────────────────

    #[test]
    fn walk_propagates_selector_errors() {
        let mut sheet = parse("a@b { color: red; }").unwrap();
        let mut nodes = Vec::new();
        assert!(walk(&mut sheet, &mut nodes).is_err());
    }
}
