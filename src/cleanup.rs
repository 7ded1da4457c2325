//! Cleanup steps: the pluggable passes that turn authored CSS into shipped
//! CSS.
//!
//! A step is any boxed `Fn(&mut Stylesheet)`. The factories here build the
//! stock steps; [`crate::transform`] assembles the default pipeline from
//! them (strip repetition suffixes, drop lifted `content` declarations,
//! optionally flatten nesting) and appends whatever the caller supplies.

use crate::css::flatten::flatten;
use crate::css::model::{Node, NodeId, Stylesheet};

/// One cleanup step, applied to the sheet in place.
pub type Plugin = Box<dyn Fn(&mut Stylesheet)>;

/// Rewrite every rule's selector, at any depth, through `replace`.
pub fn rename<F>(replace: F) -> Plugin
where
    F: Fn(&str) -> String + 'static,
{
    Box::new(move |sheet| {
        sheet.walk_rules(|sheet, rule| {
            let rewritten = sheet.selector(rule).map(&replace);
            if let Some(rewritten) = rewritten {
                sheet.set_selector(rule, rewritten);
            }
        });
    })
}

/// Remove every `property` declaration from rules whose selector passes
/// `filter`. Declarations elsewhere (other properties, other rules,
/// at-rule bodies) are left alone.
pub fn remove_declarations<F>(property: impl Into<String>, filter: F) -> Plugin
where
    F: Fn(&str) -> bool + 'static,
{
    let property = property.into();
    Box::new(move |sheet| {
        sheet.walk_rules(|sheet, rule| {
            let keep = match sheet.selector(rule) {
                Some(selector) => !filter(selector),
                None => true,
            };
            if keep {
                return;
            }
            let doomed: Vec<NodeId> = sheet
                .children(rule)
                .iter()
                .copied()
                .filter(|&child| {
                    matches!(
                        sheet.get(child),
                        Some(Node::Declaration { property: p, .. }) if *p == property
                    )
                })
                .collect();
            for id in doomed {
                sheet.remove(id);
            }
        });
    })
}

/// The nesting flattener as a pipeline step.
pub fn flatten_nesting() -> Plugin {
    Box::new(flatten)
}

/// Remove rules left with no children, cascading up through ancestors the
/// removal empties (enclosing rules and block at-rules, never the root).
/// Opt-in: the default pipeline keeps empty rules, since a rule that exists
/// only to scaffold markup is still meaningful output.
pub fn prune_empty() -> Plugin {
    Box::new(|sheet| {
        sheet.walk_rules(|sheet, rule| {
            if !sheet.children(rule).is_empty() {
                return;
            }
            let mut current = Some(rule);
            while let Some(id) = current {
                if !sheet.children(id).is_empty() {
                    break;
                }
                let removable = matches!(
                    sheet.get(id),
                    Some(Node::Rule { .. }) | Some(Node::AtRule { block: true, .. })
                );
                if !removable {
                    break;
                }
                current = sheet.parent(id);
                sheet.remove(id);
            }
        });
    })
}
