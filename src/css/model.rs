//! The parsed rule tree: rules, at-rules, declarations.
//!
//! All nodes live in a single `SlotMap` arena. Parent/child relationships are
//! stored in secondary maps so that node removal is O(subtree size), lookup is
//! O(1), and ids stay stable while the tree is rewritten in place — cleanup
//! steps mutate selectors and remove declarations mid-traversal, so stale ids
//! must degrade to no-ops rather than dangling references.

use std::collections::VecDeque;

use slotmap::{new_key_type, SecondaryMap, SlotMap};

new_key_type! {
    /// Stable handle to a node in a [`Stylesheet`] arena.
    pub struct NodeId;
}

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// One node of the rule tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// The synthetic tree root. Exactly one per sheet, never removable.
    Root,
    /// A style rule: `selector { ... }`. Children are declarations, nested
    /// rules, and nested at-rules, in source order.
    Rule { selector: String },
    /// An at-rule: `@name params;` or `@name params { ... }`.
    AtRule {
        name: String,
        params: String,
        /// Whether the at-rule carries a `{ ... }` block.
        block: bool,
    },
    /// A declaration: `property: value`. The value is kept as raw text so
    /// quoting, `!important`, and vendor syntax round-trip untouched.
    Declaration { property: String, value: String },
}

impl Node {
    /// Shorthand for a rule node.
    pub fn rule(selector: impl Into<String>) -> Self {
        Node::Rule {
            selector: selector.into(),
        }
    }

    /// Shorthand for an at-rule node.
    pub fn at_rule(name: impl Into<String>, params: impl Into<String>, block: bool) -> Self {
        Node::AtRule {
            name: name.into(),
            params: params.into(),
            block,
        }
    }

    /// Shorthand for a declaration node.
    pub fn declaration(property: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Declaration {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// A parsed stylesheet, backed by a slotmap arena.
///
/// The root node always exists; top-level rules are its children. Consumers
/// hold [`NodeId`]s, never references, so the tree can be mutated freely
/// while a traversal snapshot is in flight.
#[derive(Debug)]
pub struct Stylesheet {
    nodes: SlotMap<NodeId, Node>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: NodeId,
}

impl Stylesheet {
    /// Create an empty sheet containing only the root.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let mut children = SecondaryMap::new();
        let root = nodes.insert(Node::Root);
        children.insert(root, Vec::new());
        Self {
            nodes,
            children,
            parent: SecondaryMap::new(),
            root,
        }
    }

    /// The root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a node as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `parent` does not exist or cannot hold children
    /// (declarations and blockless at-rules are leaves).
    pub fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        debug_assert!(
            matches!(
                self.nodes.get(parent),
                Some(Node::Root) | Some(Node::Rule { .. }) | Some(Node::AtRule { block: true, .. })
            ),
            "parent cannot hold children"
        );
        let id = self.nodes.insert(node);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        id
    }

    /// Remove a node and all its descendants recursively.
    ///
    /// Returns the removed [`Node`], or `None` if the id is stale or refers
    /// to the root (the root is never removed).
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        if id == self.root || !self.nodes.contains_key(id) {
            return None;
        }

        // Detach from parent's children list.
        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }

        // Collect all descendants (BFS) to remove them.
        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed = None;

        while let Some(current) = to_remove.pop_front() {
            // Queue children before removing.
            if let Some(kids) = self.children.remove(current) {
                for &child in &kids {
                    to_remove.push_back(child);
                }
            }
            self.parent.remove(current);
            let node = self.nodes.remove(current);
            if current == id {
                removed = node;
            }
        }

        removed
    }

    /// Get the parent of a node, if it has one. The root has none.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Immutable access to a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutable access to a node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Whether the sheet contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether the sheet has any content at all.
    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    /// The selector of a rule node. `None` for every other node kind.
    pub fn selector(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(id) {
            Some(Node::Rule { selector }) => Some(selector),
            _ => None,
        }
    }

    /// Replace the selector of a rule node. No-op for other node kinds.
    pub fn set_selector(&mut self, id: NodeId, selector: impl Into<String>) {
        if let Some(Node::Rule { selector: slot }) = self.nodes.get_mut(id) {
            *slot = selector.into();
        }
    }

    /// Pre-order depth-first traversal starting from `start`.
    ///
    /// Returns a snapshot of ids; nodes removed after the snapshot simply
    /// fail the [`contains`](Self::contains) check.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Visit every rule in the sheet, at any depth (including rules nested
    /// inside at-rule blocks), in source order.
    ///
    /// The visitor receives the sheet mutably and may rewrite or remove the
    /// rule it is handed; rules removed by an earlier visit are skipped.
    pub fn walk_rules<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Self, NodeId),
    {
        for id in self.walk_depth_first(self.root) {
            if !self.contains(id) {
                continue;
            }
            if matches!(self.nodes.get(id), Some(Node::Rule { .. })) {
                visit(self, id);
            }
        }
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a small test sheet by hand:
    /// ```text
    /// ul {
    ///   margin: 0;
    ///   & li {
    ///     color: blue;
    ///   }
    /// }
    /// ```
    fn build_sheet() -> (Stylesheet, NodeId, NodeId, NodeId, NodeId) {
        let mut sheet = Stylesheet::new();
        let ul = sheet.append(sheet.root(), Node::rule("ul"));
        let margin = sheet.append(ul, Node::declaration("margin", "0"));
        let li = sheet.append(ul, Node::rule("& li"));
        let color = sheet.append(li, Node::declaration("color", "blue"));
        (sheet, ul, margin, li, color)
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_sheet_is_empty() {
        let sheet = Stylesheet::new();
        assert!(sheet.is_empty());
        assert_eq!(sheet.get(sheet.root()), Some(&Node::Root));
    }

    #[test]
    fn append_parent_relationship() {
        let (sheet, ul, margin, li, color) = build_sheet();
        assert_eq!(sheet.parent(ul), Some(sheet.root()));
        assert_eq!(sheet.parent(margin), Some(ul));
        assert_eq!(sheet.parent(li), Some(ul));
        assert_eq!(sheet.parent(color), Some(li));
        assert_eq!(sheet.parent(sheet.root()), None);
    }

    #[test]
    fn children_in_source_order() {
        let (sheet, ul, margin, li, _color) = build_sheet();
        assert_eq!(sheet.children(sheet.root()), &[ul]);
        assert_eq!(sheet.children(ul), &[margin, li]);
    }

    // ── Accessors ────────────────────────────────────────────────────

    #[test]
    fn selector_only_for_rules() {
        let (sheet, ul, margin, li, _color) = build_sheet();
        assert_eq!(sheet.selector(ul), Some("ul"));
        assert_eq!(sheet.selector(li), Some("& li"));
        assert_eq!(sheet.selector(margin), None);
        assert_eq!(sheet.selector(sheet.root()), None);
    }

    #[test]
    fn set_selector_rewrites_in_place() {
        let (mut sheet, ul, ..) = build_sheet();
        sheet.set_selector(ul, "ol");
        assert_eq!(sheet.selector(ul), Some("ol"));
    }

    #[test]
    fn set_selector_ignores_declarations() {
        let (mut sheet, _ul, margin, ..) = build_sheet();
        sheet.set_selector(margin, "nope");
        assert_eq!(sheet.get(margin), Some(&Node::declaration("margin", "0")));
    }

    // ── Removal ──────────────────────────────────────────────────────

    #[test]
    fn remove_declaration() {
        let (mut sheet, ul, margin, li, _color) = build_sheet();
        let removed = sheet.remove(margin);
        assert_eq!(removed, Some(Node::declaration("margin", "0")));
        assert!(!sheet.contains(margin));
        assert_eq!(sheet.children(ul), &[li]);
    }

    #[test]
    fn remove_subtree() {
        let (mut sheet, ul, margin, li, color) = build_sheet();
        sheet.remove(ul);
        assert!(!sheet.contains(ul));
        assert!(!sheet.contains(margin));
        assert!(!sheet.contains(li));
        assert!(!sheet.contains(color));
        assert!(sheet.is_empty());
    }

    #[test]
    fn remove_root_is_refused() {
        let (mut sheet, ..) = build_sheet();
        assert!(sheet.remove(sheet.root()).is_none());
        assert!(!sheet.is_empty());
    }

    #[test]
    fn remove_stale_id() {
        let (mut sheet, _ul, margin, ..) = build_sheet();
        sheet.remove(margin);
        assert!(sheet.remove(margin).is_none());
    }

    // ── Traversal ────────────────────────────────────────────────────

    #[test]
    fn walk_depth_first_order() {
        let (sheet, ul, margin, li, color) = build_sheet();
        let order = sheet.walk_depth_first(sheet.root());
        assert_eq!(order, vec![sheet.root(), ul, margin, li, color]);
    }

    #[test]
    fn walk_rules_visits_nested_rules_only() {
        let (mut sheet, ..) = build_sheet();
        let mut seen = Vec::new();
        sheet.walk_rules(|sheet, rule| {
            seen.push(sheet.selector(rule).map(str::to_owned));
        });
        assert_eq!(seen, vec![Some("ul".into()), Some("& li".into())]);
    }

    #[test]
    fn walk_rules_descends_into_at_rules() {
        let mut sheet = Stylesheet::new();
        let media = sheet.append(
            sheet.root(),
            Node::at_rule("media", "(min-width: 600px)", true),
        );
        sheet.append(media, Node::rule("main"));
        let mut seen = Vec::new();
        sheet.walk_rules(|sheet, rule| {
            seen.push(sheet.selector(rule).map(str::to_owned));
        });
        assert_eq!(seen, vec![Some("main".into())]);
    }

    #[test]
    fn walk_rules_tolerates_removal_mid_walk() {
        let (mut sheet, ..) = build_sheet();
        let mut visits = 0;
        sheet.walk_rules(|sheet, rule| {
            visits += 1;
            // Removing the outer rule also removes the nested rule before
            // the walk reaches it.
            sheet.remove(rule);
        });
        assert_eq!(visits, 1);
        assert!(sheet.is_empty());
    }

    #[test]
    fn walk_rules_allows_mutation() {
        let (mut sheet, ul, _margin, li, _color) = build_sheet();
        sheet.walk_rules(|sheet, rule| {
            let upper = sheet.selector(rule).map(str::to_uppercase);
            if let Some(upper) = upper {
                sheet.set_selector(rule, upper);
            }
        });
        assert_eq!(sheet.selector(ul), Some("UL"));
        assert_eq!(sheet.selector(li), Some("& LI"));
    }

    #[test]
    fn default_impl() {
        let sheet = Stylesheet::default();
        assert!(sheet.is_empty());
    }

    #[test]
    fn debug_impl_dumps_nodes() {
        let (sheet, ..) = build_sheet();
        let dump = format!("{sheet:?}");
        assert!(dump.contains("\"ul\""));
        assert!(dump.contains("\"margin\""));
    }
}
