//! The parsed selector: a flat sequence of components.
//!
//! A selector list parses into one flat sequence — list boundaries contribute
//! no component — because the consumers here scan for what they need (first
//! tag, every attribute) rather than matching elements. Combinators appear
//! in the stream as ordinary entries between compounds.

/// One component of a parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Type selector: `li`.
    Tag(String),
    /// Universal selector: `*`.
    Universal,
    /// The nesting marker: `&`.
    Nesting,
    /// Attribute selector: `[name]`, `[name=value]`, `[name~="value"]`, ...
    ///
    /// Class and id selectors surface here too, as `class` and `id`
    /// attributes, so consumers that only care about name/value handle all
    /// three spellings uniformly.
    Attribute {
        name: String,
        op: AttrOp,
        value: Option<String>,
    },
    /// Pseudo-class: `:hover`, `:not(...)`, `:nth-child(...)`.
    Pseudo { name: String, arg: PseudoArg },
    /// Pseudo-element: `::before`.
    PseudoElement(String),
    /// Combinator between two compounds.
    Combinator(Combinator),
}

impl Component {
    /// Shorthand for a type selector component.
    pub fn tag(name: impl Into<String>) -> Self {
        Component::Tag(name.into())
    }

    /// Shorthand for the attribute form of a class selector: `.item`.
    pub fn class(value: impl Into<String>) -> Self {
        Component::Attribute {
            name: "class".into(),
            op: AttrOp::Includes,
            value: Some(value.into()),
        }
    }

    /// Shorthand for the attribute form of an id selector: `#main`.
    pub fn id(value: impl Into<String>) -> Self {
        Component::Attribute {
            name: "id".into(),
            op: AttrOp::Equals,
            value: Some(value.into()),
        }
    }
}

/// How an attribute selector matches its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOp {
    /// `[attr]` — present, value irrelevant.
    Exists,
    /// `[attr=value]`
    Equals,
    /// `[attr~=value]` — whitespace-separated word match.
    Includes,
    /// `[attr|=value]` — exact or followed by a hyphen.
    DashMatch,
    /// `[attr^=value]`
    Prefix,
    /// `[attr$=value]`
    Suffix,
    /// `[attr*=value]`
    Substring,
}

/// The argument of a pseudo-class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoArg {
    /// No parenthesized argument: `:hover`.
    None,
    /// A nested selector, recursively parsed: `:not(span)`, `:is(a, b)`.
    Selector(Vec<Component>),
    /// Anything else, kept verbatim: `:nth-child(2n+1)`.
    Raw(String),
}

/// Combinator between two compounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace.
    Descendant,
    /// `>`
    Child,
    /// `+`
    NextSibling,
    /// `~`
    SubsequentSibling,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_shorthand_is_an_includes_attribute() {
        assert_eq!(
            Component::class("item"),
            Component::Attribute {
                name: "class".into(),
                op: AttrOp::Includes,
                value: Some("item".into()),
            }
        );
    }

    #[test]
    fn id_shorthand_is_an_equals_attribute() {
        assert_eq!(
            Component::id("main"),
            Component::Attribute {
                name: "id".into(),
                op: AttrOp::Equals,
                value: Some("main".into()),
            }
        );
    }
}
