//! # css-scaffold
//!
//! Generate parallel HTML and CSS from a single nested stylesheet.
//!
//! A stylesheet written with nested selectors already describes a document
//! outline: each rule becomes an element whose tag and attributes derive
//! from its selector, an emmet-style `*N` suffix repeats it, and a `content`
//! declaration becomes its text. The same source, run through the cleanup
//! pipeline, comes back as shippable CSS with the authoring-only syntax
//! stripped and (optionally) the nesting flattened for older browsers.
//!
//! ## Core Systems
//!
//! - **[`css`]** — Stylesheet engine: tokenizer, rule tree, parser, serializer, flattener
//! - **[`selector`]** — Selector engine: tokenizer, component model, parser
//! - **[`markup`]** — Generated markup model and HTML serializer
//! - **[`scaffold`]** — Selector translation, repetition, and the rule-tree walk
//! - **[`cleanup`]** — Pluggable CSS cleanup steps
//! - **[`transform`]** — The entry point tying both outputs together
//! - **[`error`]** — The crate-level error type

// Engines
pub mod css;
pub mod selector;

// Markup generation
pub mod markup;
pub mod scaffold;

// CSS cleanup
pub mod cleanup;

// Entry point
pub mod error;
pub mod transform;

pub use error::Error;
pub use transform::{transform, transform_with, Options, Output};
