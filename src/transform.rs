//! The transform entry point: one nested stylesheet in, parallel HTML and
//! CSS out.
//!
//! ```text
//! ul {
//!   li.item*2 {
//!     color: blue;
//!   }
//! }
//! ```
//!
//! becomes
//!
//! ```text
//! html: <ul><li class="item"></li><li class="item"></li></ul>
//! css:  ul {
//!         li.item {
//!           color: blue;
//!         }
//!       }
//! ```
//!
//! The two outputs come from two independent parses of the same source: the
//! markup pass lifts `content` declarations while it walks, and the cleanup
//! pass must see them again to drop them from the CSS, so neither pass reads
//! the other's tree.

use std::fmt;

use crate::cleanup::{self, Plugin};
use crate::css;
use crate::error::Error;
use crate::markup;
use crate::scaffold::{self, multiplier, targets_before_after};

/// Transform options.
#[derive(Default)]
pub struct Options {
    /// Flatten nesting for pre-nesting browsers.
    pub legacy: bool,
    /// Extra cleanup steps, run after the stock pipeline.
    pub plugins: Vec<Plugin>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the legacy (flattening) mode.
    pub fn with_legacy(mut self, legacy: bool) -> Self {
        self.legacy = legacy;
        self
    }

    /// Builder: append a cleanup step.
    pub fn with_plugin(mut self, plugin: Plugin) -> Self {
        self.plugins.push(plugin);
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("legacy", &self.legacy)
            .field("plugins", &self.plugins.len())
            .finish()
    }
}

/// The two parallel outputs of a transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub html: String,
    pub css: String,
}

/// Transform with default options.
pub fn transform(source: &str) -> Result<Output, Error> {
    transform_with(source, Options::default())
}

/// Transform one nested stylesheet into markup plus cleaned CSS.
///
/// The markup side walks the rules: one element per rule per repetition,
/// tags and attributes translated from the selector, `content` declarations
/// lifted out as text. The CSS side strips the repetition suffixes, drops
/// the lifted `content` declarations (keeping `::before`/`::after` ones),
/// flattens nesting when `legacy` asks for it, then runs the caller's
/// plugins in order.
pub fn transform_with(source: &str, options: Options) -> Result<Output, Error> {
    let mut markup_sheet = css::parse(source)?;
    let mut nodes = Vec::new();
    scaffold::walk(&mut markup_sheet, &mut nodes)?;
    let html = markup::serialize(&nodes);

    let mut sheet = css::parse(source)?;
    let mut steps = default_steps();
    if options.legacy {
        steps.push(cleanup::flatten_nesting());
    }
    steps.extend(options.plugins);
    for step in &steps {
        step(&mut sheet);
    }

    Ok(Output {
        html,
        css: css::serialize(&sheet),
    })
}

/// The stock pipeline: strip `*N` suffixes, drop lifted `content`
/// declarations.
fn default_steps() -> Vec<Plugin> {
    vec![
        cleanup::rename(|selector| multiplier::strip(selector).to_string()),
        cleanup::remove_declarations("content", |selector| !targets_before_after(selector)),
    ]
}
