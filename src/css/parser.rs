//! Stylesheet parser.
//!
//! Parses (possibly nested) CSS text into a [`Stylesheet`] rule tree. Uses
//! the logos-based scanner from [`crate::css::tokenizer`]: structural tokens
//! drive block/statement boundaries, everything else is re-assembled into raw
//! selector and declaration text. Selectors are **not** interpreted here —
//! nesting markers, emmet multipliers, and attribute syntax all pass through
//! as plain strings for later passes to pick apart.

use crate::css::model::{Node, NodeId, Stylesheet};
use crate::css::tokenizer::{tokenize, Token};

/// Errors from stylesheet parsing. Offsets are byte positions in the input.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected `}}` at byte {offset}: no open block")]
    UnexpectedCloseBrace { offset: usize },
    #[error("missing selector before `{{` at byte {offset}")]
    MissingSelector { offset: usize },
    #[error("expected `:` in declaration at byte {offset}: `{text}`")]
    MissingColon { offset: usize, text: String },
    #[error("declaration outside of a rule at byte {offset}: `{text}`")]
    DeclarationOutsideRule { offset: usize, text: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// Parse stylesheet source into a [`Stylesheet`].
pub fn parse(source: &str) -> Result<Stylesheet, ParseError> {
    let mut parser = Parser {
        source,
        sheet: Stylesheet::new(),
        current: NodeId::default(),
        run: String::new(),
        run_start: None,
        paren_depth: 0,
    };
    parser.current = parser.sheet.root();

    for (token, span) in tokenize(source) {
        match token {
            Token::Text | Token::DoubleQuoted | Token::SingleQuoted | Token::Slash => {
                parser.push_slice(span);
            }
            Token::Comment => {
                // A comment reads as a single space, like any other
                // inter-token whitespace.
                parser.run.push(' ');
            }
            Token::ParenOpen => {
                parser.paren_depth += 1;
                parser.push_slice(span);
            }
            Token::ParenClose => {
                parser.paren_depth = parser.paren_depth.saturating_sub(1);
                parser.push_slice(span);
            }
            Token::Semicolon if parser.paren_depth > 0 => {
                // Inside `url(data:...;base64,...)` and friends.
                parser.push_slice(span);
            }
            Token::Semicolon => parser.end_statement()?,
            Token::BraceOpen => parser.open_block(span.start)?,
            Token::BraceClose => parser.close_block(span.start)?,
        }
    }

    parser.finish()
}

/// Parser state: the sheet under construction plus the raw-text run being
/// accumulated for the next statement.
struct Parser<'src> {
    source: &'src str,
    sheet: Stylesheet,
    /// The node new statements attach to (root, a rule, or an at-rule block).
    current: NodeId,
    run: String,
    /// Byte offset of the first non-whitespace text in `run`.
    run_start: Option<usize>,
    paren_depth: usize,
}

impl Parser<'_> {
    fn push_slice(&mut self, span: std::ops::Range<usize>) {
        let slice = &self.source[span.clone()];
        if self.run_start.is_none() && !slice.trim_start().is_empty() {
            let leading = slice.len() - slice.trim_start().len();
            self.run_start = Some(span.start + leading);
        }
        self.run.push_str(slice);
    }

    /// Take the pending run as trimmed statement text plus its start offset.
    fn take_run(&mut self) -> (String, usize) {
        let text = std::mem::take(&mut self.run).trim().to_string();
        let offset = self.run_start.take().unwrap_or(0);
        self.paren_depth = 0;
        (text, offset)
    }

    /// `;` hit at statement depth: the run is a declaration or a blockless
    /// at-rule. Empty runs (stray semicolons) are tolerated.
    fn end_statement(&mut self) -> Result<(), ParseError> {
        let (text, offset) = self.take_run();
        if text.is_empty() {
            return Ok(());
        }
        if let Some(prelude) = text.strip_prefix('@') {
            let (name, params) = split_at_rule(prelude);
            self.sheet
                .append(self.current, Node::at_rule(name, params, false));
            return Ok(());
        }
        if self.current == self.sheet.root() {
            return Err(ParseError::DeclarationOutsideRule { offset, text });
        }
        match text.split_once(':') {
            Some((property, value)) => {
                self.sheet.append(
                    self.current,
                    Node::declaration(property.trim_end(), value.trim_start()),
                );
                Ok(())
            }
            None => Err(ParseError::MissingColon { offset, text }),
        }
    }

    /// `{` hit: the run is a rule selector or an at-rule prelude.
    fn open_block(&mut self, offset: usize) -> Result<(), ParseError> {
        let (text, _) = self.take_run();
        if text.is_empty() {
            return Err(ParseError::MissingSelector { offset });
        }
        let node = match text.strip_prefix('@') {
            Some(prelude) => {
                let (name, params) = split_at_rule(prelude);
                Node::at_rule(name, params, true)
            }
            None => Node::rule(text),
        };
        self.current = self.sheet.append(self.current, node);
        Ok(())
    }

    /// `}` hit: flush a trailing declaration written without `;`, then pop.
    fn close_block(&mut self, offset: usize) -> Result<(), ParseError> {
        self.end_statement()?;
        match self.sheet.parent(self.current) {
            Some(parent) => {
                self.current = parent;
                Ok(())
            }
            None => Err(ParseError::UnexpectedCloseBrace { offset }),
        }
    }

    fn finish(mut self) -> Result<Stylesheet, ParseError> {
        // A trailing blockless at-rule may omit its semicolon; anything else
        // left in the run never reached its `{` or `;`.
        let (text, _) = self.take_run();
        if let Some(prelude) = text.strip_prefix('@') {
            let (name, params) = split_at_rule(prelude);
            self.sheet
                .append(self.current, Node::at_rule(name, params, false));
        } else if !text.is_empty() {
            return Err(ParseError::UnexpectedEof(format!(
                "unterminated statement `{text}`"
            )));
        }
        if self.current != self.sheet.root() {
            return Err(ParseError::UnexpectedEof("unclosed block".into()));
        }
        Ok(self.sheet)
    }
}

/// Split an at-rule prelude (after the `@`) into name and params:
/// `media (min-width: 10px)` → `("media", "(min-width: 10px)")`.
fn split_at_rule(prelude: &str) -> (&str, &str) {
    let end = prelude
        .find(|c: char| !c.is_alphanumeric() && c != '-')
        .unwrap_or(prelude.len());
    let (name, params) = prelude.split_at(end);
    (name, params.trim())
}
