//! Selector parser.
//!
//! Parses one selector (or selector list) into a flat [`Component`] sequence.
//! The grammar is the pragmatic subset this crate consumes: compounds built
//! from tags, classes, ids, attributes, and pseudos; the four combinators;
//! the `&` nesting marker; recursive arguments for the logical pseudo-classes
//! and verbatim arguments for everything else. Error offsets are byte
//! positions in the selector text handed in.

use std::ops::Range;

use crate::selector::model::{AttrOp, Combinator, Component, PseudoArg};
use crate::selector::tokenizer::{tokenize, Token};

/// Pseudo-classes whose argument is itself a selector and parses recursively.
/// Every other argument is kept as an opaque string.
const RECURSIVE_ARG_PSEUDOS: &[&str] = &["has", "is", "matches", "not", "where"];

/// Errors from selector parsing. Offsets are byte positions in the input.
#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    #[error("unexpected token at byte {offset}: {message}")]
    UnexpectedToken { offset: usize, message: String },
    #[error("unclosed attribute selector opened at byte {offset}")]
    UnclosedAttribute { offset: usize },
    #[error("unclosed pseudo-class argument opened at byte {offset}")]
    UnclosedArgument { offset: usize },
    #[error("unexpected end of selector: {0}")]
    UnexpectedEof(String),
}

/// Parse a selector into its flat component sequence.
///
/// A selector list flattens into one sequence: `h1, h2` parses to two tag
/// components with nothing between them. The empty selector parses to an
/// empty sequence.
pub fn parse(input: &str) -> Result<Vec<Component>, SelectorError> {
    Parser::new(input).parse_sequence(false)
}

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<(Token, Range<usize>)>,
    cursor: usize,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: tokenize(source),
            cursor: 0,
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.cursor).map(|&(token, _)| token)
    }

    fn advance(&mut self) -> Option<(Token, Range<usize>)> {
        let entry = self.tokens.get(self.cursor).cloned();
        if entry.is_some() {
            self.cursor += 1;
        }
        entry
    }

    /// Byte offset of the next token, or end of input.
    fn offset(&self) -> usize {
        self.tokens
            .get(self.cursor)
            .map_or(self.source.len(), |(_, span)| span.start)
    }

    fn slice(&self, span: &Range<usize>) -> &str {
        &self.source[span.clone()]
    }

    fn skip_space(&mut self) {
        while self.peek() == Some(Token::Space) {
            self.cursor += 1;
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, SelectorError> {
        match self.advance() {
            Some((Token::Ident, span)) => Ok(self.slice(&span).to_string()),
            Some((_, span)) => Err(SelectorError::UnexpectedToken {
                offset: span.start,
                message: format!("expected {what}, got `{}`", &self.source[span]),
            }),
            None => Err(SelectorError::UnexpectedEof(format!("expected {what}"))),
        }
    }

    /// Parse components until end of input, or — when `nested` — until the
    /// `)` closing the surrounding pseudo-class argument.
    fn parse_sequence(&mut self, nested: bool) -> Result<Vec<Component>, SelectorError> {
        let mut components = Vec::new();
        let mut pending: Option<Combinator> = None;
        // At the start of the input and after each comma a space is just
        // whitespace, not a descendant combinator.
        let mut boundary = true;
        while let Some(token) = self.peek() {
            match token {
                Token::ParenClose if nested => break,
                Token::Space => {
                    self.cursor += 1;
                    if !boundary && pending.is_none() {
                        pending = Some(Combinator::Descendant);
                    }
                }
                Token::Greater => {
                    self.cursor += 1;
                    pending = Some(Combinator::Child);
                }
                Token::Plus => {
                    self.cursor += 1;
                    pending = Some(Combinator::NextSibling);
                }
                Token::Tilde => {
                    self.cursor += 1;
                    pending = Some(Combinator::SubsequentSibling);
                }
                Token::Comma => {
                    self.cursor += 1;
                    pending = None;
                    boundary = true;
                }
                _ => {
                    let component = self.parse_component()?;
                    if let Some(combinator) = pending.take() {
                        components.push(Component::Combinator(combinator));
                    }
                    components.push(component);
                    boundary = false;
                }
            }
        }
        Ok(components)
    }

    fn parse_component(&mut self) -> Result<Component, SelectorError> {
        let Some((token, span)) = self.tokens.get(self.cursor).cloned() else {
            return Err(SelectorError::UnexpectedEof(
                "expected a selector component".into(),
            ));
        };
        match token {
            Token::Ident => {
                self.cursor += 1;
                Ok(Component::Tag(self.slice(&span).to_string()))
            }
            Token::Star => {
                self.cursor += 1;
                Ok(Component::Universal)
            }
            Token::Ampersand => {
                self.cursor += 1;
                Ok(Component::Nesting)
            }
            Token::Dot => {
                self.cursor += 1;
                Ok(Component::class(self.expect_ident("a class name")?))
            }
            Token::Hash => {
                self.cursor += 1;
                Ok(Component::id(self.expect_ident("an id")?))
            }
            Token::BracketOpen => self.parse_attribute(span.start),
            Token::Colon => {
                self.cursor += 1;
                self.parse_pseudo()
            }
            Token::DoubleColon => {
                self.cursor += 1;
                Ok(Component::PseudoElement(
                    self.expect_ident("a pseudo-element name")?,
                ))
            }
            _ => Err(SelectorError::UnexpectedToken {
                offset: span.start,
                message: format!("`{}`", self.slice(&span)),
            }),
        }
    }

    /// Cursor is on `[`. Parses through the matching `]`.
    fn parse_attribute(&mut self, open: usize) -> Result<Component, SelectorError> {
        self.cursor += 1;
        self.skip_space();
        let name = self.expect_ident("an attribute name")?;
        self.skip_space();
        let op = match self.peek() {
            Some(Token::BracketClose) => {
                self.cursor += 1;
                return Ok(Component::Attribute {
                    name,
                    op: AttrOp::Exists,
                    value: None,
                });
            }
            Some(Token::Eq) => AttrOp::Equals,
            Some(Token::IncludesEq) => AttrOp::Includes,
            Some(Token::DashEq) => AttrOp::DashMatch,
            Some(Token::PrefixEq) => AttrOp::Prefix,
            Some(Token::SuffixEq) => AttrOp::Suffix,
            Some(Token::SubstringEq) => AttrOp::Substring,
            Some(_) => {
                return Err(SelectorError::UnexpectedToken {
                    offset: self.offset(),
                    message: "expected an attribute operator or `]`".into(),
                })
            }
            None => return Err(SelectorError::UnclosedAttribute { offset: open }),
        };
        self.cursor += 1;
        self.skip_space();
        let value = self.parse_attribute_value(open)?;
        self.skip_space();
        match self.advance() {
            Some((Token::BracketClose, _)) => Ok(Component::Attribute {
                name,
                op,
                value: Some(value),
            }),
            Some((_, span)) => Err(SelectorError::UnexpectedToken {
                offset: span.start,
                message: format!("expected `]`, got `{}`", &self.source[span]),
            }),
            None => Err(SelectorError::UnclosedAttribute { offset: open }),
        }
    }

    /// Quoted values are unquoted; anything else is captured verbatim up to
    /// the closing `]`.
    fn parse_attribute_value(&mut self, open: usize) -> Result<String, SelectorError> {
        match self.peek() {
            Some(Token::DoubleQuoted | Token::SingleQuoted) => {
                let Some((_, span)) = self.advance() else {
                    return Err(SelectorError::UnclosedAttribute { offset: open });
                };
                Ok(self.source[span.start + 1..span.end - 1].to_string())
            }
            Some(_) => {
                let start = self.offset();
                while !matches!(self.peek(), Some(Token::BracketClose)) {
                    if self.advance().is_none() {
                        return Err(SelectorError::UnclosedAttribute { offset: open });
                    }
                }
                Ok(self.source[start..self.offset()].trim().to_string())
            }
            None => Err(SelectorError::UnclosedAttribute { offset: open }),
        }
    }

    /// Cursor is past the `:`. The logical pseudo-classes get their argument
    /// parsed recursively; all others keep it verbatim.
    fn parse_pseudo(&mut self) -> Result<Component, SelectorError> {
        let name = self.expect_ident("a pseudo-class name")?;
        if self.peek() != Some(Token::ParenOpen) {
            return Ok(Component::Pseudo {
                name,
                arg: PseudoArg::None,
            });
        }
        let open = self.offset();
        self.cursor += 1;
        let arg = match RECURSIVE_ARG_PSEUDOS.contains(&name.as_str()) {
            true => {
                let inner = self.parse_sequence(true)?;
                match self.advance() {
                    Some((Token::ParenClose, _)) => PseudoArg::Selector(inner),
                    _ => return Err(SelectorError::UnclosedArgument { offset: open }),
                }
            }
            false => {
                let start = self.offset();
                let mut depth = 1usize;
                let end = loop {
                    match self.advance() {
                        Some((Token::ParenOpen, _)) => depth += 1,
                        Some((Token::ParenClose, span)) => {
                            depth -= 1;
                            if depth == 0 {
                                break span.start;
                            }
                        }
                        Some(_) => {}
                        None => return Err(SelectorError::UnclosedArgument { offset: open }),
                    }
                };
                PseudoArg::Raw(self.source[start..end].trim().to_string())
            }
        };
        Ok(Component::Pseudo { name, arg })
    }
}
