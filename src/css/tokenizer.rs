//! logos-based stylesheet scanner.
//!
//! The parser only needs statement structure: where blocks open and close,
//! where statements end, and which stretches of text are opaque. Everything
//! between structural tokens is captured as raw text and re-assembled into
//! selector/declaration strings, so the scanner stays deliberately coarse.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `/* x */` as Comment beats `/` as Slash)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `"a;b"` matches [`Token::DoubleQuoted`], so quoted semicolons never
//!   terminate a declaration
//! - `/* ... */` matches [`Token::Comment`], not `Slash` + text
//! - a lone `/` (as in `font: 12px/1.5`) still lexes as [`Token::Slash`]

use logos::Logos;

/// Stylesheet token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    // ── Compound tokens (longer matches, defined first) ──────────────

    /// Block comment: `/* ... */`.
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    Comment,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    SingleQuoted,

    /// Run of raw text: selector fragments, property names, values,
    /// whitespace. Anything that is not structural.
    #[regex(r#"[^{}();'"/]+"#)]
    Text,

    // ── Structural tokens ─────────────────────────────────────────────

    /// `{`
    #[token("{")]
    BraceOpen,

    /// `}`
    #[token("}")]
    BraceClose,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// `/` outside a comment.
    #[token("/")]
    Slash,
}

/// Tokenize stylesheet source into `(Token, span)` pairs.
///
/// Spans index into the input so the parser can slice raw text back out.
/// A slice the scanner cannot classify is treated as raw [`Token::Text`]
/// rather than dropped; statement-level validation happens in the parser.
pub fn tokenize(input: &str) -> Vec<(Token, std::ops::Range<usize>)> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| (result.unwrap_or(Token::Text), span))
        .collect()
}
