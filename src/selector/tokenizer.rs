//! logos-based selector scanner.
//!
//! Unlike the stylesheet scanner, whitespace is significant here: a space
//! between two compounds is the descendant combinator. The attribute
//! operators are two-character tokens, so longest-match disambiguates them
//! from their one-character prefixes (`~=` beats `~`, `*=` beats `*`,
//! `::` beats `:`).

use logos::Logos;

/// Selector token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    // ── Compound tokens (longer matches, defined first) ──────────────

    /// `::`
    #[token("::")]
    DoubleColon,

    /// `~=`
    #[token("~=")]
    IncludesEq,

    /// `|=`
    #[token("|=")]
    DashEq,

    /// `^=`
    #[token("^=")]
    PrefixEq,

    /// `$=`
    #[token("$=")]
    SuffixEq,

    /// `*=`
    #[token("*=")]
    SubstringEq,

    /// Identifier: tag names, class/id names, attribute names, pseudo names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// Run of digits, as in `:nth-child(2n+1)` arguments.
    #[regex(r"[0-9]+")]
    Number,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    SingleQuoted,

    /// Run of whitespace. Significant: reads as the descendant combinator
    /// between two compounds.
    #[regex(r"[ \t\n\r\f]+")]
    Space,

    // ── Single-character tokens ───────────────────────────────────────

    /// `:`
    #[token(":")]
    Colon,

    /// `=`
    #[token("=")]
    Eq,

    /// `.`
    #[token(".")]
    Dot,

    /// `#`
    #[token("#")]
    Hash,

    /// `*`
    #[token("*")]
    Star,

    /// `&`
    #[token("&")]
    Ampersand,

    /// `,`
    #[token(",")]
    Comma,

    /// `>`
    #[token(">")]
    Greater,

    /// `+`
    #[token("+")]
    Plus,

    /// `~`
    #[token("~")]
    Tilde,

    /// `[`
    #[token("[")]
    BracketOpen,

    /// `]`
    #[token("]")]
    BracketClose,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// Anything the scanner cannot classify. Priority 0, so every named
    /// token wins ties; the parser rejects it outside raw-capture contexts.
    #[regex(r".", priority = 0)]
    Other,
}

/// Tokenize a selector into `(Token, span)` pairs.
///
/// Spans index into the input so the parser can slice names, quoted values,
/// and opaque pseudo-class arguments back out.
pub fn tokenize(input: &str) -> Vec<(Token, std::ops::Range<usize>)> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| (result.unwrap_or(Token::Other), span))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: tokenize and keep just the token kinds.
    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input).into_iter().map(|(token, _)| token).collect()
    }

    #[test]
    fn test_compound_selector() {
        assert_eq!(
            kinds("li.item"),
            vec![Token::Ident, Token::Dot, Token::Ident]
        );
    }

    #[test]
    fn test_ident_with_digits_and_dashes() {
        assert_eq!(kinds("h1"), vec![Token::Ident]);
        assert_eq!(kinds("data-x"), vec![Token::Ident]);
    }

    #[test]
    fn test_space_is_a_token() {
        assert_eq!(
            kinds("ul li"),
            vec![Token::Ident, Token::Space, Token::Ident]
        );
    }

    #[test]
    fn test_attribute_operators() {
        assert_eq!(
            kinds("[href=\"#\"]"),
            vec![
                Token::BracketOpen,
                Token::Ident,
                Token::Eq,
                Token::DoubleQuoted,
                Token::BracketClose,
            ]
        );
        assert_eq!(kinds("~=")[0], Token::IncludesEq);
        assert_eq!(kinds("|=")[0], Token::DashEq);
        assert_eq!(kinds("^=")[0], Token::PrefixEq);
        assert_eq!(kinds("$=")[0], Token::SuffixEq);
        assert_eq!(kinds("*=")[0], Token::SubstringEq);
    }

    #[test]
    fn test_two_char_operators_beat_prefixes() {
        // `*` alone is the universal selector, `*=` is an operator.
        assert_eq!(kinds("*"), vec![Token::Star]);
        assert_eq!(kinds("*="), vec![Token::SubstringEq]);
        assert_eq!(kinds("~"), vec![Token::Tilde]);
        assert_eq!(kinds("::"), vec![Token::DoubleColon]);
        assert_eq!(kinds(":"), vec![Token::Colon]);
    }

    #[test]
    fn test_pseudo_with_argument() {
        assert_eq!(
            kinds(":not(span)"),
            vec![
                Token::Colon,
                Token::Ident,
                Token::ParenOpen,
                Token::Ident,
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn test_nesting_marker_and_combinators() {
        assert_eq!(
            kinds("& > li"),
            vec![
                Token::Ampersand,
                Token::Space,
                Token::Greater,
                Token::Space,
                Token::Ident,
            ]
        );
    }

    #[test]
    fn test_unclassified_input_becomes_other() {
        assert_eq!(kinds("@"), vec![Token::Other]);
        assert_eq!(kinds("é"), vec![Token::Other]);
    }

    #[test]
    fn test_spans_cover_input() {
        let input = "li.item > a[href]";
        let mut end = 0;
        for (_, span) in tokenize(input) {
            assert_eq!(span.start, end);
            end = span.end;
        }
        assert_eq!(end, input.len());
    }
}
