//! logos-based tokenizer for inline style text.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `10px` as one [`Token::Number`], not `10` + `px`)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Property names such as `px` and `border-top` lex as [`Token::Ident`]
//! because identifiers cannot start with a digit or `-`.

use logos::Logos;

/// Style token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Hex color: `#` followed by hex digits. Length is validated by the parser.
    #[regex(r"#[0-9a-fA-F]+")]
    HexColor,

    /// Integer, possibly negative, with an optional `px` suffix.
    #[regex(r"-?[0-9]+(px)?")]
    Number,

    /// Identifier: property names and keyword values.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// `:`
    #[token(":")]
    Colon,

    /// `;`
    #[token(";")]
    Semicolon,
}
