//! Recursive descent parser for inline style text.
//!
//! Parses `key: value [value...]; ...` into a list of [`Declaration`]s using
//! the logos-based tokenizer from [`crate::css::tokenizer`]. Whitespace around
//! delimiters is insignificant and empty declarations (`;;`) are skipped.

use logos::Logos;

use crate::css::model::{Declaration, DeclarationValue};
use crate::css::tokenizer::Token;

/// Errors from style syntax parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at byte {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("invalid character at byte {position}: {text:?}")]
    InvalidCharacter { position: usize, text: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// A token with its source text and byte offset.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    position: usize,
}

/// Tokenize input, failing on the first character that does not lex.
fn tokenize_with_spans(input: &str) -> Result<Vec<PToken>, ParseError> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(input).spanned() {
        match result {
            Ok(token) => tokens.push(PToken {
                token,
                text: input[span.clone()].to_string(),
                position: span.start,
            }),
            Err(()) => {
                return Err(ParseError::InvalidCharacter {
                    position: span.start,
                    text: input[span].to_string(),
                });
            }
        }
    }
    Ok(tokens)
}

/// Parse a style string into declarations.
pub fn parse_declarations(input: &str) -> Result<Vec<Declaration>, ParseError> {
    let tokens = tokenize_with_spans(input)?;
    let mut parser = Parser { tokens, cursor: 0 };

    let mut declarations = Vec::new();
    loop {
        while parser.peek().is_some_and(|t| t.token == Token::Semicolon) {
            parser.advance();
        }
        if parser.is_eof() {
            break;
        }
        declarations.push(parser.parse_declaration()?);
    }
    Ok(declarations)
}

/// Parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<PToken> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    /// `Ident ':' value+`, terminated by `;` or end of input.
    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let name = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected property name".into()))?;
        if name.token != Token::Ident {
            return Err(ParseError::UnexpectedToken {
                position: name.position,
                message: format!("expected property name, got {:?} '{}'", name.token, name.text),
            });
        }
        let property = name.text.to_ascii_lowercase();

        match self.advance() {
            Some(tok) if tok.token == Token::Colon => {}
            Some(tok) => {
                return Err(ParseError::UnexpectedToken {
                    position: tok.position,
                    message: format!("expected ':' after '{property}', got '{}'", tok.text),
                });
            }
            None => {
                return Err(ParseError::UnexpectedEof(format!(
                    "expected ':' after '{property}'"
                )));
            }
        }

        let mut values = Vec::new();
        while let Some(tok) = self.peek() {
            if tok.token == Token::Semicolon {
                break;
            }
            let tok = tok.clone();
            self.advance();
            values.push(parse_value(&tok)?);
        }

        if values.is_empty() {
            return Err(ParseError::UnexpectedEof(format!(
                "expected value for '{property}'"
            )));
        }

        Ok(Declaration::new(property, values, name.position))
    }
}

fn parse_value(tok: &PToken) -> Result<DeclarationValue, ParseError> {
    match tok.token {
        Token::Number => {
            let digits = tok.text.strip_suffix("px").unwrap_or(&tok.text);
            digits
                .parse::<i32>()
                .map(DeclarationValue::Number)
                .map_err(|e| ParseError::UnexpectedToken {
                    position: tok.position,
                    message: format!("invalid number '{}': {e}", tok.text),
                })
        }
        Token::HexColor => Ok(DeclarationValue::Color(tok.text[1..].to_string())),
        Token::Ident => Ok(DeclarationValue::Ident(tok.text.clone())),
        Token::Colon | Token::Semicolon => Err(ParseError::UnexpectedToken {
            position: tok.position,
            message: format!("expected value, got '{}'", tok.text),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<Declaration> {
        parse_declarations(input).expect("parse should succeed")
    }

    #[test]
    fn parse_single_declaration() {
        let decls = parse("width:100");
        assert_eq!(decls, vec![Declaration::new("width", vec![DeclarationValue::Number(100)], 0)]);
    }

    #[test]
    fn parse_whitespace_insensitive() {
        let decls = parse("  px : left ;  py:bottom  ; ");
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].property, "px");
        assert_eq!(decls[0].values, vec![DeclarationValue::Ident("left".into())]);
        assert_eq!(decls[1].property, "py");
    }

    #[test]
    fn parse_multiple_values() {
        let decls = parse("margin:0 auto 20");
        assert_eq!(
            decls[0].values,
            vec![
                DeclarationValue::Number(0),
                DeclarationValue::Ident("auto".into()),
                DeclarationValue::Number(20),
            ]
        );
    }

    #[test]
    fn parse_px_suffix_and_color() {
        let decls = parse("width:40px; background-color: #323232");
        assert_eq!(decls[0].values, vec![DeclarationValue::Number(40)]);
        assert_eq!(decls[1].property, "background-color");
        assert_eq!(decls[1].values, vec![DeclarationValue::Color("323232".into())]);
    }

    #[test]
    fn parse_property_names_are_lowercased() {
        let decls = parse("Width:1");
        assert_eq!(decls[0].property, "width");
    }

    #[test]
    fn parse_empty_declarations_skipped() {
        assert!(parse("").is_empty());
        assert!(parse(";;;").is_empty());
        assert_eq!(parse(";width:1;;height:2;").len(), 2);
    }

    #[test]
    fn parse_records_positions() {
        let decls = parse("width:1; height:2");
        assert_eq!(decls[0].position, 0);
        assert_eq!(decls[1].position, 9);
    }

    // ── Error handling ───────────────────────────────────────────────

    #[test]
    fn missing_colon_is_error() {
        let err = parse_declarations("width 100").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { position: 6, .. }));
    }

    #[test]
    fn missing_value_is_error() {
        assert!(matches!(
            parse_declarations("width:;height:2"),
            Err(ParseError::UnexpectedEof(_))
        ));
        assert!(matches!(parse_declarations("width:"), Err(ParseError::UnexpectedEof(_))));
    }

    #[test]
    fn dangling_name_is_error() {
        assert!(matches!(parse_declarations("width"), Err(ParseError::UnexpectedEof(_))));
    }

    #[test]
    fn value_starting_declaration_is_error() {
        assert!(matches!(
            parse_declarations("100:width"),
            Err(ParseError::UnexpectedToken { position: 0, .. })
        ));
    }

    #[test]
    fn invalid_character_is_error() {
        let err = parse_declarations("width: 10%").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidCharacter { position: 9, text: "%".into() }
        );
    }

    #[test]
    fn second_colon_is_error() {
        assert!(matches!(
            parse_declarations("px:left:right"),
            Err(ParseError::UnexpectedToken { position: 7, .. })
        ));
    }

    #[test]
    fn number_overflow_is_error() {
        assert!(matches!(
            parse_declarations("width:99999999999"),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }
}
