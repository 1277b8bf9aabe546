//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the top-level driver.
//!
//! # Parser Architecture
//!
//! The parser is recursive descent:
//! - This module: Parser struct, error reporting helpers, and coordination
//! - `expressions`: one method per grammar level, from `equality` down to `primary`
//!
//! # Error recovery
//!
//! Grammar methods return `Result<Expr, ParseError>` and bail out with `?`.
//! The driver turns a failure into an [`Expr::Error`] node and carries on with
//! the next top-level expression from wherever the token stream now stands.
//! Nothing is skipped to resynchronise.

use crate::parser::ast::{ErrorOrigin, Expr};
use crate::parser::stream::TokenStream;
use crate::parser::token::{Token, TokenKind};
use log::{debug, info};
use std::fmt;
use std::iter::FusedIterator;

/// Deepest run of nested groups and prefix operators a single expression may hold
pub const MAX_NESTING_DEPTH: usize = 200;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub origin: ErrorOrigin,
    pub message: String,
    pub line: usize,
}

impl ParseError {
    /// Error anchored at `token`, in the `[line N] Error at 'x': ...` format.
    ///
    /// An `ERROR` token has no lexeme to quote, so the location is left out.
    pub(crate) fn at(token: &Token, message: &str) -> Self {
        let location = match token.kind {
            TokenKind::Eof => " at end".to_string(),
            TokenKind::Error => String::new(),
            _ => format!(" at '{}'", token.lexeme),
        };
        Self {
            origin: ErrorOrigin::Syntax,
            message: format!("[line {}] Error{}: {}", token.line, location, message),
            line: token.line,
        }
    }

    /// A lexical diagnostic that reached the parser as an `ERROR` token.
    pub(crate) fn lexical(token: &Token) -> Self {
        Self {
            origin: ErrorOrigin::Lexical,
            message: token.error_message().unwrap_or_default().to_string(),
            line: token.line,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for Expr {
    fn from(err: ParseError) -> Self {
        Expr::error(err.origin, err.message, err.line)
    }
}

/// Recursive descent parser for Lox expressions
pub struct Parser<I: Iterator<Item = Token>> {
    pub(crate) tokens: TokenStream<I>,
    depth: usize,
    parsed: usize,
    failed: usize,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new(tokens: impl IntoIterator<Item = Token, IntoIter = I>) -> Self {
        Self {
            tokens: TokenStream::new(tokens.into_iter()),
            depth: 0,
            parsed: 0,
            failed: 0,
        }
    }

    /// Parse every remaining top-level expression
    pub fn parse_all(&mut self) -> Vec<Expr> {
        let exprs: Vec<Expr> = self.by_ref().collect();
        info!(
            "parsed {} top-level expressions ({} failed)",
            self.parsed, self.failed
        );
        exprs
    }

    /// Parse one top-level expression, reporting failure as an error node.
    ///
    /// Returns `None` once the stream is at end of input.
    pub fn parse_next(&mut self) -> Option<Expr> {
        if self.tokens.is_at_end() {
            return None;
        }

        // A failed expression may leave the counter raised
        self.depth = 0;
        self.parsed += 1;
        match self.parse_expression() {
            Ok(expr) => Some(expr),
            Err(err) => {
                debug!("parse error on line {}: {}", err.line, err);
                self.failed += 1;
                Some(err.into())
            }
        }
    }

    // ===== Helper methods =====

    pub(crate) fn match_token(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        self.tokens.match_kind(kinds)
    }

    pub(crate) fn advance(&mut self) -> Token {
        self.tokens.consume()
    }

    /// Step one level into a group or prefix operator opened by `token`.
    pub(crate) fn enter_nested(&mut self, token: &Token) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::at(token, "Too much nesting."));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave_nested(&mut self) {
        self.depth -= 1;
    }

    pub(crate) fn expect_token(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.tokens.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::at(self.tokens.peek(), message))
        }
    }
}

impl<I: Iterator<Item = Token>> Iterator for Parser<I> {
    type Item = Expr;

    fn next(&mut self) -> Option<Expr> {
        self.parse_next()
    }
}

impl<I: Iterator<Item = Token>> FusedIterator for Parser<I> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn parse_source(source: &str) -> Vec<Expr> {
        Parser::new(Lexer::new(source.as_bytes())).parse_all()
    }

    #[test]
    fn test_parse_simple_expression() {
        let exprs = parse_source("1 + 2 * 3");

        assert_eq!(exprs.len(), 1);
        match &exprs[0] {
            Expr::Binary {
                operator,
                left,
                right,
            } => {
                assert_eq!(*operator, TokenKind::Plus);
                assert_eq!(**left, Expr::literal("1.0"));
                assert!(matches!(
                    **right,
                    Expr::Binary {
                        operator: TokenKind::Star,
                        ..
                    }
                ));
            }
            _ => panic!("Expected binary expression"),
        }
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_source("").is_empty());
        assert!(parse_source("  // only a comment\n").is_empty());
    }

    #[test]
    fn test_several_top_level_expressions() {
        let exprs = parse_source("1 2\n\"three\"");
        let rendered: Vec<String> = exprs.iter().map(|e| e.to_string()).collect();
        assert_eq!(rendered, vec!["1.0", "2.0", "three"]);
    }

    #[test]
    fn test_error_does_not_corrupt_earlier_expressions() {
        let exprs = parse_source("(1) )");

        assert_eq!(exprs.len(), 2);
        assert_eq!(exprs[0].to_string(), "(group 1.0)");
        assert_eq!(
            exprs[1].error_message(),
            Some("[line 1] Error at ')': Expect expression.")
        );
    }

    #[test]
    fn test_parse_error_display() {
        let token = Token::new(TokenKind::Semicolon, ";", 7);
        let err = ParseError::at(&token, "Expect expression.");
        assert_eq!(err.to_string(), "[line 7] Error at ';': Expect expression.");
        assert_eq!(err.line, 7);

        let err = ParseError::at(&Token::eof(2), "Expect expression.");
        assert_eq!(err.to_string(), "[line 2] Error at end: Expect expression.");
    }

    #[test]
    fn test_parse_error_at_lexical_error_token() {
        let token = Token::error("[line 4] Error: Unexpected character: @", 4);
        let err = ParseError::at(&token, "Expect ')' after expression.");

        assert_eq!(err.to_string(), "[line 4] Error: Expect ')' after expression.");
        assert_eq!(err.origin, ErrorOrigin::Syntax);
    }

    #[test]
    fn test_error_node_keeps_origin_and_line() {
        let exprs = parse_source("\n@ )");

        assert_eq!(
            exprs,
            vec![
                Expr::error(
                    ErrorOrigin::Lexical,
                    "[line 2] Error: Unexpected character: @",
                    2
                ),
                Expr::error(
                    ErrorOrigin::Syntax,
                    "[line 2] Error at ')': Expect expression.",
                    2
                ),
            ]
        );
    }

    #[test]
    fn test_parser_is_fused() {
        let mut parser = Parser::new(Lexer::new(b"nil"));
        assert_eq!(parser.next(), Some(Expr::literal("nil")));
        assert_eq!(parser.next(), None);
        assert_eq!(parser.next(), None);
    }
}
