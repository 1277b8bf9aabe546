//! Error aggregation for a whole run
//!
//! Lexical and syntax errors are carried as data (`ERROR` tokens and
//! [`Expr::Error`] nodes) so output for valid input can be produced alongside
//! them.  [`Diagnostics`] walks every emitted token or node, keeps every
//! error in source order, and maps the result to a process exit status.

use crate::parser::ast::{ErrorOrigin, Expr};
use crate::parser::token::Token;
use std::fmt;

/// Exit status for input that produced any error (`EX_DATAERR`).
pub const EXIT_DATA_ERR: i32 = 65;

/// A single reported problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Unexpected character or unterminated string
    Lexical { message: String, line: usize },

    /// Malformed expression
    Syntax { message: String, line: usize },
}

impl Diagnostic {
    pub fn message(&self) -> &str {
        match self {
            Diagnostic::Lexical { message, .. } | Diagnostic::Syntax { message, .. } => message,
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, Diagnostic::Lexical { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for Diagnostic {}

/// Every diagnostic of a run, in the order it was observed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `token` if it is an `ERROR` token. Returns whether it was.
    pub fn record_token(&mut self, token: &Token) -> bool {
        match token.error_message() {
            Some(message) => {
                self.items.push(Diagnostic::Lexical {
                    message: message.to_string(),
                    line: token.line,
                });
                true
            }
            None => false,
        }
    }

    /// Record `expr` if it is an error node. Returns whether it was.
    ///
    /// A node built from an `ERROR` token counts as a lexical error.
    pub fn record_expr(&mut self, expr: &Expr) -> bool {
        let Expr::Error {
            origin,
            message,
            line,
        } = expr
        else {
            return false;
        };

        let message = message.clone();
        let line = *line;
        self.items.push(match origin {
            ErrorOrigin::Lexical => Diagnostic::Lexical { message, line },
            ErrorOrigin::Syntax => Diagnostic::Syntax { message, line },
        });
        true
    }

    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> Self {
        let mut diagnostics = Self::new();
        for token in tokens {
            diagnostics.record_token(token);
        }
        diagnostics
    }

    pub fn from_exprs<'a>(exprs: impl IntoIterator<Item = &'a Expr>) -> Self {
        let mut diagnostics = Self::new();
        for expr in exprs {
            diagnostics.record_expr(expr);
        }
        diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// `0` for a clean run, [`EXIT_DATA_ERR`] if anything was reported.
    pub fn exit_code(&self) -> i32 {
        if self.is_empty() {
            0
        } else {
            EXIT_DATA_ERR
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::token::TokenKind;

    #[test]
    fn test_clean_run() {
        let tokens = vec![Token::new(TokenKind::Plus, "+", 1), Token::eof(1)];
        let diagnostics = Diagnostics::from_tokens(&tokens);

        assert!(diagnostics.is_empty());
        assert_eq!(diagnostics.exit_code(), 0);
    }

    #[test]
    fn test_reports_every_error_in_order() {
        let tokens = vec![
            Token::error("[line 1] Error: Unexpected character: #", 1),
            Token::new(TokenKind::Plus, "+", 2),
            Token::error("[line 3] Error: Unexpected character: $", 3),
            Token::eof(3),
        ];
        let diagnostics = Diagnostics::from_tokens(&tokens);

        let messages: Vec<&str> = diagnostics.iter().map(Diagnostic::message).collect();
        assert_eq!(
            messages,
            vec![
                "[line 1] Error: Unexpected character: #",
                "[line 3] Error: Unexpected character: $",
            ]
        );
        assert!(diagnostics.iter().all(Diagnostic::is_lexical));
        assert_eq!(diagnostics.exit_code(), EXIT_DATA_ERR);
    }

    #[test]
    fn test_records_error_nodes_by_origin() {
        let mut diagnostics = Diagnostics::new();

        assert!(!diagnostics.record_expr(&Expr::literal("1.0")));
        assert!(diagnostics.record_expr(&Expr::error(
            ErrorOrigin::Syntax,
            "[line 1] Error at end: Expect expression.",
            1
        )));
        assert!(diagnostics.record_expr(&Expr::error(
            ErrorOrigin::Lexical,
            "[line 2] Error: Unterminated string.",
            2
        )));

        let items: Vec<&Diagnostic> = diagnostics.iter().collect();
        assert_eq!(items.len(), 2);
        assert!(!items[0].is_lexical());
        assert_eq!(
            items[1],
            &Diagnostic::Lexical {
                message: "[line 2] Error: Unterminated string.".to_string(),
                line: 2,
            }
        );
        assert_eq!(diagnostics.exit_code(), EXIT_DATA_ERR);
    }
}
