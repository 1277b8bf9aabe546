// AST (Abstract Syntax Tree) definitions for Lox expressions

use super::token::TokenKind;
use std::fmt;

/// Expression node.
///
/// Composite nodes own their children through `Box`, so an expression is a
/// plain tree.  [`Expr::Error`] marks a parse failure and never has children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Number, string contents, identifier, `true`, `false` or `nil`
    Literal { text: String },

    /// Parenthesised sub-expression
    Grouping { inner: Box<Expr> },

    /// Prefix `!` or `-`
    Unary {
        operator: TokenKind,
        operand: Box<Expr>,
    },

    /// Infix arithmetic, comparison or equality
    Binary {
        operator: TokenKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Parse failure with its diagnostic message
    Error {
        origin: ErrorOrigin,
        message: String,
        line: usize,
    },
}

/// Which stage rejected the input behind an [`Expr::Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    /// An `ERROR` token passed through from the lexer
    Lexical,
    /// A token the grammar does not accept at that point
    Syntax,
}

impl Expr {
    pub fn literal(text: impl Into<String>) -> Self {
        Expr::Literal { text: text.into() }
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping {
            inner: Box::new(inner),
        }
    }

    pub fn unary(operator: TokenKind, operand: Expr) -> Self {
        Expr::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(operator: TokenKind, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn error(origin: ErrorOrigin, message: impl Into<String>, line: usize) -> Self {
        Expr::Error {
            origin,
            message: message.into(),
            line,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Expr::Error { .. })
    }

    /// Diagnostic message if this node is a parse failure.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Expr::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Writes the operator's source spelling, falling back to its kind name.
fn write_operator(f: &mut fmt::Formatter<'_>, operator: TokenKind) -> fmt::Result {
    match operator.symbol() {
        Some(sym) => f.write_str(sym),
        None => write!(f, "{}", operator),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal { text } => f.write_str(text),
            Expr::Grouping { inner } => write!(f, "(group {})", inner),
            Expr::Unary { operator, operand } => {
                f.write_str("(")?;
                write_operator(f, *operator)?;
                write!(f, " {})", operand)
            }
            Expr::Binary {
                operator,
                left,
                right,
            } => {
                f.write_str("(")?;
                write_operator(f, *operator)?;
                write!(f, " {} {})", left, right)
            }
            Expr::Error { message, .. } => f.write_str(message),
        }
    }
}
