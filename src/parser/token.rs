//! Token definitions shared by the lexer and the parser
//!
//! A [`Token`] is a plain value: once the lexer hands it over, nothing mutates
//! it.  Its [`Display`](fmt::Display) form is the canonical one-line rendering
//! `KIND lexeme literal`, with `null` standing in for a missing literal.

use std::fmt;

/// Every kind of token the lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // End of input
    Eof,

    // Single-character punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Semicolon,
    Plus,
    Minus,
    Star,
    Dot,

    // One or two characters
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Slash,

    // Literals
    String,
    Number,
    Identifier,

    // Keywords
    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    // Lexical diagnostic carried in the token stream
    Error,
}

impl TokenKind {
    /// Name used in the canonical token rendering (`LEFT_PAREN`, `EOF`, ...).
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Dot => "DOT",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Slash => "SLASH",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::And => "AND",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::For => "FOR",
            TokenKind::Fun => "FUN",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::Or => "OR",
            TokenKind::Print => "PRINT",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::True => "TRUE",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Error => "ERROR",
        }
    }

    /// Source spelling of an operator kind, as used in AST renderings.
    ///
    /// Returns `None` for kinds that are not operators.
    pub fn symbol(self) -> Option<&'static str> {
        let sym = match self {
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Bang => "!",
            TokenKind::BangEqual => "!=",
            TokenKind::EqualEqual => "==",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            _ => return None,
        };
        Some(sym)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text the token was scanned from.
    pub lexeme: String,
    /// Normalised value for strings and numbers, the message for errors.
    pub literal: Option<String>,
    /// 1-based source line.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
        }
    }

    pub fn with_literal(mut self, literal: impl Into<String>) -> Self {
        self.literal = Some(literal.into());
        self
    }

    /// The end-of-input marker: empty lexeme, no literal.
    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "", line)
    }

    /// A lexical diagnostic.  The message travels as the literal.
    pub fn error(message: impl Into<String>, line: usize) -> Self {
        Self::new(TokenKind::Error, "", line).with_literal(message)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }

    /// Diagnostic message of an `ERROR` token.
    pub fn error_message(&self) -> Option<&str> {
        if self.is_error() {
            self.literal.as_deref()
        } else {
            None
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.kind,
            self.lexeme,
            self.literal.as_deref().unwrap_or("null")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_literal() {
        let token = Token::new(TokenKind::LeftParen, "(", 1);
        assert_eq!(token.to_string(), "LEFT_PAREN ( null");
    }

    #[test]
    fn test_render_eof() {
        assert_eq!(Token::eof(3).to_string(), "EOF  null");
    }

    #[test]
    fn test_render_with_literal() {
        let token = Token::new(TokenKind::String, "\"hi\"", 1).with_literal("hi");
        assert_eq!(token.to_string(), "STRING \"hi\" hi");
    }

    #[test]
    fn test_error_message_only_on_error_tokens() {
        let err = Token::error("[line 2] Error: Unexpected character: $", 2);
        assert_eq!(
            err.error_message(),
            Some("[line 2] Error: Unexpected character: $")
        );

        let num = Token::new(TokenKind::Number, "1", 1).with_literal("1.0");
        assert_eq!(num.error_message(), None);
    }

    #[test]
    fn test_operator_symbols() {
        assert_eq!(TokenKind::GreaterEqual.symbol(), Some(">="));
        assert_eq!(TokenKind::Bang.symbol(), Some("!"));
        assert_eq!(TokenKind::LeftParen.symbol(), None);
    }
}
