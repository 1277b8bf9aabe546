//! Lexer (tokenizer) for Lox source bytes
//!
//! Converts raw bytes into a lazy [`Token`] stream consumed by the parser.
//! The lexer is an [`Iterator`]: every call to `next` scans forward just far
//! enough to produce one token, and the stream always finishes with exactly one
//! `EOF` token.
//!
//! Lexical problems never stop the scan.  An unexpected character or an
//! unterminated string becomes an `ERROR` token whose literal is the
//! diagnostic message, and scanning resumes right after it.

use super::token::{Token, TokenKind};
use log::{debug, trace};
use rustc_hash::FxHashMap;
use std::iter::FusedIterator;
use std::sync::OnceLock;

/// Reserved words and the token kinds they map to.
fn keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        [
            ("and", TokenKind::And),
            ("class", TokenKind::Class),
            ("else", TokenKind::Else),
            ("false", TokenKind::False),
            ("for", TokenKind::For),
            ("fun", TokenKind::Fun),
            ("if", TokenKind::If),
            ("nil", TokenKind::Nil),
            ("or", TokenKind::Or),
            ("print", TokenKind::Print),
            ("return", TokenKind::Return),
            ("super", TokenKind::Super),
            ("this", TokenKind::This),
            ("true", TokenKind::True),
            ("var", TokenKind::Var),
            ("while", TokenKind::While),
        ]
        .into_iter()
        .collect()
    })
}

/// Normalise a number lexeme so it always shows a fractional part.
///
/// `42` becomes `42.0`, `1.50` becomes `1.5` and `100.00` becomes `100.0`.
pub fn normalize_number(lexeme: &str) -> String {
    if !lexeme.contains('.') {
        return format!("{lexeme}.0");
    }

    let trimmed = lexeme.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

/// Lexer for Lox source code
pub struct Lexer {
    input: Vec<u8>,
    position: usize,
    line: usize,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer over the given source bytes.
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: input.into(),
            position: 0,
            line: 1,
            finished: false,
        }
    }

    /// Tokenize the remaining input eagerly.
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Scan one lexeme starting at the current position.
    ///
    /// Returns `None` when the lexeme produces no token (whitespace, newline,
    /// comment).
    fn scan_token(&mut self) -> Option<Token> {
        let start = self.position;
        let byte = self.advance()?;

        let token = match byte {
            // Whitespace
            b' ' | b'\t' | b'\r' => return None,
            b'\n' => {
                self.line += 1;
                return None;
            }

            // Punctuation
            b'(' => self.make(TokenKind::LeftParen, start),
            b')' => self.make(TokenKind::RightParen, start),
            b'{' => self.make(TokenKind::LeftBrace, start),
            b'}' => self.make(TokenKind::RightBrace, start),
            b',' => self.make(TokenKind::Comma, start),
            b';' => self.make(TokenKind::Semicolon, start),
            b'+' => self.make(TokenKind::Plus, start),
            b'-' => self.make(TokenKind::Minus, start),
            b'*' => self.make(TokenKind::Star, start),
            b'.' => self.make(TokenKind::Dot, start),

            // One or two character operators
            b'!' => {
                let kind = if self.match_byte(b'=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                };
                self.make(kind, start)
            }
            b'=' => {
                let kind = if self.match_byte(b'=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                };
                self.make(kind, start)
            }
            b'<' => {
                let kind = if self.match_byte(b'=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                self.make(kind, start)
            }
            b'>' => {
                let kind = if self.match_byte(b'=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.make(kind, start)
            }
            b'/' => {
                if self.peek() == Some(b'/') {
                    self.skip_line_comment();
                    return None;
                }
                self.make(TokenKind::Slash, start)
            }

            // Literals
            b'"' => self.string_literal(start),
            b'0'..=b'9' => self.number_literal(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier_or_keyword(start),

            _ => self.unexpected_character(start),
        };

        trace!("line {}: {}", token.line, token);
        Some(token)
    }

    /// Parse string literal.  The opening quote is already consumed.
    fn string_literal(&mut self, start: usize) -> Token {
        let line = self.line;

        while let Some(byte) = self.peek() {
            match byte {
                b'"' => {
                    self.advance(); // consume closing quote
                    let contents = self.text(start + 1, self.position - 1);
                    return Token::new(TokenKind::String, self.text(start, self.position), line)
                        .with_literal(contents);
                }
                // Strings may not span lines; the newline is left for the
                // main loop so the line counter still advances.
                b'\n' => break,
                _ => {
                    self.advance();
                }
            }
        }

        debug!("unterminated string starting on line {}", line);
        Token::error(format!("[line {line}] Error: Unterminated string."), line)
    }

    /// Parse numeric literal: digits with an optional fractional part.
    fn number_literal(&mut self, start: usize) -> Token {
        self.skip_digits();

        // A dot belongs to the number only when a digit follows it
        if self.peek() == Some(b'.') && matches!(self.peek_ahead(1), Some(b'0'..=b'9')) {
            self.advance(); // consume '.'
            self.skip_digits();
        }

        let lexeme = self.text(start, self.position);
        let literal = normalize_number(&lexeme);
        Token::new(TokenKind::Number, lexeme, self.line).with_literal(literal)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, start: usize) -> Token {
        while let Some(byte) = self.peek() {
            if byte.is_ascii_alphanumeric() || byte == b'_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = self.text(start, self.position);
        let kind = keywords()
            .get(text.as_str())
            .copied()
            .unwrap_or(TokenKind::Identifier);
        Token::new(kind, text, self.line)
    }

    /// Report the character at `start` and move past it.
    ///
    /// A multi-byte UTF-8 character is reported once as a whole.
    fn unexpected_character(&mut self, start: usize) -> Token {
        let lead = self.input[start];
        let width = match lead {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        let end = (start + width).min(self.input.len());

        let ch = match std::str::from_utf8(&self.input[start..end]) {
            Ok(s) => {
                self.position = end;
                s.to_string()
            }
            Err(_) => char::REPLACEMENT_CHARACTER.to_string(),
        };

        debug!("unexpected character {:?} on line {}", ch, self.line);
        Token::error(
            format!("[line {}] Error: Unexpected character: {}", self.line, ch),
            self.line,
        )
    }

    /// Skip single-line comment (// ...), stopping before the newline
    fn skip_line_comment(&mut self) {
        while let Some(byte) = self.peek() {
            if byte == b'\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.advance();
        }
    }

    fn make(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, self.text(start, self.position), self.line)
    }

    fn text(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.input[start..end]).into_owned()
    }

    /// Consume the next byte if it equals `expected`
    fn match_byte(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Peek at current byte without consuming
    fn peek(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n bytes
    fn peek_ahead(&self, n: usize) -> Option<u8> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next byte
    fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.position += 1;
        Some(byte)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        while !self.is_at_end() {
            if let Some(token) = self.scan_token() {
                return Some(token);
            }
        }

        self.finished = true;
        trace!("line {}: end of input", self.line);
        Some(Token::eof(self.line))
    }
}

impl FusedIterator for Lexer {}
