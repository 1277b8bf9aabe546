//! One-token lookahead over any token source
//!
//! The parser never indexes into a token buffer.  It reads through a
//! [`TokenStream`], which pulls from the underlying iterator only when the
//! next token is actually needed.  That keeps the parser agnostic of whether
//! tokens come from a `Vec` or from a lexer running on another thread.

use super::token::{Token, TokenKind};
use log::warn;

pub struct TokenStream<I: Iterator<Item = Token>> {
    source: I,
    current: Option<Token>,
    last_line: usize,
}

impl<I: Iterator<Item = Token>> TokenStream<I> {
    pub fn new(source: I) -> Self {
        Self {
            source,
            current: None,
            last_line: 1,
        }
    }

    /// Next unconsumed token, without advancing.
    ///
    /// Once `EOF` is reached every call returns that same token.
    pub fn peek(&mut self) -> &Token {
        let token = self.take_next();
        self.current.insert(token)
    }

    /// Next unconsumed token, advancing past it.
    ///
    /// Consuming at `EOF` hands back another `EOF` and stays put.
    pub fn consume(&mut self) -> Token {
        let token = self.take_next();
        if token.is_eof() {
            self.current = Some(token.clone());
        }
        token
    }

    pub fn check(&mut self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the next token if its kind is one of `kinds`.
    pub fn match_kind(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.contains(&self.peek().kind) {
            Some(self.consume())
        } else {
            None
        }
    }

    pub fn is_at_end(&mut self) -> bool {
        self.check(TokenKind::Eof)
    }

    fn take_next(&mut self) -> Token {
        match self.current.take() {
            Some(token) => token,
            None => self.pull(),
        }
    }

    fn pull(&mut self) -> Token {
        match self.source.next() {
            Some(token) => {
                self.last_line = token.line;
                token
            }
            None => {
                warn!("token source ended without EOF; synthesising one");
                Token::eof(self.last_line)
            }
        }
    }
}
