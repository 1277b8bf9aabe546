//! Library surface of the front end
//!
//! - [`tokenize`]: source bytes → every token, plus the lexical diagnostics
//! - [`parse`]: any token sequence → every top-level expression
//! - [`run`]: source bytes → expressions, scheduled per [`PipelineConfig`]
//! - [`stream_tokens`]: the lexer on its own thread, as a token iterator
//!
//! # Scheduling
//!
//! Both schedules observe tokens in lexer order and produce identical output.
//! [`Schedule::Eager`] buffers the full token list first;
//! [`Schedule::Streamed`] lets the parser start on the first token while the
//! lexer is still scanning, with the channel bound providing backpressure.

pub mod channel;
pub mod config;

pub use channel::{stream_tokens, TokenChannel};
pub use config::{PipelineConfig, Schedule, DEFAULT_CHANNEL_CAPACITY};

use crate::diagnostics::Diagnostics;
use crate::parser::ast::Expr;
use crate::parser::lexer::Lexer;
use crate::parser::parse::Parser;
use crate::parser::token::Token;
use log::info;
use std::io;

/// Output of [`tokenize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    /// Every token in source order, `ERROR` tokens included, `EOF` last
    pub tokens: Vec<Token>,
}

impl Tokenized {
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::from_tokens(&self.tokens)
    }

    pub fn had_error(&self) -> bool {
        self.tokens.iter().any(Token::is_error)
    }
}

/// Output of [`parse`] and [`run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// One node per top-level expression, error nodes included
    pub exprs: Vec<Expr>,
}

impl Parsed {
    /// Every error node, in order, classified by where it was rejected.
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::from_exprs(&self.exprs)
    }

    pub fn had_error(&self) -> bool {
        self.exprs.iter().any(Expr::is_error)
    }
}

/// Lex `source` completely.
pub fn tokenize(source: &[u8]) -> Tokenized {
    let tokens = Lexer::new(source).tokenize();
    info!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
    Tokenized { tokens }
}

/// Parse every top-level expression in `tokens`.
///
/// Every `ERROR` token ends up as an error node of lexical origin.
pub fn parse<T: IntoIterator<Item = Token>>(tokens: T) -> Parsed {
    Parsed {
        exprs: Parser::new(tokens).parse_all(),
    }
}

/// Lex and parse `source` under the configured schedule.
///
/// Fails only if the streamed schedule cannot spawn its lexer thread.
pub fn run(source: Vec<u8>, config: &PipelineConfig) -> io::Result<Parsed> {
    info!("running pipeline with {:?}", config);

    match config.schedule {
        Schedule::Eager => Ok(parse(tokenize(&source).tokens)),
        Schedule::Streamed => {
            let channel = stream_tokens(source, config.channel_capacity)?;
            Ok(parse(channel))
        }
    }
}
