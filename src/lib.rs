//! # Introduction
//!
//! loxfront is the front end of a Lox implementation: a streaming lexer and
//! a recursive-descent parser for Lox expressions.  Errors are reported as
//! data, so every run yields output for the valid parts of the input together
//! with a diagnostic for each invalid part.
//!
//! ## Pipeline
//!
//! ```text
//! Source bytes → Lexer → Tokens → Lookahead → Parser → Expressions
//! ```
//!
//! 1. [`parser`]: tokens, the lexer, the lookahead adapter, the grammar and
//!    the AST with its canonical rendering.
//! 2. [`pipeline`]: the library entry points and the eager or threaded
//!    scheduling of lexer and parser.
//! 3. [`diagnostics`]: aggregation of every lexical and syntax error and the
//!    mapping to a process exit status.
//!
//! ## Example
//!
//! ```
//! use loxfront::pipeline::{parse, tokenize};
//!
//! let tokens = tokenize(b"1 + 2 * 3").tokens;
//! let parsed = parse(tokens);
//! assert_eq!(parsed.exprs[0].to_string(), "(+ 1.0 (* 2.0 3.0))");
//! ```

pub mod diagnostics;
pub mod parser;
pub mod pipeline;
