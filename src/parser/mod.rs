//! Lox expression front end
//!
//! This module transforms Lox source bytes into expression trees:
//! - [`token`]: Token kinds and the canonical token rendering
//! - [`lexer`]: Tokenization (source bytes → lazy token stream)
//! - [`stream`]: One-token lookahead over any token source
//! - [`parse`]: Parser struct, error type and top-level driver
//! - [`expressions`]: Grammar rules (tokens → AST)
//! - [`ast`]: AST node definitions and their rendering
//!
//! # Supported Grammar
//!
//! Expressions only: literals, identifiers, grouping, prefix `!`/`-`, and the
//! binary operators `* /`, `+ -`, `< <= > >=`, `== !=`.  Keywords are
//! recognised by the lexer but statements are not parsed.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with iterative folding for binary
//! operators.  No external parser generator dependencies.

pub mod ast;
pub mod expressions;
pub mod lexer;
pub mod parse;
pub mod stream;
pub mod token;
