//! Expression parsing implementation
//!
//! One method per grammar level, from loosest to tightest binding:
//!
//! ```text
//! expression → equality
//! equality   → comparison ( ( "!=" | "==" ) comparison )*
//! comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )*
//! term       → factor ( ( "-" | "+" ) factor )*
//! factor     → unary ( ( "/" | "*" ) unary )*
//! unary      → ( "!" | "-" ) unary | primary
//! primary    → NUMBER | STRING | IDENTIFIER | "true" | "false" | "nil"
//!            | "(" expression ")"
//! ```
//!
//! Binary levels fold iteratively into left-leaning trees, so every binary
//! operator is left-associative.  `unary` recurses on itself for stacked
//! prefixes.  Groups and prefixes together nest at most
//! [`MAX_NESTING_DEPTH`](crate::parser::parse::MAX_NESTING_DEPTH) levels;
//! one level more fails the expression with `Too much nesting.`
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::Expr;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::{Token, TokenKind};

const EQUALITY_OPS: &[TokenKind] = &[TokenKind::BangEqual, TokenKind::EqualEqual];
const COMPARISON_OPS: &[TokenKind] = &[
    TokenKind::Greater,
    TokenKind::GreaterEqual,
    TokenKind::Less,
    TokenKind::LessEqual,
];
const TERM_OPS: &[TokenKind] = &[TokenKind::Minus, TokenKind::Plus];
const FACTOR_OPS: &[TokenKind] = &[TokenKind::Slash, TokenKind::Star];
const UNARY_OPS: &[TokenKind] = &[TokenKind::Bang, TokenKind::Minus];

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_equality()
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;

        while let Some(op) = self.match_token(EQUALITY_OPS) {
            let right = self.parse_comparison()?;
            left = Expr::binary(op.kind, left, right);
        }

        Ok(left)
    }

    /// Parse comparison (> >= < <=)
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;

        while let Some(op) = self.match_token(COMPARISON_OPS) {
            let right = self.parse_term()?;
            left = Expr::binary(op.kind, left, right);
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;

        while let Some(op) = self.match_token(TERM_OPS) {
            let right = self.parse_factor()?;
            left = Expr::binary(op.kind, left, right);
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = self.match_token(FACTOR_OPS) {
            let right = self.parse_unary()?;
            left = Expr::binary(op.kind, left, right);
        }

        Ok(left)
    }

    /// Parse unary (! -)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = self.match_token(UNARY_OPS) {
            self.enter_nested(&op)?;
            let operand = self.parse_unary()?;
            self.leave_nested();
            return Ok(Expr::unary(op.kind, operand));
        }

        self.parse_primary()
    }

    /// Parse primary (literals, identifiers, parenthesized expressions)
    ///
    /// Always consumes exactly one token before deciding, so a failing
    /// top-level expression still moves the stream forward.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.advance();

        match token.kind {
            TokenKind::Number | TokenKind::String => {
                Ok(Expr::literal(token.literal.unwrap_or_default()))
            }
            TokenKind::Identifier | TokenKind::True | TokenKind::False | TokenKind::Nil => {
                Ok(Expr::literal(token.lexeme))
            }
            TokenKind::LeftParen => self.parse_group(&token),
            TokenKind::Error => Err(ParseError::lexical(&token)),
            _ => Err(ParseError::at(&token, "Expect expression.")),
        }
    }

    /// Parse the rest of a group; `open` is the already consumed `(`
    fn parse_group(&mut self, open: &Token) -> Result<Expr, ParseError> {
        self.enter_nested(open)?;
        let inner = self.parse_expression()?;
        self.expect_token(TokenKind::RightParen, "Expect ')' after expression.")?;
        self.leave_nested();
        Ok(Expr::grouping(inner))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::Expr;
    use crate::parser::lexer::Lexer;
    use crate::parser::parse::{Parser, MAX_NESTING_DEPTH};

    fn render(source: &str) -> Vec<String> {
        Parser::new(Lexer::new(source.as_bytes()))
            .map(|expr| expr.to_string())
            .collect()
    }

    fn render_one(source: &str) -> String {
        let rendered = render(source);
        assert_eq!(rendered.len(), 1, "expected one expression in {source:?}: {rendered:?}");
        rendered.into_iter().next().unwrap_or_default()
    }

    #[test]
    fn test_literals() {
        assert_eq!(render_one("true"), "true");
        assert_eq!(render_one("false"), "false");
        assert_eq!(render_one("nil"), "nil");
        assert_eq!(render_one("42.47"), "42.47");
        assert_eq!(render_one("\"hello world\""), "hello world");
        assert_eq!(render_one("foo"), "foo");
    }

    #[test]
    fn test_precedence() {
        assert_eq!(render_one("1 + 2 * 3"), "(+ 1.0 (* 2.0 3.0))");
        assert_eq!(render_one("1 * 2 + 3"), "(+ (* 1.0 2.0) 3.0)");
        assert_eq!(render_one("1 < 2 == 3 > 4"), "(== (< 1.0 2.0) (> 3.0 4.0))");
        assert_eq!(render_one("-1 - -2"), "(- (- 1.0) (- 2.0))");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(render_one("1 - 2 - 3"), "(- (- 1.0 2.0) 3.0)");
        assert_eq!(render_one("8 / 4 / 2"), "(/ (/ 8.0 4.0) 2.0)");
        assert_eq!(render_one("1 == 2 != 3"), "(!= (== 1.0 2.0) 3.0)");
        assert_eq!(render_one("1 <= 2 >= 3"), "(>= (<= 1.0 2.0) 3.0)");
    }

    #[test]
    fn test_unary_is_right_recursive() {
        assert_eq!(render_one("!!true"), "(! (! true))");
        assert_eq!(render_one("-!-x"), "(- (! (- x)))");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(render_one("(\"foo\")"), "(group foo)");
        assert_eq!(render_one("((true))"), "(group (group true))");
        assert_eq!(render_one("(1 + 2) * 3"), "(* (group (+ 1.0 2.0)) 3.0)");
        assert_eq!(
            render_one("(85 - 11) >= -(93 / 33 + 60)"),
            "(>= (group (- 85.0 11.0)) (- (group (+ (/ 93.0 33.0) 60.0))))"
        );
    }

    #[test]
    fn test_missing_close_paren() {
        let rendered = render("(1 + 2");
        assert_eq!(
            rendered,
            vec!["[line 1] Error at end: Expect ')' after expression."]
        );
    }

    #[test]
    fn test_wrong_token_instead_of_close_paren() {
        // The offending token is left in place and starts the next expression.
        let rendered = render("(1 2)");
        assert_eq!(
            rendered,
            vec![
                "[line 1] Error at '2': Expect ')' after expression.".to_string(),
                "2.0".to_string(),
                "[line 1] Error at ')': Expect expression.".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_group() {
        assert_eq!(render("()"), vec!["[line 1] Error at ')': Expect expression."]);
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(render("1 +"), vec!["[line 1] Error at end: Expect expression."]);
        assert_eq!(
            render("\n\n(72 +)"),
            vec!["[line 3] Error at ')': Expect expression."]
        );
    }

    #[test]
    fn test_non_expression_token() {
        assert_eq!(render("var"), vec!["[line 1] Error at 'var': Expect expression."]);
        assert_eq!(render(";"), vec!["[line 1] Error at ';': Expect expression."]);
    }

    #[test]
    fn test_lexical_error_becomes_error_node() {
        let rendered = render("1 + @");
        assert_eq!(rendered, vec!["[line 1] Error: Unexpected character: @"]);
    }

    #[test]
    fn test_error_node_is_terminal() {
        let mut parser = Parser::new(Lexer::new(b"(1 + 2"));
        match parser.next() {
            Some(Expr::Error { message, .. }) => assert!(message.contains("Expect ')'")),
            other => panic!("Expected error node, got {:?}", other),
        }
        assert_eq!(parser.next(), None);
    }

    #[test]
    fn test_nesting_up_to_limit() {
        let source = format!(
            "{}1{}",
            "(".repeat(MAX_NESTING_DEPTH),
            ")".repeat(MAX_NESTING_DEPTH)
        );
        let rendered = render_one(&source);
        assert!(rendered.starts_with("(group (group"));
        assert!(rendered.contains("1.0"));

        let rendered = render_one(&format!("{}1", "!".repeat(MAX_NESTING_DEPTH)));
        assert!(rendered.starts_with("(! (!"));
    }

    #[test]
    fn test_nesting_past_limit_is_an_error() {
        let rendered = render(&format!("{}1", "-".repeat(MAX_NESTING_DEPTH + 1)));
        assert_eq!(
            rendered,
            vec![
                "[line 1] Error at '-': Too much nesting.".to_string(),
                "1.0".to_string(),
            ]
        );
    }

    #[test]
    fn test_prefixes_and_groups_share_the_limit() {
        let half = MAX_NESTING_DEPTH / 2;
        let ok = format!("{}1{}", "-(".repeat(half), ")".repeat(half));
        assert!(!render_one(&ok).starts_with("[line"));

        let rendered = render(&format!("{}1{}", "-(".repeat(half + 1), ")".repeat(half + 1)));
        assert_eq!(rendered[0], "[line 1] Error at '-': Too much nesting.");
    }

    #[test]
    fn test_missing_paren_before_lexical_error() {
        assert_eq!(
            render("(1 @"),
            vec![
                "[line 1] Error: Expect ')' after expression.",
                "[line 1] Error: Unexpected character: @",
            ]
        );
    }
}
