use thiserror::Error;
use crate::interpreter::ast::{Expr, Stmt};
use crate::interpreter::lexer::{Token, TokenPos, TokenType};
use crate::interpreter::value::Value;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParserError {
    #[error("{} Error at {token}: {message}", .token.pos())]
    ExpectedToken { token: Token, message: String },
    #[error("{} Error at {token}: Expected expression", .token.pos())]
    ExpectedExpression { token: Token },
    #[error("{} Error at {token}: Invalid assignment target", .token.pos())]
    InvalidAssignmentTarget { token: Token },
}

impl ParserError {
    pub fn pos(&self) -> TokenPos {
        match self {
            ParserError::ExpectedToken { token, .. } => token.pos(),
            ParserError::ExpectedExpression { token } => token.pos(),
            ParserError::InvalidAssignmentTarget { token } => token.pos(),
        }
    }
}

type ParserResult<T> = Result<T, ParserError>;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,

    errors: Vec<ParserError>,
}

impl Parser {
    /// The token sequence must end with an `Eof` token, as produced by
    /// `Lexer::scan_all`.
    pub fn new(tokens: Vec<Token>) -> Parser {
        debug_assert!(matches!(tokens.last().map(Token::token_type), Some(TokenType::Eof)));

        Parser {
            tokens,
            current: 0,
            errors: Vec::new(),
        }
    }

    // Declaration parsing

    /// Parses the whole program. A declaration that fails to parse
    /// records an error and contributes no statement; parsing resumes at
    /// the next statement boundary.
    pub fn parse(mut self) -> (Vec<Stmt>, Vec<ParserError>) {
        let mut statements = Vec::new();

        while !self.is_eof() {
            match self.parse_declaration() {
                Stmt::Error => {},
                stmt => statements.push(stmt),
            }
        }

        (statements, self.errors)
    }

    fn parse_declaration(&mut self) -> Stmt {
        let result = if self.matches(TokenType::Var) {
            self.parse_var_declaration()
        } else {
            self.parse_statement()
        };

        match result {
            Ok(stmt) => stmt,
            Err(err) => {
                self.errors.push(err);
                self.synchronize();
                Stmt::Error
            },
        }
    }

    fn parse_var_declaration(&mut self) -> ParserResult<Stmt> {
        self.expect(TokenType::Identifier, "Expected variable name after 'var'")?;
        let name = self.previous().clone();

        let initializer = if self.matches(TokenType::Equal) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect(TokenType::Semicolon, "Expected ';' after variable declaration")?;
        Ok(Stmt::Var { name, initializer })
    }

    fn parse_statement(&mut self) -> ParserResult<Stmt> {
        if self.matches(TokenType::Print) {
            return self.parse_print_statement();
        }

        self.parse_expression_statement()
    }

    fn parse_print_statement(&mut self) -> ParserResult<Stmt> {
        let value = self.parse_expression()?;
        self.expect(TokenType::Semicolon, "Expected ';' after value")?;
        Ok(Stmt::Print(value))
    }

    fn parse_expression_statement(&mut self) -> ParserResult<Stmt> {
        let expr = self.parse_expression()?;
        self.expect(TokenType::Semicolon, "Expected ';' after expression")?;
        Ok(Stmt::Expression(expr))
    }

    // Expression parsing

    fn parse_expression(&mut self) -> ParserResult<Expr> {
        self.parse_comma()
    }

    // The comma operator sequences assignments left-associatively and
    // binds looser than assignment, so it never appears on an
    // assignment's right-hand side
    fn parse_comma(&mut self) -> ParserResult<Expr> {
        let mut expr = self.parse_assignment()?;

        while self.matches(TokenType::Comma) {
            let operator = self.previous().clone();
            let right = self.parse_assignment()?;

            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }

        Ok(expr)
    }

    fn parse_assignment(&mut self) -> ParserResult<Expr> {
        let expr = self.parse_or()?;

        if self.matches(TokenType::Equal) {
            let equals = self.previous().clone();
            let value = self.parse_assignment()?;

            if let Expr::Variable(name) = expr {
                return Ok(Expr::Assign { name, value: Box::new(value) });
            }

            // Recorded, but not a panic: the surrounding statement keeps
            // parsing from the already-consumed right-hand side
            self.errors.push(ParserError::InvalidAssignmentTarget { token: equals });
        }

        Ok(expr)
    }

    fn parse_or(&mut self) -> ParserResult<Expr> {
        let mut expr = self.parse_and()?;

        while self.matches(TokenType::Or) {
            let operator = self.previous().clone();
            let right = self.parse_and()?;

            expr = Expr::Logical { left: Box::new(expr), operator, right: Box::new(right) };
        }

        Ok(expr)
    }

    fn parse_and(&mut self) -> ParserResult<Expr> {
        let mut expr = self.parse_equality()?;

        while self.matches(TokenType::And) {
            let operator = self.previous().clone();
            let right = self.parse_equality()?;

            expr = Expr::Logical { left: Box::new(expr), operator, right: Box::new(right) };
        }

        Ok(expr)
    }

    fn parse_equality(&mut self) -> ParserResult<Expr> {
        let mut expr = self.parse_comparison()?;

        while self.matches_any(&[TokenType::EqualEqual, TokenType::BangEqual]) {
            let operator = self.previous().clone();
            let right = self.parse_comparison()?;

            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }

        Ok(expr)
    }

    fn parse_comparison(&mut self) -> ParserResult<Expr> {
        let mut expr = self.parse_term()?;

        while self.matches_any(&[TokenType::Less, TokenType::LessEqual, TokenType::Greater, TokenType::GreaterEqual]) {
            let operator = self.previous().clone();
            let right = self.parse_term()?;

            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }

        Ok(expr)
    }

    fn parse_term(&mut self) -> ParserResult<Expr> {
        let mut expr = self.parse_factor()?;

        while self.matches_any(&[TokenType::Plus, TokenType::Minus]) {
            let operator = self.previous().clone();
            let right = self.parse_factor()?;

            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }

        Ok(expr)
    }

    fn parse_factor(&mut self) -> ParserResult<Expr> {
        let mut expr = self.parse_unary()?;

        while self.matches_any(&[TokenType::Star, TokenType::Slash]) {
            let operator = self.previous().clone();
            let right = self.parse_unary()?;

            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }

        Ok(expr)
    }

    fn parse_unary(&mut self) -> ParserResult<Expr> {
        if self.matches_any(&[TokenType::Bang, TokenType::Minus]) {
            let operator = self.previous().clone();
            let right = self.parse_unary()?;

            return Ok(Expr::Unary { operator, right: Box::new(right) });
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> ParserResult<Expr> {
        if self.matches(TokenType::False) {
            return Ok(Expr::Literal(Value::Bool(false)));
        } else if self.matches(TokenType::True) {
            return Ok(Expr::Literal(Value::Bool(true)));
        } else if self.matches(TokenType::Nil) {
            return Ok(Expr::Literal(Value::Nil));
        } else if self.matches_any(&[TokenType::Number, TokenType::String]) {
            let value = self.previous().literal().cloned().unwrap_or(Value::Nil);
            return Ok(Expr::Literal(value));
        } else if self.matches(TokenType::Identifier) {
            return Ok(Expr::Variable(self.previous().clone()));
        } else if self.matches(TokenType::LeftParen) {
            let expr = self.parse_expression()?;
            self.expect(TokenType::RightParen, "Expected ')' after expression")?;

            return Ok(Expr::Grouping(Box::new(expr)));
        }

        Err(ParserError::ExpectedExpression { token: self.peek().clone() })
    }

    // Token handling

    fn expect(&mut self, token_type: TokenType, message: &str) -> ParserResult<()> {
        if self.check(token_type) {
            self.advance();
            return Ok(());
        }

        Err(ParserError::ExpectedToken {
            token: self.peek().clone(),
            message: message.to_owned(),
        })
    }

    fn matches(&mut self, token_type: TokenType) -> bool { // Should be called "match", but that's a keyword
        if !self.check(token_type) {
            return false;
        }

        self.advance();
        true
    }

    fn matches_any(&mut self, token_types: &[TokenType]) -> bool {
        for token_type in token_types {
            if self.check(*token_type) {
                self.advance();
                return true;
            }
        }

        false
    }

    fn check(&self, token_type: TokenType) -> bool {
        !self.is_eof() && self.peek().token_type() == token_type
    }

    fn advance(&mut self) {
        if !self.is_eof() {
            self.current += 1;
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_eof(&self) -> bool {
        self.peek().token_type() == TokenType::Eof
    }

    // Error recovery

    /// Discards tokens until just past a ';' or right before a keyword
    /// that starts a statement, so one malformed declaration doesn't
    /// take the rest of the program with it.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_eof() {
            if self.previous().token_type() == TokenType::Semicolon {
                return;
            }

            match self.peek().token_type() {
                TokenType::Class
                | TokenType::Fun
                | TokenType::Var
                | TokenType::For
                | TokenType::If
                | TokenType::While
                | TokenType::Print
                | TokenType::Return => return,
                _ => {},
            }

            self.advance();
        }
    }
}
