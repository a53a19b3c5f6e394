use crate::interpreter::lexer::Token;
use crate::interpreter::value::Value;

/// An expression node. Fully owned, acyclic; a parent exclusively owns
/// its children.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Value),
    Grouping(Box<Expr>),
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    /// Short-circuiting `and`/`or`; kept apart from `Binary` because its
    /// right operand must not be evaluated eagerly.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Variable(Token),
    Assign {
        name: Token,
        value: Box<Expr>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    Print(Expr),
    Var {
        name: Token,
        initializer: Option<Expr>,
    },

    /// Marker for a declaration that failed to parse. Never part of the
    /// statement sequence `Parser::parse` returns.
    Error,
}
