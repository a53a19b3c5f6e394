use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use thiserror::Error;
use crate::interpreter::ast::{Expr, Stmt};
use crate::interpreter::environment::Environment;
use crate::interpreter::lexer::{Token, TokenPos, TokenType};
use crate::interpreter::value::Value;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum RuntimeError {
    #[error("{} Operand must be a number", .operator.pos())]
    OperandMustBeNumber { operator: Token },
    #[error("{} Operands must be numbers", .operator.pos())]
    OperandsMustBeNumbers { operator: Token },
    #[error("{} Operands must be two numbers, two strings, or a number and a string", .operator.pos())]
    InvalidAddOperands { operator: Token },
    #[error("{} Division by zero", .operator.pos())]
    DivisionByZero { operator: Token },
    #[error("{} Unsupported operator {operator}", .operator.pos())]
    UnsupportedOperator { operator: Token },
    #[error("{} Undefined variable '{}'", .name.pos(), .name.lexeme())]
    UndefinedVariable { name: Token },
    #[error("Failed to write output: {message}")]
    Output { message: String },
}

impl RuntimeError {
    pub fn pos(&self) -> Option<TokenPos> {
        match self {
            RuntimeError::OperandMustBeNumber { operator } => Some(operator.pos()),
            RuntimeError::OperandsMustBeNumbers { operator } => Some(operator.pos()),
            RuntimeError::InvalidAddOperands { operator } => Some(operator.pos()),
            RuntimeError::DivisionByZero { operator } => Some(operator.pos()),
            RuntimeError::UnsupportedOperator { operator } => Some(operator.pos()),
            RuntimeError::UndefinedVariable { name } => Some(name.pos()),
            RuntimeError::Output { .. } => None,
        }
    }
}

type RuntimeResult<T> = Result<T, RuntimeError>;

/// Walks the statement sequence against a persistent root environment,
/// writing `print` output to the given sink.
pub struct Evaluator<W> {
    environment: Rc<RefCell<Environment>>,
    out: W,
}

impl<W: Write> Evaluator<W> {
    pub fn new(out: W) -> Evaluator<W> {
        Evaluator {
            environment: Environment::new_global(),
            out,
        }
    }

    /// Consumes the evaluator and hands back the output sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Runs the statements in order. The first runtime error aborts the
    /// remaining statements; the environment keeps whatever had been
    /// defined up to that point, so a REPL session can continue.
    pub fn execute(&mut self, statements: &[Stmt]) -> RuntimeResult<()> {
        for statement in statements {
            self.execute_statement(statement)?;
        }

        Ok(())
    }

    fn execute_statement(&mut self, statement: &Stmt) -> RuntimeResult<()> {
        match statement {
            Stmt::Expression(expr) => {
                let _ = self.evaluate(expr)?;
                Ok(())
            },
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;

                writeln!(self.out, "{}", value)
                    .map_err(|err| RuntimeError::Output { message: err.to_string() })
            },
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                self.environment.borrow_mut().define(name.lexeme(), value);
                Ok(())
            },

            // Filtered out by the parser; nothing to execute
            Stmt::Error => Ok(()),
        }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> RuntimeResult<Value> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Unary { operator, right } => {
                let right = self.evaluate(right)?;
                self.evaluate_unary(operator, right)
            },
            Expr::Binary { left, operator, right } => {
                // Left before right, observable through assignment
                // side effects
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                self.evaluate_binary(operator, left, right)
            },
            Expr::Logical { left, operator, right } => {
                let left = self.evaluate(left)?;

                let short_circuit = match operator.token_type() {
                    TokenType::Or => left.is_truthy(),
                    TokenType::And => !left.is_truthy(),
                    _ => return Err(RuntimeError::UnsupportedOperator { operator: operator.clone() }),
                };

                if short_circuit {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            },
            Expr::Variable(name) => self.environment.borrow().get(name),
            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.environment.borrow_mut().assign(name, value.clone())?;

                // Assignment is expression-valued
                Ok(value)
            },
        }
    }

    fn evaluate_unary(&self, operator: &Token, right: Value) -> RuntimeResult<Value> {
        match operator.token_type() {
            TokenType::Minus => match right {
                Value::Number(value) => Ok(Value::Number(-value)),
                _ => Err(RuntimeError::OperandMustBeNumber { operator: operator.clone() }),
            },
            TokenType::Bang => Ok(Value::Bool(!right.is_truthy())),
            _ => Err(RuntimeError::UnsupportedOperator { operator: operator.clone() }),
        }
    }

    fn evaluate_binary(&self, operator: &Token, left: Value, right: Value) -> RuntimeResult<Value> {
        match operator.token_type() {
            // The comma operator evaluates its left operand for side
            // effects only
            TokenType::Comma => Ok(right),

            TokenType::Plus => match (&left, &right) {
                (Value::Number(left), Value::Number(right)) => Ok(Value::Number(left + right)),
                (Value::String(_), _) | (_, Value::String(_)) =>
                    Ok(Value::String(format!("{}{}", left, right))),
                _ => Err(RuntimeError::InvalidAddOperands { operator: operator.clone() }),
            },
            TokenType::Minus => {
                let (left, right) = number_operands(operator, &left, &right)?;
                Ok(Value::Number(left - right))
            },
            TokenType::Star => {
                let (left, right) = number_operands(operator, &left, &right)?;
                Ok(Value::Number(left * right))
            },
            TokenType::Slash => {
                let (left, right) = number_operands(operator, &left, &right)?;

                // `right == 0.0` also matches -0.0
                if right == 0.0 {
                    Err(RuntimeError::DivisionByZero { operator: operator.clone() })
                } else {
                    Ok(Value::Number(left / right))
                }
            },

            TokenType::Greater => {
                let (left, right) = number_operands(operator, &left, &right)?;
                Ok(Value::Bool(left > right))
            },
            TokenType::GreaterEqual => {
                let (left, right) = number_operands(operator, &left, &right)?;
                Ok(Value::Bool(left >= right))
            },
            TokenType::Less => {
                let (left, right) = number_operands(operator, &left, &right)?;
                Ok(Value::Bool(left < right))
            },
            TokenType::LessEqual => {
                let (left, right) = number_operands(operator, &left, &right)?;
                Ok(Value::Bool(left <= right))
            },

            TokenType::EqualEqual => Ok(Value::Bool(left == right)),
            TokenType::BangEqual => Ok(Value::Bool(left != right)),

            _ => Err(RuntimeError::UnsupportedOperator { operator: operator.clone() }),
        }
    }
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> RuntimeResult<(f64, f64)> {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => Ok((*left, *right)),
        _ => Err(RuntimeError::OperandsMustBeNumbers { operator: operator.clone() }),
    }
}

#[cfg(test)]
mod tests;
