use crate::interpreter::ast::{Expr, Stmt};

/// Renders AST nodes as parenthesized prefix text, e.g.
/// `(+ 1 (* 2 3))`. Diagnostics only; not the display form `print`
/// uses.
#[derive(Default)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn new() -> AstPrinter {
        AstPrinter
    }

    pub fn print_statement(&self, statement: &Stmt) -> String {
        match statement {
            Stmt::Expression(expr) => self.print(expr),
            Stmt::Print(expr) => self.parenthesize("print", &[expr]),
            Stmt::Var { name, initializer } => match initializer {
                Some(expr) => format!("(var {} {})", name.lexeme(), self.print(expr)),
                None => format!("(var {})", name.lexeme()),
            },
            Stmt::Error => String::from("(error)"),
        }
    }

    pub fn print(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(value) => value.to_string(),
            Expr::Grouping(inner) => self.parenthesize("group", &[inner.as_ref()]),
            Expr::Unary { operator, right } =>
                self.parenthesize(operator.lexeme(), &[right.as_ref()]),
            Expr::Binary { left, operator, right }
            | Expr::Logical { left, operator, right } =>
                self.parenthesize(operator.lexeme(), &[left.as_ref(), right.as_ref()]),
            Expr::Variable(name) => name.lexeme().to_owned(),
            Expr::Assign { name, value } => format!("(= {} {})", name.lexeme(), self.print(value)),
        }
    }

    fn parenthesize(&self, name: &str, exprs: &[&Expr]) -> String {
        let mut result = String::from("(");
        result.push_str(name);

        for expr in exprs {
            result.push(' ');
            result.push_str(&self.print(expr));
        }

        result.push(')');
        result
    }
}
