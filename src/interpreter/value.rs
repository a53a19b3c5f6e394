use std::fmt::{Display, Formatter};

/// A runtime value. Equality is structural within a type; `Nil` only
/// equals `Nil`, and there is no coercion between types.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
    Bool(bool),
    Nil,
}

impl Value {
    /// `nil` and `false` are falsy; every other value is truthy,
    /// including `0` and the empty string.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(value) => *value,
            _ => true,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            // f64's Display already drops the fractional part of
            // integral values: 3.0 renders as "3", 3.5 as "3.5"
            Value::Number(value) => write!(f, "{}", value),
            Value::String(value) => f.write_str(value),
            Value::Bool(value) => write!(f, "{}", value),
            Value::Nil => f.write_str("nil"),
        }
    }
}
