use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use crate::interpreter::evaluator::RuntimeError;
use crate::interpreter::lexer::Token;
use crate::interpreter::value::Value;

/// One lexical scope frame: a name→value table chained to its enclosing
/// frame. The parent reference is weak; the evaluator owns the frames
/// and an enclosing frame always outlives its children.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    parent: Option<Weak<RefCell<Environment>>>,
}

impl Environment {
    pub fn new_global() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            parent: None,
        }))
    }

    pub fn new_with_parent(parent: &Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            parent: Some(Rc::downgrade(parent)),
        }))
    }

    /// Creates or overwrites the binding in this frame. Never fails, and
    /// never touches enclosing frames.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_owned(), value);
    }

    /// Looks the name up in this frame, then outward along the parent
    /// chain.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(name.lexeme()) {
            return Ok(value.clone());
        }

        match self.parent.as_ref().and_then(Weak::upgrade) {
            Some(parent) => parent.borrow().get(name),
            None => Err(RuntimeError::UndefinedVariable { name: name.clone() }),
        }
    }

    /// Mutates the innermost existing binding for the name. Unlike
    /// `define`, an unbound name is an error and nothing is mutated.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if let Some(binding) = self.values.get_mut(name.lexeme()) {
            *binding = value;
            return Ok(());
        }

        match self.parent.as_ref().and_then(Weak::upgrade) {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(RuntimeError::UndefinedVariable { name: name.clone() }),
        }
    }
}

#[cfg(test)]
mod tests;
