use pretty_assertions::assert_eq;
use super::*;
use crate::interpreter::lexer::{TokenPos, TokenType};

fn name(name: &str) -> Token {
    Token::new(TokenType::Identifier, name.to_owned(), None, TokenPos::begin())
}

#[test]
fn define_then_get() {
    let environment = Environment::new_global();
    environment.borrow_mut().define("a", Value::Number(1.0));

    assert_eq!(Ok(Value::Number(1.0)), environment.borrow().get(&name("a")));
}

#[test]
fn redefining_overwrites_within_the_same_frame() {
    let environment = Environment::new_global();
    environment.borrow_mut().define("a", Value::Number(1.0));
    environment.borrow_mut().define("a", Value::Bool(true));

    assert_eq!(Ok(Value::Bool(true)), environment.borrow().get(&name("a")));
}

#[test]
fn get_of_unbound_name_fails() {
    let environment = Environment::new_global();

    assert_eq!(Err(RuntimeError::UndefinedVariable { name: name("ghost") }),
        environment.borrow().get(&name("ghost")));
}

#[test]
fn get_walks_the_parent_chain() {
    let global = Environment::new_global();
    global.borrow_mut().define("a", Value::Number(1.0));

    let child = Environment::new_with_parent(&global);
    let grandchild = Environment::new_with_parent(&child);

    assert_eq!(Ok(Value::Number(1.0)), grandchild.borrow().get(&name("a")));
}

#[test]
fn shadowing_hides_the_outer_binding_without_mutating_it() {
    let global = Environment::new_global();
    global.borrow_mut().define("a", Value::Number(1.0));

    let child = Environment::new_with_parent(&global);
    child.borrow_mut().define("a", Value::Number(2.0));

    assert_eq!(Ok(Value::Number(2.0)), child.borrow().get(&name("a")));
    assert_eq!(Ok(Value::Number(1.0)), global.borrow().get(&name("a")));
}

#[test]
fn assign_mutates_the_innermost_existing_binding() {
    let global = Environment::new_global();
    global.borrow_mut().define("a", Value::Number(1.0));

    let child = Environment::new_with_parent(&global);
    assert_eq!(Ok(()), child.borrow_mut().assign(&name("a"), Value::Number(5.0)));

    assert_eq!(Ok(Value::Number(5.0)), global.borrow().get(&name("a")));
}

#[test]
fn assign_of_unbound_name_fails_and_mutates_nothing() {
    let global = Environment::new_global();
    global.borrow_mut().define("a", Value::Number(1.0));

    let child = Environment::new_with_parent(&global);

    assert_eq!(Err(RuntimeError::UndefinedVariable { name: name("b") }),
        child.borrow_mut().assign(&name("b"), Value::Number(9.0)));

    // The chain is untouched: "a" keeps its value, "b" stays unbound
    assert_eq!(Ok(Value::Number(1.0)), child.borrow().get(&name("a")));
    assert!(child.borrow().get(&name("b")).is_err());
    assert!(global.borrow().get(&name("b")).is_err());
}
