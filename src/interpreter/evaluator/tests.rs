use pretty_assertions::assert_eq;
use super::*;
use crate::interpreter::lexer::Lexer;
use crate::interpreter::parser::Parser;

fn parse(source: &str) -> Vec<Stmt> {
    let (tokens, lexer_errors) = Lexer::new(source).scan_all();
    assert!(lexer_errors.is_empty(), "unexpected lexical errors: {:?}", lexer_errors);

    let (statements, parser_errors) = Parser::new(tokens).parse();
    assert!(parser_errors.is_empty(), "unexpected parse errors: {:?}", parser_errors);

    statements
}

fn run(source: &str) -> (String, Result<(), RuntimeError>) {
    let mut evaluator = Evaluator::new(Vec::new());
    let result = evaluator.execute(&parse(source));
    let output = String::from_utf8(evaluator.into_inner()).unwrap();

    (output, result)
}

fn output_of(source: &str) -> String {
    let (output, result) = run(source);
    assert_eq!(Ok(()), result);
    output
}

#[test]
fn arithmetic_over_variables() {
    assert_eq!("3\n", output_of("var a = 1; var b = 2; print a + b;"));
}

#[test]
fn string_concatenation() {
    assert_eq!("foobar\n", output_of("print \"foo\" + \"bar\";"));
}

#[test]
fn number_concatenates_with_string() {
    assert_eq!("n=5\n", output_of("print \"n=\" + 5;"));
    assert_eq!("5s\n", output_of("print 5 + \"s\";"));
}

#[test]
fn any_value_concatenates_with_string() {
    assert_eq!("truex\n", output_of("print true + \"x\";"));
    assert_eq!("nil!\n", output_of("print nil + \"!\";"));
}

#[test]
fn add_without_strings_requires_numbers() {
    let (output, result) = run("print true + 1;");

    assert_eq!("", output);
    assert!(matches!(result, Err(RuntimeError::InvalidAddOperands { .. })));
}

#[test]
fn reassignment_updates_the_binding() {
    assert_eq!("7\n", output_of("var x = 10; x = x - 3; print x;"));
}

#[test]
fn assignment_is_expression_valued() {
    assert_eq!("2\n2\n", output_of("var a = 0; print a = 2; print a;"));
}

#[test]
fn division_by_zero_fails_without_output() {
    let (output, result) = run("print 1 / 0;");

    assert_eq!("", output);
    assert!(matches!(result, Err(RuntimeError::DivisionByZero { .. })));
}

#[test]
fn division_by_zero_is_independent_of_numerator_sign() {
    let (_, result) = run("print -1 / 0;");
    assert!(matches!(result, Err(RuntimeError::DivisionByZero { .. })));

    // A negative zero divisor counts as zero too
    let (_, result) = run("print 1 / -0;");
    assert!(matches!(result, Err(RuntimeError::DivisionByZero { .. })));

    let (_, result) = run("print 0 / -0.0;");
    assert!(matches!(result, Err(RuntimeError::DivisionByZero { .. })));
}

#[test]
fn undefined_variable_read_fails() {
    let (output, result) = run("print y;");

    assert_eq!("", output);
    assert!(matches!(result,
        Err(RuntimeError::UndefinedVariable { name }) if name.lexeme() == "y"));
}

#[test]
fn undefined_variable_assignment_fails() {
    let (_, result) = run("y = 1;");

    assert!(matches!(result,
        Err(RuntimeError::UndefinedVariable { name }) if name.lexeme() == "y"));
}

#[test]
fn unary_minus_requires_a_number() {
    let (_, result) = run("print -\"x\";");
    assert!(matches!(result, Err(RuntimeError::OperandMustBeNumber { .. })));
}

#[test]
fn truthiness_of_bang() {
    assert_eq!("true\nfalse\nfalse\ntrue\n",
        output_of("print !nil; print !0; print !\"\"; print !false;"));
}

#[test]
fn comparisons_require_numbers() {
    assert_eq!("true\nfalse\n", output_of("print 1 < 2; print 2 <= 1;"));

    let (_, result) = run("print 1 < \"2\";");
    assert!(matches!(result, Err(RuntimeError::OperandsMustBeNumbers { .. })));
}

#[test]
fn equality_is_structural_and_never_coerces() {
    assert_eq!("true\ntrue\nfalse\nfalse\ntrue\n",
        output_of("print 1 == 1; print nil == nil; print 1 == \"1\"; print nil == false; print \"a\" != \"b\";"));
}

#[test]
fn and_short_circuits_on_falsy_left() {
    assert_eq!("1\n", output_of("var a = 1; false and (a = 2); print a;"));
}

#[test]
fn or_short_circuits_on_truthy_left() {
    assert_eq!("1\n", output_of("var a = 1; true or (a = 2); print a;"));
}

#[test]
fn logical_operators_yield_operand_values() {
    assert_eq!("x\nnil\n7\n", output_of("print nil or \"x\"; print nil and 2; print true and 7;"));
}

#[test]
fn comma_evaluates_left_for_side_effects_and_yields_right() {
    assert_eq!("3\n2\n", output_of("var a = 1; print (a = 2, a + 1); print a;"));
}

#[test]
fn integral_numbers_render_without_a_trailing_zero() {
    assert_eq!("3\n3.5\n-0\n", output_of("print 3.0; print 3.5; print -0.0;"));
}

#[test]
fn var_without_initializer_defaults_to_nil() {
    assert_eq!("nil\n", output_of("var a; print a;"));
}

#[test]
fn runtime_error_halts_remaining_statements() {
    let (output, result) = run("print 1; print y; print 2;");

    // Output before the failure is kept; nothing after it runs
    assert_eq!("1\n", output);
    assert!(matches!(result, Err(RuntimeError::UndefinedVariable { .. })));
}

#[test]
fn environment_persists_across_execute_calls() {
    let mut evaluator = Evaluator::new(Vec::new());

    assert_eq!(Ok(()), evaluator.execute(&parse("var a = 1;")));
    assert_eq!(Ok(()), evaluator.execute(&parse("print a + 1;")));

    assert_eq!("2\n", String::from_utf8(evaluator.into_inner()).unwrap());
}

#[test]
fn operands_evaluate_left_to_right() {
    assert_eq!("3\n", output_of("var a = 1; print (a = 2) + (a - 1) * (0 - -1);"));
}
