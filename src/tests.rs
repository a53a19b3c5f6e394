use pretty_assertions::assert_eq;
use super::*;

fn run_to_string(source: &str) -> Result<String, Vec<Diagnostic>> {
    let mut evaluator = Evaluator::new(Vec::new());
    run_source(source, false, &mut evaluator)?;

    Ok(String::from_utf8(evaluator.into_inner()).unwrap())
}

#[test]
fn well_formed_program_produces_output() {
    assert_eq!(Ok(String::from("3\nfoobar\n")),
        run_to_string("var a = 1; var b = 2; print a + b; print \"foo\" + \"bar\";"));
}

#[test]
fn static_errors_are_aggregated_and_nothing_runs() {
    // One lexical error (stray '@') and one syntax error (missing ';')
    let result = run_to_string("@ print 1");

    match result {
        Err(diagnostics) => {
            assert_eq!(2, diagnostics.len());
            assert!(matches!(diagnostics[0], Diagnostic::Lexical(_)));
            assert!(matches!(diagnostics[1], Diagnostic::Syntax(_)));
        },
        Ok(output) => panic!("expected diagnostics, got output {:?}", output),
    }
}

#[test]
fn runtime_errors_carry_their_kind() {
    let result = run_to_string("print nothing;");

    match result {
        Err(diagnostics) => {
            assert_eq!(1, diagnostics.len());
            assert!(diagnostics[0].is_runtime());
            assert!(diagnostics[0].pos().is_some());
        },
        Ok(output) => panic!("expected diagnostics, got output {:?}", output),
    }
}

#[test]
fn repl_style_reuse_keeps_the_environment() {
    let mut evaluator = Evaluator::new(Vec::new());

    assert_eq!(Ok(()), run_source("var a = 40;", false, &mut evaluator));
    assert_eq!(Ok(()), run_source("print a + 2;", false, &mut evaluator));

    assert_eq!("42\n", String::from_utf8(evaluator.into_inner()).unwrap());
}
