pub mod util;
pub mod interpreter;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use clap::Parser as ClapParser;
use crate::interpreter::evaluator::Evaluator;
use crate::interpreter::lexer::Lexer;
use crate::interpreter::parser::Parser;
use crate::interpreter::printer::AstPrinter;
use crate::interpreter::Diagnostic;

#[derive(ClapParser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Config {
    #[clap(help = "Script file to run; starts a REPL when omitted")]
    pub input: Option<PathBuf>,

    #[clap(long, help = "Print the parsed syntax tree before running")]
    pub print_ast: bool,
}

// Exit codes follow the BSD sysexits convention: 65 for malformed
// input, 70 for a runtime failure, 74 for I/O errors
const EXIT_STATIC_ERROR: u8 = 65;
const EXIT_RUNTIME_ERROR: u8 = 70;
const EXIT_IO_ERROR: u8 = 74;

pub fn run(config: &Config) -> ExitCode {
    match &config.input {
        Some(path) => run_file(path, config.print_ast),
        None => run_repl(config.print_ast),
    }
}

pub fn run_file(path: &Path, print_ast: bool) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Failed to read \"{}\": {}", path.display(), err);
            return ExitCode::from(EXIT_IO_ERROR);
        },
    };

    let mut evaluator = Evaluator::new(std::io::stdout());

    match run_source(&source, print_ast, &mut evaluator) {
        Ok(()) => ExitCode::SUCCESS,
        Err(diagnostics) => {
            report(&diagnostics);

            if diagnostics.iter().any(Diagnostic::is_runtime) {
                ExitCode::from(EXIT_RUNTIME_ERROR)
            } else {
                ExitCode::from(EXIT_STATIC_ERROR)
            }
        },
    }
}

pub fn run_repl(print_ast: bool) -> ExitCode {
    let stdin = std::io::stdin();
    let mut evaluator = Evaluator::new(std::io::stdout());
    let mut line = String::new();

    loop {
        print!("> ");

        if std::io::stdout().flush().is_err() {
            return ExitCode::from(EXIT_IO_ERROR);
        }

        line.clear();

        match stdin.lock().read_line(&mut line) {
            Ok(0) => return ExitCode::SUCCESS,
            Ok(_) => {},
            Err(err) => {
                eprintln!("Failed to read input: {}", err);
                return ExitCode::from(EXIT_IO_ERROR);
            },
        }

        // Errors don't end the session, and the environment carries
        // over to the next line
        if let Err(diagnostics) = run_source(&line, print_ast, &mut evaluator) {
            report(&diagnostics);
        }
    }
}

/// Runs one source buffer through the whole pipeline. Scan and parse
/// errors are aggregated and reported together, and nothing is
/// evaluated in their presence; a runtime error halts evaluation at the
/// offending statement.
pub fn run_source<W: Write>(source: &str, print_ast: bool, evaluator: &mut Evaluator<W>) -> Result<(), Vec<Diagnostic>> {
    let (tokens, lexer_errors) = Lexer::new(source).scan_all();
    let (statements, parser_errors) = Parser::new(tokens).parse();

    let diagnostics: Vec<Diagnostic> = lexer_errors.into_iter().map(Diagnostic::from)
        .chain(parser_errors.into_iter().map(Diagnostic::from))
        .collect();

    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    if print_ast {
        let printer = AstPrinter::new();

        for statement in &statements {
            println!("{}", printer.print_statement(statement));
        }
    }

    evaluator.execute(&statements).map_err(|err| vec![Diagnostic::from(err)])
}

fn report(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic);
    }
}

#[cfg(test)]
mod tests;
