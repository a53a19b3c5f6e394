pub mod ast;
pub mod environment;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod value;

use thiserror::Error;
use self::evaluator::RuntimeError;
use self::lexer::{LexerError, TokenPos};
use self::parser::ParserError;

/// Any error the pipeline can surface, for the driver to render. The
/// core only produces these as values; it never formats them to a
/// stream itself.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Diagnostic {
    #[error("{0}")]
    Lexical(#[from] LexerError),
    #[error("{0}")]
    Syntax(#[from] ParserError),
    #[error("{0}")]
    Runtime(#[from] RuntimeError),
}

impl Diagnostic {
    pub fn pos(&self) -> Option<TokenPos> {
        match self {
            Diagnostic::Lexical(err) => Some(err.pos()),
            Diagnostic::Syntax(err) => Some(err.pos()),
            Diagnostic::Runtime(err) => err.pos(),
        }
    }

    pub fn is_runtime(&self) -> bool {
        matches!(self, Diagnostic::Runtime(_))
    }
}
