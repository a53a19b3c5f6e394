use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::Chars;
use lazy_static::lazy_static;
use thiserror::Error;
use crate::interpreter::value::Value;
use crate::util;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenPos {
    pub line: i32,
    pub column: i32,
}

impl TokenPos {
    pub fn new(line: i32, column: i32) -> TokenPos {
        TokenPos { line, column }
    }

    pub fn begin() -> TokenPos {
        TokenPos::new(1, 1)
    }
}

impl Display for TokenPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {} column {}]", self.line, self.column)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TokenType {
    LeftParen, RightParen,
    LeftBrace, RightBrace,
    Comma, Dot, Semicolon,

    Minus, Plus,
    Slash, Star,

    Bang, BangEqual,
    Equal, EqualEqual,
    Greater, GreaterEqual,
    Less, LessEqual,

    Identifier,
    Number,
    String,

    // Keywords. Only a subset appears in the grammar, but all of them
    // are reserved words and statement-boundary markers for recovery.
    And, Class, Else, False,
    Fun, For, If, Nil, Or,
    Print, Return, Super,
    This, True, Var, While,

    Eof,
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenType> = HashMap::from([
        ("and", TokenType::And),
        ("class", TokenType::Class),
        ("else", TokenType::Else),
        ("false", TokenType::False),
        ("for", TokenType::For),
        ("fun", TokenType::Fun),
        ("if", TokenType::If),
        ("nil", TokenType::Nil),
        ("or", TokenType::Or),
        ("print", TokenType::Print),
        ("return", TokenType::Return),
        ("super", TokenType::Super),
        ("this", TokenType::This),
        ("true", TokenType::True),
        ("var", TokenType::Var),
        ("while", TokenType::While),
    ]);
}

/// A classified lexical unit. Immutable once scanned; number and string
/// tokens carry their decoded literal value.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    token_type: TokenType,
    lexeme: String,
    literal: Option<Value>,
    pos: TokenPos,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, literal: Option<Value>, pos: TokenPos) -> Token {
        Token {
            token_type, lexeme,
            literal, pos,
        }
    }

    pub fn token_type(&self) -> TokenType { self.token_type }
    pub fn lexeme(&self) -> &str { &self.lexeme }
    pub fn literal(&self) -> Option<&Value> { self.literal.as_ref() }
    pub fn pos(&self) -> TokenPos { self.pos }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.token_type {
            TokenType::Eof => f.write_str("end of input"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum LexerError {
    #[error("{pos} Unexpected character '{character}'")]
    UnexpectedCharacter { pos: TokenPos, character: char },
    #[error("{pos} Unterminated string")]
    UnterminatedString { pos: TokenPos },
    #[error("{pos} Unterminated block comment")]
    UnterminatedBlockComment { pos: TokenPos },
    #[error("{pos} Invalid number literal '{lexeme}'")]
    InvalidNumber { pos: TokenPos, lexeme: String },
}

impl LexerError {
    pub fn pos(&self) -> TokenPos {
        match self {
            LexerError::UnexpectedCharacter { pos, .. } => *pos,
            LexerError::UnterminatedString { pos } => *pos,
            LexerError::UnterminatedBlockComment { pos } => *pos,
            LexerError::InvalidNumber { pos, .. } => *pos,
        }
    }
}

type LexerResult<T> = Result<T, LexerError>;

pub struct Lexer<'source> {
    input: &'source str,

    chars: Chars<'source>,
    peek_1: Option<char>,
    peek_2: Option<char>,

    start_index: usize,
    current_index: usize,

    start_pos: TokenPos,
    current_pos: TokenPos,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Lexer<'source> {
        Lexer {
            input: source,

            chars: source.chars(),
            peek_1: None,
            peek_2: None,

            start_index: 0,
            current_index: 0,

            start_pos: TokenPos::begin(),
            current_pos: TokenPos::begin(),
        }
    }

    /// Scans the whole input. Lexical errors are collected rather than
    /// aborting the scan; the token sequence always ends with `Eof`.
    pub fn scan_all(mut self) -> (Vec<Token>, Vec<LexerError>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        loop {
            match self.scan_token() {
                Ok(token) => {
                    let eof = token.token_type() == TokenType::Eof;
                    tokens.push(token);

                    if eof {
                        break;
                    }
                },
                Err(err) => errors.push(err),
            }
        }

        (tokens, errors)
    }

    pub fn scan_token(&mut self) -> LexerResult<Token> {
        loop {
            self.skip_whitespace();
            self.start_index = self.current_index;
            self.start_pos = self.current_pos;

            let c = match self.consume() {
                Some(c) => c,
                None => return Ok(self.make_token(TokenType::Eof)),
            };

            return match c {
                '(' => Ok(self.make_token(TokenType::LeftParen)),
                ')' => Ok(self.make_token(TokenType::RightParen)),
                '{' => Ok(self.make_token(TokenType::LeftBrace)),
                '}' => Ok(self.make_token(TokenType::RightBrace)),
                ',' => Ok(self.make_token(TokenType::Comma)),
                '.' => Ok(self.make_token(TokenType::Dot)),
                ';' => Ok(self.make_token(TokenType::Semicolon)),
                '-' => Ok(self.make_token(TokenType::Minus)),
                '+' => Ok(self.make_token(TokenType::Plus)),
                '*' => Ok(self.make_token(TokenType::Star)),

                // Maximal munch: two-character operators win over their
                // single-character prefixes
                '!' => Ok(if self.expect('=') { self.make_token(TokenType::BangEqual) } else {
                    self.make_token(TokenType::Bang)
                }),
                '=' => Ok(if self.expect('=') { self.make_token(TokenType::EqualEqual) } else {
                    self.make_token(TokenType::Equal)
                }),
                '>' => Ok(if self.expect('=') { self.make_token(TokenType::GreaterEqual) } else {
                    self.make_token(TokenType::Greater)
                }),
                '<' => Ok(if self.expect('=') { self.make_token(TokenType::LessEqual) } else {
                    self.make_token(TokenType::Less)
                }),

                '/' => if self.expect('/') {
                    self.skip_line();
                    continue;
                } else if self.expect('*') {
                    self.skip_block_comment()?;
                    continue;
                } else {
                    Ok(self.make_token(TokenType::Slash))
                },

                '"' => self.scan_string(),
                '0'..='9' => self.scan_number(),
                c if util::is_alphabetic(c) => Ok(self.scan_identifier()),

                _ => Err(LexerError::UnexpectedCharacter { pos: self.start_pos, character: c }),
            };
        }
    }

    fn scan_string(&mut self) -> LexerResult<Token> {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }

            let _ = self.consume();
        }

        if self.peek().is_none() {
            Err(LexerError::UnterminatedString { pos: self.start_pos })
        } else {
            let _ = self.consume(); // the trailing '"'

            // The lexeme keeps its quotes; the literal value doesn't
            let value = self.input[(self.start_index + 1)..(self.current_index - 1)].to_owned();

            Ok(Token {
                token_type: TokenType::String,
                lexeme: self.input[self.start_index..self.current_index].to_owned(),
                literal: Some(Value::String(value)),
                pos: self.start_pos,
            })
        }
    }

    fn scan_number(&mut self) -> LexerResult<Token> {
        while let Some('0'..='9') = self.peek() {
            let _ = self.consume();
        }

        // A '.' only belongs to the number if a digit follows, so "1."
        // scans as the number 1 and a Dot token
        if let Some('.') = self.peek() {
            if let Some('0'..='9') = self.peek_next() {
                let _ = self.consume();

                while let Some('0'..='9') = self.peek() {
                    let _ = self.consume();
                }
            }
        }

        let lexeme = &self.input[self.start_index..self.current_index];
        let value: f64 = lexeme.parse().map_err(|_| LexerError::InvalidNumber {
            pos: self.start_pos,
            lexeme: lexeme.to_owned(),
        })?;

        Ok(Token {
            token_type: TokenType::Number,
            lexeme: lexeme.to_owned(),
            literal: Some(Value::Number(value)),
            pos: self.start_pos,
        })
    }

    fn scan_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if !util::is_alphanumeric(c) {
                break;
            }

            let _ = self.consume();
        }

        let name = &self.input[self.start_index..self.current_index];
        let token_type = KEYWORDS.get(name).copied().unwrap_or(TokenType::Identifier);

        Token {
            token_type,
            lexeme: name.to_owned(),
            literal: None,
            pos: self.start_pos,
        }
    }

    fn make_token(&self, token_type: TokenType) -> Token {
        Token {
            token_type,
            lexeme: self.input[self.start_index..self.current_index].to_owned(),
            literal: None,
            pos: self.start_pos,
        }
    }

    fn consume(&mut self) -> Option<char> {
        let c = if let Some(c) = self.peek_1.take() {
            self.peek_1 = self.peek_2.take();
            Some(c)
        } else {
            self.chars.next()
        };

        if let Some(c) = c {
            self.current_index += c.len_utf8();

            if c == '\n' {
                self.current_pos.line += 1;
                self.current_pos.column = 1;
            } else {
                self.current_pos.column += 1;
            }
        }

        c
    }

    fn peek(&mut self) -> Option<char> {
        if let Some(c) = self.peek_1 {
            Some(c)
        } else {
            self.peek_1 = self.chars.next();
            self.peek_1
        }
    }

    fn peek_next(&mut self) -> Option<char> {
        self.peek()?;

        if let Some(c) = self.peek_2 {
            Some(c)
        } else {
            self.peek_2 = self.chars.next();
            self.peek_2
        }
    }

    fn expect(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            let _ = self.consume();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                return;
            }

            let _ = self.consume();
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.consume() {
            if c == '\n' {
                return;
            }
        }
    }

    // Termination needs a '*' immediately followed by '/'; line counting
    // inside the comment happens in consume()
    fn skip_block_comment(&mut self) -> LexerResult<()> {
        let open_pos = self.start_pos;

        while let Some(c) = self.consume() {
            if c == '*' && self.peek() == Some('/') {
                let _ = self.consume();
                return Ok(());
            }
        }

        Err(LexerError::UnterminatedBlockComment { pos: open_pos })
    }
}
