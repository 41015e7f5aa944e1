use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Longer spellings come before their prefixes (`<=` before `<`).
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^:=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, ":=") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "=") },
        RegexPattern { regex: Regex::new("^#").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "#") },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Span covering the next `len` bytes of input.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);

    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Number, matched, span));
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = lexer.matched(regex);
    let span = lexer.span_of(value.len());
    lexer.advance_n(value.len());

    // Keywords are case-insensitive; identifiers keep their spelling.
    if let Some(kind) = RESERVED_LOOKUP.get(value.to_ascii_uppercase().as_str()) {
        lexer.push(MK_TOKEN!(*kind, value, span));
    } else {
        lexer.push(MK_TOKEN!(TokenKind::Identifier, value, span));
    }
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken { token: lex.at().to_string() },
                    lex.position(),
                ));
            }
        }
    }

    let span = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));

    log::trace!("tokenized {} tokens", lex.tokens.len());
    for token in lex.tokens.iter() {
        token.debug();
    }

    Ok(lex.tokens)
}
