use once_cell::sync::Lazy;
use regex::Regex;
use std::io::BufRead;

use crate::error::Error;

// ----------------------------------------------------------------------------
// Token

/// One word of the source, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// End of the input stream.
    Eof,
    /// A word that does not lex; the payload is the diagnostic.
    Err(String),
    /// A word starting with `.`, only valid as the language header.
    Directive(String),
    /// A bare identifier: opcode, label name or type name depending on
    /// position. The parser decides which from the instruction shape.
    Label(String),
    /// A variable with frame prefix, e.g. `GF@x`.
    Ident(String),
    Nil,
    Bool(String),
    Int(String),
    Str(String),
}

// Word grammars. Payloads that pass them are stored already XML-escaped,
// so the renderer writes values verbatim and never double-escapes.

static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$&%*!?-][0-9A-Za-z_$&%*!?-]*$").unwrap());
static INT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?([0-9][0-9_]*|0x[0-9A-Fa-f_]*|0o[0-7_]*)$").unwrap());
static STRING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[^\\]|\\[0-9]{3})*$").unwrap());

// ----------------------------------------------------------------------------
// Lexer

pub struct Lexer<R> {
    input: R,
    comments: u32,
}

impl<R: BufRead> Lexer<R> {
    pub fn new(input: R) -> Self {
        Self { input, comments: 0 }
    }

    /// Lines that contained a `#` marker, counted once per line.
    pub fn comment_count(&self) -> u32 {
        self.comments
    }

    /// Tokens of the next non-blank line, or `[Eof]` at end of input.
    pub fn next_line(&mut self) -> Result<Vec<Token>, Error> {
        loop {
            let mut line = String::new();
            let n = self.input.read_line(&mut line).map_err(Error::FileRead)?;
            if n == 0 {
                return Ok(vec![Token::Eof]);
            }
            let tokens = self.scan_line(&line);
            if !tokens.is_empty() {
                return Ok(tokens);
            }
        }
    }

    fn scan_line(&mut self, line: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for word in line.split_whitespace() {
            let (code, comment) = match word.split_once('#') {
                Some((code, _)) => (code, true),
                None => (word, false),
            };
            if !code.is_empty() {
                let token = scan_word(code);
                if let Token::Err(_) = token {
                    return vec![token];
                }
                tokens.push(token);
            }
            if comment {
                // the rest of the line is the comment
                self.comments += 1;
                break;
            }
        }
        tokens
    }
}

// ----------------------------------------------------------------------------
// Word scanning

fn scan_word(s: &str) -> Token {
    if s.starts_with('.') {
        return Token::Directive(s.to_string());
    }

    // the empty string literal has nothing after the `@`
    if s == "string@" {
        return Token::Str(String::new());
    }

    let Some((kind, value)) = s.split_once('@') else {
        return scan_label(s);
    };

    // further `@` are only valid inside a string payload
    if value.contains('@') && kind != "string" {
        return Token::Err(format!("Unexpected character '@' in '{s}'"));
    }

    match kind {
        "TF" | "LF" | "GF" => scan_ident(s),
        "nil" => scan_nil(value),
        "bool" => scan_bool(value),
        "int" => scan_int(value),
        "string" => scan_string(value),
        _ => Token::Err(format!("Unknown data type '{kind}'")),
    }
}

fn scan_label(s: &str) -> Token {
    if IDENT_RE.is_match(s) {
        Token::Label(escape_amp(s))
    } else {
        Token::Err(format!("Invalid label name '{s}'"))
    }
}

fn scan_ident(s: &str) -> Token {
    // the frame prefix is exempt from the identifier grammar
    if IDENT_RE.is_match(&s[3..]) {
        Token::Ident(escape_amp(s))
    } else {
        Token::Err(format!("Invalid variable name '{s}'"))
    }
}

fn scan_nil(s: &str) -> Token {
    if s == "nil" {
        Token::Nil
    } else {
        Token::Err("type 'nil' can only have value 'nil'".to_string())
    }
}

fn scan_bool(s: &str) -> Token {
    match s {
        "true" | "false" => Token::Bool(s.to_string()),
        _ => Token::Err(format!("Invalid bool value '{s}'")),
    }
}

fn scan_int(s: &str) -> Token {
    if INT_RE.is_match(s) {
        Token::Int(s.to_string())
    } else {
        Token::Err(format!("Invalid int value '{s}'"))
    }
}

fn scan_string(s: &str) -> Token {
    if STRING_RE.is_match(s) {
        Token::Str(escape_xml(s))
    } else {
        Token::Err(format!("Invalid string value '{s}'"))
    }
}

fn escape_amp(s: &str) -> String {
    s.replace('&', "&amp;")
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
