use std::io::BufRead;

use lang::{ArgSpec, ArgType, Opcode};

use crate::error::Error;
use crate::lexer::{Lexer, Token};

// ----------------------------------------------------------------------------
// Argument

/// One operand of an instruction. The value is already XML-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub typ: ArgType,
    pub value: String,
}

impl Arg {
    /// Only value-bearing tokens can become arguments; the parser never
    /// feeds anything else here.
    fn new(token: Token) -> Arg {
        let (typ, value) = match token {
            Token::Label(v) => (ArgType::Label, v),
            Token::Ident(v) => (ArgType::Var, v),
            Token::Nil => (ArgType::Nil, "nil".to_string()),
            Token::Bool(v) => (ArgType::Bool, v),
            Token::Int(v) => (ArgType::Int, v),
            Token::Str(v) => (ArgType::String, v),
            t => unreachable!("token {t:?} cannot be an argument"),
        };
        Arg { typ, value }
    }
}

// ----------------------------------------------------------------------------
// Instruction

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub args: Vec<Arg>,
}

impl Instruction {
    /// Checks the opcode against the shape table: existence, arity, and the
    /// operand class of every position. The first violated rule wins.
    fn build(name: &str, mut args: Vec<Arg>) -> Result<Instruction, Error> {
        let opcode = Opcode::parse(name).ok_or_else(|| Error::UnknownOpcode(name.to_string()))?;

        let shape = opcode.shape();
        if shape.len() != args.len() {
            return Err(Error::ArgumentCount(opcode));
        }

        for (arg, spec) in args.iter_mut().zip(shape) {
            // a bare type name lexes as a label; promote it where the
            // shape expects a type
            if *spec == ArgSpec::Type
                && arg.typ == ArgType::Label
                && matches!(arg.value.as_str(), "nil" | "bool" | "int" | "string")
            {
                arg.typ = ArgType::Type;
                continue;
            }
            if !spec.allows(arg.typ) {
                return Err(Error::ArgumentType(opcode));
            }
        }

        Ok(Instruction { opcode, args })
    }
}

// ----------------------------------------------------------------------------
// Program

/// A fully validated source program.
#[derive(Debug)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    /// Lines that contained a comment, counted by the lexer.
    pub comments: u32,
}

// ----------------------------------------------------------------------------
// Parser

pub struct Parser<R> {
    lexer: Lexer<R>,
}

impl<R: BufRead> Parser<R> {
    pub fn new(lexer: Lexer<R>) -> Self {
        Self { lexer }
    }

    /// Parses the whole input. The first error wins: nothing after it is
    /// inspected and no partial program is produced.
    pub fn parse(mut self) -> Result<Program, Error> {
        self.header()?;

        let mut instructions = Vec::new();
        loop {
            let line = self.lexer.next_line()?;
            if line.first() == Some(&Token::Eof) {
                break;
            }
            instructions.push(Self::instruction(line)?);
        }

        Ok(Program {
            instructions,
            comments: self.lexer.comment_count(),
        })
    }

    /// The first non-blank line must be the `.IPPcode24` directive, alone.
    fn header(&mut self) -> Result<(), Error> {
        let line = self.lexer.next_line()?;
        match line.first() {
            Some(Token::Directive(d)) if d == ".IPPcode24" => {}
            Some(Token::Err(msg)) => return Err(Error::Lex(msg.clone())),
            _ => return Err(Error::InvalidHeader),
        }
        if line.len() != 1 {
            return Err(Error::HeaderTail);
        }
        Ok(())
    }

    fn instruction(line: Vec<Token>) -> Result<Instruction, Error> {
        let mut tokens = line.into_iter();

        let name = match tokens.next() {
            Some(Token::Label(name)) => name,
            Some(Token::Err(msg)) => return Err(Error::Lex(msg)),
            Some(Token::Directive(d)) => return Err(Error::UnexpectedDirective(d)),
            _ => return Err(Error::ExpectedOpcode),
        };

        let mut args = Vec::new();
        for token in tokens {
            match token {
                Token::Err(msg) => return Err(Error::Lex(msg)),
                Token::Directive(d) => return Err(Error::UnexpectedDirective(d)),
                t => args.push(Arg::new(t)),
            }
        }

        Instruction::build(&name, args)
    }
}
