use strum::{Display, EnumString};

use crate::arg::ArgType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
pub enum Opcode {
    MOVE,
    CREATEFRAME,
    PUSHFRAME,
    POPFRAME,
    DEFVAR,
    CALL,
    RETURN,
    PUSHS,
    POPS,
    ADD,
    SUB,
    MUL,
    IDIV,
    LT,
    GT,
    EQ,
    AND,
    OR,
    NOT,
    INT2CHAR,
    STRI2INT,
    READ,
    WRITE,
    CONCAT,
    STRLEN,
    GETCHAR,
    SETCHAR,
    TYPE,
    LABEL,
    JUMP,
    JUMPIFEQ,
    JUMPIFNEQ,
    EXIT,
    DPRINT,
    BREAK,
}

impl Opcode {
    /// Case-insensitive opcode lookup.
    pub fn parse(s: &str) -> Option<Self> {
        s.to_uppercase().parse::<Self>().ok()
    }
}

// ----------------------------------------------------------------------------
// Instruction shapes

/// Class of operand allowed at one position of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSpec {
    /// A variable.
    Var,
    /// Any value: a variable or a literal.
    Symb,
    /// A label name.
    Label,
    /// A type name.
    Type,
}

impl ArgSpec {
    pub fn allows(&self, typ: ArgType) -> bool {
        match self {
            ArgSpec::Var => typ == ArgType::Var,
            ArgSpec::Symb => matches!(
                typ,
                ArgType::Var | ArgType::Nil | ArgType::Bool | ArgType::Int | ArgType::String
            ),
            ArgSpec::Label => typ == ArgType::Label,
            ArgSpec::Type => typ == ArgType::Type,
        }
    }
}

impl Opcode {
    /// Expected operand classes, in order.
    pub fn shape(&self) -> &'static [ArgSpec] {
        use ArgSpec::*;
        use Opcode::*;
        match self {
            CREATEFRAME | PUSHFRAME | POPFRAME | RETURN | BREAK => &[],
            DEFVAR | POPS => &[Var],
            CALL | LABEL | JUMP => &[Label],
            PUSHS | WRITE | EXIT | DPRINT => &[Symb],
            MOVE | NOT | INT2CHAR | STRLEN | TYPE => &[Var, Symb],
            READ => &[Var, Type],
            ADD | SUB | MUL | IDIV | LT | GT | EQ | AND | OR | STRI2INT | CONCAT | GETCHAR
            | SETCHAR => &[Var, Symb, Symb],
            JUMPIFEQ | JUMPIFNEQ => &[Label, Symb, Symb],
        }
    }
}
