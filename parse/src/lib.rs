pub mod error;
pub mod lexer;
pub mod parser;
pub mod stats;
pub mod xml;

pub use error::Error;
pub use lexer::{Lexer, Token};
pub use parser::{Arg, Instruction, Parser, Program};
pub use stats::{Analysis, StatFile, StatKind, Stats};
