use lang::Opcode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Lex(String),

    #[error("Invalid code header")]
    InvalidHeader,

    #[error("Expected end of line after code header")]
    HeaderTail,

    #[error("Unexpected directive `{0}` after code header")]
    UnexpectedDirective(String),

    #[error("Expected instruction name")]
    ExpectedOpcode,

    #[error("Unknown instruction `{0}`")]
    UnknownOpcode(String),

    #[error("Invalid number of arguments for instruction `{0}`")]
    ArgumentCount(Opcode),

    #[error("Invalid arguments to `{0}`")]
    ArgumentType(Opcode),

    #[error("Cannot output twice to the same file: {0}")]
    DuplicateStatFile(String),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// Process exit code reported for this error.
    pub fn code(&self) -> u8 {
        match self {
            Error::FileOpen(..) | Error::FileRead(..) => 11,
            Error::DuplicateStatFile(..) | Error::FileCreate(..) | Error::FileWrite(..) => 12,
            Error::InvalidHeader => 21,
            Error::UnexpectedDirective(..) | Error::UnknownOpcode(..) => 22,
            Error::Lex(..)
            | Error::HeaderTail
            | Error::ExpectedOpcode
            | Error::ArgumentCount(..)
            | Error::ArgumentType(..) => 23,
        }
    }
}
