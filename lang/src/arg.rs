use strum::Display;

/// Type of one instruction operand, named as it appears in the XML output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ArgType {
    /// A label name. Also what opcodes and bare type names look like
    /// before the shape table disambiguates them.
    Label,
    /// A variable with frame prefix (`GF@x`, `LF@x`, `TF@x`).
    Var,
    Nil,
    Bool,
    Int,
    String,
    /// One of the built-in type names `nil`, `bool`, `int`, `string`.
    /// Never produced by the lexer, only by promotion of a `Label`.
    Type,
}
