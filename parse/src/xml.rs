use std::io::Write;

use crate::parser::{Arg, Instruction, Program};

/// Writes the program as a single-line XML document with no trailing
/// newline. Values were already entity-escaped by the lexer.
pub fn write_program<W: Write>(program: &Program, out: &mut W) -> std::io::Result<()> {
    write!(
        out,
        r#"<?xml version="1.0" encoding="UTF-8"?><program language="IPPcode24">"#
    )?;
    for (idx, inst) in program.instructions.iter().enumerate() {
        write_instruction(inst, idx + 1, out)?;
    }
    write!(out, "</program>")
}

fn write_instruction<W: Write>(inst: &Instruction, order: usize, out: &mut W) -> std::io::Result<()> {
    write!(
        out,
        r#"<instruction order="{}" opcode="{}">"#,
        order, inst.opcode
    )?;
    for (idx, arg) in inst.args.iter().enumerate() {
        write_arg(arg, idx + 1, out)?;
    }
    write!(out, "</instruction>")
}

fn write_arg<W: Write>(arg: &Arg, order: usize, out: &mut W) -> std::io::Result<()> {
    write!(
        out,
        r#"<arg{0} type="{1}">{2}</arg{0}>"#,
        order, arg.typ, arg.value
    )
}
