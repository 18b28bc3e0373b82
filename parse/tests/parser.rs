use std::io::Cursor;

use lang::{ArgType, Opcode};

use ipparse::{Error, Lexer, Parser, Program};

fn parse(src: &str) -> Result<Program, Error> {
    Parser::new(Lexer::new(Cursor::new(src))).parse()
}

#[test]
fn minimal_program() {
    let prog = parse(".IPPcode24\n").unwrap();
    assert!(prog.instructions.is_empty());
    assert_eq!(prog.comments, 0);
}

#[test]
fn simple_program() {
    let prog = parse(
        ".IPPcode24\n\
         DEFVAR GF@counter\n\
         MOVE GF@counter int@0\n\
         WRITE string@done\n",
    )
    .unwrap();

    assert_eq!(prog.instructions.len(), 3);

    let mv = &prog.instructions[1];
    assert_eq!(mv.opcode, Opcode::MOVE);
    assert_eq!(mv.args[0].typ, ArgType::Var);
    assert_eq!(mv.args[0].value, "GF@counter");
    assert_eq!(mv.args[1].typ, ArgType::Int);
    assert_eq!(mv.args[1].value, "0");
}

#[test]
fn opcode_normalized_upper() {
    let prog = parse(".IPPcode24\ncreateFrame\n").unwrap();
    assert_eq!(prog.instructions[0].opcode, Opcode::CREATEFRAME);
    assert_eq!(prog.instructions[0].opcode.to_string(), "CREATEFRAME");
}

#[test]
fn comments_and_blanks_before_header() {
    let prog = parse("# a comment\n\n.IPPcode24 # header\n\nBREAK\n").unwrap();
    assert_eq!(prog.instructions.len(), 1);
    assert_eq!(prog.comments, 2);
}

// ----------------------------------------------------------------------------
// Header errors

#[test]
fn missing_header() {
    assert!(matches!(parse("MOVE GF@a int@1\n"), Err(Error::InvalidHeader)));
}

#[test]
fn empty_input() {
    assert!(matches!(parse(""), Err(Error::InvalidHeader)));
}

#[test]
fn header_is_case_sensitive() {
    assert!(matches!(parse(".ippcode24\n"), Err(Error::InvalidHeader)));
}

#[test]
fn header_must_be_alone() {
    assert!(matches!(
        parse(".IPPcode24 MOVE\n"),
        Err(Error::HeaderTail)
    ));
}

#[test]
fn directive_after_header() {
    assert!(matches!(
        parse(".IPPcode24\n.IPPcode24\n"),
        Err(Error::UnexpectedDirective(_))
    ));
}

#[test]
fn directive_inside_instruction() {
    assert!(matches!(
        parse(".IPPcode24\nWRITE .foo\n"),
        Err(Error::UnexpectedDirective(_))
    ));
}

// ----------------------------------------------------------------------------
// Validation errors

#[test]
fn unknown_opcode() {
    match parse(".IPPcode24\nFOO GF@a\n") {
        Err(Error::UnknownOpcode(name)) => assert_eq!(name, "FOO"),
        other => panic!("expected UnknownOpcode, got {other:?}"),
    }
}

#[test]
fn arity_checked_before_types() {
    // two arguments to ADD is an arity problem, not a type problem
    assert!(matches!(
        parse(".IPPcode24\nADD GF@a GF@b\n"),
        Err(Error::ArgumentCount(Opcode::ADD))
    ));
}

#[test]
fn no_args_expected() {
    assert!(matches!(
        parse(".IPPcode24\nRETURN int@1\n"),
        Err(Error::ArgumentCount(Opcode::RETURN))
    ));
}

#[test]
fn argument_type_mismatch() {
    // MOVE wants a variable first
    assert!(matches!(
        parse(".IPPcode24\nMOVE int@1 GF@a\n"),
        Err(Error::ArgumentType(Opcode::MOVE))
    ));
}

#[test]
fn bare_label_is_not_a_symbol() {
    assert!(matches!(
        parse(".IPPcode24\nWRITE somelabel\n"),
        Err(Error::ArgumentType(Opcode::WRITE))
    ));
}

#[test]
fn opcode_must_be_label_like() {
    assert!(matches!(
        parse(".IPPcode24\nint@1\n"),
        Err(Error::ExpectedOpcode)
    ));
}

#[test]
fn lex_error_propagates() {
    assert!(matches!(
        parse(".IPPcode24\nMOVE GF@a string@bad\\1\n"),
        Err(Error::Lex(_))
    ));
}

#[test]
fn first_error_wins() {
    // the unknown opcode on the second line masks the arity error below it
    match parse(".IPPcode24\nFOO\nADD GF@a\n") {
        Err(Error::UnknownOpcode(name)) => assert_eq!(name, "FOO"),
        other => panic!("expected UnknownOpcode, got {other:?}"),
    }
}

// ----------------------------------------------------------------------------
// Type promotion

#[test]
fn type_name_promoted() {
    let prog = parse(".IPPcode24\nREAD GF@a int\n").unwrap();
    let arg = &prog.instructions[0].args[1];
    assert_eq!(arg.typ, ArgType::Type);
    assert_eq!(arg.value, "int");
}

#[test]
fn all_type_names_promote() {
    for name in ["nil", "bool", "int", "string"] {
        let prog = parse(&format!(".IPPcode24\nREAD GF@a {name}\n")).unwrap();
        assert_eq!(prog.instructions[0].args[1].typ, ArgType::Type);
    }
}

#[test]
fn non_type_name_rejected() {
    assert!(matches!(
        parse(".IPPcode24\nREAD GF@a float\n"),
        Err(Error::ArgumentType(Opcode::READ))
    ));
}

#[test]
fn type_name_stays_label_elsewhere() {
    // `int` is a perfectly fine label name for a jump
    let prog = parse(".IPPcode24\nJUMP int\n").unwrap();
    assert_eq!(prog.instructions[0].args[0].typ, ArgType::Label);
}
