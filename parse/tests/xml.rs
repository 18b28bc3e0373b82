use std::io::Cursor;

use ipparse::{xml, Lexer, Parser, Program};

fn parse(src: &str) -> Program {
    Parser::new(Lexer::new(Cursor::new(src)))
        .parse()
        .unwrap()
}

fn render(src: &str) -> String {
    let prog = parse(src);
    let mut out = Vec::new();
    xml::write_program(&prog, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

const PROLOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?><program language="IPPcode24">"#;

#[test]
fn empty_program() {
    assert_eq!(render(".IPPcode24\n"), format!("{PROLOG}</program>"));
}

#[test]
fn instruction_with_arguments() {
    assert_eq!(
        render(".IPPcode24\nMOVE GF@a int@-5\n"),
        format!(
            "{PROLOG}\
             <instruction order=\"1\" opcode=\"MOVE\">\
             <arg1 type=\"var\">GF@a</arg1>\
             <arg2 type=\"int\">-5</arg2>\
             </instruction></program>"
        )
    );
}

#[test]
fn order_is_sequential() {
    let out = render(".IPPcode24\nBREAK\nBREAK\nBREAK\n");
    assert!(out.contains(r#"<instruction order="1" opcode="BREAK">"#));
    assert!(out.contains(r#"<instruction order="2" opcode="BREAK">"#));
    assert!(out.contains(r#"<instruction order="3" opcode="BREAK">"#));
}

#[test]
fn opcode_rendered_upper() {
    let out = render(".IPPcode24\nwrite string@ok\n");
    assert!(out.contains(r#"opcode="WRITE""#));
}

#[test]
fn string_entities_escaped_once() {
    let out = render(".IPPcode24\nWRITE string@a&b<c>\n");
    assert!(out.contains(r#"<arg1 type="string">a&amp;b&lt;c&gt;</arg1>"#));
}

#[test]
fn variable_ampersand_escaped() {
    let out = render(".IPPcode24\nDEFVAR GF@a&b\n");
    assert!(out.contains(r#"<arg1 type="var">GF@a&amp;b</arg1>"#));
}

#[test]
fn promoted_type_rendered_as_type() {
    let out = render(".IPPcode24\nREAD GF@a int\n");
    assert!(out.contains(r#"<arg2 type="type">int</arg2>"#));
    assert!(!out.contains(r#"<arg2 type="label">"#));
}

#[test]
fn label_argument() {
    let out = render(".IPPcode24\nLABEL main\n");
    assert!(out.contains(r#"<arg1 type="label">main</arg1>"#));
}

#[test]
fn nil_argument() {
    let out = render(".IPPcode24\nWRITE nil@nil\n");
    assert!(out.contains(r#"<arg1 type="nil">nil</arg1>"#));
}
