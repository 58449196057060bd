use crate::city::Instruction;
use crate::input::{ParseError, ParseErrorKind, parse_instructions, parse_line};

#[test]
fn parses_the_three_instruction_forms() {
    let src = "0: Insert(5,25)\n2: PrintBuilding(5)\n9: PrintBuilding(1,100)\n";
    let parsed = parse_instructions(src).expect("parse");
    assert_eq!(
        parsed,
        vec![
            Instruction::insert(0, 5, 25),
            Instruction::print_one(2, 5),
            Instruction::print_range(9, 1, 100),
        ]
    );
}

#[test]
fn tolerates_whitespace_and_blank_lines() {
    let src = "\n  3 :  Insert( 7 , 40 )  \n\n4:PrintBuilding(7)\n";
    let parsed = parse_instructions(src).expect("parse");
    assert_eq!(
        parsed,
        vec![Instruction::insert(3, 7, 40), Instruction::print_one(4, 7)]
    );
}

#[test]
fn empty_input_is_empty_instruction_list() {
    assert!(parse_instructions("").expect("parse").is_empty());
}

#[test]
fn reports_line_numbers() {
    let err = parse_instructions("0: Insert(1,2)\n\n5 Insert(2,3)\n").expect_err("bad line");
    assert_eq!(
        err,
        ParseError {
            line: 3,
            kind: ParseErrorKind::MissingColon
        }
    );
    assert!(err.to_string().starts_with("line 3:"));
}

#[test]
fn rejects_unknown_commands_and_bad_arity() {
    assert_eq!(
        parse_line("1: Demolish(3)"),
        Err(ParseErrorKind::UnknownCommand("Demolish".to_string()))
    );
    assert_eq!(
        parse_line("1: Insert(3)"),
        Err(ParseErrorKind::WrongArity {
            command: "Insert".to_string(),
            got: 1
        })
    );
    assert_eq!(
        parse_line("1: PrintBuilding(1,2,3)"),
        Err(ParseErrorKind::WrongArity {
            command: "PrintBuilding".to_string(),
            got: 3
        })
    );
}

#[test]
fn rejects_job_id_zero() {
    assert_eq!(parse_line("4: Insert(0,7)"), Err(ParseErrorKind::ZeroJobId));
    // 查询 id 0 只会得到哨兵，不受限制
    assert_eq!(parse_line("4: PrintBuilding(0)"), Ok(Instruction::print_one(4, 0)));

    let err = parse_instructions("0: Insert(1,2)\n1: Insert(0,2)\n").expect_err("id 0");
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, ParseErrorKind::ZeroJobId);
}

#[test]
fn rejects_malformed_numbers_and_parentheses() {
    assert_eq!(
        parse_line("x: Insert(1,2)"),
        Err(ParseErrorKind::InvalidNumber("x".to_string()))
    );
    assert_eq!(
        parse_line("1: Insert(1,-2)"),
        Err(ParseErrorKind::InvalidNumber("-2".to_string()))
    );
    assert!(matches!(
        parse_line("1: Insert(1,2"),
        Err(ParseErrorKind::MalformedParams(_))
    ));
    assert!(matches!(
        parse_line("1: Insert"),
        Err(ParseErrorKind::MalformedParams(_))
    ));
}

#[test]
fn rejects_timestamps_going_backwards() {
    let err = parse_instructions("5: Insert(1,2)\n3: PrintBuilding(1)\n").expect_err("backwards");
    assert_eq!(err.line, 2);
    assert_eq!(
        err.kind,
        ParseErrorKind::TimeWentBackwards { prev: 5, got: 3 }
    );
}

#[test]
fn same_timestamp_keeps_input_order() {
    let parsed = parse_instructions("1: PrintBuilding(2)\n1: Insert(2,4)\n").expect("parse");
    assert_eq!(
        parsed,
        vec![Instruction::print_one(1, 2), Instruction::insert(1, 2, 4)]
    );
}
