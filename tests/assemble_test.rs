mod common;
use common::*;
use karel::lang::{assemble, compile, ErrorCode};
use karel::mach::{Program, Runtime};
use karel::world::World;

const SOURCES: [&str; 3] = [
    "void main() {\n  repeat (5) {\n    moveForward();\n  }\n  turnRight();\n}\n",
    "\
void main() {
  while (frontIsClear() && !onBeeper()) {
    if (beeperAhead()) {
      moveForward();
    } else if (leftIsClear() || rightIsClear()) {
      dropBeeper();
      helper();
    } else {
      turnAround();
    }
  }
}
void helper() {
  moveForward();
}
",
    "",
];

fn bytecodes(program: &Program) -> Vec<u16> {
    program.instructions().iter().map(|i| i.bytecode()).collect()
}

#[test]
fn test_disassembly_assembles_back() {
    for source in SOURCES.iter() {
        let program = compile(source).unwrap();
        let again = assemble(&program.disassemble()).unwrap();
        assert_eq!(bytecodes(&again), bytecodes(&program), "{}", source);
    }
}

#[test]
fn test_listing_assembles_back() {
    for source in SOURCES.iter() {
        let program = compile(source).unwrap();
        let listing = program.listing().to_string();
        let again = assemble(&listing).unwrap();
        assert_eq!(bytecodes(&again), bytecodes(&program), "{}", listing);
    }
}

#[test]
fn test_positions_are_line_numbers() {
    let program = assemble("\n@ header\nMOVE\n\nJUMP 000\n").unwrap();
    let positions: Vec<usize> = program.instructions().iter().map(|i| i.position()).collect();
    assert_eq!(positions, vec![3, 5]);
}

#[test]
fn test_assembled_program_runs() {
    let source = "\
PUSH 003
MOVE
LOOP 000
LCLR
RCLR
XOR
J0MP 008
DROP
RET
";
    let mut r = Runtime::new(assemble(source).unwrap(), World::empty());
    exec(&mut r).unwrap();
    assert_eq!(r.world().x(), 3);
    assert!(r.world().on_beeper());
}

#[test]
fn test_assembler_diagnostics() {
    let e = assemble("MOVE\nWALK\n").unwrap_err();
    assert_eq!(e.text(), "unknown mnemonic WALK");
    assert_eq!(e.position(), 5);
    let e = assemble("CALL\n").unwrap_err();
    assert_eq!(e.text(), "expected address");
    let e = assemble("JUMP 12\n").unwrap_err();
    assert_eq!(e.text(), "expected address");
    let e = assemble("JUMP +12\n").unwrap_err();
    assert_eq!(e.text(), "expected address");
    let e = assemble("RET 000\n").unwrap_err();
    assert_eq!(e.text(), "unexpected operand");
    let e = assemble("CALL 002 003\n").unwrap_err();
    assert_eq!(e.text(), "unexpected operand");
    assert_eq!(e.position(), 9);
    let e = assemble("PUSH 001\n").unwrap_err();
    assert_eq!(e.code(), ErrorCode::OutOfRange);
    assert_eq!(e.text(), "001 out of range");
    let e = assemble("MOVE\n5 MOVE\n").unwrap_err();
    assert_eq!(e.text(), "unknown mnemonic 5");
    assert_eq!(e.position(), 5);
    let e = assemble("12 34 TRNL\n").unwrap_err();
    assert_eq!(e.text(), "unknown mnemonic 12");
}

#[test]
fn test_program_too_long() {
    let source = "TRNL\n".repeat(4097);
    let e = assemble(&source).unwrap_err();
    assert_eq!(e.code(), ErrorCode::OutOfMemory);
    assert_eq!(e.position(), 4096 * 5);
}
