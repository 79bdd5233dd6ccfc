use super::opcode::*;
use super::*;
use crate::world::{Heading, World};
use std::sync::atomic::AtomicBool;

mod runtime_test;

fn program(words: &[(u16, usize)]) -> Program {
    let mut program = Program::new();
    for &(bytecode, line) in words {
        program.push(Instruction::new(bytecode, line)).unwrap();
    }
    program
}

/// Runs until the program stops, collecting every pause.
fn run(runtime: &mut Runtime) -> Result<Vec<Step>, Fault> {
    let never = AtomicBool::new(false);
    let mut pauses = vec![];
    loop {
        match runtime.execute(10_000, &never) {
            Event::Stopped => return Ok(pauses),
            Event::Paused(step) => pauses.push(step),
            Event::Fault(fault) => return Err(fault),
            Event::Running => panic!("execution cycles exceeded"),
            Event::Interrupted => unreachable!(),
        }
    }
}
