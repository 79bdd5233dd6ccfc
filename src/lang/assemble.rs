use super::{Error, Position};
use crate::error;
use crate::mach::opcode::*;
use crate::mach::{Instruction, Opcode, Program};
use log::debug;

type Result<T> = std::result::Result<T, Error>;

/// ## Assembler
///
/// One mnemonic per line with a three hex digit operand for the addressed
/// opcodes. Blank lines and `@` header lines are skipped. A line starting
/// with the address and code columns of a listing row is read from its
/// mnemonic, so both [`Program::disassemble`] output and a
/// [`Listing`](crate::mach::Listing) assemble back. Every instruction is
/// tagged with its line number. Execution enters at address 0.
///
/// ```text
/// PUSH 003
/// MOVE
/// LOOP 000
/// RET
/// ```
pub fn assemble(source: &str) -> Result<Program> {
    let mut program = Program::new();
    let mut start = 0;
    for (index, text) in source.split('\n').enumerate() {
        if let Some(instruction) = instruction(text, start, index + 1)? {
            program
                .push(instruction)
                .map_err(|error| error.at(start))?;
        }
        start += text.len() + 1;
    }
    debug!("assembled {} instructions", program.len());
    Ok(program)
}

fn is_column(word: &str, width: usize) -> bool {
    word.len() == width
        && word
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Number of leading words that are listing columns: `ADR CODE` or none.
fn columns(words: &[(Position, &str)]) -> usize {
    match words {
        [(_, address), (_, code), ..] if is_column(address, 3) && is_column(code, 4) => 2,
        _ => 0,
    }
}

/// Whitespace separated words with their byte offsets.
fn words(text: &str, start: Position) -> Vec<(Position, &str)> {
    let mut words = vec![];
    let mut word_start = None;
    for (offset, ch) in text.char_indices() {
        match (ch.is_whitespace(), word_start) {
            (false, None) => word_start = Some(offset),
            (true, Some(s)) => {
                words.push((start + s, &text[s..offset]));
                word_start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = word_start {
        words.push((start + s, &text[s..]));
    }
    words
}

fn instruction(text: &str, start: Position, line: usize) -> Result<Option<Instruction>> {
    if text.trim_start().starts_with('@') {
        return Ok(None);
    }
    let words = words(text, start);
    let mut words = words.iter().copied().skip(columns(&words));
    let (position, mnemonic) = match words.next() {
        Some(word) => word,
        None => return Ok(None),
    };
    let bytecode = if let Some(bytecode) = Opcode::primitive_named(mnemonic) {
        bytecode
    } else if let Some(category) = Opcode::category_named(mnemonic) {
        let (operand_position, operand) = match words.next() {
            Some(word) => word,
            None => return Err(error!(SyntaxError, position + mnemonic.len(); "expected address")),
        };
        category | operand_target(category, operand, operand_position)?
    } else {
        return Err(error!(SyntaxError, position; format!("unknown mnemonic {}", mnemonic)));
    };
    if let Some((extra, _)) = words.next() {
        return Err(error!(SyntaxError, extra; "unexpected operand"));
    }
    Ok(Some(Instruction::new(bytecode, line)))
}

fn operand_target(category: u16, operand: &str, position: Position) -> Result<u16> {
    let target = if operand.len() == 3 && operand.bytes().all(|b| b.is_ascii_hexdigit()) {
        u16::from_str_radix(operand, 16).ok()
    } else {
        None
    };
    let target = match target {
        Some(target) => target,
        None => return Err(error!(SyntaxError, position; "expected address")),
    };
    if category == PUSH && target < 2 {
        return Err(error!(OutOfRange, position; format!("{} out of range", operand)));
    }
    Ok(target & TARGET_MASK)
}
