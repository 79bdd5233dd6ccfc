use super::{Address, Instruction, Listing, MEMORY_SIZE};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Instruction memory
///
/// A fixed block of [`MEMORY_SIZE`] instructions, pre-filled with `RET`.
/// Front ends append with [`push`](Program::push) and fix forward targets
/// with [`patch`](Program::patch); the runtime only reads.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    memory: Vec<Instruction>,
    len: usize,
    entry: Address,
    commands: Vec<(String, Address)>,
}

impl Default for Program {
    fn default() -> Program {
        Program {
            memory: vec![Instruction::default(); MEMORY_SIZE],
            len: 0,
            entry: 0,
            commands: vec![],
        }
    }
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    /// Number of emitted instructions.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends an instruction and returns its address.
    pub fn push(&mut self, instruction: Instruction) -> Result<Address> {
        let address = self.len;
        match self.memory.get_mut(address) {
            Some(slot) => *slot = instruction,
            None => return Err(error!(OutOfMemory; "program too long")),
        }
        self.len += 1;
        Ok(address)
    }

    /// Rewrites the target of an emitted instruction.
    pub fn patch(&mut self, address: Address, target: Address) {
        debug_assert!(address < self.len);
        if let Some(slot) = self.memory.get_mut(address) {
            *slot = slot.with_target(target);
        }
    }

    pub fn replace(&mut self, address: Address, instruction: Instruction) {
        if let Some(slot) = self.memory.get_mut(address) {
            *slot = instruction;
        }
    }

    /// Instruction at any memory address; `None` past the end of memory.
    pub fn get(&self, address: Address) -> Option<Instruction> {
        self.memory.get(address).copied()
    }

    /// The emitted instructions.
    pub fn instructions(&self) -> &[Instruction] {
        &self.memory[..self.len]
    }

    /// Address of the command execution starts in.
    pub fn entry(&self) -> Address {
        self.entry
    }

    pub fn set_entry(&mut self, entry: Address) {
        self.entry = entry;
    }

    pub fn add_command(&mut self, name: &str, address: Address) {
        self.commands.push((name.to_string(), address));
    }

    /// Declared commands in source order.
    pub fn commands(&self) -> &[(String, Address)] {
        &self.commands
    }

    pub fn command_at(&self, address: Address) -> Option<&str> {
        self.commands
            .iter()
            .find(|(_, a)| *a == address)
            .map(|(name, _)| name.as_str())
    }

    /// One mnemonic per line, ready for the assembler.
    pub fn disassemble(&self) -> String {
        let mut s = String::new();
        for instruction in self.instructions() {
            match instruction.mnemonic() {
                Some(mnemonic) => s.push_str(&mnemonic),
                None => s.push_str("????"),
            }
            s.push('\n');
        }
        s
    }

    pub fn listing(&self) -> Listing<'_> {
        Listing::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mach::opcode::*;

    #[test]
    fn test_prefilled_with_return() {
        let program = Program::new();
        assert!(program.is_empty());
        assert_eq!(program.get(0), Some(Instruction::new(RETURN, 0)));
        assert_eq!(program.get(MEMORY_SIZE - 1), Some(Instruction::new(RETURN, 0)));
        assert_eq!(program.get(MEMORY_SIZE), None);
    }

    #[test]
    fn test_push_and_patch() {
        let mut program = Program::new();
        assert_eq!(program.push(Instruction::new(MOVE_FORWARD, 1)).unwrap(), 0);
        let jump = program.push(Instruction::new(J0MP, 2)).unwrap();
        program.patch(jump, 0x123);
        assert_eq!(program.instructions()[1].bytecode(), J0MP | 0x123);
        assert_eq!(program.disassemble(), "MOVE\nJ0MP 123\n");
    }

    #[test]
    fn test_program_too_long() {
        let mut program = Program::new();
        for _ in 0..MEMORY_SIZE {
            program.push(Instruction::new(TURN_LEFT, 1)).unwrap();
        }
        let error = program.push(Instruction::new(TURN_LEFT, 1)).unwrap_err();
        assert_eq!(error.text(), "program too long");
    }
}
