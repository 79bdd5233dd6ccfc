use super::{Address, Program};
use crate::error;
use crate::lang::{Error, Pool, Position, Symbol};
use std::collections::{BTreeMap, HashMap};

type Result<T> = std::result::Result<T, Error>;

/// ## Command addresses
///
/// Calls may name a command declared further down. Each such call is
/// recorded against the address of its `CALL` and patched by
/// [`link`](Link::link) once every declaration has been seen.

#[derive(Debug, Default)]
pub struct Link {
    symbols: HashMap<Symbol, Address>,
    order: Vec<Symbol>,
    unlinked: BTreeMap<Address, (Position, Symbol)>,
}

impl Link {
    pub fn new() -> Link {
        Link::default()
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
        self.order.clear();
        self.unlinked.clear();
    }

    /// Records a declaration. Returns false when `sym` is already declared.
    pub fn insert(&mut self, sym: Symbol, addr: Address) -> bool {
        if self.symbols.contains_key(&sym) {
            return false;
        }
        self.symbols.insert(sym, addr);
        self.order.push(sym);
        true
    }

    pub fn get(&self, sym: Symbol) -> Option<Address> {
        self.symbols.get(&sym).copied()
    }

    /// First declared command.
    pub fn first(&self) -> Option<(Symbol, Address)> {
        let sym = *self.order.first()?;
        self.get(sym).map(|addr| (sym, addr))
    }

    pub fn link_addr_to_symbol(&mut self, addr: Address, pos: Position, symbol: Symbol) {
        self.unlinked.insert(addr, (pos, symbol));
    }

    /// Patches every recorded call. The first call to a command that was
    /// never declared is reported.
    pub fn link(&mut self, program: &mut Program, pool: &Pool) -> Result<()> {
        for (op_addr, (pos, symbol)) in std::mem::take(&mut self.unlinked) {
            match self.symbols.get(&symbol) {
                Some(dest) => program.patch(op_addr, *dest),
                None => {
                    let name = pool.get(symbol).unwrap_or("?");
                    return Err(error!(UndefinedCommand, pos; format!("undefined command {}", name)));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mach::opcode::*;
    use crate::mach::Instruction;

    #[test]
    fn test_forward_call_is_patched() {
        let mut pool = Pool::default();
        let (later, _) = pool.word("later");
        let mut program = Program::new();
        let mut link = Link::new();
        let call = program.push(Instruction::new(CALL, 1)).unwrap();
        link.link_addr_to_symbol(call, 0, later);
        program.push(Instruction::new(RETURN, 1)).unwrap();
        let addr = program.push(Instruction::new(TURN_LEFT, 2)).unwrap();
        assert!(link.insert(later, addr));
        link.link(&mut program, &pool).unwrap();
        assert_eq!(program.instructions()[call].bytecode(), CALL | 2);
    }

    #[test]
    fn test_undefined_and_duplicate() {
        let mut pool = Pool::default();
        let (ghost, _) = pool.word("ghost");
        let mut program = Program::new();
        let mut link = Link::new();
        assert!(link.insert(ghost, 5));
        assert!(!link.insert(ghost, 9));
        assert_eq!(link.get(ghost), Some(5));

        link.clear();
        let call = program.push(Instruction::new(CALL, 1)).unwrap();
        link.link_addr_to_symbol(call, 17, ghost);
        let error = link.link(&mut program, &pool).unwrap_err();
        assert_eq!(error.text(), "undefined command ghost");
        assert_eq!(error.position(), 17);
    }
}
