use super::{Address, Program};

/// ## Program listing
///
/// Address, bytecode and mnemonic of every emitted instruction under an
/// `@` header. The assembler skips the header and the hex columns, so a
/// listing assembles back into the same program.

#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    program: &'a Program,
}

pub const HEADER: &str = "@   CODE MNEMONIC";

impl<'a> Listing<'a> {
    pub fn new(program: &'a Program) -> Listing<'a> {
        Listing { program }
    }

    /// A single listing row.
    pub fn line(&self, address: Address) -> Option<String> {
        let instruction = self.program.get(address)?;
        let mnemonic = instruction.mnemonic().unwrap_or_else(|| "????".to_string());
        Some(format!(
            "{:03x} {:04x} {}",
            address,
            instruction.bytecode(),
            mnemonic
        ))
    }

    /// Rows around `address`, for showing where a program is.
    pub fn window(&self, address: Address, before: usize, after: usize) -> Vec<(Address, String)> {
        let start = address.saturating_sub(before);
        let end = (address + after + 1).min(self.program.len().max(address + 1));
        (start..end)
            .filter_map(|a| self.line(a).map(|s| (a, s)))
            .collect()
    }
}

impl<'a> std::fmt::Display for Listing<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{}", HEADER)?;
        for address in 0..self.program.len() {
            if let Some(line) = self.line(address) {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}
