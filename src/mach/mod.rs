/*!
## Rust Machine Module

This Rust module holds the Karel instruction set, program memory and the
virtual machine that runs a program against a [`World`](crate::world::World).

*/

pub type Address = usize;

/// Words of program memory. Twelve bit targets address all of it.
pub const MEMORY_SIZE: usize = 4096;

#[macro_use]
mod fault;
mod link;
mod listing;
pub mod opcode;
mod program;
mod runtime;
mod stack;

pub use fault::{Fault, FaultCode};
pub use link::Link;
pub use listing::Listing;
pub use opcode::{Instruction, Opcode};
pub use program::Program;
pub use runtime::{Event, Runtime, Step};
pub use stack::Stack;

/// Depth bounds for the runtime stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub call_depth: usize,
    pub loop_depth: usize,
    pub condition_depth: usize,
}

impl Default for Limits {
    fn default() -> Limits {
        Limits {
            call_depth: 1024,
            loop_depth: 1024,
            condition_depth: 64,
        }
    }
}

#[cfg(test)]
mod tests;
