//! # Karel
//!
//! Karel the Robot lives on a 10 by 10 floor with walls, carrying beepers
//! it can drop, pick up and sense. Programs are written in a small C-like
//! language or in assembly mnemonics; both become the same 16-bit bytecode,
//! which a virtual machine runs one instruction at a time.
//!
//! Run the executable with a source file to step through it.
//! ```text
//! karel --level cave.txt secure.karel
//! ```
//!
//! The library side is three modules. [`lang`] turns text into a
//! [`Program`](mach::Program), [`mach`] runs it and [`world`] is what it
//! runs against.
//!
//! ```
//! use karel::lang::compile;
//! use karel::mach::Runtime;
//! use karel::world::World;
//!
//! let program = compile("void main() { moveForward(); dropBeeper(); }").unwrap();
//! let mut runtime = Runtime::new(program, World::empty());
//! while !runtime.step().unwrap().halted {}
//! assert!(runtime.world().beeper_at(1, 0));
//! ```

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/chapter_1.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_1;

#[path = "doc/chapter_2.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_2;

#[path = "doc/appendix_a.rs"]
#[allow(non_snake_case)]
pub mod ___Appendix_A;

pub mod lang;
pub mod mach;
pub mod term;
pub mod world;
