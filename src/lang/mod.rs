/*!
# Rust Language Module

This Rust module provides lexical analysis of the Karel language and the
two front ends that turn text into a [`Program`](crate::mach::Program):
the single pass compiler and the assembler.

*/

/// Byte offset into source text.
pub type Position = usize;
/// 1-based source line; 0 means "not from source".
pub type Line = usize;
/// Index of a lexeme in the [`Pool`].
pub type Symbol = usize;

#[macro_use]
mod error;
mod assemble;
mod compile;
mod lex;
mod pool;
mod token;

pub use assemble::assemble;
pub use compile::{compile, compile_entry, MAX_NESTING};
pub use error::Error;
pub use error::ErrorCode;
pub use lex::{lex, Lexer};
pub use pool::{Pool, KEYWORD_COUNT};
pub use token::{Kind, Token, KEYWORDS, SYMBOLS};

#[cfg(test)]
mod tests;
