//! # Karel
//!
//! Steps Karel the Robot through a program in the terminal.
//!

use clap::Parser;
use karel::term::{self, Options};

fn main() {
    env_logger::init();
    term::main(Options::parse());
}
