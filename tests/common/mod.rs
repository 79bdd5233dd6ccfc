#![allow(dead_code)]

use karel::lang::compile;
use karel::mach::{Event, Fault, Runtime, Step};
use karel::world::World;
use std::sync::atomic::AtomicBool;

pub fn runtime(source: &str, world: World) -> Runtime {
    match compile(source) {
        Ok(program) => Runtime::new(program, world),
        Err(error) => panic!("{}", error),
    }
}

/// Compiles and runs on an empty world.
pub fn run(source: &str) -> Result<World, Fault> {
    let mut r = runtime(source, World::empty());
    exec(&mut r).map(|_| r.world().clone())
}

pub fn exec(runtime: &mut Runtime) -> Result<Vec<Step>, Fault> {
    exec_n(runtime, 5000)
}

/// Runs to the end, returning every pause on the way.
pub fn exec_n(runtime: &mut Runtime, cycles: usize) -> Result<Vec<Step>, Fault> {
    let never = AtomicBool::new(false);
    let mut pauses = vec![];
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles, &never);
        match &event {
            Event::Stopped => return Ok(pauses),
            Event::Fault(fault) => return Err(fault.clone()),
            Event::Paused(step) => pauses.push(step.clone()),
            Event::Running => {
                if prev_running {
                    panic!("{} execution cycles exceeded", cycles);
                }
            }
            Event::Interrupted => panic!("interrupted"),
        }
        prev_running = matches!(event, Event::Running);
    }
}

pub fn compile_error(source: &str) -> String {
    match compile(source) {
        Ok(_) => panic!("compiled: {}", source),
        Err(error) => error.to_string(),
    }
}
