use super::{Address, Fault, FaultCode, Instruction, Limits, Opcode, Program, Stack, MEMORY_SIZE};
use crate::world::World;
use log::{debug, trace, warn};
use std::sync::atomic::{AtomicBool, Ordering};

type Result<T> = std::result::Result<T, Fault>;

/// ## Virtual machine
///
/// Runs a [`Program`] against a [`World`] one instruction at a time.
/// Execution starts at address 0 and ends when a `RET` finds the call
/// stack empty. The world the runtime was given is kept so that
/// [`reset`](Runtime::reset) can restore it.

#[derive(Debug, Clone)]
pub struct Runtime {
    program: Program,
    initial: World,
    world: World,
    pc: Address,
    calls: Stack<Address>,
    loops: Stack<u16>,
    conditions: Stack<bool>,
    halted: bool,
    fault: Option<Fault>,
}

/// What one retired instruction left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Address of the instruction that ran.
    pub address: Address,
    pub instruction: Instruction,
    /// Program counter after the instruction.
    pub pc: Address,
    pub pause: bool,
    pub halted: bool,
    pub world: World,
}

/// Outcome of a batch of instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Paused(Step),
    Running,
    Stopped,
    Interrupted,
    Fault(Fault),
}

impl Default for Runtime {
    fn default() -> Runtime {
        Runtime::new(Program::default(), World::default())
    }
}

impl Runtime {
    pub fn new(program: Program, world: World) -> Runtime {
        Runtime::with_limits(program, world, Limits::default())
    }

    pub fn with_limits(program: Program, world: World, limits: Limits) -> Runtime {
        Runtime {
            program,
            initial: world.clone(),
            world,
            pc: 0,
            calls: Stack::new(
                limits.call_depth,
                FaultCode::StackOverflow,
                FaultCode::StackOverflow,
            ),
            loops: Stack::new(
                limits.loop_depth,
                FaultCode::LoopOverflow,
                FaultCode::LoopUnderflow,
            ),
            conditions: Stack::new(
                limits.condition_depth,
                FaultCode::ConditionOverflow,
                FaultCode::ConditionUnderflow,
            ),
            halted: false,
            fault: None,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn pc(&self) -> Address {
        self.pc
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    pub fn call_depth(&self) -> usize {
        self.calls.len()
    }

    /// Replaces the program and rewinds.
    pub fn load(&mut self, program: Program) {
        self.program = program;
        self.reset();
    }

    /// Replaces the starting world and rewinds.
    pub fn set_world(&mut self, world: World) {
        self.initial = world;
        self.reset();
    }

    /// Back to the starting world with the program counter at 0.
    pub fn reset(&mut self) {
        self.world = self.initial.clone();
        self.pc = 0;
        self.calls.clear();
        self.loops.clear();
        self.conditions.clear();
        self.halted = false;
        self.fault = None;
    }

    /// Retires one instruction. Once faulted, keeps returning the same
    /// fault until reset. Once halted, does nothing.
    pub fn step(&mut self) -> Result<Step> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }
        let address = self.pc;
        if self.halted {
            return Ok(self.report(address, Instruction::default(), false));
        }
        let instruction = match self.program.get(address) {
            Some(instruction) => instruction,
            None => return Err(self.fail(fault!(AddressOutOfRange, address))),
        };
        trace!("{:03x} {}", address, instruction.mnemonic().unwrap_or_default());
        if let Err(fault) = self.retire(address, instruction) {
            return Err(self.fail(fault.at(address)));
        }
        if self.halted {
            debug!("halted at {:03x}", address);
        }
        Ok(self.report(address, instruction, instruction.should_pause()))
    }

    /// Runs up to `cycles` instructions, stopping early at a pause, a halt,
    /// a fault or when `interrupted` is raised. The flag is only read
    /// between instructions and is left for the caller to clear.
    pub fn execute(&mut self, cycles: usize, interrupted: &AtomicBool) -> Event {
        for _ in 0..cycles {
            if interrupted.load(Ordering::SeqCst) {
                return Event::Interrupted;
            }
            match self.step() {
                Err(fault) => return Event::Fault(fault),
                Ok(step) if step.halted => return Event::Stopped,
                Ok(step) if step.pause => return Event::Paused(step),
                Ok(_) => {}
            }
        }
        Event::Running
    }

    fn report(&self, address: Address, instruction: Instruction, pause: bool) -> Step {
        Step {
            address,
            instruction,
            pc: self.pc,
            pause,
            halted: self.halted,
            world: self.world.clone(),
        }
    }

    fn fail(&mut self, fault: Fault) -> Fault {
        warn!("{}", fault);
        self.fault = Some(fault.clone());
        fault
    }

    fn retire(&mut self, address: Address, instruction: Instruction) -> Result<()> {
        use Opcode::*;
        let opcode = match instruction.decode() {
            Some(opcode) => opcode,
            None => {
                let code = FaultCode::IllegalBytecode(instruction.bytecode());
                return Err(Fault::new(code));
            }
        };
        let mut next = address + 1;
        match opcode {
            Return => {
                if self.calls.is_empty() {
                    self.halted = true;
                    next = address;
                } else {
                    next = self.calls.pop()?;
                }
            }
            MoveForward => self.world = self.world.move_forward()?,
            TurnLeft => self.world = self.world.turn_left(),
            TurnAround => self.world = self.world.turn_around(),
            TurnRight => self.world = self.world.turn_right(),
            PickBeeper => self.world = self.world.pick_beeper()?,
            DropBeeper => self.world = self.world.drop_beeper()?,
            OnBeeper => self.conditions.push(self.world.on_beeper())?,
            BeeperAhead => self.conditions.push(self.world.beeper_ahead())?,
            LeftIsClear => self.conditions.push(self.world.left_is_clear())?,
            FrontIsClear => self.conditions.push(self.world.front_is_clear())?,
            RightIsClear => self.conditions.push(self.world.right_is_clear())?,
            Not => {
                let top = self.conditions.last_mut()?;
                *top = !*top;
            }
            And => {
                let (a, b) = self.conditions.pop_2()?;
                self.conditions.push(a && b)?;
            }
            Or => {
                let (a, b) = self.conditions.pop_2()?;
                self.conditions.push(a || b)?;
            }
            Xor => {
                let (a, b) = self.conditions.pop_2()?;
                self.conditions.push(a != b)?;
            }
            Push(count) => self.loops.push(count)?,
            Loop(target) => {
                let count = self.loops.last_mut()?;
                *count = count.saturating_sub(1);
                if *count > 0 {
                    next = target + 1;
                } else {
                    self.loops.pop()?;
                }
            }
            Call(target) => {
                self.calls.push(address + 1)?;
                next = target;
            }
            Jump(target) => next = target,
            J0mp(target) => {
                if !self.conditions.pop()? {
                    next = target;
                }
            }
            J1mp(target) => {
                if self.conditions.pop()? {
                    next = target;
                }
            }
        }
        if next >= MEMORY_SIZE {
            return Err(fault!(AddressOutOfRange));
        }
        self.pc = next;
        Ok(())
    }
}
