use super::Address;
use crate::world;

/// A runtime failure. It ends the current run; only `reset` recovers.
#[derive(Clone, PartialEq, Eq)]
pub struct Fault {
    code: FaultCode,
    address: Address,
}

#[doc(hidden)]
#[macro_export]
macro_rules! fault {
    ($code:ident) => {
        $crate::mach::Fault::new($crate::mach::FaultCode::$code)
    };
    ($code:ident, $addr:expr) => {
        $crate::mach::Fault::new($crate::mach::FaultCode::$code).at($addr)
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCode {
    StackOverflow,
    LoopOverflow,
    LoopUnderflow,
    ConditionOverflow,
    ConditionUnderflow,
    IllegalBytecode(u16),
    AddressOutOfRange,
    World(world::Error),
}

impl Fault {
    pub fn new(code: FaultCode) -> Fault {
        Fault { code, address: 0 }
    }

    pub fn at(self, address: Address) -> Fault {
        Fault { address, ..self }
    }

    pub fn code(&self) -> FaultCode {
        self.code
    }

    /// Address of the instruction that faulted.
    pub fn address(&self) -> Address {
        self.address
    }
}

impl From<world::Error> for Fault {
    fn from(error: world::Error) -> Fault {
        Fault::new(FaultCode::World(error))
    }
}

impl std::fmt::Debug for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fault {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use FaultCode::*;
        match self.code {
            StackOverflow => write!(f, "stack overflow")?,
            LoopOverflow => write!(f, "too many nested repeats")?,
            LoopUnderflow => write!(f, "loop without repeat count")?,
            ConditionOverflow => write!(f, "condition too complex")?,
            ConditionUnderflow => write!(f, "no condition to test")?,
            IllegalBytecode(bytecode) => write!(f, "illegal bytecode {:04x}", bytecode)?,
            AddressOutOfRange => write!(f, "program counter out of range")?,
            World(error) => write!(f, "{}", error)?,
        }
        write!(f, " at {:03x}", self.address)
    }
}

impl std::error::Error for Fault {}
