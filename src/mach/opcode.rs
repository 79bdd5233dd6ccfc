use super::Address;
use crate::lang::Line;

/// ## Instruction set
///
/// Every instruction is one 16-bit word. The top nibble is the category,
/// the low 12 bits the target. In the `NORM` category the target is itself
/// a primitive opcode; the other categories use it as a repeat count or
/// an address. Twelve bits limit program memory to 4096 words.
///
/// ```text
/// 0x0000          RET
/// 0x0001..0x0006  MOVE TRNL TRNA TRNR PICK DROP     (pause always)
/// 0x0007..0x000b  BEEP HEAD LCLR FCLR RCLR          (never pause)
/// 0x000c..0x000f  NOT AND OR XOR                    (never pause)
/// 0x8nnn PUSH  0x9nnn LOOP  0xannn CALL
/// 0xbnnn JUMP  0xcnnn J0MP  0xdnnn J1MP
/// ```

pub const RETURN: u16 = 0x0000;

pub const MOVE_FORWARD: u16 = 0x0001;
pub const TURN_LEFT: u16 = 0x0002;
pub const TURN_AROUND: u16 = 0x0003;
pub const TURN_RIGHT: u16 = 0x0004;
pub const PICK_BEEPER: u16 = 0x0005;
pub const DROP_BEEPER: u16 = 0x0006;

pub const ON_BEEPER: u16 = 0x0007;
pub const BEEPER_AHEAD: u16 = 0x0008;
pub const LEFT_IS_CLEAR: u16 = 0x0009;
pub const FRONT_IS_CLEAR: u16 = 0x000a;
pub const RIGHT_IS_CLEAR: u16 = 0x000b;

pub const NOT: u16 = 0x000c;
pub const AND: u16 = 0x000d;
pub const OR: u16 = 0x000e;
pub const XOR: u16 = 0x000f;

pub const NORM: u16 = 0x0000;

pub const PUSH: u16 = 0x8000;
pub const LOOP: u16 = 0x9000;
pub const CALL: u16 = 0xa000;

pub const JUMP: u16 = 0xb000;
pub const J0MP: u16 = 0xc000;
pub const J1MP: u16 = 0xd000;

pub const CATEGORY_MASK: u16 = 0xf000;
pub const TARGET_MASK: u16 = 0x0fff;

/// Built-in commands callable from source, with their primitive opcodes.
pub const BUILTIN_COMMANDS: [(&str, u16); 6] = [
    ("moveForward", MOVE_FORWARD),
    ("turnLeft", TURN_LEFT),
    ("turnAround", TURN_AROUND),
    ("turnRight", TURN_RIGHT),
    ("pickBeeper", PICK_BEEPER),
    ("dropBeeper", DROP_BEEPER),
];

/// Built-in sensing conditions, with their primitive opcodes.
pub const BUILTIN_CONDITIONS: [(&str, u16); 5] = [
    ("onBeeper", ON_BEEPER),
    ("beeperAhead", BEEPER_AHEAD),
    ("leftIsClear", LEFT_IS_CLEAR),
    ("frontIsClear", FRONT_IS_CLEAR),
    ("rightIsClear", RIGHT_IS_CLEAR),
];

pub fn builtin_command(name: &str) -> Option<u16> {
    BUILTIN_COMMANDS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, bytecode)| *bytecode)
}

pub fn builtin_condition(name: &str) -> Option<u16> {
    BUILTIN_CONDITIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, bytecode)| *bytecode)
}

/// A decoded instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Return,
    MoveForward,
    TurnLeft,
    TurnAround,
    TurnRight,
    PickBeeper,
    DropBeeper,
    OnBeeper,
    BeeperAhead,
    LeftIsClear,
    FrontIsClear,
    RightIsClear,
    Not,
    And,
    Or,
    Xor,
    /// Push a repeat count on the loop stack.
    Push(u16),
    /// Count down the top of the loop stack, branch to target+1 while nonzero.
    Loop(Address),
    Call(Address),
    Jump(Address),
    /// Jump if the popped condition is false.
    J0mp(Address),
    /// Jump if the popped condition is true.
    J1mp(Address),
}

impl Opcode {
    pub fn decode(bytecode: u16) -> Option<Opcode> {
        use Opcode::*;
        let target = bytecode & TARGET_MASK;
        let address = target as Address;
        match bytecode & CATEGORY_MASK {
            NORM => match target {
                RETURN => Some(Return),
                MOVE_FORWARD => Some(MoveForward),
                TURN_LEFT => Some(TurnLeft),
                TURN_AROUND => Some(TurnAround),
                TURN_RIGHT => Some(TurnRight),
                PICK_BEEPER => Some(PickBeeper),
                DROP_BEEPER => Some(DropBeeper),
                ON_BEEPER => Some(OnBeeper),
                BEEPER_AHEAD => Some(BeeperAhead),
                LEFT_IS_CLEAR => Some(LeftIsClear),
                FRONT_IS_CLEAR => Some(FrontIsClear),
                RIGHT_IS_CLEAR => Some(RightIsClear),
                NOT => Some(Not),
                AND => Some(And),
                OR => Some(Or),
                XOR => Some(Xor),
                _ => None,
            },
            PUSH => Some(Push(target)),
            LOOP => Some(Loop(address)),
            CALL => Some(Call(address)),
            JUMP => Some(Jump(address)),
            J0MP => Some(J0mp(address)),
            J1MP => Some(J1mp(address)),
            _ => None,
        }
    }

    pub fn encode(self) -> u16 {
        use Opcode::*;
        let addressed = |category: u16, target: Address| category | (target as u16 & TARGET_MASK);
        match self {
            Return => RETURN,
            MoveForward => MOVE_FORWARD,
            TurnLeft => TURN_LEFT,
            TurnAround => TURN_AROUND,
            TurnRight => TURN_RIGHT,
            PickBeeper => PICK_BEEPER,
            DropBeeper => DROP_BEEPER,
            OnBeeper => ON_BEEPER,
            BeeperAhead => BEEPER_AHEAD,
            LeftIsClear => LEFT_IS_CLEAR,
            FrontIsClear => FRONT_IS_CLEAR,
            RightIsClear => RIGHT_IS_CLEAR,
            Not => NOT,
            And => AND,
            Or => OR,
            Xor => XOR,
            Push(count) => PUSH | (count & TARGET_MASK),
            Loop(a) => addressed(LOOP, a),
            Call(a) => addressed(CALL, a),
            Jump(a) => addressed(JUMP, a),
            J0mp(a) => addressed(J0MP, a),
            J1mp(a) => addressed(J1MP, a),
        }
    }

    /// The four letter name used by the assembler and the listing.
    pub fn name(self) -> &'static str {
        use Opcode::*;
        match self {
            Return => "RET",
            MoveForward => "MOVE",
            TurnLeft => "TRNL",
            TurnAround => "TRNA",
            TurnRight => "TRNR",
            PickBeeper => "PICK",
            DropBeeper => "DROP",
            OnBeeper => "BEEP",
            BeeperAhead => "HEAD",
            LeftIsClear => "LCLR",
            FrontIsClear => "FCLR",
            RightIsClear => "RCLR",
            Not => "NOT",
            And => "AND",
            Or => "OR",
            Xor => "XOR",
            Push(_) => "PUSH",
            Loop(_) => "LOOP",
            Call(_) => "CALL",
            Jump(_) => "JUMP",
            J0mp(_) => "J0MP",
            J1mp(_) => "J1MP",
        }
    }

    /// Category word for an addressed mnemonic, `None` for primitives.
    pub fn category_named(name: &str) -> Option<u16> {
        match name {
            "PUSH" => Some(PUSH),
            "LOOP" => Some(LOOP),
            "CALL" => Some(CALL),
            "JUMP" => Some(JUMP),
            "J0MP" => Some(J0MP),
            "J1MP" => Some(J1MP),
            _ => None,
        }
    }

    /// Primitive word for an unaddressed mnemonic.
    pub fn primitive_named(name: &str) -> Option<u16> {
        (RETURN..=XOR).find(|&bytecode| match Opcode::decode(bytecode) {
            Some(op) => op.name() == name,
            None => false,
        })
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match *self {
            Push(n) => write!(f, "PUSH {:03x}", n),
            Loop(a) | Call(a) | Jump(a) | J0mp(a) | J1mp(a) => write!(f, "{} {:03x}", self.name(), a),
            _ => write!(f, "{}", self.name()),
        }
    }
}

/// An instruction word plus the source line that produced it.
/// Line 0 marks instructions the compiler synthesized for control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    bytecode: u16,
    position: Line,
}

impl Default for Instruction {
    fn default() -> Instruction {
        Instruction::new(RETURN, 0)
    }
}

impl Instruction {
    pub const fn new(bytecode: u16, position: Line) -> Instruction {
        Instruction { bytecode, position }
    }

    pub fn bytecode(&self) -> u16 {
        self.bytecode
    }

    pub fn category(&self) -> u16 {
        self.bytecode & CATEGORY_MASK
    }

    pub fn target(&self) -> u16 {
        self.bytecode & TARGET_MASK
    }

    pub fn position(&self) -> Line {
        self.position
    }

    pub fn compiled_from_source(&self) -> bool {
        self.position > 0
    }

    pub fn with_target(&self, target: Address) -> Instruction {
        Instruction::new(self.category() | (target as u16 & TARGET_MASK), self.position)
    }

    pub fn decode(&self) -> Option<Opcode> {
        Opcode::decode(self.bytecode)
    }

    pub fn mnemonic(&self) -> Option<String> {
        self.decode().map(|op| op.to_string())
    }

    /// Robot commands always pause, sensing and logic never do, everything
    /// else pauses only when a source statement produced it.
    pub fn should_pause(&self) -> bool {
        match self.bytecode {
            MOVE_FORWARD..=DROP_BEEPER => true,
            ON_BEEPER..=XOR => false,
            _ => self.compiled_from_source(),
        }
    }
}
