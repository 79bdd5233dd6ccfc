use super::{lex::Lexer, token::*, Error, Line};
use crate::error;
use crate::mach::opcode::*;
use crate::mach::{Address, Instruction, Limits, Link, Opcode, Program};
use log::debug;

type Result<T> = std::result::Result<T, Error>;

/// Blocks and condition groups deeper than this are refused.
pub const MAX_NESTING: usize = 256;

/// Compiles Karel source. Execution enters `main`, or the first declared
/// command when there is no `main`.
pub fn compile(source: &str) -> Result<Program> {
    Compiler::new(source)?.program(None)
}

/// Compiles Karel source entering the command named `entry`.
pub fn compile_entry(source: &str, entry: &str) -> Result<Program> {
    Compiler::new(source)?.program(Some(entry))
}

/// ## Single pass compiler
///
/// Recursive descent straight into program memory, one token of
/// lookahead. Forward jumps are emitted with a zero target and patched
/// once the end of their construct is known. Calls go through [`Link`]
/// since a command may be called before it is declared.
///
/// Conditions are checked against the runtime condition stack while they
/// compile, so a program that compiles never runs out of condition slots.
///
/// ```text
/// 000 CALL entry
/// 001 RET
/// 002 first command ... RET
/// ```

struct Compiler<'a> {
    lexer: Lexer<'a>,
    token: Token,
    program: Program,
    link: Link,
    depth: usize,
    operands: usize,
    max_operands: usize,
}

impl<'a> Compiler<'a> {
    fn new(source: &'a str) -> Result<Compiler<'a>> {
        let mut lexer = Lexer::new(source);
        let token = lexer.next_token()?;
        Ok(Compiler {
            lexer,
            token,
            program: Program::new(),
            link: Link::new(),
            depth: 0,
            operands: 0,
            max_operands: Limits::default().condition_depth,
        })
    }

    fn program(mut self, entry: Option<&str>) -> Result<Program> {
        let bootstrap = self.emit(CALL, 0)?;
        self.emit(RETURN, 0)?;
        loop {
            match self.token.kind {
                Kind::EndOfInput => break,
                Kind::Void => self.command()?,
                Kind::ClosingBrace => {
                    return Err(error!(SyntaxError, self.token.position; "Too many closing braces"))
                }
                _ => {
                    return Err(error!(SyntaxError, self.token.position; "illegal start of command"))
                }
            }
        }
        self.link.link(&mut self.program, self.lexer.pool())?;
        match self.entry(entry)? {
            Some(address) => {
                self.program.patch(bootstrap, address);
                self.program.set_entry(address);
            }
            None => self.program.replace(bootstrap, Instruction::new(RETURN, 0)),
        }
        debug!("compiled {} instructions", self.program.len());
        Ok(self.program)
    }

    fn entry(&self, name: Option<&str>) -> Result<Option<Address>> {
        let pool = self.lexer.pool();
        match name {
            Some(name) => match pool.lookup(name).and_then(|sym| self.link.get(sym)) {
                Some(address) => Ok(Some(address)),
                None => Err(error!(UndefinedCommand; format!("undefined command {}", name))),
            },
            None => {
                let main = pool.lookup("main").and_then(|sym| self.link.get(sym));
                Ok(main.or_else(|| self.link.first().map(|(_, address)| address)))
            }
        }
    }

    fn advance(&mut self) -> Result<Token> {
        let current = self.token;
        self.token = self.lexer.next_token()?;
        Ok(current)
    }

    fn expect(&mut self, kind: Kind, message: &str) -> Result<Token> {
        if self.token.is(kind) {
            self.advance()
        } else {
            Err(error!(SyntaxError, self.token.position; message))
        }
    }

    fn emit(&mut self, bytecode: u16, line: Line) -> Result<Address> {
        let position = self.token.position;
        self.program
            .push(Instruction::new(bytecode, line))
            .map_err(|error| error.at(position))
    }

    fn nested<T>(&mut self, inner: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth == MAX_NESTING {
            return Err(error!(SyntaxError, self.token.position; "nesting too deep"));
        }
        self.depth += 1;
        let result = inner(self);
        self.depth -= 1;
        result
    }

    fn spelling(&self, token: &Token) -> String {
        token
            .lexeme
            .and_then(|symbol| self.lexer.pool().get(symbol))
            .unwrap_or_default()
            .to_string()
    }

    fn command(&mut self) -> Result<()> {
        self.advance()?;
        let name_token = self.expect(Kind::Identifier, "expected identifier")?;
        let name = self.spelling(&name_token);
        if builtin_command(&name).is_some() || builtin_condition(&name).is_some() {
            return Err(error!(DuplicateCommand, name_token.position;
                format!("{} is a builtin command", name)));
        }
        self.expect(Kind::OpeningParen, "expected (")?;
        self.expect(Kind::ClosingParen, "expected )")?;
        let address = self.program.len();
        let symbol = name_token.lexeme.unwrap_or_default();
        if !self.link.insert(symbol, address) {
            return Err(error!(DuplicateCommand, name_token.position;
                format!("duplicate command {}", name)));
        }
        self.program.add_command(&name, address);
        debug!("command {} at {:03x}", name, address);
        let closing = self.block()?;
        self.emit(RETURN, closing.line)?;
        Ok(())
    }

    /// Statements between braces. Returns the closing brace.
    fn block(&mut self) -> Result<Token> {
        self.expect(Kind::OpeningBrace, "expected {")?;
        self.nested(Self::statements)
    }

    fn statements(&mut self) -> Result<Token> {
        loop {
            match self.token.kind {
                Kind::ClosingBrace => return self.advance(),
                Kind::EndOfInput => {
                    return Err(error!(SyntaxError, self.token.position; "unclosed block"))
                }
                Kind::Void => {
                    return Err(error!(SyntaxError, self.token.position;
                        "nested commands are not allowed"))
                }
                _ => self.statement()?,
            }
        }
    }

    fn statement(&mut self) -> Result<()> {
        match self.token.kind {
            Kind::Identifier => self.call(),
            Kind::If => self.if_statement(),
            Kind::While => self.while_statement(),
            Kind::Repeat => self.repeat_statement(),
            _ => Err(error!(SyntaxError, self.token.position; "illegal start of statement")),
        }
    }

    fn call(&mut self) -> Result<()> {
        let callee = self.advance()?;
        let name = self.spelling(&callee);
        if builtin_condition(&name).is_some() {
            return Err(error!(SyntaxError, callee.position; "illegal start of statement"));
        }
        self.expect(Kind::OpeningParen, "expected (")?;
        self.expect(Kind::ClosingParen, "expected )")?;
        self.expect(Kind::Semicolon, "expected ;")?;
        match builtin_command(&name) {
            Some(bytecode) => {
                self.emit(bytecode, callee.line)?;
            }
            None => {
                let address = self.emit(CALL, callee.line)?;
                let symbol = callee.lexeme.unwrap_or_default();
                self.link.link_addr_to_symbol(address, callee.position, symbol);
            }
        }
        Ok(())
    }

    /// An `else if` chain compiles in one loop; every skip jump lands
    /// after the last branch.
    fn if_statement(&mut self) -> Result<()> {
        let mut skips = vec![];
        loop {
            let keyword = self.advance()?;
            self.parenthesized_condition()?;
            let branch = self.emit(J0MP, keyword.line)?;
            self.block()?;
            if !self.token.is(Kind::Else) {
                self.program.patch(branch, self.program.len());
                break;
            }
            self.advance()?;
            skips.push(self.emit(JUMP, 0)?);
            self.program.patch(branch, self.program.len());
            match self.token.kind {
                Kind::OpeningBrace => {
                    self.block()?;
                    break;
                }
                Kind::If => continue,
                _ => return Err(error!(SyntaxError, self.token.position; "expected { or if")),
            }
        }
        let end = self.program.len();
        for skip in skips {
            self.program.patch(skip, end);
        }
        Ok(())
    }

    fn while_statement(&mut self) -> Result<()> {
        let keyword = self.advance()?;
        let start = self.program.len();
        self.parenthesized_condition()?;
        let exit = self.emit(J0MP, keyword.line)?;
        self.block()?;
        self.emit(Opcode::Jump(start).encode(), 0)?;
        self.program.patch(exit, self.program.len());
        Ok(())
    }

    fn repeat_statement(&mut self) -> Result<()> {
        let keyword = self.advance()?;
        self.expect(Kind::OpeningParen, "expected (")?;
        let number = self.expect(Kind::Number, "expected number")?;
        let digits = self.spelling(&number);
        let count = match digits.parse::<i32>() {
            Ok(n) if (2..=TARGET_MASK as i32).contains(&n) => n as u16,
            _ => {
                return Err(error!(OutOfRange, number.position;
                    format!("{} out of range", digits)))
            }
        };
        self.expect(Kind::ClosingParen, "expected )")?;
        let push = self.emit(Opcode::Push(count).encode(), keyword.line)?;
        let closing = self.block()?;
        self.emit(Opcode::Loop(push).encode(), closing.line)?;
        Ok(())
    }

    // *** Conditions: `||` loosest, then `&&`, then prefix `!`

    /// Leaves one condition for the jump that follows.
    fn parenthesized_condition(&mut self) -> Result<()> {
        self.expect(Kind::OpeningParen, "expected (")?;
        self.operands = 0;
        self.disjunction()?;
        self.expect(Kind::ClosingParen, "expected )")?;
        self.operands = 0;
        Ok(())
    }

    fn combine(&mut self, bytecode: u16, line: Line) -> Result<()> {
        self.emit(bytecode, line)?;
        self.operands -= 1;
        Ok(())
    }

    fn disjunction(&mut self) -> Result<()> {
        self.conjunction()?;
        while self.token.is(Kind::BarBar) {
            let operator = self.advance()?;
            self.conjunction()?;
            self.combine(OR, operator.line)?;
        }
        Ok(())
    }

    fn conjunction(&mut self) -> Result<()> {
        self.primary()?;
        while self.token.is(Kind::AmpersandAmpersand) {
            let operator = self.advance()?;
            self.primary()?;
            self.combine(AND, operator.line)?;
        }
        Ok(())
    }

    fn primary(&mut self) -> Result<()> {
        match self.token.kind {
            Kind::Bang => {
                let bang = self.advance()?;
                self.nested(Self::primary)?;
                self.emit(NOT, bang.line)?;
                Ok(())
            }
            Kind::OpeningParen => {
                self.advance()?;
                self.nested(Self::disjunction)?;
                self.expect(Kind::ClosingParen, "expected )")?;
                Ok(())
            }
            Kind::Identifier => {
                let sensor = self.token;
                let name = self.spelling(&sensor);
                let bytecode = match builtin_condition(&name) {
                    Some(bytecode) => bytecode,
                    None => {
                        return Err(error!(SyntaxError, sensor.position;
                            "illegal start of condition"))
                    }
                };
                if self.operands >= self.max_operands {
                    return Err(error!(OutOfRange, sensor.position; "condition too complex"));
                }
                self.advance()?;
                self.expect(Kind::OpeningParen, "expected (")?;
                self.expect(Kind::ClosingParen, "expected )")?;
                self.emit(bytecode, sensor.line)?;
                self.operands += 1;
                Ok(())
            }
            _ => Err(error!(SyntaxError, self.token.position; "illegal start of condition")),
        }
    }
}
