/*!
## Terminal stepper

Loads a program and a world, then steps through it from a prompt,
drawing the world after every command. Ctrl-C stops a running program.

*/

use crate::lang::{assemble, compile, compile_entry, Error};
use crate::mach::{Event, Fault, Program, Runtime};
use crate::world::{level, Heading, World, HEIGHT, WALL_EAST, WALL_NORTH, WALL_SOUTH, WALL_WEST, WIDTH};
use ansi_term::{Colour, Style};
use clap::Parser;
use linefeed::{Interface, ReadResult, Signal};
use log::{debug, info};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "karel")]
#[command(about = "Step Karel the Robot through a program")]
pub struct Options {
    /// Karel source file, or assembly with --asm
    pub file: PathBuf,

    /// Read the file as assembly mnemonics
    #[arg(long)]
    pub asm: bool,

    /// World description to start in
    #[arg(long)]
    pub level: Option<PathBuf>,

    /// Scatter beepers over an empty floor from this seed
    #[arg(long, conflicts_with = "level")]
    pub random: Option<u64>,

    /// Share of cells given a beeper by --random
    #[arg(long, default_value_t = 0.25)]
    pub density: f64,

    /// Command to start in instead of main
    #[arg(long)]
    pub entry: Option<String>,

    /// Print the program listing and exit
    #[arg(long)]
    pub list: bool,

    /// Instructions run between checks of the prompt
    #[arg(long, default_value_t = 5000)]
    pub cycles: usize,
}

pub fn main(options: Options) {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        eprintln!("{}", error);
    }
    let source = match std::fs::read_to_string(&options.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("{}: {}", options.file.display(), error);
            std::process::exit(1);
        }
    };
    let program = match build(&options, &source) {
        Ok(program) => program,
        Err(error) => {
            eprintln!("{}", diagnostic(&source, &error));
            std::process::exit(1);
        }
    };
    if options.list {
        print!("{}", program.listing());
        return;
    }
    let world = match start_world(&options) {
        Ok(world) => world,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    };
    let mut stepper = Stepper {
        runtime: Runtime::new(program, world),
        source,
        cycles: options.cycles.max(1),
        interrupted,
        options,
    };
    if let Err(error) = stepper.main_loop() {
        eprintln!("{}", error);
    }
}

fn build(options: &Options, source: &str) -> Result<Program, Error> {
    let program = if options.asm {
        assemble(source)?
    } else {
        match &options.entry {
            Some(entry) => compile_entry(source, entry)?,
            None => compile(source)?,
        }
    };
    info!("{} instructions loaded", program.len());
    Ok(program)
}

fn start_world(options: &Options) -> Result<World, String> {
    if let Some(path) = &options.level {
        let text = std::fs::read_to_string(path)
            .map_err(|error| format!("{}: {}", path.display(), error))?;
        return level::parse(&text).map_err(|error| format!("{}: {}", path.display(), error));
    }
    if let Some(seed) = options.random {
        debug!("random level {} at density {}", seed, options.density);
        return Ok(level::random(seed, options.density));
    }
    Ok(World::empty())
}

/// The error and its source line with the offending column underlined.
fn diagnostic(source: &str, error: &Error) -> String {
    let (line, column) = error.line_and_column(source);
    let text = source.lines().nth(line - 1).unwrap_or("");
    let columns = [column - 1..column];
    format!(
        "{}\n{:4} {}",
        Style::new().bold().paint(error.to_string()),
        line,
        decorate_line(text, &columns)
    )
}

fn decorate_line(ins: &str, columns: &[std::ops::Range<usize>]) -> String {
    let mut under_on = false;
    let mut out = String::new();
    let style = Style::new().underline();
    let prefix = format!("{}", style.prefix());
    let suffix = format!("{}", style.suffix());
    let mut index = 0;
    for ch in ins.chars() {
        let do_under = columns.iter().any(|c| c.contains(&index));
        if under_on {
            if !do_under {
                out.push_str(&suffix);
            }
        } else if do_under {
            out.push_str(&prefix);
        }
        under_on = do_under;
        out.push(ch);
        index += 1;
    }
    if columns.iter().any(|c| c.start == index) {
        under_on = true;
        out.push_str(&prefix);
        out.push(' ');
    }
    if under_on {
        out.push_str(&suffix);
    }
    out
}

/// The floor as text, robot in bold, beepers in yellow.
pub fn draw(world: &World) -> String {
    let mut out = String::new();
    let robot = Style::new().bold();
    let beeper = Colour::Yellow.normal();
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            out.push('+');
            out.push_str(if world.floor().touches(x, y, WALL_NORTH) {
                "---"
            } else {
                "   "
            });
        }
        out.push_str("+\n");
        for x in 0..WIDTH {
            out.push(if world.floor().touches(x, y, WALL_WEST) { '|' } else { ' ' });
            let here = (world.x(), world.y()) == (x, y);
            let cell = match (here, world.beeper_at(x, y)) {
                (true, on_beeper) => {
                    let glyph = match world.heading() {
                        Heading::East => ">",
                        Heading::North => "^",
                        Heading::West => "<",
                        Heading::South => "v",
                    };
                    let glyph = if on_beeper {
                        format!("*{}*", glyph)
                    } else {
                        format!(" {} ", glyph)
                    };
                    robot.paint(glyph).to_string()
                }
                (false, true) => beeper.paint(" * ").to_string(),
                (false, false) => "   ".to_string(),
            };
            out.push_str(&cell);
        }
        let east = world.floor().touches(WIDTH - 1, y, WALL_EAST);
        out.push_str(if east { "|\n" } else { " \n" });
    }
    for x in 0..WIDTH {
        out.push('+');
        out.push_str(if world.floor().touches(x, HEIGHT - 1, WALL_SOUTH) {
            "---"
        } else {
            "   "
        });
    }
    out.push_str("+\n");
    out
}

struct Stepper {
    runtime: Runtime,
    source: String,
    cycles: usize,
    interrupted: Arc<AtomicBool>,
    options: Options,
}

enum Until {
    Pause,
    End,
}

impl Stepper {
    fn main_loop(&mut self) -> std::io::Result<()> {
        let command = Interface::new("karel")?;
        command.set_report_signal(Signal::Interrupt, true);
        command.set_prompt("karel> ")?;
        command.write_fmt(format_args!("{}", self.status()))?;
        loop {
            let input = match command.read_line()? {
                ReadResult::Input(input) => input,
                ReadResult::Signal(Signal::Interrupt) => {
                    command.set_buffer("")?;
                    continue;
                }
                ReadResult::Signal(_) | ReadResult::Eof => break,
            };
            let word = input.trim();
            let report = match word {
                "" | "s" | "step" => self.advance(Until::Pause),
                "i" => self.instruction(),
                "r" | "run" => self.advance(Until::End),
                "reset" => {
                    self.runtime.reset();
                    String::new()
                }
                "reload" => self.reload(),
                "list" => self.listing(),
                "world" => String::new(),
                "q" | "quit" => break,
                "h" | "help" => HELP.to_string(),
                _ => format!("unknown command {}\n{}", word, HELP),
            };
            if !word.is_empty() {
                command.add_history_unique(input.clone());
            }
            command.write_fmt(format_args!("{}{}", report, self.status()))?;
        }
        Ok(())
    }

    fn advance(&mut self, until: Until) -> String {
        self.interrupted.store(false, Ordering::SeqCst);
        loop {
            match self.runtime.execute(self.cycles, &self.interrupted) {
                Event::Running => continue,
                Event::Paused(_) => match until {
                    Until::Pause => return String::new(),
                    Until::End => continue,
                },
                Event::Stopped => return "stopped\n".to_string(),
                Event::Interrupted => {
                    self.interrupted.store(false, Ordering::SeqCst);
                    return "interrupted\n".to_string();
                }
                Event::Fault(fault) => return self.fault(&fault),
            }
        }
    }

    /// Reads the program and the world again. A broken file leaves the
    /// running program alone.
    fn reload(&mut self) -> String {
        let file = &self.options.file;
        let source = match std::fs::read_to_string(file) {
            Ok(source) => source,
            Err(error) => return format!("{}: {}\n", file.display(), error),
        };
        let program = match build(&self.options, &source) {
            Ok(program) => program,
            Err(error) => return format!("{}\n", diagnostic(&source, &error)),
        };
        let world = match start_world(&self.options) {
            Ok(world) => world,
            Err(message) => return format!("{}\n", message),
        };
        info!("reloaded {}", file.display());
        self.runtime.load(program);
        self.runtime.set_world(world);
        self.source = source;
        String::new()
    }

    fn instruction(&mut self) -> String {
        match self.runtime.step() {
            Ok(step) if step.halted => "stopped\n".to_string(),
            Ok(_) => String::new(),
            Err(fault) => self.fault(&fault),
        }
    }

    fn fault(&self, fault: &Fault) -> String {
        format!("{}\n", Style::new().bold().paint(fault.to_string()))
    }

    fn listing(&self) -> String {
        let pc = self.runtime.pc();
        let mut out = String::new();
        for (address, line) in self.runtime.program().listing().window(pc, 8, 8) {
            if let Some(name) = self.runtime.program().command_at(address) {
                out.push_str(&format!("    {}:\n", name));
            }
            if address == pc {
                out.push_str(&format!("{}\n", Style::new().bold().paint(line)));
            } else {
                out.push_str(&format!("{}\n", line));
            }
        }
        out
    }

    fn status(&self) -> String {
        let pc = self.runtime.pc();
        let mut out = draw(self.runtime.world());
        let program = self.runtime.program();
        if let Some(line) = program.listing().line(pc) {
            out.push_str(&line);
        }
        let position = program.get(pc).map(|i| i.position()).unwrap_or(0);
        if position > 0 {
            if let Some(text) = self.source.lines().nth(position - 1) {
                out.push_str(&format!("  {:4} {}", position, text.trim()));
            }
        }
        if self.runtime.is_halted() {
            out.push_str("  (halted)");
        }
        out.push('\n');
        out
    }
}

const HELP: &str = "\
s, step   run to the next pause
i         run one instruction
r, run    run to the end (Ctrl-C stops)
reset     back to the starting world
reload    read the program and world files again
list      instructions around the program counter
world     draw the world
q, quit   leave
";
