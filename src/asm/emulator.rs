//! Modeled Hack machine for the test suite.
//!
//! A two-pass mini-assembler plus interpreter: enough of the target
//! machine (A/D registers, RAM, `dest=comp;jump` evaluation, symbols) to
//! execute the emitted text and observe memory afterwards. Tests assert
//! on machine state instead of string shape, so the properties hold for
//! the *behavior* of the generated code.
//!
//! Test-only; the crate itself never executes what it emits.

use std::collections::HashMap;

/// Upper bound on executed instructions; a program still running past
/// this is stuck in a loop the test did not expect.
const MAX_STEPS: usize = 100_000;

/// RAM cells modeled. Matches the target's 15-bit address space.
const RAM_SIZE: usize = 32_768;

pub struct Machine {
    pub ram: Vec<i16>,
}

impl Machine {
    pub fn new() -> Self {
        Self {
            ram: vec![0; RAM_SIZE],
        }
    }

    pub fn set(&mut self, addr: usize, value: i16) {
        self.ram[addr] = value;
    }

    pub fn get(&self, addr: usize) -> i16 {
        self.ram[addr]
    }

    /// Assemble and execute `asm` until control runs past the last
    /// instruction. Panics on malformed text or on a runaway program.
    pub fn run(&mut self, asm: &str) {
        let instructions = assemble(asm);

        let mut a: i16 = 0;
        let mut d: i16 = 0;
        let mut pc: usize = 0;
        let mut steps: usize = 0;

        while pc < instructions.len() {
            steps += 1;
            assert!(steps <= MAX_STEPS, "step limit exceeded at pc={}", pc);

            match &instructions[pc] {
                Instruction::Load(value) => {
                    a = *value;
                    pc += 1;
                }
                Instruction::Compute { dest, comp, jump } => {
                    let addr = a as usize;
                    let m = self.ram[addr];
                    let value = eval(comp, a, d, m);

                    // The memory write targets the pre-instruction A,
                    // even when A is also a destination (`AM=M-1`).
                    if dest.contains('M') {
                        self.ram[addr] = value;
                    }
                    if dest.contains('A') {
                        a = value;
                    }
                    if dest.contains('D') {
                        d = value;
                    }

                    if jumps(jump, value) {
                        pc = addr;
                    } else {
                        pc += 1;
                    }
                }
            }
        }
    }
}

enum Instruction {
    Load(i16),
    Compute {
        dest: String,
        comp: String,
        jump: String,
    },
}

/// Two passes: label addresses first, then instructions with every
/// `@symbol` resolved. Unknown symbols become variables from cell 16 up,
/// so file-scoped statics land in distinct cells automatically.
fn assemble(asm: &str) -> Vec<Instruction> {
    let lines: Vec<&str> = asm
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("//"))
        .collect();

    let mut symbols = builtin_symbols();
    let mut address = 0i16;
    for line in &lines {
        if let Some(name) = label_name(line) {
            symbols.insert(name.to_string(), address);
        } else {
            address += 1;
        }
    }

    let mut next_var = 16i16;
    let mut instructions = Vec::new();
    for line in &lines {
        if label_name(line).is_some() {
            continue;
        }
        if let Some(target) = line.strip_prefix('@') {
            let value = match target.parse::<i16>() {
                Ok(n) => n,
                Err(_) => *symbols.entry(target.to_string()).or_insert_with(|| {
                    let cell = next_var;
                    next_var += 1;
                    cell
                }),
            };
            instructions.push(Instruction::Load(value));
        } else {
            instructions.push(parse_compute(line));
        }
    }
    instructions
}

fn label_name(line: &str) -> Option<&str> {
    line.strip_prefix('(')?.strip_suffix(')')
}

fn parse_compute(line: &str) -> Instruction {
    let (rest, jump) = match line.split_once(';') {
        Some((rest, jump)) => (rest, jump.to_string()),
        None => (line, String::new()),
    };
    let (dest, comp) = match rest.split_once('=') {
        Some((dest, comp)) => (dest.to_string(), comp.to_string()),
        None => (String::new(), rest.to_string()),
    };
    Instruction::Compute { dest, comp, jump }
}

fn builtin_symbols() -> HashMap<String, i16> {
    let mut symbols = HashMap::new();
    for (name, addr) in [
        ("SP", 0),
        ("LCL", 1),
        ("ARG", 2),
        ("THIS", 3),
        ("THAT", 4),
        ("SCREEN", 16384),
        ("KBD", 24576),
    ] {
        symbols.insert(name.to_string(), addr);
    }
    for r in 0..16 {
        symbols.insert(format!("R{}", r), r);
    }
    symbols
}

/// The target's complete comp table, 16-bit wrapping.
fn eval(comp: &str, a: i16, d: i16, m: i16) -> i16 {
    match comp {
        "0" => 0,
        "1" => 1,
        "-1" => -1,
        "D" => d,
        "A" => a,
        "M" => m,
        "!D" => !d,
        "!A" => !a,
        "!M" => !m,
        "-D" => d.wrapping_neg(),
        "-A" => a.wrapping_neg(),
        "-M" => m.wrapping_neg(),
        "D+1" => d.wrapping_add(1),
        "A+1" => a.wrapping_add(1),
        "M+1" => m.wrapping_add(1),
        "D-1" => d.wrapping_sub(1),
        "A-1" => a.wrapping_sub(1),
        "M-1" => m.wrapping_sub(1),
        "D+A" | "A+D" => d.wrapping_add(a),
        "D+M" | "M+D" => d.wrapping_add(m),
        "D-A" => d.wrapping_sub(a),
        "A-D" => a.wrapping_sub(d),
        "D-M" => d.wrapping_sub(m),
        "M-D" => m.wrapping_sub(d),
        "D&A" | "A&D" => d & a,
        "D&M" | "M&D" => d & m,
        "D|A" | "A|D" => d | a,
        "D|M" | "M|D" => d | m,
        other => panic!("unknown comp `{}`", other),
    }
}

fn jumps(jump: &str, value: i16) -> bool {
    match jump {
        "" => false,
        "JGT" => value > 0,
        "JEQ" => value == 0,
        "JGE" => value >= 0,
        "JLT" => value < 0,
        "JNE" => value != 0,
        "JLE" => value <= 0,
        "JMP" => true,
        other => panic!("unknown jump `{}`", other),
    }
}
