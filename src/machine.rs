//! The execution engine.
//!
//! A [`Machine`] owns the tape, data pointer, program counter, input cursor,
//! output accumulator, and step counter for exactly one run. Nothing is
//! shared across runs; concurrent interpretations each construct their own
//! machine. The engine is synchronous and does no I/O of its own: input is a
//! byte slice supplied up front, output accumulates in memory.

use crate::program::{Opcode, Program};
use crate::BrainfuckError;

/// Runtime configuration for a [`Machine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineOptions {
    /// Width of each tape cell in bits, 1 through 32. Arithmetic wraps
    /// modulo `2^cell_bits`. Unrelated to the 8-bit truncation applied
    /// when emitting output.
    pub cell_bits: u32,
    /// Number of cells on the tape. Pointer movement wraps modulo this.
    pub tape_len: usize,
    /// Maximum instructions executed before the run faults with
    /// [`BrainfuckError::BudgetExceeded`]. The only bound on execution;
    /// there is no wall-clock timeout.
    pub max_steps: u64,
}

impl MachineOptions {
    /// Default cell width in bits. Wide cells let programs do arithmetic on
    /// values far beyond a byte (the original use case was timestamp math).
    pub const DEFAULT_CELL_BITS: u32 = 32;
    /// Default tape length, the classic 30,000 cells.
    pub const DEFAULT_TAPE_LEN: usize = 30_000;
    /// Default step ceiling.
    pub const DEFAULT_MAX_STEPS: u64 = 100_000_000;
}

impl Default for MachineOptions {
    fn default() -> Self {
        Self {
            cell_bits: Self::DEFAULT_CELL_BITS,
            tape_len: Self::DEFAULT_TAPE_LEN,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }
}

/// A single in-flight interpretation of a validated [`Program`].
///
/// State is created fresh by [`Machine::new`] and discarded with the value;
/// a machine is not reusable across runs.
pub struct Machine<'run> {
    program: &'run Program,
    input: &'run [u8],
    tape: Vec<u32>,
    pointer: usize,
    pc: usize,
    cursor: usize,
    output: Vec<u8>,
    steps: u64,
    cell_mask: u32,
    max_steps: u64,
}

impl<'run> Machine<'run> {
    /// Build a machine over `program` with a zero-filled tape.
    ///
    /// # Panics
    ///
    /// Panics if `options.cell_bits` is not in `1..=32` or
    /// `options.tape_len` is zero. The CLI validates its arguments before
    /// constructing a machine; library callers own the same check.
    pub fn new(program: &'run Program, input: &'run [u8], options: &MachineOptions) -> Self {
        assert!(
            (1..=32).contains(&options.cell_bits),
            "cell_bits must be in 1..=32, got {}",
            options.cell_bits
        );
        assert!(options.tape_len > 0, "tape_len must be non-zero");

        let cell_mask = if options.cell_bits == 32 {
            u32::MAX
        } else {
            (1u32 << options.cell_bits) - 1
        };

        Self {
            program,
            input,
            tape: vec![0; options.tape_len],
            pointer: 0,
            pc: 0,
            cursor: 0,
            output: Vec::new(),
            steps: 0,
            cell_mask,
            max_steps: options.max_steps,
        }
    }

    /// Run the program to completion.
    ///
    /// Succeeds when the program counter passes the end of the instruction
    /// stream. Faults with [`BrainfuckError::BudgetExceeded`] when the step
    /// ceiling is reached first, or [`BrainfuckError::JumpTableMiss`] if a
    /// bracket instruction has no recorded partner (unreachable for
    /// programs that came out of [`Program::parse`]).
    pub fn run(&mut self) -> Result<(), BrainfuckError> {
        let ops = self.program.ops();
        let tape_len = self.tape.len();

        while self.pc < ops.len() {
            if self.steps >= self.max_steps {
                return Err(BrainfuckError::BudgetExceeded {
                    steps_executed: self.steps,
                });
            }

            match ops[self.pc] {
                Opcode::Right => {
                    self.pointer = (self.pointer + 1) % tape_len;
                }
                Opcode::Left => {
                    self.pointer = (self.pointer + tape_len - 1) % tape_len;
                }
                Opcode::Inc => {
                    self.tape[self.pointer] =
                        self.tape[self.pointer].wrapping_add(1) & self.cell_mask;
                }
                Opcode::Dec => {
                    self.tape[self.pointer] =
                        self.tape[self.pointer].wrapping_sub(1) & self.cell_mask;
                }
                Opcode::Output => {
                    self.output.push((self.tape[self.pointer] & 0xFF) as u8);
                }
                Opcode::Input => {
                    // Past the end of input, `,` stores 0. The mask keeps
                    // the cell invariant for widths below 8 bits.
                    let byte = match self.input.get(self.cursor) {
                        Some(&b) => {
                            self.cursor += 1;
                            u32::from(b) & self.cell_mask
                        }
                        None => 0,
                    };
                    self.tape[self.pointer] = byte;
                }
                Opcode::LoopOpen => {
                    if self.tape[self.pointer] == 0 {
                        self.pc = self.jump_target()?;
                    }
                }
                Opcode::LoopClose => {
                    if self.tape[self.pointer] != 0 {
                        self.pc = self.jump_target()?;
                    }
                }
            }

            self.steps += 1;
            // A bracket jump lands ON the partner; the +1 resumes just
            // past it.
            self.pc += 1;
        }

        Ok(())
    }

    fn jump_target(&self) -> Result<usize, BrainfuckError> {
        self.program
            .jump_target(self.pc)
            .ok_or(BrainfuckError::JumpTableMiss { pc: self.pc })
    }

    /// Bytes emitted so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Consume the machine and take the emitted bytes.
    pub fn into_output(self) -> Vec<u8> {
        self.output
    }

    /// Instructions executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}
