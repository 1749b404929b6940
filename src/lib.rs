//! A Brainfuck interpreter with wide, configurable-width cells.
//!
//! This crate interprets the eight-instruction Brainfuck language on a
//! fixed-size tape of unsigned cells. It differs from the textbook
//! interpreter in three deliberate ways:
//!
//! - Cells are wide: `cell_bits` is configurable from 1 to 32 bits
//!   (default 32), with arithmetic wrapping at the cell width. Output
//!   truncates to the low byte, so byte-oriented programs still work.
//! - The tape is toroidal: moving left from cell 0 lands on the last cell
//!   and moving right past the end lands on cell 0. Pointer movement is
//!   never a fault.
//! - Execution is bounded by a step budget instead of wall-clock time, so
//!   a runaway program fails deterministically with
//!   [`BrainfuckError::BudgetExceeded`].
//!
//! Programs are validated up front: source text is filtered and parsed into
//! a typed instruction stream with a precomputed bracket jump table, and
//! unbalanced loops are rejected before a single instruction runs. Input is
//! supplied fully up front as bytes; reading past the end of input stores 0.
//!
//! Quick start:
//!
//! ```
//! use widebf::interpret;
//!
//! // Three increments, then emit the cell's low byte.
//! let output = interpret("+++.", b"").unwrap();
//! assert_eq!(output, vec![3]);
//!
//! // `,` consumes input bytes; `.` echoes them back out.
//! let output = interpret(",.,.", b"hi").unwrap();
//! assert_eq!(output, b"hi");
//! ```
//!
//! The crate also carries a small generator, [`generate`], which emits a
//! Brainfuck program printing a given byte sequence.

pub mod cli_util;
mod codegen;
mod machine;
mod program;

pub use codegen::{generate, generate_with, CodegenOptions};
pub use machine::{Machine, MachineOptions};
pub use program::{BracketKind, Opcode, Program};

/// Errors that can occur while loading or running a Brainfuck program.
#[derive(Debug, thiserror::Error)]
pub enum BrainfuckError {
    /// Loops were not balanced. `position` is the char offset of the
    /// offending bracket in the original, unfiltered source text.
    #[error("Unmatched bracket {kind} at offset {position}")]
    UnmatchedBracket { position: usize, kind: BracketKind },

    /// The step ceiling was reached before the program terminated. This
    /// signals a likely infinite loop, not a partial result.
    #[error("Execution aborted: step budget exceeded after {steps_executed} steps")]
    BudgetExceeded { steps_executed: u64 },

    /// A bracket instruction had no jump table entry at runtime. This is a
    /// loader/engine contract violation, reported distinctly so a broken
    /// loader can never masquerade as a no-op.
    #[error("Internal error: missing jump table entry for bracket at instruction {pc}")]
    JumpTableMiss { pc: usize },
}

/// Interpret Brainfuck `source` with `input` fed to `,`, using the default
/// [`MachineOptions`] (32-bit cells, 30,000-cell tape, 100,000,000 steps).
///
/// Returns the bytes the program emitted, or the first fault encountered.
pub fn interpret(source: &str, input: &[u8]) -> Result<Vec<u8>, BrainfuckError> {
    interpret_with(source, input, &MachineOptions::default())
}

/// Interpret Brainfuck `source` with explicit [`MachineOptions`].
pub fn interpret_with(
    source: &str,
    input: &[u8],
    options: &MachineOptions,
) -> Result<Vec<u8>, BrainfuckError> {
    let program = Program::parse(source)?;
    let mut machine = Machine::new(&program, input, options);
    machine.run()?;
    Ok(machine.into_output())
}
