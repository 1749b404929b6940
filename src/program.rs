//! Program loading and validation.
//!
//! Raw source text is filtered down to the eight Brainfuck instructions and
//! parsed into a typed instruction stream exactly once, up front. Bracket
//! matching happens in the same pass over the filtered stream, producing a
//! bidirectional jump table so the execution loop never scans for a partner
//! bracket. Unbalanced programs are rejected here and never reach the
//! machine.

use std::fmt;

use crate::BrainfuckError;

/// The eight Brainfuck instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// `>` — move the data pointer one cell right (wraps to cell 0).
    Right,
    /// `<` — move the data pointer one cell left (wraps to the last cell).
    Left,
    /// `+` — increment the current cell, wrapping at the cell width.
    Inc,
    /// `-` — decrement the current cell, wrapping at the cell width.
    Dec,
    /// `.` — append the current cell's low byte to the output.
    Output,
    /// `,` — read the next input byte into the current cell (0 at EOF).
    Input,
    /// `[` — jump past the matching `]` when the current cell is zero.
    LoopOpen,
    /// `]` — jump back to the matching `[` when the current cell is non-zero.
    LoopClose,
}

impl Opcode {
    /// Map a source character to an instruction. Any other character is a
    /// comment and yields `None`.
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '>' => Opcode::Right,
            '<' => Opcode::Left,
            '+' => Opcode::Inc,
            '-' => Opcode::Dec,
            '.' => Opcode::Output,
            ',' => Opcode::Input,
            '[' => Opcode::LoopOpen,
            ']' => Opcode::LoopClose,
            _ => return None,
        })
    }

    /// The source character for this instruction.
    pub fn as_char(self) -> char {
        match self {
            Opcode::Right => '>',
            Opcode::Left => '<',
            Opcode::Inc => '+',
            Opcode::Dec => '-',
            Opcode::Output => '.',
            Opcode::Input => ',',
            Opcode::LoopOpen => '[',
            Opcode::LoopClose => ']',
        }
    }
}

/// Which side of a loop was unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

impl fmt::Display for BracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketKind::Open => write!(f, "'['"),
            BracketKind::Close => write!(f, "']'"),
        }
    }
}

/// A validated instruction stream plus its bracket jump table.
///
/// Produced by [`Program::parse`] and immutable afterwards. Each kept
/// instruction remembers its char offset in the original source so
/// diagnostics can point back into the unfiltered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    ops: Vec<Opcode>,
    // jumps[i] holds the matching bracket index for the '[' or ']' at i;
    // None at every non-bracket position.
    jumps: Vec<Option<usize>>,
    source_offsets: Vec<usize>,
}

impl Program {
    /// Parse Brainfuck source into an instruction stream and jump table.
    ///
    /// Characters outside `><+-.,[]` are discarded, preserving the relative
    /// order of everything kept. Returns
    /// [`BrainfuckError::UnmatchedBracket`] when loops do not balance; the
    /// reported position is the char offset of the offending bracket in
    /// `source` (for a leftover `[`, the innermost unclosed one).
    pub fn parse(source: &str) -> Result<Self, BrainfuckError> {
        let mut ops = Vec::new();
        let mut source_offsets = Vec::new();
        for (offset, c) in source.chars().enumerate() {
            if let Some(op) = Opcode::from_char(c) {
                ops.push(op);
                source_offsets.push(offset);
            }
        }

        let mut jumps: Vec<Option<usize>> = vec![None; ops.len()];
        let mut stack: Vec<usize> = Vec::new();
        for (i, &op) in ops.iter().enumerate() {
            match op {
                Opcode::LoopOpen => stack.push(i),
                Opcode::LoopClose => {
                    let Some(open) = stack.pop() else {
                        return Err(BrainfuckError::UnmatchedBracket {
                            position: source_offsets[i],
                            kind: BracketKind::Close,
                        });
                    };
                    jumps[open] = Some(i);
                    jumps[i] = Some(open);
                }
                _ => {}
            }
        }
        if let Some(&open) = stack.last() {
            return Err(BrainfuckError::UnmatchedBracket {
                position: source_offsets[open],
                kind: BracketKind::Open,
            });
        }

        Ok(Self {
            ops,
            jumps,
            source_offsets,
        })
    }

    /// The filtered instruction stream.
    pub fn ops(&self) -> &[Opcode] {
        &self.ops
    }

    /// Number of instructions after filtering.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the program contains no instructions at all.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The matching bracket index recorded for the instruction at `pc`.
    pub fn jump_target(&self, pc: usize) -> Option<usize> {
        self.jumps.get(pc).copied().flatten()
    }

    /// Char offset in the original source of the instruction at `pc`.
    pub fn source_offset(&self, pc: usize) -> Option<usize> {
        self.source_offsets.get(pc).copied()
    }

    /// Build a program from raw parts, bypassing validation. Lets tests
    /// hand the machine a deliberately broken jump table.
    #[cfg(test)]
    pub(crate) fn from_parts(ops: Vec<Opcode>, jumps: Vec<Option<usize>>) -> Self {
        let source_offsets = (0..ops.len()).collect();
        Self {
            ops,
            jumps,
            source_offsets,
        }
    }
}
