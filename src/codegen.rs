//! Brainfuck program generation.
//!
//! [`generate`] emits a program that prints a given byte sequence when run
//! on this interpreter. For each output byte it picks the shorter of two
//! encodings: a plain `+`/`-` run from the value already in the cell, or a
//! `[-]` clear followed by a rebuild (optionally a two-cell loop-multiply
//! when that is shorter than a bare run of `+`).
//!
//! The generator tracks the exact value it has left in the cell, so it
//! never emits a `-` run that would take the cell below zero. On a
//! wide-cell machine such a wrap would leave a value near `2^cell_bits`,
//! and the next `[-]` clear would then spin for that many steps. With the
//! tracked value, every intermediate stays small and generated programs run
//! in time proportional to their output on any cell width of 8 bits or
//! more.

/// Knobs for [`generate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Allow loop-multiply constructions when rebuilding a cell from zero.
    pub use_loops: bool,
    /// Largest outer loop counter considered for loop-multiply.
    pub max_loop_factor: u32,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            use_loops: true,
            max_loop_factor: 16,
        }
    }
}

/// Generate a Brainfuck program that outputs exactly `bytes`, using the
/// default [`CodegenOptions`].
pub fn generate(bytes: &[u8]) -> String {
    generate_with(bytes, &CodegenOptions::default())
}

/// Generate a Brainfuck program that outputs exactly `bytes`.
pub fn generate_with(bytes: &[u8], options: &CodegenOptions) -> String {
    let mut output = String::new();
    // Exact value currently in the cell, maintained across bytes.
    let mut cell: u32 = 0;

    for &b in bytes {
        let target = u32::from(b);
        let delta = encode_delta(cell, target);
        let rebuild = encode_rebuild(target, options);

        if delta.len() <= rebuild.len() {
            output.push_str(&delta);
        } else {
            output.push_str(&rebuild);
        }
        output.push('.');
        cell = target;
    }

    output
}

/// A plain `+` or `-` run from `cell` to `target`. Because `cell` is the
/// exact tracked value, a downward run stops at `target` without ever
/// passing zero.
fn encode_delta(cell: u32, target: u32) -> String {
    if target >= cell {
        "+".repeat((target - cell) as usize)
    } else {
        "-".repeat((cell - target) as usize)
    }
}

/// Clear the cell with `[-]` and rebuild `target` from zero, choosing the
/// shortest of a bare `+` run and loop-multiply constructions.
fn encode_rebuild(target: u32, options: &CodegenOptions) -> String {
    let mut best = format!("[-]{}", "+".repeat(target as usize));

    if !options.use_loops || target == 0 {
        return best;
    }

    // Loop-multiply: build `a` in the cleared cell, multiply by `b` into
    // the (known-zero) neighbor, adjust the remainder there, then move the
    // product back. The neighbor ends at zero again and the pointer
    // returns home, so the construction composes.
    for a in 1..=options.max_loop_factor {
        let b = ((target as f64 / a as f64).round() as i64).clamp(1, 255);
        let product = i64::from(a) * b;
        let remainder = i64::from(target) - product;

        let mut seq = String::from("[-]");
        seq.push_str(&"+".repeat(a as usize));
        seq.push('[');
        seq.push('>');
        seq.push_str(&"+".repeat(b as usize));
        seq.push_str("<-]");
        seq.push('>');
        if remainder > 0 {
            seq.push_str(&"+".repeat(remainder as usize));
        } else if remainder < 0 {
            seq.push_str(&"-".repeat((-remainder) as usize));
        }
        seq.push_str("[<+>-]<");

        if seq.len() < best.len() {
            best = seq;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret;

    #[test]
    fn generated_program_prints_the_text() {
        let code = generate(b"Hello, World!");
        assert_eq!(interpret(&code, b"").unwrap(), b"Hello, World!");
    }

    #[test]
    fn empty_input_generates_an_empty_program() {
        assert_eq!(generate(b""), "");
    }

    #[test]
    fn zero_bytes_cost_nothing_but_the_emission() {
        // The cell starts at 0 and stays there; every byte is a bare `.`.
        let code = generate(&[0, 0, 0]);
        assert_eq!(code, "...");
        assert_eq!(interpret(&code, b"").unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn repeated_bytes_cost_one_emission_each() {
        let code = generate(b"aaa");
        assert_eq!(code.matches('.').count(), 3);
        assert_eq!(interpret(&code, b"").unwrap(), b"aaa");
    }

    #[test]
    fn descending_bytes_never_wrap_below_zero() {
        // 'z' down to 'a': plain `-` runs, no clears needed.
        let code = generate(b"za");
        assert!(!code.contains("[-]-"));
        assert_eq!(interpret(&code, b"").unwrap(), b"za");
    }

    #[test]
    fn loops_disabled_still_generates_correct_code() {
        let options = CodegenOptions {
            use_loops: false,
            max_loop_factor: 16,
        };
        let code = generate_with(b"Hi", &options);
        assert!(!code.contains('['), "ascending bytes need no loops: {code}");
        assert_eq!(interpret(&code, b"").unwrap(), b"Hi");
    }

    #[test]
    fn loop_multiply_beats_bare_runs_for_large_jumps() {
        // 0 -> 200 as a bare run is 200 chars; the loop construction is
        // far shorter.
        let code = generate(&[200]);
        assert!(code.len() < 100, "expected a loop-multiply, got: {code}");
        assert_eq!(interpret(&code, b"").unwrap(), vec![200]);
    }

    #[test]
    fn generated_programs_run_on_narrow_byte_cells_too() {
        use crate::{interpret_with, MachineOptions};
        let code = generate(b"wide");
        let options = MachineOptions {
            cell_bits: 8,
            ..MachineOptions::default()
        };
        assert_eq!(interpret_with(&code, b"", &options).unwrap(), b"wide");
    }
}
