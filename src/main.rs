use clap::Parser;
use std::env;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use widebf::cli_util::report_error;
use widebf::{interpret_with, MachineOptions};

#[derive(Parser, Debug)]
#[command(disable_help_flag = true)]
struct Cli {
    /// Path to the Brainfuck source file
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Bytes fed to `,` (otherwise piped stdin is read in full)
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Bits per tape cell, 1 through 32
    #[arg(long = "cell-bits", value_name = "BITS")]
    cell_bits: Option<u32>,

    /// Number of tape cells
    #[arg(long = "tape-len", value_name = "CELLS")]
    tape_len: Option<usize>,

    /// Maximum interpreter steps before abort (fallback WIDEBF_MAX_STEPS)
    #[arg(long = "max-steps", value_name = "N")]
    max_steps: Option<u64>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,
}

fn main() {
    let program = env::args().next().unwrap_or_else(|| "widebf".to_string());
    let cli = Cli::parse();

    if cli.help {
        usage_and_exit(&program, 0);
    }

    std::process::exit(run(&program, cli));
}

fn run(program: &str, cli: Cli) -> i32 {
    let Some(path) = cli.file else {
        usage_and_exit(program, 2);
    };

    let cell_bits = cli.cell_bits.unwrap_or(MachineOptions::DEFAULT_CELL_BITS);
    if !(1..=32).contains(&cell_bits) {
        eprintln!("{program}: --cell-bits must be between 1 and 32");
        usage_and_exit(program, 2);
    }

    let tape_len = cli.tape_len.unwrap_or(MachineOptions::DEFAULT_TAPE_LEN);
    if tape_len == 0 {
        eprintln!("{program}: --tape-len must be non-zero");
        usage_and_exit(program, 2);
    }

    // Resolve the step ceiling: flag -> env -> default
    let max_steps = cli
        .max_steps
        .or_else(|| {
            env::var("WIDEBF_MAX_STEPS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
        })
        .unwrap_or(MachineOptions::DEFAULT_MAX_STEPS);

    let source = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{program}: failed to read source file: {e}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    // Stdin is drained in full before execution begins; the engine never
    // blocks on I/O mid-run.
    let input: Vec<u8> = match cli.input {
        Some(text) => text.into_bytes(),
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                Vec::new()
            } else {
                let mut buf = Vec::new();
                if let Err(e) = stdin.lock().read_to_end(&mut buf) {
                    eprintln!("{program}: failed reading stdin: {e}");
                    let _ = io::stderr().flush();
                    return 1;
                }
                buf
            }
        }
    };

    let options = MachineOptions {
        cell_bits,
        tape_len,
        max_steps,
    };

    match interpret_with(&source, &input, &options) {
        Ok(output) => {
            // Raw program output, byte for byte, no trailing newline.
            let mut stdout = io::stdout().lock();
            if let Err(e) = stdout.write_all(&output).and_then(|()| stdout.flush()) {
                eprintln!("{program}: failed writing output: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
            0
        }
        Err(err) => {
            report_error(program, &source, &err);
            1
        }
    }
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} [OPTIONS] <FILE> [INPUT]

Arguments:
  FILE   Path to the Brainfuck source file
  INPUT  Bytes fed to `,`. If omitted and stdin is not a terminal, stdin is
         read in full before execution; otherwise input is empty.

Options:
  --cell-bits <BITS>   Bits per tape cell, 1..=32 (default 32)
  --tape-len <CELLS>   Number of tape cells (default 30000)
  --max-steps <N>      Maximum interpreter steps before abort
                       (fallback WIDEBF_MAX_STEPS; default 100000000)
  --help, -h           Show this help

Notes:
- Characters outside ><+-.,[] are comments and are ignored.
- The tape is toroidal: `<` on cell 0 wraps to the last cell and `>` on the
  last cell wraps to cell 0.
- Cell arithmetic wraps at the cell width; `.` emits the cell's low byte.
- On EOF, `,` sets the current cell to 0.
- Program output is written to stdout verbatim with no trailing newline.

Examples:
- Run a program with input from the command line:
    {0} ./program.bf "some input"
- Feed a file to `,` through stdin:
    {0} ./cat.bf < input.txt
- Abort a runaway program early:
    {0} --max-steps 10000 ./program.bf
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
