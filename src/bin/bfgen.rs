use std::env;
use std::io::{self, Read, Write};
use widebf::generate;

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} [TEXT...]

Description:
  Generates Brainfuck code that, when executed, outputs the given bytes.
  TEXT arguments are joined with spaces; with no arguments, raw bytes are
  read from stdin. The generated code is printed to stdout followed by a
  newline.

Examples:
- Generate a greeter and run it:
    {0} "Hello, World!" > hello.bf
    widebf hello.bf
- Generate from a file:
    {0} < input.bin
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

fn main() {
    let program = env::args().next().unwrap_or_else(|| "bfgen".to_string());
    let args: Vec<String> = env::args().skip(1).collect();

    if args.first().is_some_and(|a| a == "--help" || a == "-h") {
        usage_and_exit(&program, 0);
    }

    let input_bytes: Vec<u8> = if args.is_empty() {
        let mut buf = Vec::new();
        if let Err(e) = io::stdin().lock().read_to_end(&mut buf) {
            eprintln!("{program}: failed reading stdin: {e}");
            let _ = io::stderr().flush();
            std::process::exit(1);
        }
        buf
    } else {
        args.join(" ").into_bytes()
    };

    println!("{}", generate(&input_bytes));
    let _ = io::stdout().flush();
}
