use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn program_file(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(source.as_bytes())
        .expect("failed to write program");
    file
}

fn widebf() -> Command {
    Command::cargo_bin("widebf").unwrap()
}

// 256 increments, then a zero test: the probe cell ends at 1 when the
// counter survived (wide cells) and 0 when it wrapped (8-bit cells).
fn zero_probe_after_256_increments() -> String {
    format!("{}[>+<[-]]>.", "+".repeat(256))
}

#[test]
fn default_cells_are_wider_than_a_byte() {
    let file = program_file(&zero_probe_after_256_increments());
    widebf().arg(file.path()).assert().success().stdout(vec![1u8]);
}

#[test]
fn cell_bits_8_wraps_at_256() {
    let file = program_file(&zero_probe_after_256_increments());
    widebf()
        .arg("--cell-bits")
        .arg("8")
        .arg(file.path())
        .assert()
        .success()
        .stdout(vec![0u8]);
}

#[test]
fn tape_len_sets_where_the_pointer_wraps() {
    // `+<.`: on a one-cell tape `<` wraps back onto the incremented cell.
    let file = program_file("+<.");
    widebf()
        .arg("--tape-len")
        .arg("1")
        .arg(file.path())
        .assert()
        .success()
        .stdout(vec![1u8]);
    widebf()
        .arg("--tape-len")
        .arg("2")
        .arg(file.path())
        .assert()
        .success()
        .stdout(vec![0u8]);
}

#[test]
fn max_steps_env_is_a_fallback() {
    let file = program_file("+[]");
    widebf()
        .arg(file.path())
        .env("WIDEBF_MAX_STEPS", "2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("step budget exceeded"));
}

#[test]
fn max_steps_flag_overrides_the_env() {
    // The flag's generous budget wins over the env's tiny one.
    let file = program_file("+++[-].");
    widebf()
        .arg("--max-steps")
        .arg("1000000")
        .arg(file.path())
        .env("WIDEBF_MAX_STEPS", "2")
        .assert()
        .success()
        .stdout(vec![0u8]);
}

#[test]
fn cell_bits_out_of_range_is_a_usage_error() {
    let file = program_file("+");
    widebf()
        .arg("--cell-bits")
        .arg("33")
        .arg(file.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--cell-bits"));
}

#[test]
fn zero_tape_len_is_a_usage_error() {
    let file = program_file("+");
    widebf()
        .arg("--tape-len")
        .arg("0")
        .arg(file.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--tape-len"));
}
