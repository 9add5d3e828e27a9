use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("smash").unwrap();
    cmd.env_remove("SMASH_CELLS")
        .env_remove("SMASH_INPUT")
        .env_remove("SMASH_LOG");
    cmd
}

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

// Prints "!" from cell 0, then `s` wraps to the last cell and sets it to 1.
// `aaa` only comes back to that cell when the tape has exactly three cells.
const PROBE: &str = "ddddddddddddddddddddddddddddddddd h s d aaa h";

#[test]
fn config_file_sets_cells() {
    let cfg = config_file("[interpreter]\ncells = 3\n");
    cargo_bin()
        .env("SMASH_CONFIG", cfg.path())
        .args(["-e", PROBE])
        .assert()
        .success()
        .stdout("!\u{1}");
}

#[test]
fn env_overrides_config_and_flag_overrides_env() {
    let cfg = config_file("[interpreter]\ncells = 5\n");
    cargo_bin()
        .env("SMASH_CONFIG", cfg.path())
        .env("SMASH_CELLS", "3")
        .args(["-e", PROBE])
        .assert()
        .success()
        .stdout("!\u{1}");

    // Four cells: `aaa` from the last cell lands on cell 2, still zero.
    cargo_bin()
        .env("SMASH_CONFIG", cfg.path())
        .env("SMASH_CELLS", "3")
        .args(["-s", "4", "-e", PROBE])
        .assert()
        .success()
        .stdout("!\u{0}");
}

#[test]
fn config_file_selects_decimal_input() {
    let cfg = config_file("[interpreter]\ninput = \"decimal\"\n");
    cargo_bin()
        .env("SMASH_CONFIG", cfg.path())
        .args(["-e", "jh"])
        .write_stdin("65")
        .assert()
        .success()
        .stdout("A");
}

#[test]
fn malformed_env_values_warn_and_fall_back() {
    // Default 30,000 cells: `aaa` from the last cell lands on cell 2.
    cargo_bin()
        .env("SMASH_CONFIG", "/nonexistent/smash.toml")
        .env("SMASH_CELLS", "abc")
        .args(["-e", PROBE])
        .assert()
        .success()
        .stdout("!\u{0}")
        .stderr(predicate::str::contains("ignoring SMASH_CELLS=\"abc\""));

    cargo_bin()
        .env("SMASH_CONFIG", "/nonexistent/smash.toml")
        .env("SMASH_INPUT", "hex")
        .args(["-e", "jh"])
        .write_stdin("7")
        .assert()
        .success()
        .stdout("7")
        .stderr(predicate::str::contains("ignoring SMASH_INPUT=\"hex\""));
}
