use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

fn run_icsv_test(input: &[u8], args: &[&str], want_stdout: &str) {
    let dir = tempfile::TempDir::new().unwrap();
    let input_path = dir.path().join("input.csv");
    let mut input_file = std::fs::File::create(&input_path).unwrap();
    input_file.write_all(input).unwrap();

    let mut cmd = Command::cargo_bin("icsv").unwrap();
    cmd.args(args);
    cmd.arg(&input_path);

    let output = cmd.output().unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(output.status.success(), "failed to run icsv: {}", stderr);
    let got = String::from_utf8(output.stdout).unwrap();
    similar_asserts::assert_eq!(got: got, want: want_stdout.to_string());
}

macro_rules! icsv_tests {
    ( $( ($name: ident, $input: expr, [ $( $arg: expr ),* ], $want: expr $(,)? ), )+ ) => {
        $(
            #[test]
            fn $name() {
                run_icsv_test($input, &[ $( $arg ),* ], $want);
            }
        )+
    };
}

icsv_tests!(
    (default_json, b"a,b\n1", [], "[\"a\",\"b\"]\n[\"1\"]\n"),
    (empty_input, b"", [], ""),
    (blank_lines, b"\n\n\n", [], ""),
    (bom, b"\xEF\xBB\xBFno BOM", [], "[\"no BOM\"]\n"),
    (
        malformed_utf8,
        b"a\xFFb",
        [],
        "[\"a\u{FFFD}b\"]\n",
    ),
    (
        quoting_and_trimming,
        b"# header\n \"a, b\" ,\" \"\" \"\n",
        ["--quote", "\"", "--comment", "#", "--trim", " \\t"],
        "[\"a, b\",\"\\\"\"]\n",
    ),
    (
        escape_and_remap,
        "a\\;b;口\n".as_bytes(),
        ["-d", ";", "-e", "\\\\", "--remap", "口_"],
        "[\"a;b\",\"_\"]\n",
    ),
    (
        tab_delimited_tsv_output,
        b"a\tb\\c\n1\t2\n",
        ["-d", "\\t", "-f", "tsv"],
        "a\tb\\\\c\n1\t2\n",
    ),
    (
        custom_terminator,
        b"a,b;c,d;",
        ["-t", ";", "-f", "debug"],
        "[\"a\", \"b\"]\n[\"c\", \"d\"]\n",
    ),
    (
        rfc4180,
        b"name,quote\r\nx,\"say \"\"hi\"\"\"\r\n",
        ["--rfc4180"],
        "[\"name\",\"quote\"]\n[\"x\",\"say \\\"hi\\\"\"]\n",
    ),
    (
        disabled_delimiter,
        b"a,b\nc",
        ["-d", "none"],
        "[\"a,b\"]\n[\"c\"]\n",
    ),
);

#[test]
fn reads_standard_input() {
    let mut cmd = assert_cmd::Command::cargo_bin("icsv").unwrap();
    cmd.write_stdin("x,y\n\n1,2\n")
        .assert()
        .success()
        .stdout("[\"x\",\"y\"]\n[\"1\",\"2\"]\n");
}

#[test]
fn field_count_mismatch_fails() {
    let mut cmd = assert_cmd::Command::cargo_bin("icsv").unwrap();
    cmd.args(["--fields", "first"])
        .write_stdin("a,b\nc\n")
        .assert()
        .failure()
        .stdout("[\"a\",\"b\"]\n")
        .stderr(predicate::str::contains(
            "record 2 (line 2) has 1 fields, but 2 were expected",
        ));
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.csv");
    let mut cmd = Command::cargo_bin("icsv").unwrap();
    cmd.arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn invalid_character_argument_fails() {
    let mut cmd = assert_cmd::Command::cargo_bin("icsv").unwrap();
    cmd.args(["--delimiter", "ab"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a single character"));
}
