#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Build a command for the CLI binary with isolated session storage.
fn command(args: &[&str], home: &Path, url: Option<&str>) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pb"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env_remove("RUST_LOG");
    match url {
        Some(url) => cmd.env("POCKETBASE_URL", url),
        None => cmd.env_remove("POCKETBASE_URL"),
    };
    cmd
}

/// Run the CLI with a custom HOME directory.
pub fn run_cli(args: &[&str], home: &Path, url: Option<&str>) -> Output {
    command(args, home, url)
        .output()
        .expect("Failed to execute CLI")
}

/// Run the CLI with a custom HOME and expect success.
pub fn run_cli_success(args: &[&str], home: &Path, url: Option<&str>) -> String {
    let output = run_cli(args, home, url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI feeding `input` on stdin.
pub fn run_cli_with_stdin(args: &[&str], home: &Path, url: Option<&str>, input: &str) -> Output {
    let mut child = command(args, home, url)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for CLI")
}

/// Path of the stored session file under `home`.
pub fn session_file(home: &Path) -> std::path::PathBuf {
    home.join("data").join("pb").join("session.json")
}
