//! Demonstration driver for `notelist_core`.
//!
//! # Responsibility
//! - Run the built-in demo scenario, or execute a command script from stdin.
//! - Configure core logging from environment variables.
//!
//! Usage: `notelist [--script | --version]`

use notelist_core::{
    core_version, default_log_level, init_logging, run_line, run_script, NoteCollection,
};
use std::io;
use std::process::ExitCode;

const LOG_LEVEL_ENV: &str = "NOTELIST_LOG_LEVEL";
const LOG_DIR_ENV: &str = "NOTELIST_LOG_DIR";

const DEMO_SCRIPT: &[&str] = &[
    "add Buy a computer",
    "add Go to the diner",
    "add Learn Rust",
    "edit 0 Buy milk and bread",
    "done 1",
];

const DEMO_REPORT: &[(&str, &str)] = &[
    ("All notes", "list"),
    ("Stats", "stats"),
    ("Search by name 'buy'", "find buy"),
    ("Sorted by status", "list status"),
    ("Sorted by date", "list date"),
];

fn main() -> ExitCode {
    let mode = std::env::args().nth(1);

    if mode.as_deref() == Some("--version") {
        println!("notelist_core version={}", core_version());
        return ExitCode::SUCCESS;
    }

    configure_logging();

    match mode.as_deref() {
        None => run_demo(),
        Some("--script") => run_stdin_script(),
        Some(other) => {
            eprintln!("unknown argument `{other}`; usage: notelist [--script | --version]");
            ExitCode::from(2)
        }
    }
}

fn configure_logging() {
    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
    let log_dir = std::env::var(LOG_DIR_ENV)
        .ok()
        .filter(|dir| !dir.trim().is_empty());

    if let Err(err) = init_logging(level.as_str(), log_dir.as_deref()) {
        eprintln!("logging disabled: {err}");
    }
}

fn run_demo() -> ExitCode {
    let mut notes = NoteCollection::new();

    for line in DEMO_SCRIPT {
        if let Err(err) = run_line(&mut notes, line) {
            eprintln!("demo step `{line}` failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    for (heading, line) in DEMO_REPORT {
        match run_line(&mut notes, line) {
            Ok(output) => println!("{heading}:\n{output}\n"),
            Err(err) => {
                eprintln!("demo report `{line}` failed: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_stdin_script() -> ExitCode {
    let mut notes = NoteCollection::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();

    match run_script(&mut notes, stdin.lock(), stdout.lock(), stderr.lock()) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("script aborted: {err}");
            ExitCode::FAILURE
        }
    }
}
