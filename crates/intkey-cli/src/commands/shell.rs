//! Line-oriented session shell
//!
//! Usage: intkey shell [--script <PATH>]
//!
//! Reads commands from the script, or stdin when none is given:
//! - `integer_key ARGS...` dispatches one contract command
//! - `set NAME VALUE` binds a value for later `$NAME` expansion
//! - `exit` / `quit` end the session
//!
//! Blank lines and `#` comments are skipped. Failing commands are reported
//! and the session carries on.

use crate::sender::DryRunSender;
use clap::Args;
use intkey_core::{Bindings, Session, SessionState};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ShellArgs {
    /// Script to run instead of reading stdin
    #[arg(short, long)]
    pub script: Option<PathBuf>,
}

/// What the shell does after a line
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Execute the shell, returning the process exit code
pub fn execute(state: SessionState, args: ShellArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("Failed to open script {}: {}", path.display(), e))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let mut session = Session::new(state, DryRunSender::new(std::io::stdout()));
    let mut out = std::io::stdout();
    run_lines(&mut session, input, &mut out)?;
    Ok(0)
}

fn run_lines<S, R>(
    session: &mut Session<S>,
    input: R,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: intkey_core::ContractSender,
    R: BufRead,
{
    for line in input.lines() {
        if run_line(session, &line?, out)? == Flow::Exit {
            break;
        }
    }
    out.flush()?;
    Ok(())
}

fn run_line<S: intkey_core::ContractSender>(
    session: &mut Session<S>,
    line: &str,
    out: &mut dyn Write,
) -> std::io::Result<Flow> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Flow::Continue);
    }

    let (name, rest) = line
        .split_once(char::is_whitespace)
        .map(|(n, r)| (n, r.trim()))
        .unwrap_or((line, ""));

    match name {
        "integer_key" => {
            session.do_integer_key(rest, out)?;
        }
        "set" => match rest.split_once(char::is_whitespace) {
            Some((symbol, value)) => {
                session.bindings_mut().bind(symbol, value.trim().to_string());
            }
            None => writeln!(out, "Usage: set NAME VALUE")?,
        },
        "exit" | "quit" => return Ok(Flow::Exit),
        other => writeln!(out, "Unknown command: {}", other)?,
    }
    Ok(Flow::Continue)
}
