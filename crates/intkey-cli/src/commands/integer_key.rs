//! One-shot integer_key command
//!
//! Usage: intkey integer-key [-e URL] [-f PATH] [-q] [-w] <SUBCOMMAND> [ARGS]

use crate::sender::DryRunSender;
use clap::Args;
use intkey_core::{dispatch, BindingTable, IntKeyError, SessionState};

#[derive(Debug, Args)]
pub struct IntegerKeyArgs {
    /// Arguments passed to integer_key, starting with the subcommand
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub args: Vec<String>,
}

/// Execute one dispatch, returning the process exit code
pub fn execute(
    state: SessionState,
    args: IntegerKeyArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let mut sender = DryRunSender::new(std::io::stdout());
    let mut bindings = BindingTable::new();

    match dispatch(&state, &mut sender, &mut bindings, args.args.as_slice()) {
        Ok(_) => Ok(0),
        Err(IntKeyError::Usage { code, message }) => {
            if code == 0 {
                print!("{}", message);
            } else {
                eprint!("{}", message);
            }
            Ok(code)
        }
        Err(e) => Err(e.into()),
    }
}
