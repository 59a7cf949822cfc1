//! intkey CLI
//!
//! Command-line front end for the integer-key contract controller

use clap::{Parser, Subcommand};
use intkey_core::logging_facility::{self, Profile};
use intkey_core::{ClientConfig, SessionState};
use std::path::PathBuf;

mod commands;
mod sender;

#[derive(Debug, Parser)]
#[command(name = "intkey")]
#[command(about = "Integer-key contract controller", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format (overrides the configuration file)
    #[arg(long, global = true, value_enum)]
    log_profile: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one integer_key command
    IntegerKey(commands::integer_key::IntegerKeyArgs),
    /// Run integer_key commands from a script or stdin
    Shell(commands::shell::ShellArgs),
}

fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let profile = cli
        .log_profile
        .or(config.logging.profile)
        .unwrap_or(Profile::Development);
    logging_facility::init(profile);

    let state = SessionState::new(config);
    let result = match cli.command {
        Commands::IntegerKey(args) => commands::integer_key::execute(state, args),
        Commands::Shell(args) => commands::shell::execute(state, args),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
