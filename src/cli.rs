//! Line-oriented command adapter.
//!
//! Translates text commands into [`Session`] calls and results into text.
//! Errors are printed and the loop carries on, leaving state untouched.

use crate::config::Config;
use crate::error::Result;
use crate::output::{format_decision, format_summary, write_report, LogSink};
use crate::processing::Session;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{BufRead, Write};

pub const HELP: &str = "Commands:
  subnet <address> <prefix>    split a network, e.g. subnet 192.168.1.0 24
  subnet <address>/<prefix>    same, in CIDR form
  check <source> <destination> simulate traffic between two addresses
  report                       write the security report
  show                         print the current state as JSON
  help                         show this help
  quit                         exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Subnet { address: String, prefix: Option<String> },
    Check { source: String, destination: String },
    Report,
    Show,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        [] => return Ok(None),
        ["subnet", cidr] => Command::Subnet {
            address: cidr.to_string(),
            prefix: None,
        },
        ["subnet", address, prefix] => Command::Subnet {
            address: address.to_string(),
            prefix: Some(prefix.to_string()),
        },
        ["check", source, destination] => Command::Check {
            source: source.to_string(),
            destination: destination.to_string(),
        },
        ["report"] => Command::Report,
        ["show"] => Command::Show,
        ["help"] | ["?"] => Command::Help,
        ["quit"] | ["exit"] => Command::Quit,
        _ => return Err(format!("Unknown command '{}', try 'help'", line.trim())),
    };
    Ok(Some(command))
}

/// Run one command and return the text to show the user.
pub fn execute<S: LogSink + ?Sized>(
    command: &Command,
    session: &mut Session,
    sink: &mut S,
    config: &Config,
) -> Result<String> {
    log::debug!("execute({command:?})");
    match command {
        Command::Subnet { address, prefix } => {
            match prefix {
                Some(prefix) => session.generate(address, prefix)?,
                None => session.generate_cidr(address)?,
            };
            Ok(format_summary(&session.summary()?))
        }
        Command::Check {
            source,
            destination,
        } => {
            let event = session.check(source, destination, sink)?;
            Ok(format_decision(&event))
        }
        Command::Report => {
            let path = write_report(session, sink, config)?;
            Ok(format!("Report written to {}", path.display()))
        }
        Command::Show => {
            let value = serde_json::json!({
                "session": session.state(),
                "summary": session.summary().ok(),
            });
            Ok(serde_json::to_string_pretty(&value).unwrap_or_else(|e| e.to_string()))
        }
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => Ok(String::new()),
    }
}

/// Read commands from `input` until `quit` or end of input.
pub fn run_interactive<R, W, S>(
    input: R,
    mut output: W,
    session: &mut Session,
    sink: &mut S,
    config: &Config,
) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
    S: LogSink + ?Sized,
{
    log::info!("#Start run_interactive()");
    writeln!(output, "SOHO Guard - Network Security. Type 'help' for commands.")?;
    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(output, "{}", msg.yellow())?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        match execute(&command, session, sink, config) {
            Ok(text) => writeln!(output, "{text}")?,
            Err(e) if e.is_input_error() => {
                log::info!("Rejected {command:?}: {e}");
                writeln!(output, "{} {e}", "Error:".red())?
            }
            Err(e) => {
                log::error!("Failed {command:?}: {e}");
                writeln!(output, "{} {e}", "Error:".on_red())?
            }
        }
    }
    Ok(())
}

/// Command line arguments. Without a subcommand the interactive loop runs.
#[derive(Parser, Debug)]
#[command(name = "soho-guard", version, about = "Split a network into internal and guest subnets and check traffic between them")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<OneShot>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum OneShot {
    /// Split a network (e.g. 192.168.1.0/24) and print both halves
    Split { cidr: String },
    /// Split a network, then check traffic from source to destination
    Check {
        cidr: String,
        source: String,
        destination: String,
    },
}

/// Run a single subcommand and return the text to show the user.
pub fn run_one_shot<S: LogSink + ?Sized>(
    one_shot: &OneShot,
    session: &mut Session,
    sink: &mut S,
    config: &Config,
) -> Result<String> {
    log::debug!("run_one_shot({one_shot:?})");
    match one_shot {
        OneShot::Split { cidr } => execute(
            &Command::Subnet {
                address: cidr.clone(),
                prefix: None,
            },
            session,
            sink,
            config,
        ),
        OneShot::Check {
            cidr,
            source,
            destination,
        } => {
            session.generate_cidr(cidr)?;
            execute(
                &Command::Check {
                    source: source.clone(),
                    destination: destination.clone(),
                },
                session,
                sink,
                config,
            )
        }
    }
}
