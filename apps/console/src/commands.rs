//! Line commands typed at the console prompt.

use cube::{catalog, ActionId, CubeError};
use thiserror::Error;

const MAX_SCRAMBLE_DEPTH: usize = 1_000;

pub const HELP: &str = "\
commands:
  show                      print the cube net
  rotate <label|index>      turn one face, e.g. rotate R'
  scramble <depth>          apply <depth> random turns (at most 1000)
  reset                     return to the solved cube
  solve <seconds> [searcher] ask the solver for a solution
  step                      play the next solution action
  animate                   play the remaining solution
  cancel                    abandon a solve or animation
  status                    print session status
  searchers                 list searchers offered by the solver
  help                      print this text
  quit                      leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Rotate(ActionId),
    Scramble(usize),
    Reset,
    Solve {
        time_limit_secs: f64,
        searcher: Option<String>,
    },
    Step,
    Animate,
    Cancel,
    Status,
    Searchers,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("'{value}' is not a valid {argument}")]
    InvalidArgument {
        argument: &'static str,
        value: String,
    },
    #[error("'{0}' takes no further arguments")]
    TrailingArguments(&'static str),
    #[error(transparent)]
    Cube(#[from] CubeError),
}

pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let head = head.to_ascii_lowercase();

    let command = match head.as_str() {
        "show" => finish(Command::Show, "show", words)?,
        "rotate" | "r" => {
            let raw = required(words.next(), "rotate", "an action label or index")?;
            let action = catalog().parse(raw)?;
            finish(Command::Rotate(action), "rotate", words)?
        }
        "scramble" => {
            let raw = required(words.next(), "scramble", "a depth")?;
            let depth = raw
                .parse::<usize>()
                .ok()
                .filter(|depth| *depth <= MAX_SCRAMBLE_DEPTH)
                .ok_or_else(|| CommandError::InvalidArgument {
                    argument: "depth",
                    value: raw.to_string(),
                })?;
            finish(Command::Scramble(depth), "scramble", words)?
        }
        "reset" => finish(Command::Reset, "reset", words)?,
        "solve" => {
            let raw = required(words.next(), "solve", "a time limit in seconds")?;
            let time_limit_secs = raw.parse().map_err(|_| CommandError::InvalidArgument {
                argument: "time limit",
                value: raw.to_string(),
            })?;
            let searcher = words.next().map(str::to_string);
            finish(
                Command::Solve {
                    time_limit_secs,
                    searcher,
                },
                "solve",
                words,
            )?
        }
        "step" | "s" => finish(Command::Step, "step", words)?,
        "animate" | "play" => finish(Command::Animate, "animate", words)?,
        "cancel" => finish(Command::Cancel, "cancel", words)?,
        "status" => finish(Command::Status, "status", words)?,
        "searchers" => finish(Command::Searchers, "searchers", words)?,
        "help" | "?" => finish(Command::Help, "help", words)?,
        "quit" | "exit" | "q" => finish(Command::Quit, "quit", words)?,
        _ => return Err(CommandError::Unknown(head)),
    };
    Ok(Some(command))
}

pub fn resolve_searcher(raw: Option<&str>, searchers: &[String]) -> Result<usize, CommandError> {
    let Some(raw) = raw else {
        return Ok(0);
    };
    if let Ok(index) = raw.parse::<usize>() {
        return Ok(index);
    }
    searchers
        .iter()
        .position(|name| name.eq_ignore_ascii_case(raw))
        .ok_or_else(|| CommandError::InvalidArgument {
            argument: "searcher",
            value: raw.to_string(),
        })
}

fn required<'a>(
    word: Option<&'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    word.ok_or(CommandError::MissingArgument { command, argument })
}

fn finish<'a>(
    command: Command,
    name: &'static str,
    mut rest: impl Iterator<Item = &'a str>,
) -> Result<Command, CommandError> {
    match rest.next() {
        Some(_) => Err(CommandError::TrailingArguments(name)),
        None => Ok(command),
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
