//! The command language of the simulation: one command per line,
//! `<Name>(<int>[, <int>]*)`, executed strictly in order.

use std::io::BufRead;
use std::str::FromStr;

use eyre::WrapErr;

use crate::{AirlineId, Engine, FlightId, Time, Transcript};

/// Operator command parsed from one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Reset the world with `runways` runways free at time 0.
    Initialize {
        /// Requested runway count.
        runways: i64,
    },
    /// Register a new flight and place it.
    SubmitFlight {
        /// New flight ID.
        flight: FlightId,
        /// Operating airline.
        airline: AirlineId,
        /// Submission time; also advances the clock.
        submitted_at: Time,
        /// Scheduling priority.
        priority: i64,
        /// Runway occupancy span.
        duration: Time,
    },
    /// Remove a flight that has not yet departed.
    CancelFlight {
        /// Flight to cancel.
        flight: FlightId,
        /// Command time.
        at: Time,
    },
    /// Change the priority of a flight that has not yet departed.
    Reprioritize {
        /// Flight to update.
        flight: FlightId,
        /// Command time.
        at: Time,
        /// New priority.
        priority: i64,
    },
    /// Extend the runway set by `count` runways.
    AddRunways {
        /// Number of runways to add.
        count: i64,
        /// Command time.
        at: Time,
    },
    /// Ground every waiting flight of the airlines in `[lo, hi]`.
    GroundHold {
        /// Low end of the airline range, inclusive.
        lo: AirlineId,
        /// High end of the airline range, inclusive.
        hi: AirlineId,
        /// Command time.
        at: Time,
    },
    /// List all active flights.
    PrintActive,
    /// List scheduled flights landing within `[from, to]`.
    PrintSchedule {
        /// Earliest ETA, inclusive.
        from: Time,
        /// Latest ETA, inclusive.
        to: Time,
    },
    /// Advance the clock.
    Tick {
        /// Target time.
        at: Time,
    },
    /// Terminate the run.
    Quit,
}

/// Command opcodes as they appear in the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
enum CommandKind {
    Initialize,
    SubmitFlight,
    CancelFlight,
    Reprioritize,
    AddRunways,
    GroundHold,
    PrintActive,
    PrintSchedule,
    Tick,
    Quit,
}

/// Reason a line could not be parsed into a [`Command`].
///
/// Malformed lines are skipped, never fatal: the front end logs the
/// reason and continues with the next line.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line has no opening parenthesis.
    #[error("missing opening parenthesis")]
    MissingParen,
    /// The opcode is not one of the known commands.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// An argument token is not an integer.
    #[error("invalid integer argument `{0}`")]
    InvalidArgument(String),
    /// Fewer arguments than the command's arity.
    #[error("expected {expected} arguments, found {found}")]
    NotEnoughArguments {
        /// The command's arity.
        expected: usize,
        /// Number of arguments present.
        found: usize,
    },
}

/// Takes the first `N` arguments, or reports how many were found.
fn take<const N: usize>(args: &[i64]) -> Result<[i64; N], ParseError> {
    if args.len() < N {
        return Err(ParseError::NotEnoughArguments {
            expected: N,
            found: args.len(),
        });
    }
    Ok(args[..N].try_into().expect("length checked above"))
}

impl Command {
    fn from_parts(kind: CommandKind, args: &[i64]) -> Result<Self, ParseError> {
        match kind {
            CommandKind::Initialize => {
                let [runways] = take(args)?;
                Ok(Self::Initialize { runways })
            }
            CommandKind::SubmitFlight => {
                let [flight, airline, submitted_at, priority, duration] = take(args)?;
                Ok(Self::SubmitFlight {
                    flight: flight.into(),
                    airline: airline.into(),
                    submitted_at: submitted_at.into(),
                    priority,
                    duration: duration.into(),
                })
            }
            CommandKind::CancelFlight => {
                let [flight, at] = take(args)?;
                Ok(Self::CancelFlight {
                    flight: flight.into(),
                    at: at.into(),
                })
            }
            CommandKind::Reprioritize => {
                let [flight, at, priority] = take(args)?;
                Ok(Self::Reprioritize {
                    flight: flight.into(),
                    at: at.into(),
                    priority,
                })
            }
            CommandKind::AddRunways => {
                let [count, at] = take(args)?;
                Ok(Self::AddRunways {
                    count,
                    at: at.into(),
                })
            }
            CommandKind::GroundHold => {
                let [lo, hi, at] = take(args)?;
                Ok(Self::GroundHold {
                    lo: lo.into(),
                    hi: hi.into(),
                    at: at.into(),
                })
            }
            CommandKind::PrintActive => Ok(Self::PrintActive),
            CommandKind::PrintSchedule => {
                let [from, to] = take(args)?;
                Ok(Self::PrintSchedule {
                    from: from.into(),
                    to: to.into(),
                })
            }
            CommandKind::Tick => {
                let [at] = take(args)?;
                Ok(Self::Tick { at: at.into() })
            }
            CommandKind::Quit => Ok(Self::Quit),
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    /// Parses `Name(a, b, c)`. Whitespace around tokens is ignored,
    /// empty tokens are skipped, arguments past the command's arity are
    /// ignored, and a missing closing parenthesis is tolerated.
    fn from_str(s: &str) -> Result<Self, ParseError> {
        let open = s.find('(').ok_or(ParseError::MissingParen)?;
        let name = s[..open].trim();
        let kind: CommandKind = name
            .parse()
            .map_err(|_| ParseError::UnknownCommand(name.to_string()))?;
        let rest = &s[open + 1..];
        let args_str = rest.find(')').map_or(rest, |close| &rest[..close]);
        let args: Vec<i64> = args_str
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse()
                    .map_err(|_| ParseError::InvalidArgument(token.to_string()))
            })
            .collect::<Result<_, _>>()?;
        Self::from_parts(kind, &args)
    }
}

/// Runs a command script against a fresh [`Engine`] and returns the
/// transcript it produced.
///
/// Empty lines and lines starting with `#` are ignored. Malformed lines
/// are skipped with a warning. Processing stops after the first
/// non-comment line containing `Quit`, whether or not it parsed as a
/// well-formed `Quit()`.
///
/// # Errors
///
/// Returns an error only when reading from `input` fails.
pub fn run_script<R: BufRead>(input: R) -> eyre::Result<Transcript> {
    let mut engine = Engine::new();
    let mut transcript = Transcript::new();
    for line in input.lines() {
        let line = line.wrap_err("unable to read input line")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => engine.execute(&command, &mut transcript),
            Err(error) => log::warn!("skipping line `{line}`: {error}"),
        }
        if line.contains("Quit") {
            break;
        }
    }
    Ok(transcript)
}
