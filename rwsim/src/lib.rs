//! Runway scheduling simulation.
//!
//! A finite set of runways is modeled as serial resources; flights
//! compete for them under a priority policy with strict tie-breaks.
//! Time is an abstract integer advanced only by the commands of an
//! input script, so a script maps to exactly one output transcript.

#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::default_trait_access)]

use derive_more::{Add, Display, From, Into};

mod command;
pub use command::{run_script, Command, ParseError};

mod engine;
pub use engine::Engine;

mod flight;
pub use flight::{Flight, FlightState, Placement};

mod registry;
pub use registry::Registry;

mod pending;
pub use pending::{PendingEntry, PendingQueue};

mod pool;
pub use pool::{RunwayPool, RunwaySlot};

mod timetable;
pub use timetable::{Timetable, TimetableEntry};

mod transcript;
pub use transcript::Transcript;

/// Flight ID.
#[derive(From, Into, Debug, PartialEq, PartialOrd, Eq, Ord, Copy, Clone, Hash, Display)]
pub struct FlightId(i64);

/// Airline ID.
#[derive(From, Into, Debug, PartialEq, PartialOrd, Eq, Ord, Copy, Clone, Hash, Display)]
pub struct AirlineId(i64);

/// Runway ID. Runways are numbered densely from 1 in creation order and
/// never reused.
#[derive(From, Into, Debug, PartialEq, PartialOrd, Eq, Ord, Copy, Clone, Hash, Display)]
pub struct RunwayId(i64);

/// A point on the simulation clock, or a span between two such points.
///
/// The clock is an integer that only the command stream advances; there
/// is no wall-clock anywhere in the system.
#[derive(
    Add, From, Into, Debug, Default, PartialEq, PartialOrd, Eq, Ord, Copy, Clone, Hash, Display,
)]
pub struct Time(i64);
