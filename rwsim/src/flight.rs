use crate::{AirlineId, FlightId, RunwayId, Time};

/// Flight state throughout its lifecycle.
///
/// Completion is not a stored state: a flight that has landed is
/// removed from the registry when its completion is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightState {
    /// Waiting for a runway assignment.
    Pending,
    /// Assigned to a runway, start time not yet passed.
    Scheduled,
    /// Committed to its runway; frozen until it lands.
    InProgress,
}

/// A runway assignment of a single flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Runway the flight occupies.
    pub runway: RunwayId,
    /// The moment the flight takes the runway.
    pub start: Time,
    /// `start + duration`; the moment the runway is free again.
    pub eta: Time,
}

/// A flight competing for a runway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    /// Unique ID among active flights.
    pub id: FlightId,
    /// Operating airline, the key of ground-hold range scans.
    pub airline: AirlineId,
    /// Submission time; a tie-break key, set once.
    pub submitted_at: Time,
    /// Scheduling priority, higher wins; mutable via reprioritization.
    pub priority: i64,
    /// Runway occupancy span.
    pub duration: Time,
    /// Current lifecycle state.
    pub state: FlightState,
    /// Current assignment; `None` while pending.
    pub placement: Option<Placement>,
}

impl Flight {
    /// Constructs a new pending flight.
    #[must_use]
    pub fn new(
        id: FlightId,
        airline: AirlineId,
        submitted_at: Time,
        priority: i64,
        duration: Time,
    ) -> Self {
        Self {
            id,
            airline,
            submitted_at,
            priority,
            duration,
            state: FlightState::Pending,
            placement: None,
        }
    }

    /// The flight's estimated time of arrival, if assigned.
    #[must_use]
    pub fn eta(&self) -> Option<Time> {
        self.placement.map(|p| p.eta)
    }

    /// Checks whether the flight is frozen on its runway. Everything
    /// else can be re-packed, canceled, or grounded.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.state == FlightState::InProgress
    }
}
