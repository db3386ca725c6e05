//! The scheduling engine: the clock, the runway set, the registry, the
//! three priority structures, and the handlers for every operator
//! command.
//!
//! Every mutating handler follows the same shape: advance the clock to
//! the command's time (settling completions and promoting started
//! flights on the way), validate, mutate the registry, then re-pack all
//! unsatisfied flights onto the runways and report any ETA that moved.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use crate::flight::{Flight, FlightState, Placement};
use crate::pending::PendingQueue;
use crate::pool::{RunwayPool, RunwaySlot};
use crate::registry::Registry;
use crate::timetable::{Timetable, TimetableEntry};
use crate::transcript::Transcript;
use crate::{AirlineId, Command, FlightId, Time};

/// Renders an optional value the way the transcript spells the absence
/// of an assignment.
fn or_unassigned<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| String::from("-1"), |v| v.to_string())
}

/// Renders the changed-ETA report of one repack, if anything moved.
fn push_updated_etas(changed: &[(FlightId, Time)], out: &mut Transcript) {
    if changed.is_empty() {
        return;
    }
    out.push(format!(
        "Updated ETAs: [{}]",
        changed
            .iter()
            .map(|(id, eta)| format!("{id}: {eta}"))
            .join(", ")
    ));
}

/// The runway scheduler.
///
/// Owns all simulation state; nothing outside the engine mutates the
/// registry or the queues. Commands are handled strictly in order and
/// each appends its output lines to the provided [`Transcript`].
#[derive(Debug, Default)]
pub struct Engine {
    current_time: Time,
    runway_count: i64,
    registry: Registry,
    pending: PendingQueue,
    pool: RunwayPool,
    timetable: Timetable,
}

impl Engine {
    /// Constructs an engine with no runways and an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current simulation time.
    #[must_use]
    pub fn current_time(&self) -> Time {
        self.current_time
    }

    /// Number of runways created so far.
    #[must_use]
    pub fn runway_count(&self) -> i64 {
        self.runway_count
    }

    /// The active-flight store.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Executes one parsed command, appending its output to `out`.
    pub fn execute(&mut self, command: &Command, out: &mut Transcript) {
        match *command {
            Command::Initialize { runways } => self.initialize(runways, out),
            Command::SubmitFlight {
                flight,
                airline,
                submitted_at,
                priority,
                duration,
            } => self.submit_flight(flight, airline, submitted_at, priority, duration, out),
            Command::CancelFlight { flight, at } => self.cancel_flight(flight, at, out),
            Command::Reprioritize {
                flight,
                at,
                priority,
            } => self.reprioritize(flight, at, priority, out),
            Command::AddRunways { count, at } => self.add_runways(count, at, out),
            Command::GroundHold { lo, hi, at } => self.ground_hold(lo, hi, at, out),
            Command::PrintActive => self.print_active(out),
            Command::PrintSchedule { from, to } => self.print_schedule(from, to, out),
            Command::Tick { at } => self.tick(at, out),
            Command::Quit => self.quit(out),
        }
    }

    /// Resets the world: `runways` runways free at time 0, empty
    /// registry, clock at 0.
    pub fn initialize(&mut self, runways: i64, out: &mut Transcript) {
        if runways <= 0 {
            out.push("Invalid input.");
            return;
        }
        *self = Self::new();
        self.runway_count = runways;
        self.pool.rebuild((1..=runways).map(|id| RunwaySlot {
            runway: id.into(),
            next_free: Time::default(),
        }));
        log::info!("initialized with {runways} runways");
        out.push(format!("{runways} Runways are now available"));
    }

    /// Registers a new flight and places it.
    pub fn submit_flight(
        &mut self,
        flight: FlightId,
        airline: AirlineId,
        submitted_at: Time,
        priority: i64,
        duration: Time,
        out: &mut Transcript,
    ) {
        self.advance_time(submitted_at, out);
        if self.registry.contains(flight) {
            out.push("Duplicate FlightID");
            return;
        }
        self.registry
            .insert(Flight::new(flight, airline, submitted_at, priority, duration));
        let changed = self.repack();
        let eta = self.registry.get(flight).and_then(Flight::eta);
        out.push(format!(
            "Flight {flight} scheduled - ETA: {}",
            or_unassigned(eta)
        ));
        push_updated_etas(&changed, out);
    }

    /// Cancels a flight that has not yet committed to its runway.
    pub fn cancel_flight(&mut self, flight: FlightId, at: Time, out: &mut Transcript) {
        self.advance_time(at, out);
        match self.registry.get(flight) {
            None => out.push(format!("Flight {flight} does not exist")),
            Some(f) if f.is_in_progress() => out.push(format!(
                "Cannot cancel. Flight {flight} has already departed"
            )),
            Some(_) => {
                self.drop_flight(flight);
                out.push(format!("Flight {flight} has been canceled"));
                let changed = self.repack();
                push_updated_etas(&changed, out);
            }
        }
    }

    /// Updates the priority of a flight that has not yet committed to
    /// its runway, then re-places everything.
    pub fn reprioritize(&mut self, flight: FlightId, at: Time, priority: i64, out: &mut Transcript) {
        self.advance_time(at, out);
        match self.registry.get_mut(flight) {
            None => out.push(format!("Flight {flight} not found")),
            Some(f) if f.is_in_progress() => out.push(format!(
                "Cannot reprioritize. Flight {flight} has already departed"
            )),
            Some(f) => {
                f.priority = priority;
                out.push(format!(
                    "Priority of Flight {flight} has been updated to {priority}"
                ));
                let changed = self.repack();
                push_updated_etas(&changed, out);
            }
        }
    }

    /// Extends the runway set; the new runways become usable at the
    /// current time.
    pub fn add_runways(&mut self, count: i64, at: Time, out: &mut Transcript) {
        self.advance_time(at, out);
        if count <= 0 {
            out.push("Invalid input.");
            return;
        }
        self.runway_count += count;
        log::info!("runway set extended to {}", self.runway_count);
        out.push(format!("Additional {count} Runways are now available"));
        let changed = self.repack();
        push_updated_etas(&changed, out);
    }

    /// Removes every flight of the airlines in `[lo, hi]` that has not
    /// yet committed to its runway.
    pub fn ground_hold(&mut self, lo: AirlineId, hi: AirlineId, at: Time, out: &mut Transcript) {
        self.advance_time(at, out);
        if hi < lo {
            out.push("Invalid input.");
            return;
        }
        let grounded: Vec<FlightId> = self
            .registry
            .in_airline_range(lo, hi)
            .into_iter()
            .filter(|&id| {
                self.registry
                    .get(id)
                    .is_some_and(|flight| !flight.is_in_progress())
            })
            .collect();
        for id in grounded {
            log::debug!("grounding flight {id}");
            self.drop_flight(id);
        }
        out.push(format!(
            "Flights of the airlines in the range [{lo}, {hi}] have been grounded"
        ));
        let changed = self.repack();
        push_updated_etas(&changed, out);
    }

    /// Lists all active flights in flight-ID order.
    pub fn print_active(&self, out: &mut Transcript) {
        if self.registry.is_empty() {
            out.push("No active flights");
            return;
        }
        for flight in self.registry.iter() {
            out.push(format!(
                "[flight{}, airline{}, runway{}, start{}, ETA{}]",
                flight.id,
                flight.airline,
                or_unassigned(flight.placement.map(|p| p.runway)),
                or_unassigned(flight.placement.map(|p| p.start)),
                or_unassigned(flight.placement.map(|p| p.eta)),
            ));
        }
    }

    /// Lists scheduled flights whose ETA falls within `[from, to]`,
    /// inclusive on both ends, ordered by (ETA, flight ID).
    pub fn print_schedule(&self, from: Time, to: Time, out: &mut Transcript) {
        let upcoming: Vec<FlightId> = self
            .registry
            .iter()
            .filter(|flight| flight.state == FlightState::Scheduled)
            .filter_map(|flight| flight.placement.map(|p| (p, flight.id)))
            .filter(|(p, _)| p.start > self.current_time && from <= p.eta && p.eta <= to)
            .sorted_by_key(|&(p, id)| (p.eta, id))
            .map(|(_, id)| id)
            .collect();
        if upcoming.is_empty() {
            out.push("There are no flights in that time period");
        } else {
            for id in upcoming {
                out.push(format!("[{id}]"));
            }
        }
    }

    /// Advances the clock, then re-places anything the settled
    /// completions may have unblocked.
    pub fn tick(&mut self, at: Time, out: &mut Transcript) {
        self.advance_time(at, out);
        let changed = self.repack();
        push_updated_etas(&changed, out);
    }

    /// Emits the termination line. The command loop stops afterwards.
    pub fn quit(&self, out: &mut Transcript) {
        out.push("Program Terminated!!");
    }

    /// Moves the clock to `to`, settling completions with `eta <= to`
    /// in (ETA, flight ID) order and then promoting every scheduled
    /// flight whose start time has passed.
    ///
    /// The clock never moves backwards: an earlier `to` is clamped.
    fn advance_time(&mut self, to: Time, out: &mut Transcript) {
        let target = if to < self.current_time {
            log::warn!(
                "time argument {to} precedes current time {}; clamping",
                self.current_time
            );
            self.current_time
        } else {
            to
        };
        let mut landed: Vec<TimetableEntry> = Vec::new();
        while let Some(next) = self.timetable.peek() {
            if next.eta > target {
                break;
            }
            landed.push(self.timetable.pop().expect("peeked entry must pop"));
        }
        landed.sort_by_key(|entry| (entry.eta, entry.flight));
        for entry in landed {
            log::debug!("flight {} completed at {}", entry.flight, entry.eta);
            out.push(format!(
                "Flight {} has landed at time {}",
                entry.flight, entry.eta
            ));
            self.registry.remove(entry.flight);
        }
        self.current_time = target;
        // Promotion is strict: a flight starting exactly now is still
        // cancelable and repackable until the clock moves past it.
        for flight in self.registry.iter_mut() {
            if flight.state == FlightState::Scheduled {
                let placement = flight
                    .placement
                    .expect("scheduled flight must have a placement");
                if placement.start < self.current_time {
                    flight.state = FlightState::InProgress;
                }
            }
        }
    }

    /// Removes one flight from the registry and the timetable. The
    /// pending queue is not touched: every caller repacks afterwards,
    /// which rebuilds it from the registry. The timetable entry cannot
    /// wait for that rebuild, since a removed flight never appears in
    /// the repack's exclusion set.
    fn drop_flight(&mut self, flight: FlightId) {
        self.registry.remove(flight);
        self.timetable.remove(flight);
    }

    /// Clears and re-derives every placement that is still movable,
    /// then greedily re-places the waiting flights onto the
    /// earliest-free runways.
    ///
    /// Returns the flights whose ETA changed, as `(id, new ETA)` pairs
    /// sorted by ID.
    fn repack(&mut self) -> Vec<(FlightId, Time)> {
        // In-progress flights are frozen; everything else goes back to
        // the pending queue.
        let mut old_etas: BTreeMap<FlightId, Time> = BTreeMap::new();
        let mut unsatisfied: BTreeSet<FlightId> = BTreeSet::new();
        let mut busy_until: BTreeMap<i64, Time> = BTreeMap::new();
        for flight in self.registry.iter_mut() {
            if flight.is_in_progress() {
                let placement = flight
                    .placement
                    .expect("in-progress flight must have a placement");
                let runway = i64::from(placement.runway);
                let until = busy_until.entry(runway).or_insert(placement.eta);
                *until = placement.eta.max(*until);
                continue;
            }
            unsatisfied.insert(flight.id);
            if let Some(placement) = flight.placement.take() {
                old_etas.insert(flight.id, placement.eta);
            }
            flight.state = FlightState::Pending;
        }

        self.pending.rebuild(
            self.registry
                .iter()
                .filter(|flight| unsatisfied.contains(&flight.id)),
        );
        let current_time = self.current_time;
        self.pool.rebuild((1..=self.runway_count).map(|id| RunwaySlot {
            runway: id.into(),
            next_free: busy_until
                .get(&id)
                .map_or(current_time, |&eta| eta.max(current_time)),
        }));
        self.timetable.rebuild_excluding(&unsatisfied);

        let mut changed: Vec<(FlightId, Time)> = Vec::new();
        while !self.pending.is_empty() && !self.pool.is_empty() {
            let id = self.pending.pop().expect("pending queue is non-empty");
            let slot = self.pool.pop().expect("runway pool is non-empty");
            let flight = self
                .registry
                .get_mut(id)
                .expect("pending flight must be registered");
            let start = self.current_time.max(slot.next_free);
            let eta = start + flight.duration;
            flight.placement = Some(Placement {
                runway: slot.runway,
                start,
                eta,
            });
            flight.state = FlightState::Scheduled;
            log::debug!("placed flight {id} on runway {} at {start}", slot.runway);
            self.pool.push(RunwaySlot {
                runway: slot.runway,
                next_free: eta,
            });
            self.timetable.push(TimetableEntry {
                eta,
                flight: id,
                runway: slot.runway,
            });
            if old_etas.get(&id).is_some_and(|&old| old != eta) {
                changed.push((id, eta));
            }
        }
        changed.sort_by_key(|&(id, _)| id);
        changed
    }
}
