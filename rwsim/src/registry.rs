//! Authoritative store of active flights, with a secondary index from
//! airline to flight IDs for ground-hold range scans.

use std::collections::{BTreeMap, BTreeSet};

use crate::{AirlineId, Flight, FlightId};

/// Owns every active flight. A flight is here iff it has neither landed
/// nor been canceled or grounded. Iteration is in flight-ID order, so
/// every scan over the registry is deterministic.
#[derive(Debug, Default)]
pub struct Registry {
    flights: BTreeMap<FlightId, Flight>,
    airlines: BTreeMap<AirlineId, BTreeSet<FlightId>>,
}

impl Registry {
    /// Constructs an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active flights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Checks if there are no active flights.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Checks whether `id` is an active flight.
    #[must_use]
    pub fn contains(&self, id: FlightId) -> bool {
        self.flights.contains_key(&id)
    }

    /// Returns the flight with `id`, if active.
    #[must_use]
    pub fn get(&self, id: FlightId) -> Option<&Flight> {
        self.flights.get(&id)
    }

    /// Returns the flight with `id` mutably, if active.
    pub fn get_mut(&mut self, id: FlightId) -> Option<&mut Flight> {
        self.flights.get_mut(&id)
    }

    /// Registers `flight` and indexes it under its airline.
    ///
    /// # Panics
    ///
    /// Panics if a flight with the same ID is already active; the
    /// caller checks [`contains`](Self::contains) first.
    pub fn insert(&mut self, flight: Flight) {
        self.airlines
            .entry(flight.airline)
            .or_default()
            .insert(flight.id);
        let previous = self.flights.insert(flight.id, flight);
        assert!(previous.is_none(), "duplicate flight registered");
    }

    /// Removes the flight with `id`, dropping its airline bucket if it
    /// became empty. Returns the flight, or `None` if it was not
    /// active.
    pub fn remove(&mut self, id: FlightId) -> Option<Flight> {
        let flight = self.flights.remove(&id)?;
        let bucket = self
            .airlines
            .get_mut(&flight.airline)
            .expect("registered flight must be indexed under its airline");
        bucket.remove(&id);
        if bucket.is_empty() {
            self.airlines.remove(&flight.airline);
        }
        Some(flight)
    }

    /// Iterates over active flights in flight-ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Flight> {
        self.flights.values()
    }

    /// Iterates mutably over active flights in flight-ID order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Flight> {
        self.flights.values_mut()
    }

    /// IDs of all active flights operated by airlines in the inclusive
    /// range `[lo, hi]`, ordered by airline and then flight ID.
    #[must_use]
    pub fn in_airline_range(&self, lo: AirlineId, hi: AirlineId) -> Vec<FlightId> {
        self.airlines
            .range(lo..=hi)
            .flat_map(|(_, bucket)| bucket.iter().copied())
            .collect()
    }
}
