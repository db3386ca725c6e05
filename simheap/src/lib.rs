#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::default_trait_access)]

//! Priority-queue mechanisms for deterministic simulations: an indexed
//! binary heap whose entries can be removed by key without draining the
//! heap. Ordering is entirely a property of the entry's [`Ord`]
//! implementation, so a min-queue is expressed by inverting the
//! comparator, never by negating stored keys.

pub use indexed::{Identified, IndexedHeap};

mod indexed;
