//! # Overview
//!
//! wastesim models a municipal waste-collection round as a discrete-event simulation. A fleet of trucks works through
//! a fixed, ordered list of streets; each street needs either household pickup or pure transit. The run accumulates
//! time, distance, and collected-weight statistics from which an operating-cost report is estimated.
//!
//! The crate is split in two layers:
//!
//! * [`serial`] is a small single-threaded discrete-event engine. An [`EventQueue`] orders pending work by virtual
//!   time, breaking ties by insertion order so that a fixed random-number stream always reproduces the same run. Work
//!   is either a one-shot [`Event`] or the resumption of a [`Process`], a suspendable entity that yields a [`Step`] to
//!   wait for a span of virtual time, park itself, or finish. A [`Facility`] is a serially reusable resource with a
//!   strict first-come-first-served waiting line.
//! * [`collection`] builds the waste-collection model on top: streets as facilities in an ordered [`StreetPool`],
//!   [`Truck`] processes driven by an explicit phase machine, a [`FleetGenerator`] event staggering truck start times,
//!   the [`Statistics`] the trucks accumulate, and the cost [`Report`] computed from them.
//!
//! The engine expects each event and process turn to be capable of failing. [`Simulation::run()`] halts at the first
//! error and hands it back to the caller; every [`Error`] is fatal to the run.
//!
//! Both layers are generic only where it pays: the engine is parameterized over the simulation state and the
//! [`SimTime`] clock type, while the collection model fixes time to [`Minutes`].
//!
//! [`EventQueue`]: serial::EventQueue
//! [`Event`]: serial::Event
//! [`Process`]: serial::Process
//! [`Step`]: serial::Step
//! [`Facility`]: serial::Facility
//! [`Simulation::run()`]: serial::Simulation::run
//! [`StreetPool`]: collection::StreetPool
//! [`Truck`]: collection::Truck
//! [`FleetGenerator`]: collection::FleetGenerator
//! [`Statistics`]: collection::Statistics
//! [`Report`]: collection::Report
//! [`Minutes`]: collection::Minutes

pub mod collection;
mod error;
mod generic_parameters;
pub mod serial;

pub use error::{Error, Result};
pub use generic_parameters::SimTime;
