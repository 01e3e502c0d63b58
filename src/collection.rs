//! The waste-collection model built on the [`serial`](crate::serial) engine.

mod config;
pub mod dataset;
mod generator;
mod histogram;
mod report;
mod run;
mod sampler;
mod stats;
mod street;
mod truck;

pub use config::{Band, Config, HistogramLayout, TransferDelayBasis};
pub use generator::FleetGenerator;
pub use histogram::Histogram;
pub use report::Report;
pub use run::{run, CollectionRun};
pub use sampler::{RandomSource, Sampler};
pub use stats::Statistics;
pub use street::{Street, StreetId, StreetPool, StreetRecord};
pub use truck::Truck;

/// Virtual time of a collection run.
pub type Minutes = ordered_float::OrderedFloat<f64>;
