use super::{Histogram, HistogramLayout};

/// Run-wide figures the trucks accumulate and the report reads.
///
/// Durations are the sum over all trucks, so with several trucks working at once `duration` exceeds the elapsed virtual
/// time.
#[derive(Clone, Debug, PartialEq)]
pub struct Statistics {
    /// Minutes spent servicing, travelling, transferring between houses, and handling sorted waste.
    pub duration: f64,
    /// Streets with households that have been serviced.
    pub household_transfers: u32,
    /// Transit-only streets that have been driven.
    pub travel_transfers: u32,
    pub distance_meters: u64,
    /// Communal waste brought back by finished trucks.
    pub unsorted_kg: f64,
    /// Sorted waste brought back by finished trucks.
    pub sorted_kg: f64,
    /// Streets fully worked and released.
    pub streets_serviced: u32,
    /// Minutes spent on each street, from assignment to release.
    pub street_durations: Histogram,
}

impl Statistics {
    pub fn new(layout: HistogramLayout) -> Self {
        Self {
            duration: 0.0,
            household_transfers: 0,
            travel_transfers: 0,
            distance_meters: 0,
            unsorted_kg: 0.0,
            sorted_kg: 0.0,
            streets_serviced: 0,
            street_durations: Histogram::new("Time on a single street", layout),
        }
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_meters as f64 / 1000.0
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration / 60.0
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new(HistogramLayout::default())
    }
}
