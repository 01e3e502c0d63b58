use crate::{Error, Result};

/// Weeks per month used to turn monthly figures into daily ones.
const WEEKS_PER_MONTH: f64 = 4.34812141;

/// Inclusive range a uniform deviate is drawn from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// `centre ± spread`.
    pub fn around(centre: f64, spread: f64) -> Self {
        Self::new(centre - spread, centre + spread)
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Checks that both ends are finite and `low <= high`; `name` identifies the band in the error.
    pub fn validate(&self, name: &'static str) -> Result {
        if self.low.is_finite() && self.high.is_finite() && self.low <= self.high {
            Ok(())
        } else {
            Err(Error::InvalidBand {
                name,
                low: self.low,
                high: self.high,
            })
        }
    }
}

/// How many inter-house transfer delays a truck samples after each street.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TransferDelayBasis {
    /// One per household-service transfer made so far by the whole fleet. Delays grow as the round progresses;
    /// matches historical output.
    #[default]
    Cumulative,
    /// One per household on the street just visited.
    PerStreet,
}

/// Bucket layout of the per-street duration histogram: `count` buckets of width `step` starting at `low`, plus an
/// underflow and an overflow bucket.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HistogramLayout {
    pub low: f64,
    pub step: f64,
    pub count: usize,
}

impl Default for HistogramLayout {
    fn default() -> Self {
        Self {
            low: 0.0,
            step: 1.0,
            count: 15,
        }
    }
}

/// Everything a collection run and its cost report are parameterized by.
///
/// Durations are in minutes, weights in kilograms, speeds in km/h, prices in CZK. [`Config::default()`] reproduces
/// the reference round.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Number of trucks the generator spawns, one per minute.
    pub fleet_size: u32,
    /// Days the round is repeated per costed period.
    pub days: u32,
    pub crew_per_vehicle: u32,
    /// Seed for the random source; `None` seeds from the operating system.
    pub seed: Option<u64>,

    /// Time to empty one household's bins.
    pub household_service: Band,
    /// Time to handle one sorted-waste container.
    pub sorted_handling: Band,
    /// Time to move between two houses.
    pub house_transfer: Band,
    pub transfer_delay_basis: TransferDelayBasis,
    /// Mean of the exponentially distributed speed on transit streets.
    pub average_transfer_speed: f64,

    /// Communal waste picked up on one serviced street.
    pub communal_load: Band,
    /// Waste in one sorted-waste container.
    pub sorted_load: Band,

    /// Litres per 100 km.
    pub fuel_consumption: Band,
    /// Per litre.
    pub fuel_price: Band,
    pub hourly_wage: f64,
    pub unsorted_disposal_fee_per_ton: f64,
    pub sorted_disposal_fee_per_ton: f64,
    /// Per truck.
    pub parking_rent_per_day: f64,

    pub histogram: HistogramLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fleet_size: 1,
            days: 7,
            crew_per_vehicle: 3,
            seed: None,
            household_service: Band::new(0.10, 0.35),
            sorted_handling: Band::new(0.20, 0.45),
            house_transfer: Band::new(0.10, 0.15),
            transfer_delay_basis: TransferDelayBasis::Cumulative,
            average_transfer_speed: 80.0,
            communal_load: Band::new(24.0, 30.0),
            sorted_load: Band::new(50.0, 100.0),
            fuel_consumption: Band::around(85.0, 10.0),
            fuel_price: Band::around(30.0, 0.5),
            hourly_wage: 55.0,
            unsorted_disposal_fee_per_ton: 1189.0,
            sorted_disposal_fee_per_ton: 300.0,
            parking_rent_per_day: 12000.0 / WEEKS_PER_MONTH / 7.0,
            histogram: HistogramLayout::default(),
        }
    }
}

impl Config {
    /// Reject anything that would make sampling or reporting meaningless. Runs before a simulation is built; nothing
    /// is validated per event.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBand`] for the first malformed band, [`Error::InvalidConfig`] for any other bad value.
    pub fn validate(&self) -> Result {
        self.household_service.validate("household_service")?;
        self.sorted_handling.validate("sorted_handling")?;
        self.house_transfer.validate("house_transfer")?;
        self.communal_load.validate("communal_load")?;
        self.sorted_load.validate("sorted_load")?;
        self.fuel_consumption.validate("fuel_consumption")?;
        self.fuel_price.validate("fuel_price")?;

        if self.fleet_size == 0 {
            return Err(Error::InvalidConfig("fleet_size must be at least 1".into()));
        }
        if !(self.average_transfer_speed.is_finite() && self.average_transfer_speed > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "average_transfer_speed must be positive, got {}",
                self.average_transfer_speed
            )));
        }
        let layout = &self.histogram;
        if layout.count == 0 || !(layout.step.is_finite() && layout.step > 0.0) || !layout.low.is_finite() {
            return Err(Error::InvalidConfig(format!("unusable histogram layout {layout:?}")));
        }
        Ok(())
    }
}
