use super::{Config, Histogram, Sampler, Statistics};

use std::fmt::{Display, Formatter};

const KG_PER_TON: f64 = 1000.0;

/// Operating-cost estimate for one collection round, with the per-street duration histogram attached.
///
/// Prices are in CZK. Fuel consumption and fuel price are drawn once per report from their configured bands.
///
/// Fuel and salary figures are fleet totals: distance and working time already sum over every truck, so they are not
/// scaled by the fleet size again. Only `duration_hours` is per truck.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub trucks: u32,
    pub households: u64,
    pub distance_km: f64,
    /// Working hours per truck.
    pub duration_hours: f64,
    pub unsorted_kg: f64,
    pub sorted_kg: f64,
    pub fuel_litres: f64,
    pub fuel_cost: f64,
    pub salary: f64,
    pub parking_rent: f64,
    pub unsorted_disposal: f64,
    pub sorted_disposal: f64,
    pub histogram: Histogram,
}

impl Report {
    pub fn new(stats: &Statistics, config: &Config, households: u64, sampler: &mut dyn Sampler) -> Self {
        let distance_km = stats.distance_km();
        let fuel_litres = distance_km * sampler.uniform(config.fuel_consumption) / 100.0;
        let fuel_cost = fuel_litres * sampler.uniform(config.fuel_price);
        let total_hours = stats.duration_hours();

        Self {
            trucks: config.fleet_size,
            households,
            distance_km,
            duration_hours: total_hours / f64::from(config.fleet_size),
            unsorted_kg: stats.unsorted_kg,
            sorted_kg: stats.sorted_kg,
            fuel_litres,
            fuel_cost,
            salary: total_hours * f64::from(config.crew_per_vehicle) * config.hourly_wage,
            parking_rent: f64::from(config.fleet_size) * config.parking_rent_per_day * f64::from(config.days),
            unsorted_disposal: stats.unsorted_kg / KG_PER_TON * config.unsorted_disposal_fee_per_ton,
            sorted_disposal: stats.sorted_kg / KG_PER_TON * config.sorted_disposal_fee_per_ton,
            histogram: stats.street_durations.clone(),
        }
    }

    pub fn total_cost(&self) -> f64 {
        self.fuel_cost + self.salary + self.parking_rent + self.unsorted_disposal + self.sorted_disposal
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Trucks: {}", self.trucks)?;
        writeln!(f, "Households: {}", self.households)?;
        writeln!(f, "Distance: {:.3} km", self.distance_km)?;

        writeln!(f)?;
        writeln!(f, "Total duration: {:.3} h", self.duration_hours)?;
        writeln!(f, "Total unsorted amount picked: {:.1} kg", self.unsorted_kg)?;
        writeln!(f, "Total sorted amount picked: {:.1} kg", self.sorted_kg)?;
        writeln!(f, "Total fuel consumption: {:.2} l", self.fuel_litres)?;

        writeln!(f)?;
        writeln!(f, "Total fuel price: {:.2} CZK", self.fuel_cost)?;
        writeln!(f, "Total crew salary: {:.2} CZK", self.salary)?;
        writeln!(f, "Total parking space rent: {:.2} CZK", self.parking_rent)?;
        writeln!(f, "Total unsorted disposal price: {:.2} CZK", self.unsorted_disposal)?;
        writeln!(f, "Total sorted disposal price: {:.2} CZK", self.sorted_disposal)?;
        writeln!(f)?;
        writeln!(f, "Total price: {:.2} CZK", self.total_cost())?;

        writeln!(f)?;
        write!(f, "{}", self.histogram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Band;

    #[derive(Debug)]
    struct Midpoints;

    impl Sampler for Midpoints {
        fn uniform(&mut self, band: Band) -> f64 {
            band.midpoint()
        }

        fn exponential(&mut self, mean: f64) -> f64 {
            mean
        }
    }

    fn stats() -> Statistics {
        let mut stats = Statistics::default();
        stats.distance_meters = 10_000;
        stats.duration = 600.0;
        stats.unsorted_kg = 2_000.0;
        stats.sorted_kg = 500.0;
        stats.street_durations.record(3.0);
        stats
    }

    #[test]
    fn costs_follow_configured_rates() {
        let config = Config {
            fleet_size: 2,
            parking_rent_per_day: 100.0,
            ..Config::default()
        };
        let report = Report::new(&stats(), &config, 40, &mut Midpoints);

        assert_eq!(10.0, report.distance_km);
        assert_eq!(5.0, report.duration_hours);
        assert_eq!(8.5, report.fuel_litres);
        assert_eq!(255.0, report.fuel_cost);
        assert_eq!(10.0 * 3.0 * 55.0, report.salary);
        assert_eq!(2.0 * 100.0 * 7.0, report.parking_rent);
        assert_eq!(2.0 * 1189.0, report.unsorted_disposal);
        assert_eq!(0.5 * 300.0, report.sorted_disposal);
        assert_eq!(255.0 + 1650.0 + 1400.0 + 2378.0 + 150.0, report.total_cost());
    }

    #[test]
    fn rendering_includes_totals_and_histogram() {
        let report = Report::new(&stats(), &Config::default(), 40, &mut Midpoints);
        let text = report.to_string();
        assert!(text.starts_with("Trucks: 1\nHouseholds: 40\nDistance: 10.000 km\n"));
        assert!(text.contains("Total price: "));
        assert!(text.contains("HISTOGRAM Time on a single street"));
    }
}
