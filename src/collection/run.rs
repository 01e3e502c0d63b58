use super::{Config, FleetGenerator, Minutes, RandomSource, Report, Sampler, Statistics, StreetPool, StreetRecord};
use crate::serial::Simulation;
use crate::Result;

use log::info;
use ordered_float::OrderedFloat;

/// Simulation state of a collection run: the configuration, the streets, the statistics the trucks accumulate, and the
/// random source they draw from.
#[derive(Debug)]
pub struct CollectionRun {
    pub config: Config,
    pub pool: StreetPool,
    pub stats: Statistics,
    pub sampler: Box<dyn Sampler>,
}

impl CollectionRun {
    /// Validate `config` and lay out the streets in the given order.
    ///
    /// # Errors
    ///
    /// Whatever [`Config::validate()`] rejects.
    pub fn new(
        config: Config,
        streets: impl IntoIterator<Item = StreetRecord>,
        sampler: Box<dyn Sampler>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            stats: Statistics::new(config.histogram),
            pool: StreetPool::new(streets),
            config,
            sampler,
        })
    }

    /// Households over the whole dataset, counted once at setup regardless of which streets get serviced.
    pub fn households(&self) -> u64 {
        self.pool.total_households()
    }

    /// Wrap the run in a simulation with the fleet generator due at time zero.
    ///
    /// # Errors
    ///
    /// Cannot fail in practice: the clock starts at zero and so does the generator.
    pub fn into_simulation(self) -> Result<Simulation<Self, Minutes>> {
        let mut simulation = Simulation::new(self, OrderedFloat(0.0));
        simulation.schedule(FleetGenerator::default(), OrderedFloat(0.0))?;
        Ok(simulation)
    }

    /// Cost report for the run so far. Draws the fuel figures from the run's own sampler.
    pub fn report(&mut self) -> Report {
        Report::new(&self.stats, &self.config, self.households(), self.sampler.as_mut())
    }
}

/// Run a full collection round over `streets` with a [`RandomSource`] seeded from `config`, and hand back the final
/// state.
///
/// # Errors
///
/// Configuration errors before the run starts, or the first engine error during it.
pub fn run(config: Config, streets: impl IntoIterator<Item = StreetRecord>) -> Result<CollectionRun> {
    let sampler = Box::new(RandomSource::new(config.seed));
    let mut simulation = CollectionRun::new(config, streets, sampler)?.into_simulation()?;
    simulation.run()?;
    info!(
        "collection round finished at {:.3} min after {} dispatches",
        simulation.event_queue().current_time().0,
        simulation.event_queue().dispatched()
    );
    Ok(simulation.into_state())
}
