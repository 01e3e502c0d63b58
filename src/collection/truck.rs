use super::{CollectionRun, Minutes, StreetId, TransferDelayBasis};
use crate::serial::{EventQueue, Process, ProcessId, Step};
use crate::{Error, Result};

use log::{debug, info};
use ordered_float::OrderedFloat;

/// Where a truck picks up when it is next resumed.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Phase {
    /// Between streets: about to ask the pool for the next one.
    Seeking,
    /// Servicing households on, or driving along, `street`; the wait covers the work itself.
    Working { street: StreetId, started: Minutes },
    /// Moving between houses and handling sorted waste on `street`.
    Transferring { street: StreetId, started: Minutes },
    /// Pool exhausted and load delivered.
    Done,
}

/// A collection truck. Takes streets from the pool one at a time, in declaration order, until none are left, then
/// delivers what it carries to the run's totals.
#[derive(Clone, Debug)]
pub struct Truck {
    phase: Phase,
    communal_kg: f64,
    sorted_kg: f64,
    streets_worked: u32,
}

impl Truck {
    pub fn new() -> Self {
        Self {
            phase: Phase::Seeking,
            communal_kg: 0.0,
            sorted_kg: 0.0,
            streets_worked: 0,
        }
    }

    /// Communal waste on board.
    pub fn communal_kg(&self) -> f64 {
        self.communal_kg
    }

    /// Sorted waste on board.
    pub fn sorted_kg(&self) -> f64 {
        self.sorted_kg
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Seize `street` and draw the time the main work on it takes: servicing every household, or for a transit
    /// segment, driving its length at a randomly drawn speed.
    fn begin_street(&mut self, id: ProcessId, street: StreetId, run: &mut CollectionRun) -> Result<f64> {
        let target = run.pool.street_mut(street);
        target.facility.try_seize(id)?;
        target.assigned_to = Some(id);
        let households = target.record.households;
        let meters = target.record.meters;

        let minutes = if households > 0 {
            self.communal_kg += run.sampler.uniform(run.config.communal_load);
            run.sampler.uniform_sum(run.config.household_service, households)
        } else {
            let speed = run.sampler.exponential(run.config.average_transfer_speed);
            travel_minutes(meters, speed)
        };
        run.stats.duration += minutes;
        Ok(minutes)
    }

    /// Count the street as done, book its length, and draw the time spent moving between houses and handling sorted
    /// containers. The street counts toward the cumulative basis only once its main work has been waited out.
    fn transfer(&mut self, street: StreetId, run: &mut CollectionRun) -> f64 {
        let record = &run.pool.street(street).record;
        let (meters, households, sorted) = (record.meters, record.households, record.sorted);
        if households > 0 {
            run.stats.household_transfers += 1;
        } else {
            run.stats.travel_transfers += 1;
        }
        run.stats.distance_meters += u64::from(meters);

        let transfers = match run.config.transfer_delay_basis {
            TransferDelayBasis::Cumulative => run.stats.household_transfers,
            TransferDelayBasis::PerStreet => households,
        };
        let transfer = run.sampler.uniform_sum(run.config.house_transfer, transfers);
        let handling = run.sampler.uniform_sum(run.config.sorted_handling, sorted);
        self.sorted_kg += f64::from(sorted) * run.sampler.uniform(run.config.sorted_load);

        run.stats.duration += transfer + handling;
        transfer + handling
    }

    fn finish(&mut self, id: ProcessId, run: &mut CollectionRun, now: Minutes) -> Step<Minutes> {
        run.stats.unsorted_kg += self.communal_kg;
        run.stats.sorted_kg += self.sorted_kg;
        self.phase = Phase::Done;
        info!(
            "{id} finished at {:.3} min after {} streets with {:.1} kg communal and {:.1} kg sorted waste",
            now.0, self.streets_worked, self.communal_kg, self.sorted_kg
        );
        Step::Terminate
    }
}

impl Default for Truck {
    fn default() -> Self {
        Self::new()
    }
}

impl Process<CollectionRun, Minutes> for Truck {
    fn resume(
        &mut self,
        id: ProcessId,
        run: &mut CollectionRun,
        event_queue: &mut EventQueue<CollectionRun, Minutes>,
    ) -> Result<Step<Minutes>> {
        loop {
            let now = *event_queue.current_time();
            match self.phase {
                Phase::Seeking => {
                    let Some(street) = run.pool.take_first_free() else {
                        return Ok(self.finish(id, run, now));
                    };
                    let minutes = self.begin_street(id, street, run)?;
                    self.phase = Phase::Working { street, started: now };
                    return Ok(Step::Wait(OrderedFloat(minutes)));
                },
                Phase::Working { street, started } => {
                    let minutes = self.transfer(street, run);
                    self.phase = Phase::Transferring { street, started };
                    return Ok(Step::Wait(OrderedFloat(minutes)));
                },
                Phase::Transferring { street, started } => {
                    let elapsed = (now - started).0;
                    run.stats.street_durations.record(elapsed);
                    run.stats.streets_serviced += 1;
                    self.streets_worked += 1;
                    run.pool.street_mut(street).facility.release(id, event_queue)?;
                    debug!(
                        "{id} released {street} ({}) at {:.3} min after {elapsed:.3} min",
                        run.pool.street(street).record.name,
                        now.0
                    );
                    self.phase = Phase::Seeking;
                },
                Phase::Done => return Err(Error::DoubleTermination(id)),
            }
        }
    }
}

/// Minutes needed to drive `meters` at `speed_kmh`.
fn travel_minutes(meters: u32, speed_kmh: f64) -> f64 {
    f64::from(meters) / 1000.0 / speed_kmh * 60.0
}
