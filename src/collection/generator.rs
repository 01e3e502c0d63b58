use super::{CollectionRun, Minutes, Truck};
use crate::serial::{Event, EventQueue};

use log::info;
use ordered_float::OrderedFloat;

/// Staggers the fleet's start: each execution spawns one truck, starts it at once, and schedules the next spawn one
/// minute later until the configured fleet size is reached.
#[derive(Copy, Clone, Debug, Default)]
pub struct FleetGenerator {
    spawned: u32,
}

impl FleetGenerator {
    /// Trucks spawned by this generator chain so far.
    pub fn spawned(&self) -> u32 {
        self.spawned
    }
}

impl Event<CollectionRun, Minutes> for FleetGenerator {
    fn execute(&mut self, run: &mut CollectionRun, event_queue: &mut EventQueue<CollectionRun, Minutes>) -> crate::Result {
        let id = event_queue.spawn(Truck::new());
        event_queue.activate_now(id)?;
        self.spawned += 1;
        info!(
            "truck {} of {} started as {id} at {:.0} min",
            self.spawned,
            run.config.fleet_size,
            event_queue.current_time().0
        );

        if self.spawned < run.config.fleet_size {
            event_queue.schedule_with_delay(*self, OrderedFloat(1.0))?;
        }
        Ok(())
    }
}
