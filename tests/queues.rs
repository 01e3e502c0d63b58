use ordered_float::OrderedFloat;
use rand::SeedableRng;
use rand_distr::{Distribution, Exp};
use rand_pcg::Pcg64;
use wastesim::serial::*;

type Time = OrderedFloat<f64>;

const CLOSING_TIME: f64 = 540.0;

/// Single-server store: every customer is a process competing for one [`Facility`].
struct Counter {
    desk: Facility,
    rng: Pcg64,
    service_order: Vec<ProcessId>,
    arrival_order: Vec<ProcessId>,
    served: usize,
    time_in_line: f64,
}

impl Counter {
    fn new(seed: u64) -> Self {
        Self {
            desk: Facility::new("desk"),
            rng: Pcg64::seed_from_u64(seed),
            service_order: Vec::new(),
            arrival_order: Vec::new(),
            served: 0,
            time_in_line: 0.0,
        }
    }
}

#[derive(Debug)]
enum Visit {
    Arriving,
    Queued { since: f64 },
    Served,
}

#[derive(Debug)]
struct Shopper {
    visit: Visit,
}

impl Shopper {
    fn start_service(&mut self, id: ProcessId, counter: &mut Counter) -> Step<Time> {
        counter.service_order.push(id);
        self.visit = Visit::Served;
        let delay: f64 = Exp::new(6.0).unwrap().sample(&mut counter.rng);
        Step::Wait(OrderedFloat(delay))
    }
}

impl Process<Counter, Time> for Shopper {
    fn resume(
        &mut self,
        id: ProcessId,
        counter: &mut Counter,
        event_queue: &mut EventQueue<Counter, Time>,
    ) -> wastesim::Result<Step<Time>> {
        let now = event_queue.current_time().0;
        match self.visit {
            Visit::Arriving => {
                counter.arrival_order.push(id);
                match counter.desk.seize(id)? {
                    Seized::Acquired => Ok(self.start_service(id, counter)),
                    Seized::Queued => {
                        self.visit = Visit::Queued { since: now };
                        Ok(Step::Passivate)
                    },
                }
            },
            Visit::Queued { since } => {
                assert_eq!(Some(id), counter.desk.owner(), "resumed without holding the desk");
                counter.time_in_line += now - since;
                Ok(self.start_service(id, counter))
            },
            Visit::Served => {
                counter.desk.release(id, event_queue)?;
                counter.served += 1;
                Ok(Step::Terminate)
            },
        }
    }
}

/// Lets one shopper in and schedules the next one, until closing time.
#[derive(Debug)]
struct Door;

impl Event<Counter, Time> for Door {
    fn execute(&mut self, counter: &mut Counter, event_queue: &mut EventQueue<Counter, Time>) -> wastesim::Result {
        let id = event_queue.spawn(Shopper {
            visit: Visit::Arriving,
        });
        event_queue.activate_now(id)?;

        let delay: f64 = Exp::new(4.0).unwrap().sample(&mut counter.rng);
        if event_queue.current_time().0 + delay < CLOSING_TIME {
            event_queue.schedule_with_delay(Door, OrderedFloat(delay))?;
        }
        Ok(())
    }
}

fn run_sim(seed: u64) -> Simulation<Counter, Time> {
    let mut sim = Simulation::new(Counter::new(seed), OrderedFloat(0.0));
    sim.schedule(Door, OrderedFloat(0.0)).expect("clock starts at zero");
    sim.run().expect("simulation should complete normally");
    sim
}

#[test]
fn facility_serves_shoppers_in_arrival_order() {
    let sim = run_sim(11434450237083315284);

    let shoppers = sim.event_queue().process_count();
    let counter = sim.state();
    assert!(shoppers > 1);
    assert_eq!(shoppers, counter.served);
    assert_eq!(shoppers, counter.desk.seizures());
    assert_eq!(counter.arrival_order, counter.service_order, "desk should be handed over first come first served");
    assert!(!counter.desk.is_busy());
    assert_eq!(0, counter.desk.queue_len());
    assert!(counter.time_in_line > 0.0, "a busy single desk should make someone wait");
    assert!((0..shoppers).all(|n| sim.event_queue().process_state(ProcessId(n)) == Some(ProcessState::Terminated)));
}

#[test]
fn same_seed_same_day() {
    let first = run_sim(7082446179938253086);
    let second = run_sim(7082446179938253086);

    assert_eq!(first.state().service_order, second.state().service_order);
    assert_eq!(first.state().time_in_line, second.state().time_in_line);
    assert_eq!(first.event_queue().current_time(), second.event_queue().current_time());
    assert_eq!(first.event_queue().dispatched(), second.event_queue().dispatched());
}
