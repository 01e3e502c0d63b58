mod util;

use std::collections::HashSet;

use wastesim::collection::{
    self, dataset, Band, CollectionRun, Config, Minutes, RandomSource, Sampler, StreetId, StreetRecord,
};
use wastesim::serial::{Dispatch, ProcessId, ProcessState, Simulation};
use wastesim::Error;

/// Every band at its midpoint, every exponential at its mean.
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

fn seeded(fleet_size: u32, seed: u64) -> Config {
    Config {
        fleet_size,
        seed: Some(seed),
        ..Config::default()
    }
}

fn traced_run(config: Config) -> Simulation<CollectionRun, Minutes> {
    let sampler = Box::new(RandomSource::new(config.seed));
    let run = CollectionRun::new(config, dataset::default_streets(), sampler).expect("reference config is valid");
    let mut sim = run.into_simulation().expect("generator starts at time zero");
    sim.event_queue_mut().record_dispatches();
    sim.run().expect("collection round should complete");
    sim
}

#[test]
fn same_seed_reproduces_the_run() {
    let first = traced_run(seeded(3, 2024));
    let second = traced_run(seeded(3, 2024));

    let trace: &[Dispatch<Minutes>] = first.event_queue().dispatches();
    assert!(!trace.is_empty());
    assert_eq!(trace, second.event_queue().dispatches(), "dispatch traces diverged");

    let (a, b) = (&first.state().stats, &second.state().stats);
    assert_eq!(a.duration, b.duration);
    assert_eq!(a.unsorted_kg, b.unsorted_kg);
    assert_eq!(a.sorted_kg, b.sorted_kg);
    assert_eq!(a.street_durations.buckets(), b.street_durations.buckets());
    assert_eq!(first.state().pool.taken(), second.state().pool.taken());
}

#[test]
fn dispatch_times_never_decrease() {
    let sim = traced_run(seeded(4, 7));
    let trace = sim.event_queue().dispatches();
    assert_eq!(sim.event_queue().dispatched(), trace.len());
    for pair in trace.windows(2) {
        assert!(pair[0].time <= pair[1].time, "clock went backwards: {pair:?}");
        if pair[0].time == pair[1].time {
            assert!(pair[0].sequence < pair[1].sequence, "tie not broken by insertion order: {pair:?}");
        }
    }
}

#[test]
fn every_street_is_taken_exactly_once() {
    let run = collection::run(seeded(1, 11), dataset::default_streets()).unwrap();
    let pool = &run.pool;

    assert_eq!(79, pool.len());
    assert_eq!(0, pool.remaining());
    let expected: Vec<StreetId> = (0..pool.len()).map(StreetId).collect();
    assert_eq!(expected, pool.taken(), "a single truck should follow declaration order");
    for street in pool.streets() {
        assert_eq!(1, street.facility.seizures(), "{} seized more than once", street.record.name);
        assert_eq!(Some(ProcessId(0)), street.assigned_to);
        assert!(!street.facility.is_busy());
    }
}

#[test]
fn trucks_never_share_a_street() {
    let sim = traced_run(seeded(3, 99));
    let run = sim.state();

    let taken: HashSet<StreetId> = run.pool.taken().iter().copied().collect();
    assert_eq!(run.pool.len(), taken.len(), "some street was handed out twice");
    assert!(run.pool.streets().iter().all(|s| s.facility.seizures() == 1));

    let workers: HashSet<ProcessId> = run.pool.streets().iter().filter_map(|s| s.assigned_to).collect();
    assert!(workers.len() > 1, "staggered trucks should split the round, got {workers:?}");
    for n in 0..3 {
        assert_eq!(Some(ProcessState::Terminated), sim.event_queue().process_state(ProcessId(n)));
    }
}

#[test]
fn totals_match_the_dataset() {
    let mut run = collection::run(seeded(2, 5), dataset::default_streets()).unwrap();

    assert_eq!(11_086, run.stats.distance_meters);
    assert_eq!(run.pool.total_meters(), run.stats.distance_meters);
    assert_eq!(79, run.stats.streets_serviced);
    assert_eq!(u64::from(run.stats.streets_serviced), run.stats.street_durations.count());
    assert_eq!(
        run.stats.street_durations.count(),
        run.stats.street_durations.buckets().iter().sum::<u64>()
            + run.stats.street_durations.underflow()
            + run.stats.street_durations.overflow()
    );

    let report = run.report();
    assert_eq!(513, report.households);
    assert_eq!(2, report.trucks);
    assert_floats_near_equal!(11.086, report.distance_km, "distance should cover every street once");
    assert_floats_near_equal!(
        run.stats.duration / 60.0 / 2.0,
        report.duration_hours,
        "duration is reported per truck"
    );
}

#[test]
fn three_street_round_with_midpoint_draws() {
    let streets = vec![
        StreetRecord::new(12, 750, "Dlouha"),
        StreetRecord::new(0, 190, "Horni zpet"),
        StreetRecord::new(5, 190, "Horni").with_sorted(2),
    ];
    let run = CollectionRun::new(Config::default(), streets, Box::new(Midpoints)).unwrap();
    let mut sim = run.into_simulation().unwrap();
    sim.run().unwrap();

    assert_eq!(Some(ProcessState::Terminated), sim.event_queue().process_state(ProcessId(0)));
    let end = sim.event_queue().current_time().0;
    let mut run = sim.into_state();
    assert_eq!(&[StreetId(0), StreetId(1), StreetId(2)], run.pool.taken());
    assert_eq!(2, run.stats.household_transfers);
    assert_eq!(1, run.stats.travel_transfers);
    assert_eq!(1130, run.stats.distance_meters);
    assert_floats_near_equal!(end, run.stats.duration, "one truck works without gaps");

    let report = run.report();
    assert_eq!(17, report.households);
    assert_floats_near_equal!(54.0, report.unsorted_kg, "communal load midpoint per household street");
    assert_floats_near_equal!(150.0, report.sorted_kg, "two sorted containers at the load midpoint");
    assert!(report.to_string().contains("Total price: "));
}

#[test]
fn empty_fleet_is_rejected_before_running() {
    let result = collection::run(seeded(0, 1), dataset::default_streets());
    assert!(matches!(result, Err(Error::InvalidConfig(_))), "{result:?}");
}
