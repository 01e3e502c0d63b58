mod event_holder;
pub(super) mod event_traits;

use super::process::{Process, ProcessId, ProcessState, Step};
use crate::{Error, SimTime};
use event_holder::EventHolder;
pub(crate) use event_holder::Target;
use event_traits::Event;

use log::{debug, trace};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Priority queue of scheduled events, and the clock and process table that go with it.
///
/// Entries will execute in ascending order of execution time, with ties broken by the order in which they were pushed
/// onto the queue. This tiebreaker is in addition to any built-in to the implementation of [`SimTime`] used for the
/// clock as a way to stabilize the observed order of execution: two processes due at the same instant resume in the
/// order their resumptions were enqueued.
///
/// An entry is either a boxed one-shot [`Event`] or the resumption of a [`Process`]. Processes are registered with
/// [`spawn()`] and owned by the queue from then on; the queue lends each one out for the length of its turn and takes
/// it back when the process yields a [`Step`].
///
/// An [`EventQueue`] provides several different methods for scheduling new events, but does not publicly support
/// popping; popping entries from the queue only occurs during [`Simulation::run()`].
///
/// # Causality
///
/// Every scheduling method compares the desired execution time against the current clock time. Attempting to schedule
/// an entry for a time that is already past will result in an [`Error::CausalityViolation`] without modifying the
/// queue. This error indicates that client code probably has a logical error, as rewinding the clock in a
/// discrete-event simulation should never happen.
///
/// [`spawn()`]: EventQueue::spawn
/// [`Simulation::run()`]: crate::serial::Simulation::run
#[derive(Debug)]
pub struct EventQueue<State, Time>
where
    Time: SimTime,
{
    events: BinaryHeap<Reverse<EventHolder<State, Time>>>,
    processes: Vec<ProcessEntry<State, Time>>,
    last_execution_time: Time,
    events_added: usize,
    events_dispatched: usize,
    trace: Option<Vec<Dispatch<Time>>>,
}

/// The queue's bookkeeping for one spawned process. `behavior` is `None` while the process is running (it has been
/// lent out) and after it has terminated.
#[derive(Debug)]
struct ProcessEntry<State, Time>
where
    Time: SimTime,
{
    state: ProcessState,
    behavior: Option<Box<dyn Process<State, Time>>>,
}

/// One dispatched entry, as recorded once [`EventQueue::record_dispatches()`] is switched on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch<Time> {
    /// Clock time at which the entry was dispatched.
    pub time: Time,
    /// Position of the entry in the overall insertion order.
    pub sequence: usize,
    /// The process resumed, or `None` for a one-shot event.
    pub process: Option<ProcessId>,
}

impl<State, Time> EventQueue<State, Time>
where
    Time: SimTime,
{
    /// Construct a new [`EventQueue`] with no scheduled events, no processes, and a clock initialized to the provided
    /// time.
    pub fn new(start_time: Time) -> Self {
        Self {
            events: BinaryHeap::default(),
            processes: Vec::new(),
            last_execution_time: start_time,
            events_added: 0,
            events_dispatched: 0,
            trace: None,
        }
    }

    /// Schedule the provided event at the specified time.
    ///
    /// # Errors
    ///
    /// If `time` is less than the current clock time on `self`, returns an [`Error::CausalityViolation`] to indicate
    /// the likely presence of a logical bug at the call site, with no modifications to the queue.
    pub fn schedule<EventType>(&mut self, event: EventType, time: Time) -> crate::Result
    where
        EventType: Event<State, Time> + 'static,
    {
        self.schedule_from_boxed(Box::new(event), time)
    }

    /// Schedule the provided event at the specified time.
    ///
    /// # Errors
    ///
    /// If `time` is less than the current clock time on `self`, returns an [`Error::CausalityViolation`] to indicate
    /// the likely presence of a logical bug at the call site, with no modifications to the queue.
    pub fn schedule_from_boxed(&mut self, event: Box<dyn Event<State, Time>>, time: Time) -> crate::Result {
        self.push(Target::Action(event), time)
    }

    /// Schedule the provided event to execute at the current sim time. Events previously scheduled for "now" will still
    /// execute before this event does.
    ///
    /// # Errors
    ///
    /// Only fails if the clock type's [`Clone`] produces a value less than the current time, which is not expected
    /// of any sensible [`SimTime`].
    pub fn schedule_now<EventType>(&mut self, event: EventType) -> crate::Result
    where
        EventType: Event<State, Time> + 'static,
    {
        let event_time = self.last_execution_time.clone();
        self.schedule(event, event_time)
    }

    /// Schedule the provided event after the specified delay. The event's execution time will be equal to the result of
    /// `self.current_time().clone() + delay`.
    ///
    /// # Errors
    ///
    /// If the calculated execution time is less than the current clock time on `self`, i.e. the delay is negative,
    /// returns an [`Error::CausalityViolation`] with no modifications to the queue.
    pub fn schedule_with_delay<EventType>(&mut self, event: EventType, delay: Time) -> crate::Result
    where
        EventType: Event<State, Time> + 'static,
    {
        let event_time = self.last_execution_time.clone() + delay;
        self.schedule(event, event_time)
    }

    /// Register a new process in the [`ProcessState::Idle`] state and hand back its id. The process does not run until
    /// it is activated.
    pub fn spawn<ProcessType>(&mut self, process: ProcessType) -> ProcessId
    where
        ProcessType: Process<State, Time> + 'static,
    {
        let id = ProcessId(self.processes.len());
        debug!("spawned {id} at {:?}: {process:?}", self.last_execution_time);
        self.processes.push(ProcessEntry {
            state: ProcessState::Idle,
            behavior: Some(Box::new(process)),
        });
        id
    }

    /// Schedule the process to begin or resume running at the specified time.
    ///
    /// # Errors
    ///
    /// * [`Error::UnknownProcess`] if `id` was never spawned on this queue.
    /// * [`Error::DoubleTermination`] if the process has already terminated.
    /// * [`Error::AlreadyActive`] if the process is running or already has a resumption pending; pending resumptions
    ///   cannot be moved.
    /// * [`Error::CausalityViolation`] if `time` is less than the current clock time.
    ///
    /// The process table and queue are left untouched on error.
    pub fn activate(&mut self, id: ProcessId, time: Time) -> crate::Result {
        let state = self.process_state(id).ok_or(Error::UnknownProcess(id))?;
        match state {
            ProcessState::Terminated => return Err(Error::DoubleTermination(id)),
            ProcessState::Waiting | ProcessState::Running => return Err(Error::AlreadyActive(id)),
            ProcessState::Idle | ProcessState::Passive => {},
        }

        self.push(Target::Resume(id), time)?;
        self.processes[id.0].state = ProcessState::Waiting;
        Ok(())
    }

    /// Schedule the process to begin or resume running at the current sim time, after anything else already due now.
    ///
    /// # Errors
    ///
    /// As for [`activate()`](EventQueue::activate), minus the causality check.
    pub fn activate_now(&mut self, id: ProcessId) -> crate::Result {
        let now = self.last_execution_time.clone();
        self.activate(id, now)
    }

    /// Current lifecycle state of a process, or `None` if `id` was never spawned here.
    pub fn process_state(&self, id: ProcessId) -> Option<ProcessState> {
        self.processes.get(id.0).map(|entry| entry.state)
    }

    /// Number of processes ever spawned on this queue.
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// Get a shared reference to the simulation's current clock time.
    pub fn current_time(&self) -> &Time {
        &self.last_execution_time
    }

    /// Number of entries still waiting to be dispatched.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is left to dispatch.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total number of entries dispatched so far.
    pub fn dispatched(&self) -> usize {
        self.events_dispatched
    }

    /// Start keeping a [`Dispatch`] record for every entry popped from here on.
    pub fn record_dispatches(&mut self) {
        if self.trace.is_none() {
            self.trace = Some(Vec::new());
        }
    }

    /// Dispatch records kept so far; empty unless [`record_dispatches()`] was called.
    ///
    /// [`record_dispatches()`]: EventQueue::record_dispatches
    pub fn dispatches(&self) -> &[Dispatch<Time>] {
        self.trace.as_deref().unwrap_or(&[])
    }

    /// Single entry point onto the heap. Checks causality and stamps the insertion sequence.
    fn push(&mut self, target: Target<State, Time>, time: Time) -> crate::Result {
        if time < self.last_execution_time {
            return Err(Error::CausalityViolation);
        }

        let insertion_sequence = self.events_added;
        self.events_added += 1;
        self.events.push(Reverse(EventHolder {
            execution_time: time,
            target,
            insertion_sequence,
        }));
        Ok(())
    }

    /// Crate-internal function to pop an entry from the queue. Updates the current clock time to match the execution
    /// time of the popped entry.
    pub(crate) fn next(&mut self) -> Option<Target<State, Time>> {
        let Reverse(holder) = self.events.pop()?;
        self.last_execution_time = holder.execution_time;
        self.events_dispatched += 1;

        let process = match &holder.target {
            Target::Resume(id) => Some(*id),
            Target::Action(_) => None,
        };
        trace!(
            "dispatching entry #{} at {:?} ({})",
            holder.insertion_sequence,
            self.last_execution_time,
            process.map_or_else(|| "event".to_string(), |id| id.to_string()),
        );
        if let Some(trace) = self.trace.as_mut() {
            trace.push(Dispatch {
                time: self.last_execution_time.clone(),
                sequence: holder.insertion_sequence,
                process,
            });
        }
        Some(holder.target)
    }

    /// Crate-internal function to give a process its turn. The behavior is taken out of the process table for the
    /// duration of the call so that it may receive `&mut self`, then stored back according to the [`Step`] it yields.
    pub(crate) fn resume(&mut self, id: ProcessId, simulation_state: &mut State) -> crate::Result {
        let entry = self.processes.get_mut(id.0).ok_or(Error::UnknownProcess(id))?;
        let mut behavior = entry.behavior.take().ok_or(Error::DoubleTermination(id))?;
        entry.state = ProcessState::Running;

        let step = behavior.resume(id, simulation_state, self)?;
        match step {
            Step::Wait(delay) => {
                let resume_time = self.last_execution_time.clone() + delay;
                self.push(Target::Resume(id), resume_time)?;
                let entry = &mut self.processes[id.0];
                entry.state = ProcessState::Waiting;
                entry.behavior = Some(behavior);
            },
            Step::Passivate => {
                let entry = &mut self.processes[id.0];
                entry.state = ProcessState::Passive;
                entry.behavior = Some(behavior);
            },
            Step::Terminate => {
                debug!("{id} terminated at {:?}", self.last_execution_time);
                self.processes[id.0].state = ProcessState::Terminated;
            },
        }
        Ok(())
    }
}

impl<State, Time> std::fmt::Display for EventQueue<State, Time>
where
    Time: SimTime,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            formatter,
            "EventQueue with {} scheduled events and {} processes at current time {:?}",
            self.events.len(),
            self.processes.len(),
            self.last_execution_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Noop;

    impl Event<(), u32> for Noop {
        fn execute(&mut self, _: &mut (), _: &mut EventQueue<(), u32>) -> crate::Result {
            Ok(())
        }
    }

    /// Waits once for the given delay, then terminates.
    #[derive(Debug)]
    struct Sleeper {
        delay: u32,
        slept: bool,
    }

    impl Process<(), u32> for Sleeper {
        fn resume(&mut self, _: ProcessId, _: &mut (), _: &mut EventQueue<(), u32>) -> crate::Result<Step<u32>> {
            if self.slept {
                Ok(Step::Terminate)
            } else {
                self.slept = true;
                Ok(Step::Wait(self.delay))
            }
        }
    }

    #[test]
    fn schedule_rejects_past_times() {
        let mut queue: EventQueue<(), u32> = EventQueue::new(5);
        assert_eq!(Err(Error::CausalityViolation), queue.schedule(Noop, 4));
        assert!(queue.is_empty(), "rejected event should not be queued");
        assert_eq!(Ok(()), queue.schedule(Noop, 5), "current time should be accepted");
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut queue: EventQueue<(), u32> = EventQueue::new(0);
        queue.record_dispatches();
        queue.schedule(Noop, 3).unwrap();
        queue.schedule(Noop, 1).unwrap();
        queue.schedule(Noop, 3).unwrap();
        queue.schedule(Noop, 1).unwrap();
        while queue.next().is_some() {}

        let order: Vec<(u32, usize)> = queue.dispatches().iter().map(|d| (d.time, d.sequence)).collect();
        assert_eq!(vec![(1, 1), (1, 3), (3, 0), (3, 2)], order);
        assert_eq!(4, queue.dispatched());
    }

    #[test]
    fn spawned_process_starts_idle() {
        let mut queue: EventQueue<(), u32> = EventQueue::new(0);
        let id = queue.spawn(Sleeper { delay: 2, slept: false });
        assert_eq!(ProcessId(0), id);
        assert_eq!(Some(ProcessState::Idle), queue.process_state(id));
        assert!(queue.is_empty(), "spawning should not schedule anything");
        assert_eq!(None, queue.process_state(ProcessId(1)));
    }

    #[test]
    fn activation_rules() {
        let mut queue: EventQueue<(), u32> = EventQueue::new(10);
        let id = queue.spawn(Sleeper { delay: 2, slept: false });

        assert_eq!(Err(Error::CausalityViolation), queue.activate(id, 9));
        assert_eq!(Some(ProcessState::Idle), queue.process_state(id));

        queue.activate(id, 12).unwrap();
        assert_eq!(Some(ProcessState::Waiting), queue.process_state(id));
        assert_eq!(Err(Error::AlreadyActive(id)), queue.activate_now(id));
        assert_eq!(
            Err(Error::UnknownProcess(ProcessId(4))),
            queue.activate_now(ProcessId(4))
        );
    }

    #[test]
    fn resume_follows_yielded_step() {
        let mut queue: EventQueue<(), u32> = EventQueue::new(0);
        let id = queue.spawn(Sleeper { delay: 7, slept: false });
        queue.activate_now(id).unwrap();

        let Some(Target::Resume(popped)) = queue.next() else {
            panic!("expected a resumption");
        };
        queue.resume(popped, &mut ()).unwrap();
        assert_eq!(Some(ProcessState::Waiting), queue.process_state(id));

        assert!(matches!(queue.next(), Some(Target::Resume(_))));
        assert_eq!(7, *queue.current_time());
        queue.resume(id, &mut ()).unwrap();
        assert_eq!(Some(ProcessState::Terminated), queue.process_state(id));

        assert_eq!(Err(Error::DoubleTermination(id)), queue.activate_now(id));
    }
}
