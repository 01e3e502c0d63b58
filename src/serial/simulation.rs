use super::events::Target;
use super::{Event, EventQueue, Process, ProcessId};
use crate::SimTime;

use std::fmt::Formatter;

/// Contains the event queue and other state belonging to a simulation.
///
/// A [`Simulation`] owns both its state and its event queue, providing both shared and mutable access to each so
/// clients can set up and tear down instances as needed - for example, scheduling initial events or writing the final
/// state to output.
///
/// The expected workflow for a Simulation is:
///
/// 1. Initialize the state value. It needs no trait implementations.
/// 2. Pass it and the start time to [`new()`].
/// 3. Schedule at least one initial event, or spawn and activate a process.
/// 4. Call [`run()`]. Handle any error it might return.
/// 5. Use the [`state()`] or [`into_state()`] accessors to finish processing the results.
///
/// [`new()`]: Simulation::new
/// [`run()`]: Simulation::run
/// [`state()`]: Simulation::state
/// [`into_state()`]: Simulation::into_state
#[derive(Debug)]
pub struct Simulation<State, Time>
where
    Time: SimTime,
{
    /// A priority queue of events that have been scheduled to execute, ordered ascending by execution time.
    event_queue: EventQueue<State, Time>,
    /// The current shared state of the Simulation. Exclusive access will be granted to each event that executes.
    state: State,
}

impl<State, Time> Simulation<State, Time>
where
    Time: SimTime,
{
    /// Initialize a Simulation instance with the provided starting state and an event queue with clock set to the
    /// provided starting time.
    pub fn new(initial_state: State, start_time: Time) -> Self {
        Self {
            event_queue: EventQueue::new(start_time),
            state: initial_state,
        }
    }

    /// Dispatch entries from the priority queue, one at a time, in ascending order by execution time, until the queue
    /// is empty.
    ///
    /// Follows this loop:
    ///
    /// 1. Attempt to pop the next entry from the queue, advancing the clock to its execution time. If there isn't one,
    ///    return `Ok(())`.
    /// 2. For a one-shot event, pass exclusive references to the state and event queue to [`event.execute()`]. For a
    ///    process resumption, let the process run to its next [`Step`].
    /// 3. If an error is returned, forward it as-is to the caller. Otherwise, go back to step 1.
    ///
    /// An empty queue is the only way out short of an error. A process that keeps waiting forever keeps this method
    /// running forever.
    ///
    /// # Errors
    ///
    /// Every error is fatal and passed back unchanged; the state is left as it was when the error occurred. See
    /// [`Error`] for the variants the engine itself raises.
    ///
    /// [`event.execute()`]: Event::execute
    /// [`Step`]: super::Step
    /// [`Error`]: crate::Error
    pub fn run(&mut self) -> crate::Result {
        while let Some(target) = self.event_queue.next() {
            match target {
                Target::Action(mut event) => event.execute(&mut self.state, &mut self.event_queue)?,
                Target::Resume(id) => self.event_queue.resume(id, &mut self.state)?,
            }
        }
        Ok(())
    }

    /// Schedule the provided event at the specified time.
    ///
    /// # Errors
    ///
    /// If `time` is less than the current clock time on `self`, returns an [`Error::CausalityViolation`] to indicate
    /// the likely presence of a logical bug at the call site, with no modifications to the queue.
    ///
    /// [`Error::CausalityViolation`]: crate::Error::CausalityViolation
    pub fn schedule<EventType>(&mut self, event: EventType, time: Time) -> crate::Result
    where
        EventType: Event<State, Time> + 'static,
    {
        self.event_queue.schedule(event, time)
    }

    /// Register a process with the event queue. See [`EventQueue::spawn()`].
    pub fn spawn<ProcessType>(&mut self, process: ProcessType) -> ProcessId
    where
        ProcessType: Process<State, Time> + 'static,
    {
        self.event_queue.spawn(process)
    }

    /// Schedule a spawned process to start at the specified time. See [`EventQueue::activate()`].
    ///
    /// # Errors
    ///
    /// As for [`EventQueue::activate()`].
    pub fn activate(&mut self, id: ProcessId, time: Time) -> crate::Result {
        self.event_queue.activate(id, time)
    }

    /// Get a shared reference to the simulation state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Get an exclusive reference to the simulation state.
    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Consume the simulation, keeping only its state.
    pub fn into_state(self) -> State {
        self.state
    }

    /// Get a shared reference to the event queue.
    pub fn event_queue(&self) -> &EventQueue<State, Time> {
        &self.event_queue
    }

    /// Get an exclusive reference to the event queue.
    pub fn event_queue_mut(&mut self) -> &mut EventQueue<State, Time> {
        &mut self.event_queue
    }
}

impl<State, Time> std::fmt::Display for Simulation<State, Time>
where
    Time: SimTime,
{
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Simulation at time {:?}", self.event_queue.current_time())
    }
}
