use super::EventQueue;
use crate::SimTime;
use std::fmt::Debug;

/// A one-shot behavior or state change that occurs within a simulation.
///
/// This trait has one required method that describes what happens when the implementing type executes. It is generic
/// over the types used to represent simulation state and clock time so that your implementations of each work together
/// within this framework. Recurring behavior that needs to suspend and pick up where it left off belongs in a
/// [`Process`] instead; an event may spawn and activate processes through the queue it is handed.
///
/// Requiring implementors to be [`Debug`] enables printing the full contents of an [`EventQueue`] when necessary.
///
/// Events cannot be interrupted or cancelled once scheduled.
///
/// [`Process`]: crate::serial::Process
pub trait Event<State, Time>: Debug
where
    Time: SimTime,
{
    /// Update the simulation according to the specific type of event. The simulation will invoke this method during
    /// [`Simulation::run()`] for each scheduled event in sequence. Exclusive access will be provided to both the
    /// simulation's current state and the event queue, allowing for both mutation of the simulation's state and
    /// scheduling of new events.
    ///
    /// Note that the simulation's clock time, accessible on the `event_queue` parameter, will update before invoking
    /// this method.
    ///
    /// # Errors
    ///
    /// Any error stops [`Simulation::run()`] and is handed back to its caller. Client errors that don't map onto a
    /// [`wastesim::Error`] variant can travel as [`Error::BadExecution`].
    ///
    /// [`Simulation::run()`]: crate::serial::Simulation::run
    /// [`wastesim::Error`]: crate::Error
    /// [`Error::BadExecution`]: crate::Error::BadExecution
    fn execute(&mut self, simulation_state: &mut State, event_queue: &mut EventQueue<State, Time>) -> crate::Result;
}
