use super::EventQueue;
use crate::SimTime;

use std::fmt::{Debug, Display, Formatter};

/// Identifies a process registered with an [`EventQueue`].
///
/// Ids are handed out in spawn order starting at zero and are never reused within a simulation, so they double as the
/// process's sequence number.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(pub usize);

impl Display for ProcessId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "process #{}", self.0)
    }
}

/// Lifecycle of a process as tracked by the [`EventQueue`].
///
/// ```text
/// Idle ──activate──> Waiting ──dispatch──> Running ──Step::Wait──> Waiting ...
///                       ^                     │
///                       └──activate── Passive <─Step::Passivate
///                                             │
///                                             └──Step::Terminate──> Terminated
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProcessState {
    /// Spawned but never activated.
    Idle,
    /// Executing its behavior inside the current dispatch.
    Running,
    /// Holds exactly one pending resumption event in the queue.
    Waiting,
    /// Suspended with no pending event; resumes only when something activates it, e.g. a facility hand-off.
    Passive,
    /// Behavior has completed. The process can never run again.
    Terminated,
}

/// What a process asks of the scheduler when it yields.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step<Time> {
    /// Suspend and resume after the given delay of virtual time.
    Wait(Time),
    /// Suspend without scheduling a resumption.
    Passivate,
    /// Finish for good.
    Terminate,
}

/// A suspendable unit of behavior driven exclusively by the [`EventQueue`].
///
/// The scheduler owns the process between dispatches and lends it out, together with exclusive access to the
/// simulation state and the queue, whenever its resumption event comes up. Implementors keep whatever explicit phase
/// they need to know where to pick up on the next call to [`resume()`]; the return value says how the process yields.
///
/// [`resume()`]: Process::resume
pub trait Process<State, Time>: Debug
where
    Time: SimTime,
{
    /// Run the process from its current phase up to its next suspension point.
    ///
    /// # Errors
    ///
    /// Any error returned here stops [`Simulation::run()`] and is passed back to its caller unchanged.
    ///
    /// [`Simulation::run()`]: crate::serial::Simulation::run
    fn resume(
        &mut self,
        id: ProcessId,
        simulation_state: &mut State,
        event_queue: &mut EventQueue<State, Time>,
    ) -> crate::Result<Step<Time>>;
}
