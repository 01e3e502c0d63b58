use super::{EventQueue, ProcessId};
use crate::{Error, SimTime};

use std::collections::VecDeque;

/// Outcome of a queueing [`Facility::seize()`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Seized {
    /// The requester now holds the facility.
    Acquired,
    /// The facility was busy; the requester joined the back of the waiting line and should yield
    /// [`Step::Passivate`]. It will be activated when the facility is handed to it.
    ///
    /// [`Step::Passivate`]: crate::serial::Step::Passivate
    Queued,
}

/// A serially reusable resource held by at most one process at a time.
///
/// Ownership is a relation, not a handle: the facility records the [`ProcessId`] of its holder and of anyone waiting,
/// nothing more. Waiting processes are served strictly first come, first served.
#[derive(Clone, Debug, Default)]
pub struct Facility {
    name: String,
    owner: Option<ProcessId>,
    waiting: VecDeque<ProcessId>,
    seizures: usize,
}

impl Facility {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_busy(&self) -> bool {
        self.owner.is_some()
    }

    /// The process currently holding the facility.
    pub fn owner(&self) -> Option<ProcessId> {
        self.owner
    }

    /// Number of processes lined up behind the current owner.
    pub fn queue_len(&self) -> usize {
        self.waiting.len()
    }

    /// How many times the facility has changed hands, counting both direct seizures and queue hand-offs.
    pub fn seizures(&self) -> usize {
        self.seizures
    }

    /// Acquire the facility if it is free.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceBusy`] if any process, including `process` itself, already holds it. The facility is
    /// left unchanged.
    pub fn try_seize(&mut self, process: ProcessId) -> crate::Result {
        if self.is_busy() {
            return Err(Error::ResourceBusy {
                facility: self.name.clone(),
            });
        }
        self.owner = Some(process);
        self.seizures += 1;
        Ok(())
    }

    /// Acquire the facility, or line up for it if it is busy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceBusy`] if `process` already holds the facility or is already waiting for it; it would
    /// otherwise wait behind itself forever. The facility is left unchanged.
    pub fn seize(&mut self, process: ProcessId) -> crate::Result<Seized> {
        if self.owner == Some(process) || self.waiting.contains(&process) {
            return Err(Error::ResourceBusy {
                facility: self.name.clone(),
            });
        }

        if self.is_busy() {
            self.waiting.push_back(process);
            Ok(Seized::Queued)
        } else {
            self.owner = Some(process);
            self.seizures += 1;
            Ok(Seized::Acquired)
        }
    }

    /// Give the facility up. If anyone is waiting, the head of the line becomes the owner at once and is activated at
    /// the current time; its id is returned.
    ///
    /// # Errors
    ///
    /// * [`Error::NotOwner`] if `process` does not hold the facility, including when it is free.
    /// * Any activation error for the process taking over, which means it was not passive while waiting. The facility
    ///   is left unchanged: `process` still holds it and the line keeps its head.
    pub fn release<State, Time>(
        &mut self,
        process: ProcessId,
        event_queue: &mut EventQueue<State, Time>,
    ) -> crate::Result<Option<ProcessId>>
    where
        Time: SimTime,
    {
        if self.owner != Some(process) {
            return Err(Error::NotOwner {
                facility: self.name.clone(),
                process,
            });
        }

        if let Some(&next) = self.waiting.front() {
            event_queue.activate_now(next)?;
            self.waiting.pop_front();
            self.seizures += 1;
            self.owner = Some(next);
        } else {
            self.owner = None;
        }
        Ok(self.owner)
    }
}
