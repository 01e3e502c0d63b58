use super::Event;
use crate::serial::ProcessId;
use crate::SimTime;
use std::cmp::Ordering;

/// What a queued entry does once it reaches the front: run a one-shot action, or hand control back to a suspended
/// process.
#[derive(Debug)]
pub(crate) enum Target<State, Time>
where
    Time: SimTime,
{
    Action(Box<dyn Event<State, Time>>),
    Resume(ProcessId),
}

/// Helper struct for the event queue. This struct holds the [`Target`] alongside the data necessary to sort entries
/// within the priority queue, namely the execution time and a record of the entry's insertion sequence.
///
/// The implementation of [`Ord`] on this struct cares first about the execution time, comparing the insertion sequences
/// only to break ties.
#[derive(Debug)]
pub(super) struct EventHolder<State, Time>
where
    Time: SimTime,
{
    pub execution_time: Time,
    pub target: Target<State, Time>,
    pub insertion_sequence: usize,
}

impl<State, Time> PartialEq<Self> for EventHolder<State, Time>
where
    Time: SimTime,
{
    fn eq(&self, other: &Self) -> bool {
        self.insertion_sequence == other.insertion_sequence && self.execution_time == other.execution_time
    }
}

impl<State, Time> Eq for EventHolder<State, Time> where Time: SimTime {}

impl<State, Time> PartialOrd<Self> for EventHolder<State, Time>
where
    Time: SimTime,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<State, Time> Ord for EventHolder<State, Time>
where
    Time: SimTime,
{
    fn cmp(&self, other: &Self) -> Ordering {
        let comparison = self.execution_time.cmp(&other.execution_time);
        match comparison {
            Ordering::Equal => self.insertion_sequence.cmp(&other.insertion_sequence),
            _ => comparison,
        }
    }
}
