use crate::serial::{Facility, ProcessId};

use std::fmt::{Display, Formatter};

/// Static description of one street segment, as it appears in the dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreetRecord {
    /// Households to collect from. Zero marks a pure transit segment, e.g. driving back out of a dead end.
    pub households: u32,
    pub meters: u32,
    /// Diagnostic only; names repeat.
    pub name: String,
    /// Sorted-waste containers on the segment.
    pub sorted: u32,
}

impl StreetRecord {
    pub fn new(households: u32, meters: u32, name: impl Into<String>) -> Self {
        Self {
            households,
            meters,
            name: name.into(),
            sorted: 0,
        }
    }

    pub fn with_sorted(mut self, sorted: u32) -> Self {
        self.sorted = sorted;
        self
    }
}

/// Position of a street in its pool's arena, i.e. its declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StreetId(pub usize);

impl Display for StreetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "street #{}", self.0)
    }
}

/// A street during a run: its record, the facility trucks seize while working it, and the truck it went to.
#[derive(Clone, Debug)]
pub struct Street {
    pub record: StreetRecord,
    pub facility: Facility,
    pub assigned_to: Option<ProcessId>,
}

impl Street {
    fn new(record: StreetRecord) -> Self {
        Self {
            facility: Facility::new(record.name.clone()),
            record,
            assigned_to: None,
        }
    }

    /// Whether the street needs household pickup rather than transit only.
    pub fn is_serviced(&self) -> bool {
        self.record.households > 0
    }
}

/// Arena of streets plus the declaration-ordered list of those not yet handed out.
///
/// Streets stay in the arena for the whole run; only their ids leave the availability list, and a taken id never comes
/// back, even after the truck releases the street.
#[derive(Clone, Debug, Default)]
pub struct StreetPool {
    streets: Vec<Street>,
    available: Vec<StreetId>,
    taken: Vec<StreetId>,
}

impl StreetPool {
    pub fn new(records: impl IntoIterator<Item = StreetRecord>) -> Self {
        let streets: Vec<Street> = records.into_iter().map(Street::new).collect();
        let available = (0..streets.len()).map(StreetId).collect();
        Self {
            taken: Vec::with_capacity(streets.len()),
            streets,
            available,
        }
    }

    /// Remove and return the first available street, in declaration order, whose facility is free.
    ///
    /// The scan finds a position first and removes it second, so the list is never modified while being walked.
    /// Order of the remaining streets is preserved.
    pub fn take_first_free(&mut self) -> Option<StreetId> {
        let position = self
            .available
            .iter()
            .position(|id| !self.streets[id.0].facility.is_busy())?;
        let id = self.available.remove(position);
        self.taken.push(id);
        Some(id)
    }

    /// # Panics
    ///
    /// If `id` did not come from this pool.
    pub fn street(&self, id: StreetId) -> &Street {
        &self.streets[id.0]
    }

    /// # Panics
    ///
    /// If `id` did not come from this pool.
    pub fn street_mut(&mut self, id: StreetId) -> &mut Street {
        &mut self.streets[id.0]
    }

    /// Every street, in declaration order, taken or not.
    pub fn streets(&self) -> &[Street] {
        &self.streets
    }

    /// Streets handed out so far, in the order they were taken.
    pub fn taken(&self) -> &[StreetId] {
        &self.taken
    }

    /// Number of streets still available.
    pub fn remaining(&self) -> usize {
        self.available.len()
    }

    pub fn len(&self) -> usize {
        self.streets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streets.is_empty()
    }

    pub fn total_households(&self) -> u64 {
        self.streets.iter().map(|s| u64::from(s.record.households)).sum()
    }

    pub fn total_meters(&self) -> u64 {
        self.streets.iter().map(|s| u64::from(s.record.meters)).sum()
    }
}
