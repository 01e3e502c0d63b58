use crate::serial::ProcessId;

/// Errors that may be encountered while setting up or executing
/// a collection run.
///
/// Every variant is fatal to the run in progress: [`Simulation::run()`]
/// stops at the first error and hands it back unchanged.
///
/// The [`CausalityViolation`] variant originates from the [`EventQueue`]
/// and indicates that an event's scheduled execution time is prior to
/// the queue's current time. It likely corresponds to a logical bug on
/// the caller's side, e.g. forgetting to add an offset to the current
/// time, or a negative delay.
///
/// [`ResourceBusy`] and [`NotOwner`] report a [`Facility`] used against
/// its preconditions; [`is_resource_error()`] groups them.
///
/// [`Simulation::run()`]: crate::serial::Simulation::run
/// [`EventQueue`]: crate::serial::EventQueue
/// [`Facility`]: crate::serial::Facility
/// [`CausalityViolation`]: Error::CausalityViolation
/// [`ResourceBusy`]: Error::ResourceBusy
/// [`NotOwner`]: Error::NotOwner
/// [`is_resource_error()`]: Error::is_resource_error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The event queue rejected an event that would
    /// have been scheduled for a time that has
    /// already passed.
    #[error("event execution time is less than current simulation time")]
    CausalityViolation,
    /// A strict seize was attempted on a facility that
    /// another process already holds.
    #[error("facility {facility:?} is already busy")]
    ResourceBusy { facility: String },
    /// A process released a facility it does not hold,
    /// including a facility that is already free.
    #[error("{process} does not hold facility {facility:?}")]
    NotOwner { facility: String, process: ProcessId },
    /// A terminated process was activated again.
    #[error("{0} has already terminated")]
    DoubleTermination(ProcessId),
    /// A process with a pending resumption, or one that is
    /// currently running, was activated again.
    #[error("{0} is already active")]
    AlreadyActive(ProcessId),
    /// No process with this id was ever spawned.
    #[error("{0} is not known to the event queue")]
    UnknownProcess(ProcessId),
    /// A uniform sampling band whose bounds are reversed
    /// or not finite.
    #[error("invalid band {name}: low {low} must be finite and not above high {high}")]
    InvalidBand { name: &'static str, low: f64, high: f64 },
    /// A configuration value outside its legal range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The street dataset could not be parsed.
    #[error("street dataset error: {0}")]
    Dataset(String),
    /// The street dataset could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A client-generated error was encountered
    /// while executing an event. Call [`source()`]
    /// or unpack this value to handle it directly.
    ///
    /// [`source()`]: std::error::Error::source
    #[error("error while executing event: {0}")]
    BadExecution(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    /// Whether this error reports a facility precondition failure.
    pub fn is_resource_error(&self) -> bool {
        matches!(self, Self::ResourceBusy { .. } | Self::NotOwner { .. })
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::CausalityViolation, Self::CausalityViolation) => true,
            (Self::ResourceBusy { facility: f1 }, Self::ResourceBusy { facility: f2 }) => f1 == f2,
            (
                Self::NotOwner {
                    facility: f1,
                    process: p1,
                },
                Self::NotOwner {
                    facility: f2,
                    process: p2,
                },
            ) => f1 == f2 && p1 == p2,
            (Self::DoubleTermination(p1), Self::DoubleTermination(p2)) => p1 == p2,
            (Self::AlreadyActive(p1), Self::AlreadyActive(p2)) => p1 == p2,
            (Self::UnknownProcess(p1), Self::UnknownProcess(p2)) => p1 == p2,
            (
                Self::InvalidBand {
                    name: n1,
                    low: l1,
                    high: h1,
                },
                Self::InvalidBand {
                    name: n2,
                    low: l2,
                    high: h2,
                },
            ) => n1 == n2 && l1.to_bits() == l2.to_bits() && h1.to_bits() == h2.to_bits(),
            (Self::InvalidConfig(m1), Self::InvalidConfig(m2)) => m1 == m2,
            (Self::Dataset(m1), Self::Dataset(m2)) => m1 == m2,
            (Self::Io(e1), Self::Io(e2)) => std::ptr::eq(e1, e2),
            (Self::BadExecution(e1), Self::BadExecution(e2)) => {
                let e1: *const dyn std::error::Error = e1.as_ref();
                let e2: *const dyn std::error::Error = e2.as_ref();
                std::ptr::addr_eq(e1, e2)
            },
            _ => false,
        }
    }
}

impl Eq for Error {}

/// [`std::result::Result`]`<T, `[`wastesim::Error`]`>`
///
/// A type alias that simplifies the signatures of
/// various functions in wastesim. Defaults to the
/// unit type for operations with nothing to return.
///
/// [`wastesim::Error`]: Error
pub type Result<T = ()> = std::result::Result<T, Error>;
