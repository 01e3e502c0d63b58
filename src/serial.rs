mod events;
mod facility;
mod process;
mod simulation;

pub use events::event_traits::Event;
pub use events::{Dispatch, EventQueue};
pub use facility::{Facility, Seized};
pub use process::{Process, ProcessId, ProcessState, Step};
pub use simulation::Simulation;
