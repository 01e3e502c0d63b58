use std::fmt::Debug;
use std::ops::Add;

/// The generic type used for a simulation's clock.
///
/// Kept generic so the engine can run on integral ticks in tests and on floating-point minutes in a collection run.
/// This trait is a superset of [`Ord`], [`Clone`], [`Debug`], and [`Add`] with no additional requirements or
/// functionality.
///
/// Your implementation of this trait should use the [`Ord`] trait to account for not only the overall sequencing of
/// events, but also any tie breaking that may be necessary in your use case. Events will be executed in ascending order
/// of execution time, i.e. if `A.cmp(&B) == std::cmp::Ordering::Less` then event A will execute before event B. Ties
/// that you don't specify how to break will be resolved by the order in which events are enqueued, which keeps the
/// observed order of execution stable for a fixed random-number stream.
///
/// [`Add`] is how the [`EventQueue`] turns the delay carried by [`Step::Wait`] or passed to
/// [`EventQueue::schedule_with_delay()`] into an absolute execution time. A negative delay is allowed by the type
/// system but rejected at runtime with [`Error::CausalityViolation`].
///
/// Implementations are provided for integral builtin types, but not for floating-point builtin types as the latter do
/// not implement [`Ord`]. Use [`OrderedFloat`] from the [`ordered-float`] crate for a floating-point
/// clock; a collection run uses [`Minutes`].
///
/// [`EventQueue`]: crate::serial::EventQueue
/// [`EventQueue::schedule_with_delay()`]: crate::serial::EventQueue::schedule_with_delay
/// [`Step::Wait`]: crate::serial::Step::Wait
/// [`Error::CausalityViolation`]: crate::Error::CausalityViolation
/// [`Minutes`]: crate::collection::Minutes
/// [`ordered-float`]: https://docs.rs/ordered-float/4
/// [`OrderedFloat`]: https://docs.rs/ordered-float/4/ordered_float/struct.OrderedFloat.html
pub trait SimTime: Ord + Clone + Debug + Add<Output = Self> {}

impl SimTime for u8 {}
impl SimTime for u16 {}
impl SimTime for u32 {}
impl SimTime for u64 {}
impl SimTime for u128 {}
impl SimTime for usize {}
impl SimTime for i8 {}
impl SimTime for i16 {}
impl SimTime for i32 {}
impl SimTime for i64 {}
impl SimTime for i128 {}
impl SimTime for isize {}

impl SimTime for ordered_float::OrderedFloat<f32> {}
impl SimTime for ordered_float::OrderedFloat<f64> {}
