//! Track allocation and conflict resolution engine.
//!
//! The engine decides whether a proposed time interval on a track may be
//! booked, enforces the 20-minute maintenance buffer between consecutive
//! bookings, proposes alternative free slots on rejection, and expands
//! recurring bookings into future instances.
//!
//! Everything here is stateless and read-only against the store; the service
//! layer in `crate::services` owns writes, ordering and per-track locking.

pub mod conflict;
pub mod error;
pub mod physics;
pub mod recurrence;
pub mod slots;

pub use conflict::ConflictChecker;
pub use error::{AllocationError, EngineError, GapSide};
pub use physics::PhysicsValidator;
pub use recurrence::expand;
pub use slots::{SlotFinder, MAX_SUGGESTIONS};
