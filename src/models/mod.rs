//! Domain model types for the dispatch engine.
//!
//! These are plain value types shared by the repository layer, the allocation
//! engine and the HTTP surface. They carry no behavior beyond the interval
//! arithmetic in [`interval`]; all allocation logic lives in `crate::engine`.

pub mod audit;
pub mod booking;
pub mod interval;
pub mod master;

pub use audit::{AuditAction, AuditEntity, AuditRecord};
pub use booking::{Booking, BookingId, BookingStatus, Recurrence, TimeSlot, UserId};
pub use interval::{maintenance_window, TimeInterval, MAINTENANCE_WINDOW_MINUTES};
pub use master::{Station, StationId, StationType, Train, TrainId, TrainType};
