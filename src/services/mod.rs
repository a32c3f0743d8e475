//! Service layer for business logic and orchestration.
//!
//! Services sit between the repository and the HTTP surface: they run the
//! engine's checks in the right order under the right locks, own every store
//! write, and report successful mutations to the audit log.

pub mod booking;
pub mod locks;
pub mod master;
pub mod stats;

pub use booking::{
    create_booking, delete_booking, find_free_slots, get_booking, list_bookings, update_booking,
    BookingDraft, BookingServiceError, BookingServiceResult, CreatedBooking,
    MAX_RECUR_INSTANCES, TRACKS_AVAILABLE,
};
pub use locks::TrackLocks;
pub use master::{create_station, create_train, list_stations, list_trains, recent_audit};
pub use stats::{dispatch_stats, health_check, DispatchStats};
