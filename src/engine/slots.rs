//! Slot finder: proposes free intervals after a rejected allocation.
//!
//! Walks the gaps between a track's bookings in chronological order — a
//! leading gap from the search start, the gaps between consecutive bookings,
//! and a trailing gap capped by a synthetic 24-hour horizon. Each interior
//! gap is shrunk by the maintenance window on both sides so that any emitted
//! slot, booked immediately, would pass the conflict checker (assuming no
//! intervening mutation).
//!
//! Slots are emitted in gap order, not sorted by proximity to `near_time`.

use chrono::{DateTime, Duration, Utc};

use crate::db::repository::BookingRepository;
use crate::engine::error::EngineError;
use crate::models::{maintenance_window, Booking, TimeSlot};

/// Maximum number of alternative slots returned with a rejection.
pub const MAX_SUGGESTIONS: usize = 3;

/// Horizon granted to the leading gap of an empty track and to the trailing
/// gap after the last booking.
const OPEN_GAP_HORIZON_HOURS: i64 = 24;

/// Stateless slot search service. Construct once, share by reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotFinder;

impl SlotFinder {
    pub fn new() -> Self {
        Self
    }

    /// Enumerate up to [`MAX_SUGGESTIONS`] free slots of at least `duration`
    /// on the track, searching from `near_time` (clamped to the present).
    pub async fn find_alternatives(
        &self,
        repo: &dyn BookingRepository,
        track_number: i32,
        duration: Duration,
        near_time: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>, EngineError> {
        let bookings = repo.list_on_track(track_number).await?;
        Ok(collect_slots(
            &bookings,
            track_number,
            duration,
            near_time,
            Utc::now(),
        ))
    }
}

/// Pure gap walk over bookings sorted by ascending departure.
fn collect_slots(
    bookings: &[Booking],
    track_number: i32,
    duration: Duration,
    near_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Vec<TimeSlot> {
    let window = maintenance_window();
    let horizon = Duration::hours(OPEN_GAP_HORIZON_HOURS);
    let search_start = if near_time < now { now } else { near_time };

    let mut slots = Vec::new();

    for i in 0..=bookings.len() {
        if slots.len() >= MAX_SUGGESTIONS {
            break;
        }

        let (mut start, end) = if i == 0 {
            if bookings.is_empty() {
                (search_start, search_start + horizon)
            } else {
                (search_start, bookings[0].departure - window)
            }
        } else if i == bookings.len() {
            let start = bookings[i - 1].arrival + window;
            (start, start + horizon)
        } else {
            (bookings[i - 1].arrival + window, bookings[i].departure - window)
        };

        if start < now {
            start = now + window;
        }

        if end - start >= duration {
            slots.push(TimeSlot {
                track_number,
                departure: start,
                arrival: start + duration,
            });
        }
    }

    slots
}

#[cfg(test)]
#[path = "slots_tests.rs"]
mod tests;
