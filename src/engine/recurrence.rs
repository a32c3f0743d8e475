//! Recurrence expander: materializes future instances of a repeating booking.
//!
//! Pure function, no store access. Instances are shifted by the rule's fixed
//! calendar-naive step and never themselves recur, so a parent's lineage is a
//! flat tree of depth one.
//!
//! Expansion deliberately bypasses the conflict checker: instances are handed
//! to the store as-is, preserving the modeled legacy behavior. Each insert is
//! independent; a failing instance must not roll back earlier ones.

use crate::models::{Booking, BookingStatus, Recurrence};

/// Expand `parent` into `count` future instances.
///
/// Returns an empty vector when the parent does not recur or `count` is not
/// positive. Instance `i` (1-based) is the parent's interval shifted by
/// `step * i`, carrying the parent's track, train, stations and creator, with
/// `status = Scheduled`, `recurrence = None` and `parent_id = parent.id`.
pub fn expand(parent: &Booking, count: i32) -> Vec<Booking> {
    let Some(step) = parent.recurrence.step() else {
        return Vec::new();
    };
    if count <= 0 {
        return Vec::new();
    }

    (1..=count)
        .map(|i| Booking {
            id: None,
            train_id: parent.train_id,
            track_number: parent.track_number,
            departure: parent.departure + step * i,
            arrival: parent.arrival + step * i,
            status: BookingStatus::Scheduled,
            recurrence: Recurrence::None,
            from_station: parent.from_station,
            to_station: parent.to_station,
            parent_id: parent.id,
            created_by: parent.created_by,
        })
        .collect()
}
