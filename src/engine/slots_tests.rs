use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::db::repository::BookingRepository;
use crate::db::LocalRepository;
use crate::models::{Booking, BookingStatus, Recurrence, TrainId};

use super::{collect_slots, SlotFinder, MAX_SUGGESTIONS};

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, h, m, 0).unwrap()
}

fn booking(track: i32, departure: DateTime<Utc>, arrival: DateTime<Utc>) -> Booking {
    Booking {
        id: None,
        train_id: TrainId::new(1),
        track_number: track,
        departure,
        arrival,
        status: BookingStatus::Scheduled,
        recurrence: Recurrence::None,
        from_station: None,
        to_station: None,
        parent_id: None,
        created_by: None,
    }
}

#[test]
fn test_empty_track_yields_single_slot_at_search_start() {
    let near = at(9, 0);
    let slots = collect_slots(&[], 1, Duration::hours(2), near, at(8, 0));

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].track_number, 1);
    assert_eq!(slots[0].departure, near);
    assert_eq!(slots[0].arrival, at(11, 0));
}

#[test]
fn test_gaps_between_bookings_shrunk_by_window() {
    let bookings = vec![
        booking(1, at(9, 0), at(10, 0)),
        booking(1, at(12, 0), at(13, 0)),
    ];

    let slots = collect_slots(&bookings, 1, Duration::hours(1), at(8, 30), at(8, 0));

    // Leading gap [08:30, 08:40] is too short for an hour. The interior gap
    // runs [10:20, 11:40]; the trailing gap opens at 13:20.
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].departure, at(10, 20));
    assert_eq!(slots[0].arrival, at(11, 20));
    assert_eq!(slots[1].departure, at(13, 20));
    assert_eq!(slots[1].arrival, at(14, 20));
}

#[test]
fn test_leading_gap_emits_when_long_enough() {
    let bookings = vec![booking(1, at(10, 0), at(11, 0))];

    let slots = collect_slots(&bookings, 1, Duration::minutes(30), at(8, 0), at(7, 0));

    assert_eq!(slots[0].departure, at(8, 0));
    assert_eq!(slots[0].arrival, at(8, 30));
}

#[test]
fn test_at_most_three_slots_emitted() {
    let bookings = vec![
        booking(1, at(9, 0), at(10, 0)),
        booking(1, at(12, 0), at(13, 0)),
        booking(1, at(15, 0), at(16, 0)),
        booking(1, at(18, 0), at(19, 0)),
    ];

    let slots = collect_slots(&bookings, 1, Duration::minutes(30), at(8, 0), at(7, 0));

    assert_eq!(slots.len(), MAX_SUGGESTIONS);
    // Chronological gap order: leading, then the first two interior gaps.
    assert_eq!(slots[0].departure, at(8, 0));
    assert_eq!(slots[1].departure, at(10, 20));
    assert_eq!(slots[2].departure, at(13, 20));
}

#[test]
fn test_past_near_time_clamped_to_now() {
    let now = at(12, 0);
    let slots = collect_slots(&[], 1, Duration::hours(2), at(6, 0), now);

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].departure, now);
}

#[test]
fn test_gap_start_in_past_advanced_past_now() {
    let bookings = vec![
        booking(1, at(9, 0), at(10, 0)),
        booking(1, at(12, 0), at(13, 0)),
    ];

    // The interior gap opens at 10:20, already in the past at 11:00; its
    // start advances to now + window = 11:20, leaving exactly 20 minutes.
    let slots = collect_slots(
        &bookings,
        1,
        Duration::minutes(20),
        at(11, 0),
        at(11, 0),
    );

    assert_eq!(slots[0].departure, at(11, 20));
    assert_eq!(slots[0].arrival, at(11, 40));
}

#[test]
fn test_trailing_gap_has_synthetic_horizon() {
    let bookings = vec![booking(1, at(9, 0), at(10, 0))];

    let slots = collect_slots(&bookings, 1, Duration::hours(12), at(8, 0), at(7, 0));

    // Leading gap is under 12h; the trailing gap [10:20, +24h] fits.
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].departure, at(10, 20));
}

#[tokio::test]
async fn test_find_alternatives_empty_track_round_trip() {
    let repo = LocalRepository::new();
    let finder = SlotFinder::new();

    let near = Utc::now() + Duration::hours(1);
    let slots = finder
        .find_alternatives(&repo, 1, Duration::hours(2), near)
        .await
        .unwrap();

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].departure, near);
    assert_eq!(slots[0].arrival, near + Duration::hours(2));
}

#[tokio::test]
async fn test_find_alternatives_skips_other_tracks() {
    let repo = LocalRepository::new();
    let finder = SlotFinder::new();

    let base = Utc::now() + Duration::hours(2);
    repo.insert_booking(booking(2, base, base + Duration::hours(1)))
        .await
        .unwrap();

    let slots = finder
        .find_alternatives(&repo, 1, Duration::hours(1), base)
        .await
        .unwrap();

    // Track 1 is empty; the neighbor's booking on track 2 is irrelevant.
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].departure, base);
}
