//! End-to-end allocation scenarios through the service layer against the
//! in-memory repository.

mod support;

use chrono::Duration;

use rail_dispatch::db::repositories::LocalRepository;
use rail_dispatch::db::repository::MasterDataRepository;
use rail_dispatch::engine::{AllocationError, GapSide, MAX_SUGGESTIONS};
use rail_dispatch::models::{
    AuditAction, AuditEntity, BookingStatus, Recurrence, Station, StationType, Train, TrainType,
    UserId,
};
use rail_dispatch::services::{self, BookingServiceError, TrackLocks};

use support::{at, draft, seed_train};

#[tokio::test]
async fn test_create_then_list_and_get() {
    let repo = LocalRepository::new();
    let locks = TrackLocks::new();
    let train = seed_train(&repo, "IC-101").await;

    let created = services::create_booking(
        &repo,
        &locks,
        draft(train, 3, at(10, 9, 0), at(10, 11, 0)),
        Some(UserId::new(7)),
    )
    .await
    .unwrap();

    let id = created.booking.id.unwrap();
    assert_eq!(created.booking.status, BookingStatus::Scheduled);
    assert_eq!(created.booking.created_by, Some(UserId::new(7)));
    assert!(created.generated.is_empty());

    let listed = services::list_bookings(&repo).await.unwrap();
    assert_eq!(listed.len(), 1);

    let fetched = services::get_booking(&repo, id).await.unwrap();
    assert_eq!(fetched, created.booking);
}

#[tokio::test]
async fn test_overlap_rejected_with_alternatives() {
    let repo = LocalRepository::new();
    let locks = TrackLocks::new();
    let train = seed_train(&repo, "IC-102").await;

    services::create_booking(&repo, &locks, draft(train, 1, at(10, 9, 0), at(10, 11, 0)), None)
        .await
        .unwrap();

    let err = services::create_booking(
        &repo,
        &locks,
        draft(train, 1, at(10, 10, 0), at(10, 12, 0)),
        None,
    )
    .await
    .unwrap_err();

    match err {
        BookingServiceError::Rejected {
            reason: AllocationError::TrackOccupied { track_number },
            alternatives,
        } => {
            assert_eq!(track_number, 1);
            assert!(!alternatives.is_empty());
            assert!(alternatives.len() <= MAX_SUGGESTIONS);
            for slot in &alternatives {
                assert_eq!(slot.track_number, 1);
                assert!(slot.arrival - slot.departure >= Duration::hours(2));
            }
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // The rejected booking must not have been stored.
    assert_eq!(services::list_bookings(&repo).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_maintenance_gap_enforced_between_bookings() {
    let repo = LocalRepository::new();
    let locks = TrackLocks::new();
    let train = seed_train(&repo, "IC-103").await;

    services::create_booking(&repo, &locks, draft(train, 2, at(10, 8, 0), at(10, 9, 0)), None)
        .await
        .unwrap();

    // 10 minutes after the previous arrival: rejected.
    let err = services::create_booking(
        &repo,
        &locks,
        draft(train, 2, at(10, 9, 10), at(10, 10, 0)),
        None,
    )
    .await
    .unwrap_err();
    match err {
        BookingServiceError::Rejected {
            reason: AllocationError::MaintenanceWindowViolation { side },
            ..
        } => assert_eq!(side, GapSide::Before),
        other => panic!("unexpected error: {:?}", other),
    }

    // Exactly 20 minutes: accepted.
    services::create_booking(
        &repo,
        &locks,
        draft(train, 2, at(10, 9, 20), at(10, 10, 0)),
        None,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_invalid_duration_has_no_alternatives() {
    let repo = LocalRepository::new();
    let locks = TrackLocks::new();
    let train = seed_train(&repo, "IC-104").await;
    let depot = repo
        .insert_station(Station {
            id: None,
            name: "North Yard".to_string(),
            code: "NY".to_string(),
            station_type: StationType::Depot,
            latitude: 0.0,
            longitude: 0.0,
        })
        .await
        .unwrap();

    let mut bad = draft(train, 4, at(10, 11, 0), at(10, 9, 0));
    bad.from_station = depot.id;
    bad.to_station = depot.id;

    let err = services::create_booking(&repo, &locks, bad, None)
        .await
        .unwrap_err();
    match err {
        BookingServiceError::Rejected {
            reason: AllocationError::InvalidDuration,
            alternatives,
        } => assert!(alternatives.is_empty()),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(services::list_bookings(&repo).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_weekly_recurrence_generates_series() {
    let repo = LocalRepository::new();
    let locks = TrackLocks::new();
    let train = seed_train(&repo, "IC-105").await;

    let mut parent = draft(train, 5, at(1, 9, 0), at(1, 10, 0));
    parent.recurrence = Some(Recurrence::Weekly);
    parent.recur_count = 3;

    let created = services::create_booking(&repo, &locks, parent, Some(UserId::new(2)))
        .await
        .unwrap();

    assert_eq!(created.generated.len(), 3);
    for (i, instance) in created.generated.iter().enumerate() {
        let offset = Duration::days(7 * (i as i64 + 1));
        assert_eq!(instance.departure, at(1, 9, 0) + offset);
        assert_eq!(instance.arrival, at(1, 10, 0) + offset);
        assert_eq!(instance.parent_id, created.booking.id);
        assert_eq!(instance.status, BookingStatus::Scheduled);
        assert_eq!(instance.recurrence, Recurrence::None);
    }

    // Parent plus three instances are all stored.
    assert_eq!(services::list_bookings(&repo).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_update_moves_booking_and_excludes_itself() {
    let repo = LocalRepository::new();
    let locks = TrackLocks::new();
    let train = seed_train(&repo, "IC-106").await;

    let created = services::create_booking(
        &repo,
        &locks,
        draft(train, 6, at(10, 9, 0), at(10, 11, 0)),
        None,
    )
    .await
    .unwrap();
    let id = created.booking.id.unwrap();

    // Shifting within its own original span must not self-conflict.
    let updated = services::update_booking(
        &repo,
        &locks,
        id,
        draft(train, 6, at(10, 9, 30), at(10, 11, 30)),
        None,
    )
    .await
    .unwrap();
    assert_eq!(updated.departure, at(10, 9, 30));

    // Moving onto another booking's span is still rejected.
    services::create_booking(
        &repo,
        &locks,
        draft(train, 6, at(10, 14, 0), at(10, 15, 0)),
        None,
    )
    .await
    .unwrap();
    let err = services::update_booking(
        &repo,
        &locks,
        id,
        draft(train, 6, at(10, 14, 30), at(10, 16, 0)),
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        BookingServiceError::Rejected {
            reason: AllocationError::TrackOccupied { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn test_delete_frees_the_track() {
    let repo = LocalRepository::new();
    let locks = TrackLocks::new();
    let train = seed_train(&repo, "IC-107").await;

    let created = services::create_booking(
        &repo,
        &locks,
        draft(train, 7, at(10, 9, 0), at(10, 11, 0)),
        None,
    )
    .await
    .unwrap();

    services::delete_booking(&repo, created.booking.id.unwrap(), None)
        .await
        .unwrap();

    // Same interval books cleanly once the occupant is gone.
    services::create_booking(
        &repo,
        &locks,
        draft(train, 7, at(10, 9, 0), at(10, 11, 0)),
        None,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_audit_trail_records_mutations_newest_first() {
    let repo = LocalRepository::new();
    let locks = TrackLocks::new();

    // Registered through the service so the train creation is audited too.
    let train = services::create_train(
        &repo,
        Train {
            id: None,
            number: "IC-108".to_string(),
            train_type: TrainType::Cargo,
            wagon_count: 12,
            max_speed: 120.0,
            description: String::new(),
        },
        Some(UserId::new(4)),
    )
    .await
    .unwrap()
    .id
    .unwrap();

    let created = services::create_booking(
        &repo,
        &locks,
        draft(train, 8, at(10, 9, 0), at(10, 10, 0)),
        Some(UserId::new(4)),
    )
    .await
    .unwrap();
    let id = created.booking.id.unwrap();

    services::update_booking(
        &repo,
        &locks,
        id,
        draft(train, 8, at(10, 9, 0), at(10, 10, 30)),
        Some(UserId::new(4)),
    )
    .await
    .unwrap();
    services::delete_booking(&repo, id, Some(UserId::new(4)))
        .await
        .unwrap();

    let entries = services::recent_audit(&repo, 10).await.unwrap();
    // Train creation is audited too, so four entries in total.
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].action, AuditAction::Delete);
    assert_eq!(entries[1].action, AuditAction::Update);
    assert_eq!(entries[2].action, AuditAction::Create);
    assert_eq!(entries[2].entity, AuditEntity::Booking);
    assert_eq!(entries[3].entity, AuditEntity::Train);

    assert_eq!(entries[0].new_value, "");
    assert!(entries[1].old_value.contains("10:00:00"));
    assert_eq!(entries[2].old_value, "");
    assert_eq!(entries[0].actor, Some(UserId::new(4)));
}

#[tokio::test]
async fn test_stats_reflect_store_contents() {
    let repo = LocalRepository::new();
    let locks = TrackLocks::new();
    let train = seed_train(&repo, "IC-109").await;
    repo.insert_station(Station {
        id: None,
        name: "Central".to_string(),
        code: "CEN".to_string(),
        station_type: StationType::Regular,
        latitude: 52.5,
        longitude: 13.4,
    })
    .await
    .unwrap();

    services::create_booking(&repo, &locks, draft(train, 1, at(10, 9, 0), at(10, 10, 0)), None)
        .await
        .unwrap();
    services::create_booking(&repo, &locks, draft(train, 2, at(10, 9, 0), at(10, 10, 0)), None)
        .await
        .unwrap();

    let stats = services::dispatch_stats(&repo).await.unwrap();
    assert_eq!(stats.total_trains, 1);
    assert_eq!(stats.total_stations, 1);
    assert_eq!(stats.active_bookings, 2);
    assert_eq!(stats.tracks_in_use, 2);
    assert!((stats.occupancy_percent - 20.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_find_free_slots_avoids_existing_bookings() {
    let repo = LocalRepository::new();
    let locks = TrackLocks::new();
    let train = seed_train(&repo, "IC-110").await;

    services::create_booking(&repo, &locks, draft(train, 9, at(10, 9, 0), at(10, 11, 0)), None)
        .await
        .unwrap();

    let slots = services::find_free_slots(&repo, 9, Duration::minutes(60), at(10, 8, 0))
        .await
        .unwrap();

    assert!(!slots.is_empty());
    assert!(slots.len() <= MAX_SUGGESTIONS);
    for slot in &slots {
        assert_eq!(slot.track_number, 9);
        assert!(slot.arrival - slot.departure >= Duration::minutes(60));
        // No suggested slot may touch the occupied interval.
        let clear = slot.arrival + Duration::minutes(20) <= at(10, 9, 0)
            || slot.departure >= at(10, 11, 0) + Duration::minutes(20);
        assert!(clear, "slot {:?} intrudes on the booked interval", slot);
    }
}
