//! Concurrency stress tests for the reservation orchestrator.
//!
//! These tests hammer a single event from many tasks at once and verify that
//! the committed registrations are always consistent with some sequential
//! ordering of the attempts: never more commits than seats, never a duplicate
//! pair, and one owner notification per commit.
//!
//! Run with: `cargo test --test concurrency_stress_test -- --nocapture`

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{Duration, Utc};
use seatwise_core::config::{EventLimits, ReservationConfig};
use seatwise_core::types::{Capacity, Event, EventId, User, UserId};
use seatwise_core::{ReservationEnvironment, ReserveError, SeatReservations};
use seatwise_testing::{
    InMemoryEventStore, InMemoryIdentityStore, InMemoryRegistrationStore, RecordingNotifier,
    test_clock,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Retry budget generous enough that every loser converges on its final
/// business answer instead of running out of attempts mid-contention.
fn stress_config() -> ReservationConfig {
    ReservationConfig {
        max_conflict_retries: 64,
        initial_backoff: std::time::Duration::from_millis(1),
        max_backoff: std::time::Duration::from_millis(4),
    }
}

struct Stress {
    reservations: SeatReservations,
    registrations: InMemoryRegistrationStore,
    notifier: RecordingNotifier,
    event: Event,
}

fn stress_harness(seats: u32) -> Stress {
    let events = InMemoryEventStore::new();
    let registrations = InMemoryRegistrationStore::new();
    let identity = InMemoryIdentityStore::new();
    let notifier = RecordingNotifier::new();

    let owner = User::new(
        UserId::new(),
        "Dana Host".to_string(),
        "dana@example.com".to_string(),
    );
    identity.insert(owner.clone());

    let now = Utc::now();
    let event = Event::new(
        EventId::new(),
        owner.id,
        "Launch Party".to_string(),
        now + Duration::days(5),
        now + Duration::days(5) + Duration::hours(3),
        Capacity::new(seats),
        now,
        &EventLimits::default(),
    )
    .unwrap();
    events.insert(event.clone());

    let env = ReservationEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(events),
        Arc::new(registrations.clone()),
        Arc::new(identity),
        Arc::new(notifier.clone()),
    );

    Stress {
        reservations: SeatReservations::new(env, &stress_config()),
        registrations,
        notifier,
        event,
    }
}

#[tokio::test]
async fn last_seat_under_one_hundred_concurrent_requests() {
    let stress = stress_harness(1);
    let event_id = stress.event.id;

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let reservations = stress.reservations.clone();
            tokio::spawn(async move { reservations.reserve_seat(event_id, UserId::new()).await })
        })
        .collect();

    let results: Vec<Result<(), ReserveError>> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one caller gets the last seat");

    for result in results.iter().filter(|r| r.is_err()) {
        assert!(
            matches!(result, Err(ReserveError::CapacityExceeded { .. })),
            "losers see a full event, got: {result:?}"
        );
    }

    assert_eq!(stress.registrations.count(event_id), 1);
    assert_eq!(stress.notifier.count(), 1);
}

#[tokio::test]
async fn one_registrant_hammering_concurrently_holds_one_seat() {
    let stress = stress_harness(10);
    let event_id = stress.event.id;
    let registrant = UserId::new();

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let reservations = stress.reservations.clone();
            tokio::spawn(async move { reservations.reserve_seat(event_id, registrant).await })
        })
        .collect();

    let results: Vec<Result<(), ReserveError>> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "the pair commits exactly once");

    for result in results.iter().filter(|r| r.is_err()) {
        assert!(
            matches!(result, Err(ReserveError::AlreadyRegistered { .. })),
            "repeat attempts are duplicates, got: {result:?}"
        );
    }

    assert_eq!(stress.registrations.count(event_id), 1);
    assert_eq!(stress.notifier.count(), 1);
}

#[tokio::test]
async fn contended_event_fills_exactly_to_capacity() {
    let seats = 5;
    let attempts = 20;
    let stress = stress_harness(seats);
    let event_id = stress.event.id;

    let handles: Vec<_> = (0..attempts)
        .map(|_| {
            let reservations = stress.reservations.clone();
            tokio::spawn(async move { reservations.reserve_seat(event_id, UserId::new()).await })
        })
        .collect();

    let results: Vec<Result<(), ReserveError>> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let capacity_failures = results
        .iter()
        .filter(|r| matches!(r, Err(ReserveError::CapacityExceeded { .. })))
        .count();

    assert_eq!(successes, seats as usize);
    assert_eq!(capacity_failures, attempts - seats as usize);
    assert_eq!(stress.registrations.count(event_id), seats as usize);

    // No registrant ever holds two seats.
    let snapshot = stress.registrations.snapshot(event_id);
    let distinct: HashSet<_> = snapshot.iter().map(|r| r.registrant).collect();
    assert_eq!(distinct.len(), snapshot.len());

    // Commits are serialized by the conditional insert, so the notifications
    // walk the remaining-seat count down one step at a time.
    let bodies: Vec<String> = stress
        .notifier
        .sent()
        .into_iter()
        .map(|notification| notification.body)
        .collect();
    assert_eq!(bodies.len(), seats as usize);
    for remaining in 0..seats {
        let phrase = format!("{remaining} seats remaining");
        assert_eq!(
            bodies.iter().filter(|body| body.contains(&phrase)).count(),
            1,
            "expected exactly one notification saying \"{phrase}\""
        );
    }
}
