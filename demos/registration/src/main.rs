//! Seat Reservation Demo
//!
//! Walks the reservation flow end to end against the in-memory adapters:
//! filling an event seat by seat, the duplicate and capacity rejections, and
//! the owner notifications emitted along the way.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin registration-demo
//! ```

use anyhow::Result;
use chrono::{Duration, Utc};
use seatwise_core::config::{EventLimits, ReservationConfig};
use seatwise_core::types::{Capacity, Event, EventId, User, UserId};
use seatwise_core::{ReservationEnvironment, SeatReservations, SystemClock};
use seatwise_testing::{
    InMemoryEventStore, InMemoryIdentityStore, InMemoryRegistrationStore, RecordingNotifier,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,seatwise_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("\n🪑 ============================================");
    println!("   Seatwise - Reservation Walkthrough");
    println!("============================================\n");

    // Wire the core to the in-memory adapters.
    let events = InMemoryEventStore::new();
    let registrations = InMemoryRegistrationStore::new();
    let identity = InMemoryIdentityStore::new();
    let notifier = RecordingNotifier::new();

    let env = ReservationEnvironment::new(
        Arc::new(SystemClock),
        Arc::new(events.clone()),
        Arc::new(registrations.clone()),
        Arc::new(identity.clone()),
        Arc::new(notifier.clone()),
    );
    let reservations = SeatReservations::new(env, &ReservationConfig::from_env());

    // Seed an owner and a two-seat event.
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
        "Rust Meetup".to_string(),
        now + Duration::days(2),
        now + Duration::days(2) + Duration::hours(2),
        Capacity::new(2),
        now,
        &EventLimits::from_env(),
    )?;
    events.insert(event.clone());

    println!("📋 Event: {} ({} seats)", event.title, event.seats);
    println!("   Owner: {} <{}>\n", owner.name, owner.email);

    // Two registrants fill the event.
    let first = UserId::new();
    let second = UserId::new();

    println!("1️⃣  {first} reserves a seat...");
    reservations.reserve_seat(event.id, first).await?;
    println!("   ✓ committed\n");

    println!("2️⃣  {second} takes the last seat...");
    reservations.reserve_seat(event.id, second).await?;
    println!("   ✓ committed\n");

    // A third registrant bounces off the capacity check.
    println!("3️⃣  A third registrant tries a full event...");
    match reservations.reserve_seat(event.id, UserId::new()).await {
        Err(err) => println!("   ✗ rejected: {err}\n"),
        Ok(()) => println!("   unexpected success\n"),
    }

    // The first registrant tries again.
    println!("4️⃣  {first} tries to register twice...");
    match reservations.reserve_seat(event.id, first).await {
        Err(err) => println!("   ✗ rejected: {err}\n"),
        Ok(()) => println!("   unexpected success\n"),
    }

    println!("📊 Final state:");
    println!(
        "   Registrations committed: {}",
        registrations.count(event.id)
    );
    println!("   Notifications delivered: {}", notifier.count());
    for notification in notifier.sent() {
        println!("   ✉️  to {}: {}", notification.to, notification.body);
    }

    Ok(())
}
