// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod directory;
pub mod positioner;
pub mod upcoming;

pub use directory::{category_counts, filter_contacts, CategoryCounts, ContactFilter};
pub use positioner::ImagePositioner;
pub use upcoming::{
    compute_upcoming_events, label_for, next_birthday, DateLabel, EventUrgency, UpcomingError,
    UpcomingQuery,
};
