// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod contact;
pub mod event;

pub use contact::{
    Category, Contact, ContactError, ContactUpdate, ImagePosition, NewContact, NewPlan, Plan,
};
pub use event::{Event, EventKind, PlanDetail, UpcomingEvents};
