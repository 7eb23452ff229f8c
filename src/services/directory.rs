// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contact list filtering and per-category counts.

use crate::models::{Category, Contact};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Filter applied to a contact list.
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    pub category: Option<Category>,
    /// Case-insensitive substring matched against name, category, location
    /// and how-we-met
    pub search: Option<String>,
}

impl ContactFilter {
    fn matches(&self, contact: &Contact, needle: Option<&str>) -> bool {
        if self.category.is_some_and(|c| c != contact.category) {
            return false;
        }
        let Some(needle) = needle else {
            return true;
        };

        let haystacks = [
            Some(contact.name.as_str()),
            Some(contact.category.as_str()),
            contact.location.as_deref(),
            contact.how_we_met.as_deref(),
        ];
        haystacks
            .into_iter()
            .flatten()
            .any(|h| h.to_lowercase().contains(needle))
    }
}

/// Contacts matching `filter`, in their original order.
pub fn filter_contacts<'a>(contacts: &'a [Contact], filter: &ContactFilter) -> Vec<&'a Contact> {
    let needle = filter
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    contacts
        .iter()
        .filter(|c| filter.matches(c, needle.as_deref()))
        .collect()
}

/// Number of contacts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CategoryCounts {
    pub all: u32,
    pub friends: u32,
    pub family: u32,
    pub acquaintances: u32,
}

pub fn category_counts(contacts: &[Contact]) -> CategoryCounts {
    contacts
        .iter()
        .fold(CategoryCounts::default(), |mut counts, contact| {
            counts.all += 1;
            match contact.category {
                Category::Friends => counts.friends += 1,
                Category::Family => counts.family += 1,
                Category::Acquaintances => counts.acquaintances += 1,
            }
            counts
        })
}
