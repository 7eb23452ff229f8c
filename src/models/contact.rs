// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contact ("person") model for storage and API.

use crate::time_utils::{parse_calendar_date, parse_time_of_day};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidateUrl, ValidationError};

/// Maximum length of a contact name (characters).
pub const MAX_NAME_LEN: usize = 100;

/// Relationship tag for a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Category {
    Friends,
    Family,
    Acquaintances,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Friends, Category::Family, Category::Acquaintances];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Friends => "Friends",
            Category::Family => "Family",
            Category::Acquaintances => "Acquaintances",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ContactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ContactError::UnknownCategory(s.to_string()))
    }
}

/// Pan offset (pixels) and zoom of a profile picture inside its circular frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ImagePosition {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl ImagePosition {
    pub const MIN_SCALE: f64 = 0.5;
    pub const MAX_SCALE: f64 = 2.0;

    /// Untransformed placement: no offset, scale 1.
    pub const fn centered() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }

    pub fn clamp_scale(scale: f64) -> f64 {
        scale.clamp(Self::MIN_SCALE, Self::MAX_SCALE)
    }

    /// Clamp the scale into range. Returns `None` if any component is not finite.
    pub fn normalized(self) -> Option<Self> {
        if !(self.x.is_finite() && self.y.is_finite() && self.scale.is_finite()) {
            return None;
        }
        Some(Self {
            scale: Self::clamp_scale(self.scale),
            ..self
        })
    }
}

impl Default for ImagePosition {
    fn default() -> Self {
        Self::centered()
    }
}

/// A planned get-together with a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Plan {
    /// Unique within the owning contact
    #[serde(default)]
    pub id: String,
    pub description: String,
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    /// Optional time of day (HH:MM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Request body for adding a plan.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlan {
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
}

impl Plan {
    /// Build a plan with a fresh id from request input.
    pub fn from_new(new: NewPlan) -> Result<Self, ContactError> {
        let plan = Plan {
            id: uuid::Uuid::new_v4().to_string(),
            description: new.description,
            date: new.date,
            time: new.time,
        };
        plan.normalized()
    }

    /// Trim fields and check that the date (and time, if any) parse.
    fn normalized(self) -> Result<Self, ContactError> {
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(ContactError::InvalidPlan(
                "description must not be empty".to_string(),
            ));
        }

        let date = self.date.trim().to_string();
        if parse_calendar_date(&date).is_none() {
            return Err(ContactError::InvalidPlan(format!("invalid date '{}'", date)));
        }

        let time = match non_blank(self.time) {
            Some(t) if parse_time_of_day(&t).is_none() => {
                return Err(ContactError::InvalidPlan(format!("invalid time '{}'", t)));
            }
            other => other,
        };

        let id = match self.id.trim() {
            "" => uuid::Uuid::new_v4().to_string(),
            id => id.to_string(),
        };

        Ok(Plan {
            id,
            description,
            date,
            time,
        })
    }
}

/// A remembered person, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Contact {
    /// Contact ID (also used as document ID)
    pub id: String,
    /// Authenticated user who owns this contact
    pub owner_id: String,
    pub name: String,
    pub category: Category,
    /// Birthday (YYYY-MM-DD); the year is the year of birth
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub how_we_met: Option<String>,
    #[serde(default)]
    pub custom_fields: BTreeMap<String, String>,
    /// Profile picture reference returned by external storage
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_position: Option<ImagePosition>,
    #[serde(default)]
    pub plans: Vec<Plan>,
    /// When the contact was added (RFC3339)
    pub created_at: String,
    /// Last modification (RFC3339)
    pub updated_at: String,
}

/// Request body for adding a contact.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewContact {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    pub category: Category,
    #[serde(default)]
    #[validate(url)]
    pub image_url: Option<String>,
}

fn validate_name(value: &str) -> Result<(), ValidationError> {
    checked_name(value).map(|_| ()).map_err(|e| {
        let mut err = ValidationError::new("name");
        err.message = Some(e.to_string().into());
        err
    })
}

/// Trimmed contact name, or why it is unacceptable.
fn checked_name(raw: &str) -> Result<String, ContactError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ContactError::BlankName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ContactError::NameTooLong);
    }
    Ok(name.to_string())
}

impl Contact {
    /// Build a new contact from validated input.
    pub fn create(owner_id: &str, new: NewContact, now: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            name: new.name.trim().to_string(),
            category: new.category,
            birthday: None,
            location: None,
            how_we_met: None,
            custom_fields: BTreeMap::new(),
            image_url: non_blank(new.image_url),
            image_position: None,
            plans: Vec::new(),
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }
}

/// Partial update of a contact.
///
/// For clearable fields a missing key leaves the value alone, while an
/// explicit `null` (or blank string) clears it. `plans` and
/// `custom_fields` replace the stored value wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub birthday: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub how_we_met: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub image_position: Option<Option<ImagePosition>>,
    #[serde(default)]
    pub custom_fields: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub plans: Option<Vec<Plan>>,
}

/// Distinguish a present `null` from a missing key.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ContactUpdate {
    /// Validate and apply this update to `contact`.
    ///
    /// Nothing is modified if validation fails.
    pub fn apply(self, contact: &mut Contact, now: &str) -> Result<(), ContactError> {
        let name = self.name.as_deref().map(checked_name).transpose()?;

        let birthday = self.birthday.map(non_blank);
        if let Some(Some(raw)) = &birthday {
            if parse_calendar_date(raw).is_none() {
                return Err(ContactError::InvalidBirthday(raw.clone()));
            }
        }

        let image_url = match self.image_url.map(non_blank) {
            Some(Some(url)) if !url.validate_url() => {
                return Err(ContactError::InvalidImageUrl(url));
            }
            other => other,
        };
        let has_image = match &image_url {
            Some(url) => url.is_some(),
            None => contact.image_url.is_some(),
        };

        let image_position = match self.image_position {
            Some(Some(_)) if !has_image => return Err(ContactError::ImagePositionWithoutImage),
            Some(Some(pos)) => Some(Some(
                pos.normalized().ok_or(ContactError::InvalidImagePosition)?,
            )),
            other => other,
        };

        let custom_fields = self.custom_fields.map(normalize_custom_fields).transpose()?;
        let plans = self.plans.map(normalize_plans).transpose()?;

        if let Some(name) = name {
            contact.name = name;
        }
        if let Some(category) = self.category {
            contact.category = category;
        }
        if let Some(birthday) = birthday {
            contact.birthday = birthday;
        }
        if let Some(location) = self.location {
            contact.location = non_blank(location);
        }
        if let Some(how_we_met) = self.how_we_met {
            contact.how_we_met = non_blank(how_we_met);
        }
        if let Some(image_url) = image_url {
            contact.image_url = image_url;
        }
        if let Some(image_position) = image_position {
            contact.image_position = image_position;
        }
        if contact.image_url.is_none() {
            contact.image_position = None;
        }
        if let Some(custom_fields) = custom_fields {
            contact.custom_fields = custom_fields;
        }
        if let Some(plans) = plans {
            contact.plans = plans;
        }
        contact.updated_at = now.to_string();

        Ok(())
    }
}

fn normalize_custom_fields(
    fields: BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, ContactError> {
    let mut normalized = BTreeMap::new();
    for (key, value) in fields {
        let key = key.trim().to_string();
        if key.is_empty() {
            return Err(ContactError::BlankFieldName);
        }
        normalized.insert(key, value.trim().to_string());
    }
    Ok(normalized)
}

fn normalize_plans(plans: Vec<Plan>) -> Result<Vec<Plan>, ContactError> {
    let plans = plans
        .into_iter()
        .map(Plan::normalized)
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    for plan in &plans {
        if !seen.insert(plan.id.as_str()) {
            return Err(ContactError::DuplicatePlanId(plan.id.clone()));
        }
    }
    Ok(plans)
}

/// Treat blank strings as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Contact validation errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ContactError {
    #[error("Name must not be empty")]
    BlankName,

    #[error("Name must be at most 100 characters")]
    NameTooLong,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid birthday: {0}")]
    InvalidBirthday(String),

    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    #[error("Duplicate plan id: {0}")]
    DuplicatePlanId(String),

    #[error("Custom field name must not be empty")]
    BlankFieldName,

    #[error("Image position must contain finite numbers")]
    InvalidImagePosition,

    #[error("Invalid image URL: {0}")]
    InvalidImageUrl(String),

    #[error("Image position requires an image")]
    ImagePositionWithoutImage,
}
