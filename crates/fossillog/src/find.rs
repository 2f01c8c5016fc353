//! Committed finds and the append-only find log.
//!
//! The log lives for the duration of one session. It only grows, keeps
//! insertion order, and hands out shared references, so a find can no longer
//! change once it has been appended.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ValidationError;

/// Identifier of a committed find.
///
/// Derived from the millisecond timestamp of the append and strictly
/// increasing within one log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FindId(i64);

impl FindId {
    /// The raw millisecond token.
    #[must_use]
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for FindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A candidate find that has not been assigned an identifier yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFind {
    /// Fossil name, free text or chosen from the catalog.
    pub fossil: String,
    /// Region the find was made in.
    pub region_id: String,
    /// An existing catalog location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    /// A location not yet in the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_location_name: Option<String>,
    /// ISO `YYYY-MM-DD` date, absent if the date was left incomplete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Free-text note, kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl NewFind {
    /// Bring a raw candidate into the stored shape.
    ///
    /// The new-location name is trimmed, an empty location id means no
    /// location, and an empty note is dropped. The fossil and the note are
    /// otherwise kept verbatim.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.new_location_name = self.new_location_name.map(|name| name.trim().to_string());
        self.location_id = self.location_id.filter(|id| !id.is_empty());
        self.note = self.note.filter(|note| !note.is_empty());
        self
    }

    /// Check the required fields.
    ///
    /// Checks run in form order: fossil, region, location.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fossil.is_empty() {
            return Err(ValidationError::FossilRequired);
        }
        if self.region_id.is_empty() {
            return Err(ValidationError::RegionRequired);
        }
        match (&self.location_id, &self.new_location_name) {
            (Some(_), Some(_)) => Err(ValidationError::ConflictingLocation),
            (None, Some(name)) if name.trim().is_empty() => {
                Err(ValidationError::NewLocationNameRequired)
            }
            _ => Ok(()),
        }
    }
}

/// A committed find.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Find {
    /// Identifier assigned on append.
    pub id: FindId,
    /// The recorded data.
    #[serde(flatten)]
    pub record: NewFind,
}

impl Find {
    /// The fossil name.
    #[must_use]
    pub fn fossil(&self) -> &str {
        &self.record.fossil
    }

    /// The region id.
    #[must_use]
    pub fn region_id(&self) -> &str {
        &self.record.region_id
    }
}

/// Ordered, append-only collection of committed finds.
#[derive(Debug, Clone, Default)]
pub struct FindLog {
    finds: Vec<Find>,
}

impl FindLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and validate a candidate, assign its identifier and append
    /// it.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] and leaves the log untouched if the
    /// candidate is missing a required field.
    pub fn append(&mut self, find: NewFind) -> Result<&Find, ValidationError> {
        self.append_at(find, Utc::now())
    }

    fn append_at(&mut self, find: NewFind, now: DateTime<Utc>) -> Result<&Find, ValidationError> {
        let find = find.normalized();
        if let Err(err) = find.validate() {
            debug!(field = err.field(), "Rejected find: {err}");
            return Err(err);
        }

        let id = self.next_id(now.timestamp_millis());
        info!(%id, fossil = %find.fossil, region = %find.region_id, "Find recorded");
        self.finds.push(Find { id, record: find });
        Ok(&self.finds[self.finds.len() - 1])
    }

    fn next_id(&self, now_millis: i64) -> FindId {
        match self.finds.last() {
            Some(last) if last.id.0 >= now_millis => FindId(last.id.0 + 1),
            _ => FindId(now_millis),
        }
    }

    /// All finds in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Find] {
        &self.finds
    }

    /// Look up a find by identifier.
    #[must_use]
    pub fn get(&self, id: FindId) -> Option<&Find> {
        self.finds.iter().find(|f| f.id == id)
    }

    /// Number of finds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.finds.len()
    }

    /// Check if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.finds.is_empty()
    }
}
