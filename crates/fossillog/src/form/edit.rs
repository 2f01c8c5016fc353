//! User edits and the draft transition function.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::draft::{Draft, LocationChoice};
use crate::catalog::Catalog;

/// One discrete user action on the form.
///
/// Picker values follow the picker convention: an empty string is the
/// "please choose" placeholder and clears the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Edit {
    /// Choose or type a fossil name.
    SetFossil(String),
    /// Choose a region by id.
    SelectRegion(String),
    /// Choose an existing location by id.
    SelectLocation(String),
    /// Choose the "create new location" entry.
    CreateNewLocation,
    /// Type into the new-location name field.
    SetNewLocationName(String),
    /// Choose the year.
    SetYear(Option<i32>),
    /// Choose the month.
    SetMonth(Option<u32>),
    /// Choose the day.
    SetDay(Option<u32>),
    /// Replace the note.
    SetNote(String),
}

/// Compute the draft that results from one edit.
///
/// Consistency rules:
/// - selecting a region (even the same one again) clears the location
/// - selecting an existing location moves the region to the location's
///   owner; an unknown location id leaves no location selected
/// - "create new location" needs a selected region and drops any existing
///   location
/// - date changes clamp the day to the new month length
#[must_use]
pub fn apply_edit(draft: Draft, edit: Edit, catalog: &Catalog) -> Draft {
    trace!(?edit, "Applying edit");
    match edit {
        Edit::SetFossil(fossil) => Draft { fossil, ..draft },

        Edit::SelectRegion(region_id) => {
            let region_id = Some(region_id).filter(|id| !id.is_empty());
            if let Some(id) = region_id
                .as_deref()
                .filter(|id| catalog.find_region(id).is_none())
            {
                debug!(region = %id, "Selected region is not in the catalog");
            }
            Draft {
                region_id,
                location: LocationChoice::Unspecified,
                ..draft
            }
        }

        Edit::SelectLocation(location_id) if location_id.is_empty() => Draft {
            location: LocationChoice::Unspecified,
            ..draft
        },

        Edit::SelectLocation(location_id) => {
            match catalog.find_location(&location_id, draft.region_id.as_deref()) {
                Some((owner, location)) => {
                    if draft.region_id.as_deref() != Some(owner.id.as_str()) {
                        debug!(
                            location = %location.id,
                            region = %owner.id,
                            "Region follows selected location"
                        );
                    }
                    Draft {
                        region_id: Some(owner.id.clone()),
                        location: LocationChoice::Existing(location.id.clone()),
                        ..draft
                    }
                }
                None => {
                    warn!(location = %location_id, "Unknown location, selection cleared");
                    Draft {
                        location: LocationChoice::Unspecified,
                        ..draft
                    }
                }
            }
        }

        Edit::CreateNewLocation => {
            if draft.region_id.is_none() {
                debug!("Ignoring new location without a region");
                draft
            } else if draft.location.is_new() {
                draft
            } else {
                Draft {
                    location: LocationChoice::New(String::new()),
                    ..draft
                }
            }
        }

        Edit::SetNewLocationName(name) => {
            if draft.location.is_new() {
                Draft {
                    location: LocationChoice::New(name),
                    ..draft
                }
            } else {
                trace!("New location name field is not active");
                draft
            }
        }

        Edit::SetYear(year) => Draft {
            date: draft.date.with_year(year),
            ..draft
        },
        Edit::SetMonth(month) => Draft {
            date: draft.date.with_month(month),
            ..draft
        },
        Edit::SetDay(day) => Draft {
            date: draft.date.with_day(day),
            ..draft
        },

        Edit::SetNote(note) => Draft { note, ..draft },
    }
}
