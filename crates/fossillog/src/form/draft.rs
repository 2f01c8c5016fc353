//! The not-yet-committed state of a find.

use serde::{Deserialize, Serialize};

use super::edit::{apply_edit, Edit};
use super::{typicality, TypicalityNotice};
use crate::catalog::{Catalog, Location};
use crate::date::DateParts;
use crate::error::ValidationError;
use crate::find::NewFind;

/// Where the find was made, as far as the form knows.
///
/// An existing location and a new location name exclude each other by
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum LocationChoice {
    /// No location given.
    #[default]
    Unspecified,
    /// A location from the catalog, by id.
    Existing(String),
    /// The "create new location" option, with the name typed so far.
    New(String),
}

impl LocationChoice {
    /// The catalog location id, if an existing location is chosen.
    #[must_use]
    pub fn location_id(&self) -> Option<&str> {
        match self {
            Self::Existing(id) => Some(id),
            _ => None,
        }
    }

    /// Check if the new-location name field is active.
    #[must_use]
    pub fn is_new(&self) -> bool {
        matches!(self, Self::New(_))
    }
}

/// One entry of the location picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationOption<'a> {
    /// "No location".
    Unspecified,
    /// A known location of the selected region.
    Existing(&'a Location),
    /// The sentinel that switches to new-location entry.
    CreateNew,
}

/// Initial values handed to a fresh form, e.g. from a region detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prefill {
    /// Fossil to preselect.
    pub fossil_name: Option<String>,
    /// Region to preselect. Ignored when `location_id` resolves.
    pub region_id: Option<String>,
    /// Location to preselect; its owning region is selected with it.
    pub location_id: Option<String>,
}

/// A find being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    /// Fossil name, free text or from the catalog.
    pub fossil: String,
    /// Selected region.
    pub region_id: Option<String>,
    /// Selected location.
    pub location: LocationChoice,
    /// Year, month and day pickers.
    pub date: DateParts,
    /// Free-text note.
    pub note: String,
}

impl Draft {
    /// An empty draft with no date chosen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty draft whose date pickers start at today.
    #[must_use]
    pub fn starting_today() -> Self {
        Self {
            date: DateParts::today(),
            ..Self::default()
        }
    }

    /// Apply initial selections.
    ///
    /// A location wins over a region: selecting it pulls in its owning
    /// region.
    #[must_use]
    pub fn prefilled(self, prefill: &Prefill, catalog: &Catalog) -> Self {
        let mut draft = self;
        if let Some(fossil) = &prefill.fossil_name {
            draft = draft.apply(Edit::SetFossil(fossil.clone()), catalog);
        }
        let location = prefill
            .location_id
            .as_deref()
            .filter(|id| catalog.find_location(id, None).is_some());
        if let Some(location_id) = location {
            draft.apply(Edit::SelectLocation(location_id.to_string()), catalog)
        } else if let Some(region_id) = &prefill.region_id {
            draft.apply(Edit::SelectRegion(region_id.clone()), catalog)
        } else {
            draft
        }
    }

    /// Apply one user edit. See [`apply_edit`].
    #[must_use]
    pub fn apply(self, edit: Edit, catalog: &Catalog) -> Self {
        apply_edit(self, edit, catalog)
    }

    /// Whether the chosen fossil is typical for the chosen region.
    ///
    /// `None` while either is unset or the region is unknown.
    #[must_use]
    pub fn typicality(&self, catalog: &Catalog) -> Option<bool> {
        typicality(catalog, &self.fossil, self.region_id.as_deref().unwrap_or(""))
    }

    /// The advisory notice to show next to the region picker, if any.
    #[must_use]
    pub fn typicality_notice(&self, catalog: &Catalog) -> Option<TypicalityNotice> {
        let region = catalog.find_region(self.region_id.as_deref()?)?;
        match self.typicality(catalog) {
            Some(false) => Some(TypicalityNotice {
                fossil: self.fossil.clone(),
                region_name: region.name.clone(),
            }),
            _ => None,
        }
    }

    /// Entries of the location picker.
    ///
    /// Empty while no region is selected: the picker is disabled then.
    #[must_use]
    pub fn location_options<'a>(&self, catalog: &'a Catalog) -> Vec<LocationOption<'a>> {
        let Some(region_id) = self.region_id.as_deref() else {
            return Vec::new();
        };
        std::iter::once(LocationOption::Unspecified)
            .chain(catalog.locations_of(region_id).iter().map(LocationOption::Existing))
            .chain(std::iter::once(LocationOption::CreateNew))
            .collect()
    }

    /// Turn the draft into a candidate find.
    ///
    /// The new-location name is trimmed; the note is kept verbatim and an
    /// empty note is dropped. The date is absent while incomplete.
    ///
    /// # Errors
    ///
    /// Returns the first missing required field.
    pub fn to_new_find(&self) -> Result<NewFind, ValidationError> {
        let (location_id, new_location_name) = match &self.location {
            LocationChoice::Unspecified => (None, None),
            LocationChoice::Existing(id) => (Some(id.clone()), None),
            LocationChoice::New(name) => (None, Some(name.trim().to_string())),
        };
        let candidate = NewFind {
            fossil: self.fossil.clone(),
            region_id: self.region_id.clone().unwrap_or_default(),
            location_id,
            new_location_name,
            date: self.date.compose(),
            note: Some(self.note.clone()).filter(|n| !n.is_empty()),
        };
        candidate.validate()?;
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;

    fn draft(fossil: &str, region: &str) -> Draft {
        Draft {
            fossil: fossil.to_string(),
            region_id: Some(region.to_string()),
            ..Draft::default()
        }
    }

    #[test]
    fn test_to_new_find_minimal() {
        let mut d = draft("Ammonit", "ostsee");
        d.date = DateParts {
            year: Some(2025),
            month: Some(8),
            day: Some(10),
        };
        let find = d.to_new_find().unwrap();
        assert_eq!(find.fossil, "Ammonit");
        assert_eq!(find.region_id, "ostsee");
        assert_eq!(find.date.as_deref(), Some("2025-08-10"));
        assert!(find.location_id.is_none());
        assert!(find.new_location_name.is_none());
        assert!(find.note.is_none());
    }

    #[test]
    fn test_to_new_find_missing_fields() {
        assert_eq!(
            draft("", "ostsee").to_new_find(),
            Err(ValidationError::FossilRequired)
        );
        let no_region = Draft {
            fossil: "Ammonit".to_string(),
            ..Draft::default()
        };
        assert_eq!(no_region.to_new_find(), Err(ValidationError::RegionRequired));
    }

    #[test]
    fn test_to_new_find_new_location_trimmed() {
        let mut d = draft("Ammonit", "ostsee");
        d.location = LocationChoice::New("  Strandweg  ".to_string());
        let find = d.to_new_find().unwrap();
        assert_eq!(find.new_location_name.as_deref(), Some("Strandweg"));
        assert!(find.location_id.is_none());

        d.location = LocationChoice::New("   ".to_string());
        assert_eq!(
            d.to_new_find(),
            Err(ValidationError::NewLocationNameRequired)
        );
    }

    #[test]
    fn test_to_new_find_existing_location() {
        let mut d = draft("Seeigel", "ostsee");
        d.location = LocationChoice::Existing("heiligendamm".to_string());
        let find = d.to_new_find().unwrap();
        assert_eq!(find.location_id.as_deref(), Some("heiligendamm"));
        assert!(find.new_location_name.is_none());
    }

    #[test]
    fn test_note_kept_verbatim() {
        let mut d = draft("Seeigel", "ostsee");
        d.note = "  nach Sturm \n".to_string();
        assert_eq!(
            d.to_new_find().unwrap().note.as_deref(),
            Some("  nach Sturm \n")
        );
    }

    #[test]
    fn test_incomplete_date_is_absent() {
        let mut d = draft("Seeigel", "ostsee");
        d.date = DateParts {
            year: Some(2025),
            month: Some(8),
            day: None,
        };
        assert!(d.to_new_find().unwrap().date.is_none());
    }

    #[test]
    fn test_typicality_notice() {
        let catalog = sample_catalog();
        let notice = draft("Ammonit", "ostsee").typicality_notice(&catalog).unwrap();
        assert_eq!(notice.region_name, "Ostsee");
        assert!(notice.to_string().contains("Ammonit"));

        assert!(draft("Seeigel", "ostsee").typicality_notice(&catalog).is_none());
        assert!(draft("Ammonit", "mars").typicality_notice(&catalog).is_none());
        assert!(Draft::new().typicality_notice(&catalog).is_none());
    }

    #[test]
    fn test_location_options() {
        let catalog = sample_catalog();
        assert!(Draft::new().location_options(&catalog).is_empty());

        let options = draft("", "ostsee").location_options(&catalog);
        assert_eq!(options.len(), 4);
        assert_eq!(options[0], LocationOption::Unspecified);
        assert!(matches!(options[1], LocationOption::Existing(l) if l.id == "heiligendamm"));
        assert_eq!(options[3], LocationOption::CreateNew);

        let options = draft("", "alb").location_options(&catalog);
        assert_eq!(
            options,
            vec![LocationOption::Unspecified, LocationOption::CreateNew]
        );
    }

    #[test]
    fn test_prefill_location_selects_owning_region() {
        let catalog = sample_catalog();
        let prefill = Prefill {
            fossil_name: Some("Schwamm".to_string()),
            region_id: Some("ostsee".to_string()),
            location_id: Some("kap-arkona".to_string()),
        };
        let d = Draft::new().prefilled(&prefill, &catalog);
        assert_eq!(d.fossil, "Schwamm");
        assert_eq!(d.region_id.as_deref(), Some("ruegen"));
        assert_eq!(d.location, LocationChoice::Existing("kap-arkona".to_string()));
    }

    #[test]
    fn test_prefill_region_only() {
        let catalog = sample_catalog();
        let prefill = Prefill {
            region_id: Some("alb".to_string()),
            location_id: Some("nowhere".to_string()),
            ..Prefill::default()
        };
        let d = Draft::new().prefilled(&prefill, &catalog);
        assert_eq!(d.region_id.as_deref(), Some("alb"));
        assert_eq!(d.location, LocationChoice::Unspecified);
        assert!(d.fossil.is_empty());
    }

    #[test]
    fn test_starting_today_has_complete_date() {
        assert!(Draft::starting_today().date.is_complete());
        assert!(!Draft::new().date.is_complete());
    }
}
