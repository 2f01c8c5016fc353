//! The new-find form as an explicit draft plus a pure transition function.
//!
//! Every user action is an [`Edit`]; [`apply_edit`] maps a draft and an edit
//! to the next draft while keeping region, location and date choices
//! consistent with the catalog. Nothing is written anywhere until
//! [`Draft::to_new_find`] succeeds and the candidate is appended to a
//! [`FindLog`](crate::FindLog).
//!
//! # Example
//!
//! ```
//! use fossillog::{Catalog, Draft, Edit, LocationChoice};
//!
//! let catalog = Catalog::bundled()?;
//! let draft = Draft::new()
//!     .apply(Edit::SelectRegion("ostsee".into()), &catalog)
//!     .apply(Edit::SelectLocation("kap-arkona".into()), &catalog);
//!
//! // Kap Arkona lies on Rügen, so the region follows the location.
//! assert_eq!(draft.region_id.as_deref(), Some("ruegen"));
//! assert_eq!(draft.location, LocationChoice::Existing("kap-arkona".into()));
//! # Ok::<(), fossillog::Error>(())
//! ```

mod draft;
mod edit;

use std::fmt;

use serde::Serialize;

use crate::catalog::Catalog;

pub use draft::{Draft, LocationChoice, LocationOption, Prefill};
pub use edit::{apply_edit, Edit};

/// Whether `fossil` is listed as typical for `region_id`.
///
/// `None` when either is empty or the region is unknown. The answer is
/// advisory and never blocks a submission.
#[must_use]
pub fn typicality(catalog: &Catalog, fossil: &str, region_id: &str) -> Option<bool> {
    if fossil.is_empty() || region_id.is_empty() {
        return None;
    }
    catalog
        .find_region(region_id)
        .map(|region| region.is_typical(fossil))
}

/// Advisory notice for a fossil that is not typical for the chosen region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypicalityNotice {
    /// The chosen fossil.
    pub fossil: String,
    /// Display name of the chosen region.
    pub region_name: String,
}

impl fmt::Display for TypicalityNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "note: \"{}\" is not typical for \"{}\"",
            self.fossil, self.region_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;

    #[test]
    fn test_typicality() {
        let catalog = sample_catalog();
        assert_eq!(typicality(&catalog, "Seeigel", "ostsee"), Some(true));
        assert_eq!(typicality(&catalog, "Ammonit", "ostsee"), Some(false));
        assert_eq!(typicality(&catalog, "Ammonit", "alb"), Some(true));
    }

    #[test]
    fn test_typicality_unknown_when_unset() {
        let catalog = sample_catalog();
        assert_eq!(typicality(&catalog, "", "ostsee"), None);
        assert_eq!(typicality(&catalog, "Seeigel", ""), None);
        assert_eq!(typicality(&catalog, "Seeigel", "mars"), None);
    }

    #[test]
    fn test_typicality_notice_display() {
        let notice = TypicalityNotice {
            fossil: "Ammonit".to_string(),
            region_name: "Ostsee".to_string(),
        };
        assert_eq!(
            notice.to_string(),
            "note: \"Ammonit\" is not typical for \"Ostsee\""
        );
    }
}
