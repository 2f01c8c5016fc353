//! Static taxonomy of regions, locations and typical fossils.
//!
//! The catalog is loaded once at startup and never changes afterwards. Every
//! lookup is total: an unknown id yields `None` or an empty slice, never an
//! error.
//!
//! # Example
//!
//! ```
//! use fossillog::Catalog;
//!
//! let catalog = Catalog::from_json_str(
//!     r#"[{"id": "ostsee", "name": "Ostsee", "fossils": ["Seeigel", "Belemnit"]}]"#,
//! )?;
//!
//! assert_eq!(catalog.all_fossil_names(), ["Belemnit", "Seeigel"]);
//! assert!(catalog.locations_of("ostsee").is_empty());
//! assert!(catalog.find_region("nowhere").is_none());
//! # Ok::<(), fossillog::Error>(())
//! ```

mod collation;
mod source;

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub use collation::{locale_cmp, sort_names};

/// The taxonomy shipped with the crate.
const BUNDLED_REGIONS: &str = include_str!("../../data/regions.json");

/// A site within exactly one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Identifier, unique within the owning region.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A geographic area with its known locations and typical fossils.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Unique key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Typical fossil names in document order, without duplicates.
    pub fossils: Vec<String>,
    /// Known locations in document order.
    pub locations: Vec<Location>,
}

impl Region {
    /// Check whether `fossil` is listed as typical for this region.
    #[must_use]
    pub fn is_typical(&self, fossil: &str) -> bool {
        self.fossils.iter().any(|f| f == fossil)
    }

    /// Look up one of this region's locations.
    #[must_use]
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }
}

/// The immutable taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    regions: Vec<Region>,
    fossil_names: Vec<String>,
}

impl Catalog {
    /// Parse a taxonomy document.
    ///
    /// Fossil entries may be plain names or records with a `name` field;
    /// both are reduced to the name. Empty names are skipped and repeated
    /// names within one region are kept once.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the catalog breaks a
    /// structural rule (see [`Catalog::from_regions`]).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw = source::parse(json)?;
        let regions = raw
            .into_iter()
            .map(|r| {
                let fossils = r
                    .fossils
                    .iter()
                    .map(|fossil| fossil.name().to_string())
                    .collect();
                let locations = r
                    .locations
                    .into_iter()
                    .map(|l| Location {
                        id: l.id,
                        name: l.name,
                    })
                    .collect();
                Region {
                    id: r.id,
                    name: r.name,
                    fossils,
                    locations,
                }
            })
            .collect();
        Self::from_regions(regions)
    }

    /// Read and parse a taxonomy document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading catalog from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|source| Error::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            regions = catalog.regions.len(),
            fossils = catalog.fossil_names.len(),
            "Catalog loaded from {}",
            path.display()
        );
        Ok(catalog)
    }

    /// The taxonomy bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled document is broken.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_REGIONS)
    }

    /// Build a catalog from regions.
    ///
    /// Repeated or empty fossil names within a region are dropped, keeping
    /// the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogInvalid`] if a region id is empty or repeated,
    /// or if a location id repeats within one region.
    pub fn from_regions(mut regions: Vec<Region>) -> Result<Self> {
        for region in &mut regions {
            let mut seen = HashSet::new();
            region
                .fossils
                .retain(|name| !name.is_empty() && seen.insert(name.clone()));
        }

        let mut region_ids = HashSet::new();
        for region in &regions {
            if region.id.is_empty() {
                return Err(Error::catalog_invalid(format!(
                    "region '{}' has an empty id",
                    region.name
                )));
            }
            if !region_ids.insert(region.id.as_str()) {
                return Err(Error::catalog_invalid(format!(
                    "duplicate region id '{}'",
                    region.id
                )));
            }
            let mut location_ids = HashSet::new();
            for location in &region.locations {
                if !location_ids.insert(location.id.as_str()) {
                    return Err(Error::catalog_invalid(format!(
                        "duplicate location id '{}' in region '{}'",
                        location.id, region.id
                    )));
                }
            }
        }

        let mut fossil_names: Vec<String> = regions
            .iter()
            .flat_map(|r| r.fossils.iter().cloned())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        sort_names(&mut fossil_names);

        Ok(Self {
            regions,
            fossil_names,
        })
    }

    /// All regions in document order.
    #[must_use]
    pub fn list_regions(&self) -> &[Region] {
        &self.regions
    }

    /// Look up a region by id.
    #[must_use]
    pub fn find_region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// Every typical fossil of every region, deduplicated and in display
    /// order.
    #[must_use]
    pub fn all_fossil_names(&self) -> &[String] {
        &self.fossil_names
    }

    /// Locations of a region; empty if the region is unknown or has none.
    #[must_use]
    pub fn locations_of(&self, region_id: &str) -> &[Location] {
        self.find_region(region_id)
            .map(|r| r.locations.as_slice())
            .unwrap_or_default()
    }

    /// Look up a location together with its owning region.
    ///
    /// Location ids are only unique within a region. When `preferred_region`
    /// owns a location with this id, that one is returned; otherwise the
    /// first owner in catalog order.
    #[must_use]
    pub fn find_location(
        &self,
        location_id: &str,
        preferred_region: Option<&str>,
    ) -> Option<(&Region, &Location)> {
        let preferred = preferred_region
            .and_then(|id| self.find_region(id))
            .and_then(|r| r.location(location_id).map(|l| (r, l)));
        preferred.or_else(|| {
            self.regions
                .iter()
                .find_map(|r| r.location(location_id).map(|l| (r, l)))
        })
    }
}
