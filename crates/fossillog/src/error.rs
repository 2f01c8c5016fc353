//! Error types for fossillog.
//!
//! Catalog lookups never fail: an unknown region or location id resolves to
//! `None` or an empty slice. The errors in this module cover loading the
//! catalog and configuration, and the field checks a find must pass before
//! it is appended to the log.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for fossillog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Catalog Errors ===
    /// Failed to read the taxonomy file.
    #[error("failed to read catalog at {path}: {source}")]
    CatalogRead {
        /// Path to the catalog file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The taxonomy parsed but violates a structural rule.
    #[error("invalid catalog: {message}")]
    CatalogInvalid {
        /// Description of the violation.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Form Errors ===
    /// A find was rejected before it reached the log.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for fossillog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new catalog structure error.
    #[must_use]
    pub fn catalog_invalid(message: impl Into<String>) -> Self {
        Self::CatalogInvalid {
            message: message.into(),
        }
    }

    /// Check if this error is a rejected find.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from loading the catalog.
    #[must_use]
    pub fn is_catalog_error(&self) -> bool {
        matches!(self, Self::CatalogRead { .. } | Self::CatalogInvalid { .. })
    }
}

/// A required form field is missing or inconsistent.
///
/// Each variant maps to exactly one form field so the caller can attach the
/// notice next to it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// No fossil was chosen or typed.
    #[error("please choose a fossil")]
    FossilRequired,

    /// No region was selected.
    #[error("please choose a region")]
    RegionRequired,

    /// "Create new location" is active but the name is blank.
    #[error("please enter a name for the new location")]
    NewLocationNameRequired,

    /// Both an existing location and a new location name were supplied.
    #[error("choose either an existing location or a new location name, not both")]
    ConflictingLocation,

    /// The location id is not one of the region's locations.
    #[error("the chosen location does not belong to the chosen region")]
    LocationNotInRegion,
}

impl ValidationError {
    /// The form field this failure belongs to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::FossilRequired => "fossil",
            Self::RegionRequired => "region",
            Self::NewLocationNameRequired => "newLocationName",
            Self::ConflictingLocation => "location",
            Self::LocationNotInRegion => "locationId",
        }
    }
}
