//! Raw shapes of the taxonomy document.
//!
//! Two variants of the document exist in the wild: regions whose `fossils`
//! are plain names, and regions whose `fossils` are records carrying an id
//! and image references. Both are accepted here and reduced to names before
//! anything else sees them.

use serde::Deserialize;

/// One region record as it appears in the document.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawRegion {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fossils: Vec<RawFossil>,
    #[serde(default)]
    pub locations: Vec<RawLocation>,
}

/// A location record as it appears in the document.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawLocation {
    pub id: String,
    pub name: String,
}

/// A fossil entry in either of its two shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawFossil {
    Name(String),
    Record(FossilRecord),
}

/// The structured fossil shape. Only `name` matters to the core; `id`,
/// `image` and `imageGray` belong to the presentation layer and are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FossilRecord {
    pub name: String,
}

impl RawFossil {
    /// The display name of this entry, whatever its shape.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Record(record) => &record.name,
        }
    }
}

/// Parse the document into raw region records.
pub(crate) fn parse(json: &str) -> serde_json::Result<Vec<RawRegion>> {
    serde_json::from_str(json)
}
