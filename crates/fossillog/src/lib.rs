//! `fossillog` - A field journal for fossil finds
//!
//! This library keeps the region, location, fossil and date choices of a new
//! find consistent while it is being composed, appends committed finds to an
//! in-memory log, and derives which catalog fossils have been collected.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod collection;
pub mod config;
pub mod date;
pub mod error;
pub mod find;
pub mod form;
pub mod logging;
pub mod session;

pub use catalog::{Catalog, Location, Region};
pub use collection::{FossilStatus, Partition, RegionProgress};
pub use config::Config;
pub use date::DateParts;
pub use error::{Error, Result, ValidationError};
pub use find::{Find, FindId, FindLog, NewFind};
pub use form::{Draft, Edit, LocationChoice, Prefill};
pub use logging::init_logging;
pub use session::Session;
