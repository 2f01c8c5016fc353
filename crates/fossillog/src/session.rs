//! The process-wide session: one catalog, one find log.
//!
//! A session is the only writer of its log. Drafts live outside of it and
//! cost nothing to abandon; the log only changes through [`Session::submit`]
//! or [`Session::submit_candidate`].

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::collection::{catalog_partition, region_progress, Partition, RegionProgress};
use crate::config::FormConfig;
use crate::date::year_choices;
use crate::error::ValidationError;
use crate::find::{Find, FindId, FindLog, NewFind};
use crate::form::{Draft, Edit, Prefill};

/// Catalog plus the finds recorded since startup.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    log: FindLog,
    form: FormConfig,
}

/// One row of the archive view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEntry<'a> {
    /// The committed find.
    pub find: &'a Find,
    /// Display name of its region, if the region is in the catalog.
    pub region_name: Option<&'a str>,
    /// Display name of its location, existing or new.
    pub location_name: Option<&'a str>,
    /// Whether `location_name` is a location not yet in the catalog.
    pub is_new_location: bool,
}

impl Session {
    /// Start a session with default form behaviour.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self::with_form_config(catalog, FormConfig::default())
    }

    /// Start a session with the given form behaviour.
    #[must_use]
    pub fn with_form_config(catalog: Catalog, form: FormConfig) -> Self {
        Self {
            catalog,
            log: FindLog::new(),
            form,
        }
    }

    /// The taxonomy.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The finds recorded so far.
    #[must_use]
    pub fn log(&self) -> &FindLog {
        &self.log
    }

    /// A fresh draft, with today's date if so configured.
    #[must_use]
    pub fn new_draft(&self) -> Draft {
        if self.form.prefill_today {
            Draft::starting_today()
        } else {
            Draft::new()
        }
    }

    /// Years offered by the year picker, newest first.
    #[must_use]
    pub fn year_choices(&self) -> Vec<i32> {
        year_choices(Local::now().year(), self.form.earliest_year)
    }

    /// Validate a draft and append it to the log.
    ///
    /// # Errors
    ///
    /// Returns the first missing field; nothing is appended then.
    pub fn submit(&mut self, draft: &Draft) -> Result<&Find, ValidationError> {
        let candidate = draft.to_new_find()?;
        self.submit_candidate(candidate)
    }

    /// Normalize and validate a raw candidate and append it to the log.
    ///
    /// An existing location must belong to the candidate's region.
    ///
    /// # Errors
    ///
    /// Returns the first missing or conflicting field; nothing is appended
    /// then.
    pub fn submit_candidate(&mut self, candidate: NewFind) -> Result<&Find, ValidationError> {
        let candidate = candidate.normalized();
        candidate.validate()?;
        if let Some(location_id) = &candidate.location_id {
            let owned = self
                .catalog
                .find_region(&candidate.region_id)
                .and_then(|region| region.location(location_id))
                .is_some();
            if !owned {
                debug!(
                    location = %location_id,
                    region = %candidate.region_id,
                    "Rejected find: location outside its region"
                );
                return Err(ValidationError::LocationNotInRegion);
            }
        }
        self.log.append(candidate)
    }

    /// Collected vs. to-collect over the whole catalog.
    #[must_use]
    pub fn collection(&self) -> Partition {
        catalog_partition(&self.catalog, self.log.all())
    }

    /// Detail view of one region; `None` if the region is unknown.
    #[must_use]
    pub fn region_progress(&self, region_id: &str) -> Option<RegionProgress<'_>> {
        region_progress(&self.catalog, region_id, self.log.all())
    }

    /// All finds in insertion order with display names resolved.
    #[must_use]
    pub fn archive(&self) -> Vec<ArchiveEntry<'_>> {
        self.log
            .all()
            .iter()
            .map(|find| {
                let region = self.catalog.find_region(find.region_id());
                let record = &find.record;
                let (location_name, is_new_location) = match (&record.location_id, &record.new_location_name) {
                    (Some(id), _) => (
                        region.and_then(|r| r.location(id)).map(|l| l.name.as_str()),
                        false,
                    ),
                    (None, Some(name)) => (Some(name.as_str()), true),
                    (None, None) => (None, false),
                };
                ArchiveEntry {
                    find,
                    region_name: region.map(|r| r.name.as_str()),
                    location_name,
                    is_new_location,
                }
            })
            .collect()
    }

    /// Run a scripted sequence of form actions against this session.
    ///
    /// The script drives a single form: edits change the current draft, a
    /// successful submit or a discard starts a fresh one, and a rejected
    /// submit keeps the draft as it was.
    pub fn run_script(&mut self, steps: Vec<ScriptStep>) -> Vec<StepOutcome> {
        let mut draft = self.new_draft();
        let mut outcomes = Vec::with_capacity(steps.len());

        for step in steps {
            let outcome = match step {
                ScriptStep::Prefill(prefill) => {
                    draft = self.new_draft().prefilled(&prefill, &self.catalog);
                    StepOutcome::Edited { notice: None }
                }
                ScriptStep::Edit { edit } => {
                    draft = draft.apply(edit, &self.catalog);
                    StepOutcome::Edited {
                        notice: draft
                            .typicality_notice(&self.catalog)
                            .map(|n| n.to_string()),
                    }
                }
                ScriptStep::Submit => match self.submit(&draft) {
                    Ok(find) => {
                        let id = find.id;
                        draft = self.new_draft();
                        StepOutcome::Submitted { id }
                    }
                    Err(err) => StepOutcome::Rejected {
                        field: err.field(),
                        message: err.to_string(),
                    },
                },
                ScriptStep::Discard => {
                    debug!("Draft discarded");
                    draft = self.new_draft();
                    StepOutcome::Discarded
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }
}

/// One step of a session script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Start a new draft with initial selections.
    Prefill(Prefill),
    /// Apply one edit to the current draft.
    Edit {
        /// The edit.
        edit: Edit,
    },
    /// Submit the current draft.
    Submit,
    /// Abandon the current draft.
    Discard,
}

/// What a script step did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The draft changed.
    Edited {
        /// Typicality notice for the resulting draft, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        notice: Option<String>,
    },
    /// A find was appended.
    Submitted {
        /// Its identifier.
        id: FindId,
    },
    /// The submit was rejected.
    Rejected {
        /// The offending field.
        field: &'static str,
        /// User-facing message.
        message: String,
    },
    /// The draft was thrown away.
    Discarded,
}

impl StepOutcome {
    /// Field-specific notice for a rejected submit at 1-based `step`.
    #[must_use]
    pub fn rejection_notice(&self, step: usize) -> Option<String> {
        match self {
            Self::Rejected { field, message } => {
                Some(format!("step {step}: rejected ({field}): {message}"))
            }
            _ => None,
        }
    }
}
