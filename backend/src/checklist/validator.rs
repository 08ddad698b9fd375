//! Validation of checklist submissions.
//!
//! Rules run in a fixed order and the first failure wins:
//! 1. the appliance must be known to the roster right now, not as cached by
//!    an earlier form render;
//! 2. every submitted item must belong to that appliance (a stale form can
//!    submit equipment for the wrong appliance);
//! 3. every item on the appliance must have a status (nothing left
//!    unaddressed);
//! 4. any status that needs explanation requires a non-empty note.
//!
//! Validation never mutates anything; success hands back an immutable
//! snapshot for the submission log.

use std::collections::{BTreeMap, BTreeSet};

use common::model::checklist::EquipmentStatus;

use crate::error::{Error, Result};
use crate::roster::store::Roster;

/// The one maintenance status that demands a note.
pub const NEEDS_FOLLOW_UP: &str = "Needs follow-up";

/// A post-job checklist that passed validation. Constructed only by
/// [`validate`]; fields are read-only from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    appliance: String,
    statuses: BTreeMap<String, EquipmentStatus>,
    notes: String,
}

impl ValidatedSubmission {
    pub fn appliance(&self) -> &str {
        &self.appliance
    }

    pub fn statuses(&self) -> &BTreeMap<String, EquipmentStatus> {
        &self.statuses
    }

    /// Trimmed notes; empty when none were required or given.
    pub fn notes(&self) -> &str {
        &self.notes
    }
}

/// A maintenance-night checklist that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMaintenance {
    appliance: String,
    statuses: BTreeMap<String, String>,
    notes: String,
}

impl ValidatedMaintenance {
    pub fn appliance(&self) -> &str {
        &self.appliance
    }

    pub fn statuses(&self) -> &BTreeMap<String, String> {
        &self.statuses
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}

/// Validate a post-job equipment checklist against the current roster.
pub fn validate(
    roster: &Roster,
    appliance: &str,
    statuses: &BTreeMap<String, EquipmentStatus>,
    notes: Option<&str>,
) -> Result<ValidatedSubmission> {
    if !roster.known_appliances().contains(appliance) {
        return Err(Error::UnknownAppliance {
            appliance: appliance.to_string(),
        });
    }

    let expected: Vec<&str> = roster
        .equipment_for_appliance(appliance)
        .iter()
        .map(|item| item.equipment_name.as_str())
        .collect();
    let expected_set: BTreeSet<&str> = expected.iter().copied().collect();

    for item in statuses.keys() {
        if !expected_set.contains(item.as_str()) {
            return Err(Error::UnexpectedItem {
                appliance: appliance.to_string(),
                item: item.clone(),
            });
        }
    }

    for item in &expected {
        if !statuses.contains_key(*item) {
            return Err(Error::MissingStatus {
                item: (*item).to_string(),
            });
        }
    }

    let notes = notes.unwrap_or_default().trim();
    for (item, status) in statuses {
        if status.requires_note() && notes.is_empty() {
            return Err(Error::MandatoryNotes {
                item: item.clone(),
                status: status.to_string(),
            });
        }
    }

    Ok(ValidatedSubmission {
        appliance: appliance.to_string(),
        statuses: statuses.clone(),
        notes: notes.to_string(),
    })
}

/// Validate a maintenance-night checklist against the current task list.
/// Same rule order as [`validate`], with "Needs follow-up" as the status
/// that demands a note.
pub fn validate_maintenance(
    roster: &Roster,
    appliance: &str,
    statuses: &BTreeMap<String, String>,
    notes: Option<&str>,
) -> Result<ValidatedMaintenance> {
    if !roster.known_maintenance_appliances().contains(appliance) {
        return Err(Error::UnknownAppliance {
            appliance: appliance.to_string(),
        });
    }

    let expected: Vec<&str> = roster
        .tasks_for_appliance(appliance)
        .iter()
        .map(|task| task.task.as_str())
        .collect();
    let expected_set: BTreeSet<&str> = expected.iter().copied().collect();

    for task in statuses.keys() {
        if !expected_set.contains(task.as_str()) {
            return Err(Error::UnexpectedItem {
                appliance: appliance.to_string(),
                item: task.clone(),
            });
        }
    }

    for task in &expected {
        if !statuses.contains_key(*task) {
            return Err(Error::MissingStatus {
                item: (*task).to_string(),
            });
        }
    }

    let notes = notes.unwrap_or_default().trim();
    for (task, status) in statuses {
        if status == NEEDS_FOLLOW_UP && notes.is_empty() {
            return Err(Error::MandatoryNotes {
                item: task.clone(),
                status: status.clone(),
            });
        }
    }

    Ok(ValidatedMaintenance {
        appliance: appliance.to_string(),
        statuses: statuses.clone(),
        notes: notes.to_string(),
    })
}
