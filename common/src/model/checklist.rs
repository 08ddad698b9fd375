use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed status vocabulary for post-job equipment checks.
///
/// Serialized with the exact wording shown on the checklist form, which is
/// also what ends up in the submission log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentStatus {
    #[serde(rename = "Ready for Use")]
    ReadyForUse,
    #[serde(rename = "Replaced and drying")]
    ReplacedAndDrying,
    #[serde(rename = "Note for follow-up")]
    NoteForFollowUp,
    #[serde(rename = "Tagged out for repairs")]
    TaggedOutForRepairs,
    #[serde(rename = "Damaged or Lost")]
    DamagedOrLost,
}

impl EquipmentStatus {
    /// Every status, in the order the form presents them.
    pub const ALL: [EquipmentStatus; 5] = [
        EquipmentStatus::ReadyForUse,
        EquipmentStatus::ReplacedAndDrying,
        EquipmentStatus::NoteForFollowUp,
        EquipmentStatus::TaggedOutForRepairs,
        EquipmentStatus::DamagedOrLost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EquipmentStatus::ReadyForUse => "Ready for Use",
            EquipmentStatus::ReplacedAndDrying => "Replaced and drying",
            EquipmentStatus::NoteForFollowUp => "Note for follow-up",
            EquipmentStatus::TaggedOutForRepairs => "Tagged out for repairs",
            EquipmentStatus::DamagedOrLost => "Damaged or Lost",
        }
    }

    /// Whether this status must be accompanied by a non-empty note.
    pub fn requires_note(self) -> bool {
        matches!(
            self,
            EquipmentStatus::NoteForFollowUp
                | EquipmentStatus::TaggedOutForRepairs
                | EquipmentStatus::DamagedOrLost
        )
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
