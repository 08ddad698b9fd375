use serde::{Deserialize, Serialize};

/// One row of the equipment list: a piece of equipment carried by an
/// appliance. Many items share the same `appliance` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub appliance: String,
    pub equipment_name: String,
}

/// One row of the maintenance task list. `area` and `training` are optional
/// columns in the uploaded CSV and default to empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceTask {
    pub appliance: String,
    pub task: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub training: String,
}
