use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::checklist::EquipmentStatus;

/// Request payload for the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response payload for a successful login. The derived password is never
/// echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub name: String,
    pub username: String,
}

/// Request payload for the post-job checklist endpoint.
/// `equipment` maps each equipment name on the selected appliance to its
/// recorded status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostJobChecklistRequest {
    pub appliance: String,
    pub equipment: BTreeMap<String, EquipmentStatus>,
    #[serde(default)]
    pub notes: Option<String>,
    pub submitted_by: String,
}

/// Request payload for the maintenance-night checklist endpoint.
/// Task statuses are free-form strings from the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceChecklistRequest {
    pub appliance: String,
    pub tasks: BTreeMap<String, String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub submitted_by: String,
}

/// Request payload for replacing the admin user list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveAdminsRequest {
    pub admins: Vec<String>,
}
