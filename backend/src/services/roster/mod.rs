//! Read-only roster endpoints that drive the checklist forms.
//!
//! The provided routes are:
//! - `GET /api/roster/appliances`: the appliances named by the current
//!   equipment list, sorted.
//! - `GET /api/roster/equipment`: the full appliance -> equipment names map.
//! - `GET /api/roster/equipment/{appliance}`: equipment names for one
//!   appliance, in upload order; an empty list for an unknown appliance.
//! - `GET /api/roster/maintenance_tasks`: the full appliance -> maintenance
//!   tasks map.

use actix_web::web::{get, scope};
use actix_web::Scope;

mod appliances;
mod equipment;
mod equipment_for_appliance;
mod maintenance_tasks;

const API_PATH: &str = "/api/roster";

/// Configures and returns the Actix scope for roster routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/appliances", get().to(appliances::process))
        .route("/equipment", get().to(equipment::process))
        .route(
            "/equipment/{appliance}",
            get().to(equipment_for_appliance::process),
        )
        .route("/maintenance_tasks", get().to(maintenance_tasks::process))
}
