//! Checklist submission endpoints.
//!
//! Both endpoints follow the same path: validate the submitted form against
//! the roster as it is right now, then append one row to that category's
//! log. Validation failures come back as `400` with enough detail to fix
//! the form; a storage failure is a `500` so the crew member knows the
//! submission was NOT saved.
//!
//! The provided routes are:
//! - `POST /api/checklists/post-job`: equipment statuses for the appliance
//!   used on a job.
//! - `POST /api/checklists/maintenance-night`: task statuses from a
//!   maintenance night.

use actix_web::web::{post, scope};
use actix_web::Scope;

mod maintenance_night;
mod post_job;

const API_PATH: &str = "/api/checklists";

/// Configures and returns the Actix scope for checklist routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/post-job", post().to(post_job::process))
        .route("/maintenance-night", post().to(maintenance_night::process))
}
