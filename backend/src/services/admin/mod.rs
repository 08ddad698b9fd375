//! Admin endpoints: roster CSV uploads and the admin user list.
//!
//! The provided routes are:
//! - `POST /api/admin/upload`: multipart/form-data with a `kind` text field
//!   (`crew`, `equipment`, or `maintenance`) and a `file` field holding the
//!   CSV. The matching roster table is replaced wholesale; a rejected file
//!   leaves the previous table in place and comes back as `400` with the
//!   reason.
//! - `GET /api/admin/admins`: the current admin usernames, sorted.
//! - `POST /api/admin/admins`: replaces the admin user list.
//!
//! Admin-only access control is the presentation layer's job; these
//! endpoints trust their caller the same way the rest of the API does.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod list_admins;
mod save_admins;
mod upload;

const API_PATH: &str = "/api/admin";

/// Configures and returns the Actix scope for admin routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/upload", post().to(upload::process))
        .route("/admins", get().to(list_admins::process))
        .route("/admins", post().to(save_admins::process))
}
