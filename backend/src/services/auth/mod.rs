//! Login endpoint.
//!
//! There is nothing resembling real account management here: credentials
//! are derived from the crew list, so "logging in" is checking the typed
//! pair against the derivation. Session handling lives in the presentation
//! layer; a successful login just returns who the crew member is.
//!
//! The provided route is:
//! - `POST /api/auth/login`: takes `{username, password}` and returns the
//!   member's name and username, or `401 Unauthorized` with a deliberately
//!   generic message.

use actix_web::web::{post, scope};
use actix_web::Scope;

mod login;

const API_PATH: &str = "/api/auth";

/// Configures and returns the Actix scope for auth routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/login", post().to(login::process))
}
