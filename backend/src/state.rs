//! Shared application state.
//!
//! The main components are:
//! - `AppState`: a clonable struct injected into the Actix application as
//!   `web::Data`, holding the roster, the submission log, and the loaded
//!   configuration.
//! - The roster sits behind an `Arc<RwLock>`: lookups (login, form
//!   rendering, validation) take the read lock, and the admin replace
//!   operations take the write lock, so a request never observes a
//!   half-replaced table.
//! - The submission log serializes its own appends internally; it is shared
//!   here as a plain `Arc`.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::checklist::submission_log::SubmissionLog;
use crate::config::AppConfig;
use crate::roster::store::Roster;

/// A thread-safe, shareable container for everything the handlers need.
#[derive(Clone)]
pub struct AppState {
    /// The roster tables. Single source of truth for logins and forms.
    pub roster: Arc<RwLock<Roster>>,
    /// The append-only per-category submission logs.
    pub submissions: Arc<SubmissionLog>,
    /// The configuration the server was started with.
    pub config: AppConfig,
}

impl AppState {
    /// Build the state for `config`, loading whatever roster tables were
    /// persisted by earlier runs.
    pub fn load(config: AppConfig) -> Self {
        let roster = Roster::load(config.clone());
        let submissions = SubmissionLog::new(config.submissions_dir());
        Self {
            roster: Arc::new(RwLock::new(roster)),
            submissions: Arc::new(submissions),
            config,
        }
    }

    /// State with empty tables, for tests.
    #[cfg(test)]
    pub fn new(config: AppConfig) -> Self {
        let roster = Roster::new(config.clone());
        let submissions = SubmissionLog::new(config.submissions_dir());
        Self {
            roster: Arc::new(RwLock::new(roster)),
            submissions: Arc::new(submissions),
            config,
        }
    }
}
