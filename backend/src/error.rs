//! Error types for the brigade backend.
//!
//! One taxonomy covers the whole request path: upload rejection, login
//! failure, checklist validation, and storage I/O. Each variant maps to the
//! HTTP response the handler returns, so handlers stay a one-line match.

use actix_web::HttpResponse;
use thiserror::Error;

/// The main error type for backend operations.
#[derive(Error, Debug)]
pub enum Error {
    /// An uploaded roster CSV was rejected. The previous table is retained.
    #[error("invalid upload: {message}")]
    Schema { message: String },

    /// Login failed. Deliberately generic so the caller cannot tell an
    /// unknown user from a wrong password.
    #[error("invalid credentials")]
    AuthFailure,

    /// The submitted appliance is not in the current equipment roster.
    #[error("unknown appliance: {appliance}")]
    UnknownAppliance { appliance: String },

    /// The submission carries an item that does not belong to the selected
    /// appliance (stale form).
    #[error("'{item}' is not listed for appliance '{appliance}'")]
    UnexpectedItem { appliance: String, item: String },

    /// An item on the appliance was left without a status.
    #[error("no status submitted for '{item}'")]
    MissingStatus { item: String },

    /// A status that needs explanation was submitted without a note.
    #[error("note required for \"{item}\" when status is \"{status}\"")]
    MandatoryNotes { item: String, status: String },

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed while writing a table or log row.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding of a status map failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation { message: String },
}

/// A specialized Result type for backend operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Whether this error is the user's input rather than the server's fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Schema { .. }
                | Self::AuthFailure
                | Self::UnknownAppliance { .. }
                | Self::UnexpectedItem { .. }
                | Self::MissingStatus { .. }
                | Self::MandatoryNotes { .. }
        )
    }

    /// Map this error to the HTTP response reported to the end user.
    ///
    /// Validation and upload errors carry enough detail to correct the form;
    /// `AuthFailure` stays generic; everything else is a server-side failure
    /// that must be surfaced rather than silently dropped.
    pub fn to_response(&self) -> HttpResponse {
        match self {
            Self::AuthFailure => HttpResponse::Unauthorized().body(self.to_string()),
            _ if self.is_client_error() => {
                HttpResponse::BadRequest().body(format!("Error: {}", self))
            }
            _ => HttpResponse::InternalServerError().body(format!("Error: {}", self)),
        }
    }
}
