//! The roster: crew list, equipment list, and maintenance task list.
//!
//! All three tables are replaced wholesale from admin CSV uploads and drive
//! everything else in the app: the crew list is where login credentials come
//! from, the equipment list decides which appliances exist and what each one
//! carries, and the maintenance task list feeds the maintenance-night
//! checklist.
//!
//! - `csv`: shared ingestion for uploaded lists (delimiter sniffing, BOM
//!   handling, header normalization).
//! - `store`: the in-memory tables, their replace/lookup operations, and
//!   persistence back to the data directory.

pub mod csv;
pub mod store;
