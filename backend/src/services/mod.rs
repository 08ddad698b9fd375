pub mod admin;
pub mod auth;
pub mod checklists;
pub mod roster;
