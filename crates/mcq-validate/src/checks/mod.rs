//! Validation check modules.
//!
//! `rules` decides the default verdict; `format` holds the finer-grained
//! layout checks. Every check is a pure function of the table and settings.

pub mod format;
pub mod rules;
