//! Frontend Bites: small, production-style UI interaction patterns
//! (debounced search, infinite scroll, a persisted theme toggle) shown in a
//! terminal UI.

pub mod bites;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod logging;
pub mod preferences;
pub mod shutdown;
pub mod theme;
pub mod ui;
