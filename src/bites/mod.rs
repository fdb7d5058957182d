//! The interaction patterns behind each demo page.
//!
//! - [`debounce`]: settle a rapidly changing value after a quiet period
//! - [`infinite`]: append pages from a producer when a sentinel comes into view
//! - [`search`]: pure filter over the static search dataset
//! - [`demo_items`]: sample data and a slow producer for the scroll page

pub mod debounce;
pub mod demo_items;
pub mod infinite;
pub mod search;

pub use debounce::Debounced;
