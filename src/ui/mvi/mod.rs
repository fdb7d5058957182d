//! Model-View-Intent (MVI) primitives for page state.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: plain data describing what a page shows
//! - **Intent**: a key press or system event aimed at that page
//! - **Reducer**: the single place where state transitions happen

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
