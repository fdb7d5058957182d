//! Terminal front end: pages, input, drawing, and the event loop.

pub mod app;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod landing;
pub mod layout;
pub mod mvi;
pub mod render;
pub mod runtime;
pub mod scroll_page;
pub mod search_page;
pub mod terminal_guard;
pub mod theme;
