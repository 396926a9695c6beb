//! Core data model for postdeck.
//!
//! These types represent the scheduling domain: platforms, calendar
//! events with their derived green/yellow/red classification, and
//! draft posts awaiting a calendar slot.

mod draft;
mod event;
mod platform;

pub use draft::Draft;
pub use event::{CalendarEvent, NoteType};
pub use platform::Platform;
