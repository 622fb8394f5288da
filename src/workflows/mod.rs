//! Mutating operations. Handlers and websocket sessions go through here,
//! never straight to the repositories.

pub mod booking;
pub mod scheduling;

pub use booking::{book_seats, cancel_booking, load_context};
pub use scheduling::{
    create_screening, delete_screening, parse_start_time, update_screening, EditorMode,
    ScreeningDraft, ScreeningEditor, ScreeningForm, DEFAULT_START_TIME,
};
