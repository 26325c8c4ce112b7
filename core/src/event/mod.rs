//! Canonical event model: type tags, categories, payload shapes and the
//! [`Event`] envelope.

mod envelope;
mod kind;
mod payload;

pub use envelope::{Event, EventData, EventPayload};
pub use kind::{EventCategory, EventType};
pub use payload::*;
