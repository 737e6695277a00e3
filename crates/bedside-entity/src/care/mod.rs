//! Care event entities.

pub mod event;
pub mod kind;

pub use event::CareEvent;
pub use kind::CareEventType;
