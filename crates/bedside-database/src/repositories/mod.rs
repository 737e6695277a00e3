//! Repositories backing the feed's collaborator contracts.

pub mod care_event;
pub mod patient;

pub use care_event::CareEventRepository;
pub use patient::PatientRepository;
