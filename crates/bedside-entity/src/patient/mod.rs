//! Patient entities.

pub mod model;

pub use model::Patient;
