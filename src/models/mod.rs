//! Core data models for mock lifecycle analysis

pub mod mock;
pub mod violation;
pub mod diagnostic;

pub use mock::*;
pub use violation::*;
pub use diagnostic::*;
