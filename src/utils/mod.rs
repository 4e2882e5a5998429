//! Utility modules

pub mod files;

pub use files::discover_test_files;
