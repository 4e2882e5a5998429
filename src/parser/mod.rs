//! Parsing of JavaScript and TypeScript test files

pub mod javascript;

pub use javascript::AstParser;
