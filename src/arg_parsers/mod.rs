//! Parsers for the values of command-line options

mod numbers;
pub use numbers::*;
