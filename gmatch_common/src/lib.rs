//! Common utilities and shared types for the gmatch workspace.
//!
//! This crate provides configuration handling, the text input parser and
//! common test cases used across the gmatch project.

mod config;
pub mod parse;
mod test_cases;

pub use crate::config::*;
pub use crate::parse::{EdgeLine, ParseError, ParsedProblem, ProblemText};
pub use crate::test_cases::*;
