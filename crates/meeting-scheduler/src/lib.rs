//! Meeting scheduler server library.
//!
//! Holds the command-line definition so it can be tested apart from the
//! binary entry point.

pub mod cli;
