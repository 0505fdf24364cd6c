//! The tools module provides helper functions for the huffcode command line program.
//!
//! The tools are:
//! - cli: Command line interface, weight list parsing and log level setup.
//!
pub mod cli;
