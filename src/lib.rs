/// Command line interface functionality
pub mod cli;
/// Contains various shared data types
pub mod data_types;
/// Tooling for parsing input files into meaningful structs / data
pub mod parsing;
/// Pairs two parsed runs and drives the presence and score comparisons
pub mod run_comparison;
/// Core logic for finding, sorting, and flagging rank score changes
pub mod score_differ;
/// Various utility functions that tend to be very generic
pub mod util;
/// All output writers
pub mod writers;
