//! Expose nirnay's internal API for integration tests. The command line tool
//! is the supported interface.
pub mod cli;
pub mod config;
pub mod output;
pub mod render;
