//! Deterministic retry-delay planning.
//!
//! The [`delay`] module holds the planner itself; everything else wires it to
//! the `delays` command line tool.

pub mod cli;
pub mod commands;
pub mod config;
pub mod delay;
pub mod domain;
pub mod error;
pub mod infra;
pub mod output;
pub mod term;
