//! `takeout-cli` library crate.
//!
//! Holds the configuration loading that the `takeout` binary in `main.rs`
//! builds on.

pub mod config;
