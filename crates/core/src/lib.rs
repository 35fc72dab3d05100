//! Shared primitives for the takeout workspace.
//!
//! Currently just [`SecretString`], the wrapper every crate uses to hold
//! token and key material without leaking it into logs.

pub mod secret;

pub use secret::SecretString;
