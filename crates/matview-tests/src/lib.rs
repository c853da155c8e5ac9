//! Integration test crate for MatView.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on multiple matview crates to verify they work together.

#[cfg(test)]
mod runtime;

#[cfg(test)]
mod sync;
