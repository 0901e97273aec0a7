//! Common utilities shared across the campaign service crates.

#![warn(clippy::pedantic)]

/// Module for secret types that prevent accidental logging
pub mod secret;

/// Module for JWT limits and pre-verification checks
pub mod jwt;
