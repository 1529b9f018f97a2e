//! Domain models for LENDGATE.
//!
//! These are the core types shared across all crates.

pub mod allowlist;
pub mod decision;
pub mod session;
pub mod user;
