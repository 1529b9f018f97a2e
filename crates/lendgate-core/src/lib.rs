//! LENDGATE Core — shared domain models, error taxonomy, repository
//! trait definitions, and pure CIDR matching.
//!
//! This crate has no I/O. Durable storage lives in `lendgate-db`;
//! authentication and decision orchestration live in `lendgate-auth`.

pub mod cidr;
pub mod error;
pub mod models;
pub mod repository;

pub use error::{LendgateError, LendgateResult};
