//! Core types for the contacts service.
//!
//! Holds the contact field model, request validation, the SQL query builder
//! and the [`store::ContactStore`] capability trait. This crate is free of
//! HTTP and database dependencies; the API and storage crates depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod error;
pub mod query;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
