//! Products domain module.
//!
//! This crate contains the catalog entity and its invariants, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::{MAX_NAME_LENGTH, MIN_PRICE, Product};
