//! `libris-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no persistence).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{Entity, position_of};
pub use error::{DomainError, DomainResult};
pub use id::{Isbn, UserId};
