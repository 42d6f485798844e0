//! Domain records for note and user persistence.
//!
//! # Responsibility
//! - Define the stored shapes repositories read and write.
//! - Keep write-side input coercion rules next to the data they shape.
//!
//! # Invariants
//! - Every record is identified by a store-generated integer id.
//! - Note tags are always a sequence, never null.
//! - User credentials only ever leave this layer as a one-way hash.

pub mod note;
pub mod user;
