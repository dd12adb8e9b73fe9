//! # docstore-client
//!
//! Implementations of the [`DocumentStore`] boundary defined in
//! `docstore-core`. Ships the in-memory client used by tests, the demo
//! binary, and local development; vendor SDK adapters implement the same
//! trait.
//!
//! [`DocumentStore`]: docstore_core::traits::store::DocumentStore

pub mod eval;
pub mod memory;

pub use memory::MemoryStore;
