//! # docstore-repository
//!
//! Resource provisioning and the generic typed repository over a remote
//! document store. Construction provisions the target database and
//! collection; every data operation afterwards is a self-contained call
//! through the [`DocumentStore`] boundary.
//!
//! [`DocumentStore`]: docstore_core::traits::store::DocumentStore

pub mod provision;
pub mod repository;

pub use repository::DocumentRepository;
