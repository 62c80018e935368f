//! Core traits and identifiers for the voxca cellular-automaton kernel.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! [`Rule`] capability contract the simulation kernel is polymorphic over,
//! the construction-time contract checker rule parsers run before handing a
//! rule to a driver, and the opaque [`ListenerId`] observer handle.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod rule;

pub use error::ContractError;
pub use id::ListenerId;
pub use rule::{verify_alive_contract, Rule};
