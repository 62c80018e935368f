//! Rule-string parsing and the life-like aging rule family.
//!
//! The kernel in `voxca-lattice` is polymorphic over
//! [`Rule`](voxca_core::Rule) and never validates rules itself. This crate
//! is the boundary where human-readable rule descriptions become trusted
//! rule values: the `remain/become/states/neighbourhood` string format
//! (for example `4/4/5/M` or `9-26/5-7,12-13,15/5/M`) is parsed, bounds
//! are checked, and the alive/neighbour contract is verified before an
//! [`AgingRule`] is ever released to a driver. Malformed strings are
//! rejected here and never reach the kernel.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aging;
pub mod error;
pub mod parse;

pub use aging::AgingRule;
pub use error::RuleParseError;
pub use parse::{NeighbourSet, Neighbourhood};
