//! Voxca: an incremental 3D cellular-automaton simulation kernel.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the voxca sub-crates. For most users, adding `voxca` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use voxca::prelude::*;
//!
//! // The classic 4/4/5 rule: remain alive on 4 neighbours, born on 4,
//! // five states (alive, three dying, dead), Moore neighbourhood.
//! let rule: AgingRule = "4/4/5/M".parse().unwrap();
//!
//! // A 16^3 toroidal lattice seeded with a deterministic random soup.
//! let mut lattice = Lattice::new(16, 16, 16).unwrap();
//! lattice.randomise(rule.alive_state(), 0.3, 42);
//!
//! // A statistics observer, notified after every mutation.
//! let id = lattice.listen(|l| {
//!     let _alive = l.count_state(4);
//! });
//!
//! for _ in 0..8 {
//!     lattice.step(&rule);
//! }
//! assert!(lattice.unlisten(id));
//! assert_eq!(lattice.cells().len(), 16 * 16 * 16);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `voxca-core` | The [`Rule`](voxca_core::Rule) trait, contract checker, IDs |
//! | [`lattice`] | `voxca-lattice` | The [`Lattice`](voxca_lattice::Lattice) kernel and its errors |
//! | [`rules`] | `voxca-rules` | Rule-string parsing and the aging rule family |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core traits and identifiers (`voxca-core`).
pub mod core {
    pub use voxca_core::*;
}

/// The lattice kernel (`voxca-lattice`).
pub mod lattice {
    pub use voxca_lattice::*;
}

/// Rule parsing and concrete rule families (`voxca-rules`).
pub mod rules {
    pub use voxca_rules::*;
}

/// The most commonly used types, for glob import.
pub mod prelude {
    pub use voxca_core::{verify_alive_contract, ContractError, ListenerId, Rule};
    pub use voxca_lattice::{Lattice, LatticeError, StepListener};
    pub use voxca_rules::{AgingRule, NeighbourSet, Neighbourhood, RuleParseError};
}
