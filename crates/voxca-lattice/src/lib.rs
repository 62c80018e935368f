//! Toroidal 3D lattice and incremental step kernel.
//!
//! [`Lattice`] owns the cell-state storage for a fixed-size toroidal grid,
//! a double buffer swapped by role each step, and the per-step dirty mask
//! behind the incremental neighbour-count optimisation. A driver holds a
//! lattice plus any [`Rule`](voxca_core::Rule) and advances the simulation
//! with [`Lattice::step`] at a cadence of its choosing.
//!
//! # Execution model
//!
//! Single-threaded, synchronous, cooperative. `step()` and `clear()` run
//! to completion before returning; there is no internal locking and no
//! suspension point, consistent with a per-frame simulation loop. Memory
//! is fixed for the lattice's lifetime: two state buffers and one dirty
//! mask, all allocated at construction, with no per-step allocation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod lattice;

pub use error::LatticeError;
pub use lattice::{Lattice, StepListener};
