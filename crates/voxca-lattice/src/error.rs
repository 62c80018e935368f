//! Error types for lattice construction.

use std::error::Error;
use std::fmt;

/// Errors from [`Lattice::new`](crate::Lattice::new).
///
/// Construction is the only fallible kernel operation: a lattice either
/// exists with valid fixed dimensions or was never built. Rule contract
/// violations are deliberately not represented here; the kernel treats
/// rules as trusted, previously-validated components (see
/// [`voxca_core::verify_alive_contract`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LatticeError {
    /// An extent was zero. All three extents must be positive.
    ZeroExtent {
        /// Axis name: `"width"`, `"height"` or `"depth"`.
        axis: &'static str,
    },
    /// An extent exceeds the per-axis maximum (coordinates are `i32`).
    ExtentTooLarge {
        /// Axis name: `"width"`, `"height"` or `"depth"`.
        axis: &'static str,
        /// The offending extent.
        extent: u32,
        /// The per-axis maximum.
        max: u32,
    },
    /// `width * height * depth` overflows the addressable cell count.
    CellCountOverflow {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Requested depth.
        depth: u32,
    },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroExtent { axis } => write!(f, "lattice {axis} must be positive"),
            Self::ExtentTooLarge { axis, extent, max } => {
                write!(f, "lattice {axis} {extent} exceeds maximum {max}")
            }
            Self::CellCountOverflow {
                width,
                height,
                depth,
            } => {
                write!(
                    f,
                    "cell count {width} x {height} x {depth} overflows usize"
                )
            }
        }
    }
}

impl Error for LatticeError {}
