//! Shared helpers for voxca benchmarks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use voxca_core::Rule;
use voxca_lattice::Lattice;
use voxca_rules::AgingRule;

/// Build a seeded lattice under the classic 4/4/5 rule at the given
/// alive density.
pub fn seeded_world(extent: u32, density: f64, seed: u64) -> (Lattice, AgingRule) {
    let rule: AgingRule = "4/4/5/M".parse().expect("valid rule string");
    let mut lattice = Lattice::new(extent, extent, extent).expect("valid extents");
    lattice.randomise(rule.alive_state(), density, seed);
    (lattice, rule)
}
