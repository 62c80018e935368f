//! Error types shared across the voxca workspace.

use std::error::Error;
use std::fmt;

/// Violations of the alive/neighbour coupling detected by
/// [`verify_alive_contract`](crate::verify_alive_contract).
///
/// These surface at rule-construction time only. The kernel trusts any
/// rule it is handed and never produces them itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractError {
    /// `state_count` must be in `[1, 256]` (states are `u8` values).
    StateCountOutOfRange {
        /// The offending state count.
        state_count: u16,
    },
    /// The rule reports an alive state outside `[0, state_count)`.
    AliveStateOutOfRange {
        /// The reported alive state.
        alive: u8,
        /// The rule's declared number of states.
        state_count: u16,
    },
    /// `is_neighbour` disagrees with the singleton-`{alive_state}`
    /// contract for some state value.
    NeighbourMismatch {
        /// The state the predicate was probed with.
        state: u8,
        /// What the predicate returned for that state.
        counted: bool,
    },
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StateCountOutOfRange { state_count } => {
                write!(f, "state count must be in [1, 256] (got {state_count})")
            }
            Self::AliveStateOutOfRange { alive, state_count } => {
                write!(
                    f,
                    "alive state {alive} outside the rule's state range [0, {state_count})"
                )
            }
            Self::NeighbourMismatch { state, counted } => {
                if *counted {
                    write!(f, "is_neighbour counts state {state}, which is not the alive state")
                } else {
                    write!(f, "is_neighbour does not count the alive state {state}")
                }
            }
        }
    }
}

impl Error for ContractError {}
