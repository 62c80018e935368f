//! Error types for rule-string parsing.

use std::error::Error;
use std::fmt;

use voxca_core::ContractError;

/// Errors from parsing a `remain/become/states/neighbourhood` rule string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleParseError {
    /// The string does not split into exactly four `/`-separated segments.
    SegmentCount {
        /// Number of segments found.
        found: usize,
    },
    /// A neighbour-count token is not a number.
    InvalidCount {
        /// Segment name: `"remain"` or `"become"`.
        segment: &'static str,
        /// The offending token.
        token: String,
    },
    /// A neighbour count exceeds 26 (the Moore block has 26 neighbours).
    CountOutOfRange {
        /// Segment name: `"remain"` or `"become"`.
        segment: &'static str,
        /// The offending value.
        value: u32,
    },
    /// A range has its bounds reversed, e.g. `5-2`.
    ReversedRange {
        /// Segment name: `"remain"` or `"become"`.
        segment: &'static str,
        /// Low bound as written.
        low: u8,
        /// High bound as written.
        high: u8,
    },
    /// The states segment is not a number.
    InvalidStateCount {
        /// The offending token.
        token: String,
    },
    /// The total state count is outside `[2, 256]`.
    StateCountOutOfRange {
        /// The offending value.
        found: u32,
    },
    /// The neighbourhood token is neither `M` nor `VN`.
    UnknownNeighbourhood {
        /// The offending token.
        token: String,
    },
    /// The constructed rule failed the alive/neighbour contract check.
    ///
    /// Unreachable for rules built by this crate's own parser; surfaces
    /// when [`AgingRule::new`](crate::AgingRule::new) is fed components
    /// that cannot form a conforming rule.
    Contract(ContractError),
}

impl fmt::Display for RuleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SegmentCount { found } => {
                write!(
                    f,
                    "expected remain/become/states/neighbourhood (4 segments, got {found})"
                )
            }
            Self::InvalidCount { segment, token } => {
                write!(f, "{segment} segment: '{token}' is not a neighbour count")
            }
            Self::CountOutOfRange { segment, value } => {
                write!(f, "{segment} segment: count {value} exceeds 26")
            }
            Self::ReversedRange { segment, low, high } => {
                write!(f, "{segment} segment: range {low}-{high} is reversed")
            }
            Self::InvalidStateCount { token } => {
                write!(f, "states segment: '{token}' is not a number")
            }
            Self::StateCountOutOfRange { found } => {
                write!(f, "total states must be in [2, 256] (got {found})")
            }
            Self::UnknownNeighbourhood { token } => {
                write!(f, "unknown neighbourhood '{token}' (expected M or VN)")
            }
            Self::Contract(err) => write!(f, "rule violates the alive/neighbour contract: {err}"),
        }
    }
}

impl Error for RuleParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Contract(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContractError> for RuleParseError {
    fn from(err: ContractError) -> Self {
        Self::Contract(err)
    }
}
