//! Neighbour-count sets and the rule-string segments they parse from.

use smallvec::SmallVec;
use std::fmt;

use crate::error::RuleParseError;

/// Neighbourhood kind named by the fourth rule-string segment.
///
/// Carried on a parsed rule as data for collaborators (editors,
/// re-serialisation). The kernel's traversal is always the full
/// 26-offset Moore block; a narrower kind does not restrict which
/// offsets are visited, only how the rule is displayed and stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Neighbourhood {
    /// The 3x3x3 block minus the centre: 26 neighbours. Token `M`.
    Moore,
    /// Face-adjacent cells only: 6 neighbours. Token `VN`.
    VonNeumann,
}

impl Neighbourhood {
    /// The rule-string token for this kind.
    pub fn token(self) -> &'static str {
        match self {
            Self::Moore => "M",
            Self::VonNeumann => "VN",
        }
    }

    pub(crate) fn parse(token: &str) -> Result<Self, RuleParseError> {
        match token {
            "M" => Ok(Self::Moore),
            "VN" => Ok(Self::VonNeumann),
            _ => Err(RuleParseError::UnknownNeighbourhood {
                token: token.to_string(),
            }),
        }
    }
}

impl fmt::Display for Neighbourhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A set of neighbour counts, as written in the `remain` and `become`
/// segments of a rule string.
///
/// Membership covers `[0, 26]`, the possible Moore-neighbour counts.
/// Parsed from comma-separated values and inclusive `-` ranges, e.g.
/// `0-3,9` or `5-7,12-13,15`. An empty segment is a valid set that
/// matches no count (pure-decay rules are written that way).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct NeighbourSet {
    mask: [bool; 27],
}

impl NeighbourSet {
    /// Largest representable neighbour count.
    pub const MAX_COUNT: u8 = 26;

    /// The set matching no neighbour count.
    pub fn empty() -> Self {
        Self { mask: [false; 27] }
    }

    /// Add a count to the set.
    ///
    /// Returns `false` (and changes nothing) for counts above
    /// [`MAX_COUNT`](Self::MAX_COUNT).
    pub fn insert(&mut self, count: u8) -> bool {
        if count > Self::MAX_COUNT {
            return false;
        }
        self.mask[count as usize] = true;
        true
    }

    /// Whether `count` is in the set.
    pub fn contains(self, count: u8) -> bool {
        count <= Self::MAX_COUNT && self.mask[count as usize]
    }

    /// Whether the set matches no count.
    pub fn is_empty(self) -> bool {
        !self.mask.iter().any(|&m| m)
    }

    /// Parse a `remain`/`become` segment.
    pub(crate) fn parse(segment: &str, name: &'static str) -> Result<Self, RuleParseError> {
        let mut set = Self::empty();
        if segment.is_empty() {
            return Ok(set);
        }
        for part in segment.split(',') {
            match part.split_once('-') {
                Some((lo, hi)) => {
                    let lo = parse_count(lo, name)?;
                    let hi = parse_count(hi, name)?;
                    if lo > hi {
                        return Err(RuleParseError::ReversedRange {
                            segment: name,
                            low: lo,
                            high: hi,
                        });
                    }
                    for count in lo..=hi {
                        set.insert(count);
                    }
                }
                None => {
                    set.insert(parse_count(part, name)?);
                }
            }
        }
        Ok(set)
    }

    /// Maximal inclusive runs of member counts, in ascending order.
    fn runs(&self) -> SmallVec<[(u8, u8); 4]> {
        let mut runs: SmallVec<[(u8, u8); 4]> = SmallVec::new();
        let mut current: Option<(u8, u8)> = None;
        for count in 0..=Self::MAX_COUNT {
            if self.mask[count as usize] {
                current = match current {
                    Some((lo, _)) => Some((lo, count)),
                    None => Some((count, count)),
                };
            } else if let Some(run) = current.take() {
                runs.push(run);
            }
        }
        if let Some(run) = current {
            runs.push(run);
        }
        runs
    }
}

/// Canonical segment form: ascending, ranges collapsed, e.g. `0-3,9`.
///
/// Parsing the displayed form yields the same set, so rule strings
/// round-trip through [`AgingRule`](crate::AgingRule)'s `Display`.
impl fmt::Display for NeighbourSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (lo, hi)) in self.runs().into_iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if lo == hi {
                write!(f, "{lo}")?;
            } else {
                write!(f, "{lo}-{hi}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for NeighbourSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NeighbourSet({})", self)
    }
}

fn parse_count(token: &str, segment: &'static str) -> Result<u8, RuleParseError> {
    let value: u32 = token
        .parse()
        .map_err(|_| RuleParseError::InvalidCount {
            segment,
            token: token.to_string(),
        })?;
    if value > u32::from(NeighbourSet::MAX_COUNT) {
        return Err(RuleParseError::CountOutOfRange { segment, value });
    }
    Ok(value as u8)
}
