//! The life-like multi-state aging rule family.

use std::fmt;
use std::str::FromStr;

use voxca_core::{verify_alive_contract, Rule};

use crate::error::RuleParseError;
use crate::parse::{NeighbourSet, Neighbourhood};

/// A life-like rule with aging ("dying") states, parsed from the
/// `remain/become/states/neighbourhood` format.
///
/// State semantics: `state_count - 1` is the single alive state, 0 is
/// dead, everything between is a dying countdown.
///
/// - an **alive** cell whose neighbour count is in the remain set stays
///   alive, otherwise it starts dying (drops by one);
/// - a **dead** cell whose neighbour count is in the become set is born
///   alive, otherwise it stays dead;
/// - a **dying** cell drops by one each step regardless of neighbours,
///   until it reaches dead.
///
/// With `state_count == 2` there are no dying states and the rule
/// degenerates to plain two-state life. Only alive cells count toward
/// neighbour totals (`is_neighbour` is the singleton predicate the
/// kernel's dirty-mask optimisation requires); every constructor verifies
/// that contract before returning.
///
/// # Examples
///
/// ```
/// use voxca_core::Rule;
/// use voxca_rules::AgingRule;
///
/// let rule: AgingRule = "4/4/5/M".parse().unwrap();
/// assert_eq!(rule.alive_state(), 4);
/// assert_eq!(rule.next_state(4, 4), 4); // remains alive
/// assert_eq!(rule.next_state(4, 5), 3); // starts dying
/// assert_eq!(rule.next_state(3, 4), 2); // keeps dying, neighbours ignored
/// assert_eq!(rule.next_state(0, 4), 4); // born
/// assert_eq!(rule.to_string(), "4/4/5/M");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgingRule {
    remain: NeighbourSet,
    r#become: NeighbourSet,
    state_count: u16,
    neighbourhood: Neighbourhood,
}

impl AgingRule {
    /// Build a rule from already-parsed components.
    ///
    /// `state_count` must be in `[2, 256]`. The assembled rule is run
    /// through [`verify_alive_contract`] before being returned, so a
    /// value of this type always satisfies the kernel's precondition.
    pub fn new(
        remain: NeighbourSet,
        r#become: NeighbourSet,
        state_count: u16,
        neighbourhood: Neighbourhood,
    ) -> Result<Self, RuleParseError> {
        if !(2..=256).contains(&state_count) {
            return Err(RuleParseError::StateCountOutOfRange {
                found: u32::from(state_count),
            });
        }
        let rule = Self {
            remain,
            r#become,
            state_count,
            neighbourhood,
        };
        verify_alive_contract(&rule, state_count)?;
        Ok(rule)
    }

    /// Parse a `remain/become/states/neighbourhood` rule string.
    ///
    /// For example `4/4/5/M`: remain alive on 4 neighbours, become alive
    /// on 4, five total states (alive 4, dying 3..1, dead 0), Moore
    /// neighbourhood. Segments one and two take comma-separated counts
    /// and inclusive ranges (`0-3,9`); an empty segment matches nothing.
    pub fn parse(s: &str) -> Result<Self, RuleParseError> {
        let segments: Vec<&str> = s.trim().split('/').collect();
        let &[remain, r#become, states, neighbourhood] = segments.as_slice() else {
            return Err(RuleParseError::SegmentCount {
                found: segments.len(),
            });
        };
        let remain = NeighbourSet::parse(remain, "remain")?;
        let r#become = NeighbourSet::parse(r#become, "become")?;
        let state_count: u32 = states
            .parse()
            .map_err(|_| RuleParseError::InvalidStateCount {
                token: states.to_string(),
            })?;
        if !(2..=256).contains(&state_count) {
            return Err(RuleParseError::StateCountOutOfRange { found: state_count });
        }
        let neighbourhood = Neighbourhood::parse(neighbourhood)?;
        Self::new(remain, r#become, state_count as u16, neighbourhood)
    }

    /// Neighbour counts that keep an alive cell alive.
    pub fn remain(&self) -> NeighbourSet {
        self.remain
    }

    /// Neighbour counts that make a dead cell alive.
    pub fn r#become(&self) -> NeighbourSet {
        self.r#become
    }

    /// Total number of states, including dead and alive.
    pub fn state_count(&self) -> u16 {
        self.state_count
    }

    /// The declared neighbourhood kind.
    ///
    /// Informational: the kernel always traverses the full Moore block,
    /// so this affects display and re-serialisation only.
    pub fn neighbourhood(&self) -> Neighbourhood {
        self.neighbourhood
    }
}

impl Rule for AgingRule {
    fn alive_state(&self) -> u8 {
        (self.state_count - 1) as u8
    }

    fn is_neighbour(&self, state: u8) -> bool {
        state == self.alive_state()
    }

    fn next_state(&self, state: u8, neighbours: u8) -> u8 {
        let alive = self.alive_state();
        if state == alive {
            if self.remain.contains(neighbours) {
                alive
            } else {
                state - 1
            }
        } else if state == 0 {
            if self.r#become.contains(neighbours) {
                alive
            } else {
                0
            }
        } else {
            state - 1
        }
    }
}

/// Canonical rule string; parses back to an equal rule.
impl fmt::Display for AgingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.remain, self.r#become, self.state_count, self.neighbourhood
        )
    }
}

impl FromStr for AgingRule {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
