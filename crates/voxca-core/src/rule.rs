//! The rule capability contract and its construction-time checker.

use crate::error::ContractError;

/// A cellular-automaton transition rule.
///
/// A rule is a stateless bundle of per-cell semantics: which single state
/// value means "fully alive", which states count toward a neighbour's
/// count, and how `(current state, neighbour count)` maps to the next
/// state. The kernel dispatches through `&dyn Rule` so any rule family
/// (life-like, multi-state aging, custom) can be substituted without the
/// kernel depending on a concrete type, and rules can be swapped freely
/// between steps.
///
/// # The alive/neighbour coupling
///
/// The kernel's incremental optimisation only re-marks the neighbours of
/// cells whose state equals [`alive_state`](Rule::alive_state). For every
/// other cell it reuses a neighbour count of exactly 0 without calling
/// [`is_neighbour`](Rule::is_neighbour) at all. That shortcut is correct
/// if and only if:
///
/// > `is_neighbour(s)` returns `true` for exactly the singleton
/// > `{alive_state()}`.
///
/// A rule that counts additional states (say, dying aging states) silently
/// produces stale neighbour counts for cells the dirty pass failed to
/// mark. This is a load-bearing precondition, not a performance hint.
/// Rule constructors should run [`verify_alive_contract`] once over every
/// state value before releasing a rule; the kernel itself never checks it.
pub trait Rule {
    /// The one state value representing "fully alive".
    ///
    /// Cells in this state trigger dirty-marking of their neighbours.
    fn alive_state(&self) -> u8;

    /// Whether a cell in `state` counts toward a neighbour's count.
    ///
    /// Must hold exactly for [`alive_state`](Rule::alive_state); see the
    /// trait-level contract.
    fn is_neighbour(&self, state: u8) -> bool;

    /// The transition function: next state for a cell currently in
    /// `state` with `neighbours` countable neighbours.
    ///
    /// `neighbours` is in `[0, 26]` for any lattice extent above 2; in
    /// degenerate extents (1 or 2 along an axis) wraparound aliases
    /// offsets onto the same cell and counts it once per offset, so the
    /// value never exceeds 26 regardless.
    ///
    /// Returned values must stay within the rule's own state range. The
    /// kernel does not validate them; an out-of-range return propagates
    /// as silently-incorrect simulation state.
    fn next_state(&self, state: u8, neighbours: u8) -> u8;
}

/// Check the alive/neighbour coupling for a rule, once, at construction.
///
/// Probes [`Rule::is_neighbour`] against every state value in
/// `[0, state_count)` and confirms it holds exactly for
/// [`Rule::alive_state`]. Runs in O(`state_count`), so rule constructors
/// can afford it unconditionally; the per-step hot loop never re-checks.
///
/// Returns `Err` if `state_count` is 0 or exceeds 256, if the reported
/// alive state lies outside `[0, state_count)`, or if the predicate
/// disagrees with the singleton contract for any state.
pub fn verify_alive_contract(rule: &dyn Rule, state_count: u16) -> Result<(), ContractError> {
    if state_count == 0 || state_count > 256 {
        return Err(ContractError::StateCountOutOfRange { state_count });
    }
    let alive = rule.alive_state();
    if u16::from(alive) >= state_count {
        return Err(ContractError::AliveStateOutOfRange { alive, state_count });
    }
    for state in 0..state_count {
        let state = state as u8;
        let counted = rule.is_neighbour(state);
        if counted != (state == alive) {
            return Err(ContractError::NeighbourMismatch { state, counted });
        }
    }
    Ok(())
}
