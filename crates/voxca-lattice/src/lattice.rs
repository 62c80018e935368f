//! The lattice: cell storage, double buffer, dirty mask, observers.

use indexmap::IndexMap;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::mem;

use voxca_core::{ListenerId, Rule};

use crate::error::LatticeError;

/// Observer callback invoked after every mutation of a lattice.
///
/// Receives a shared reference to the lattice it was registered on.
/// Because notification happens while the kernel holds the lattice
/// mutably, a listener can only observe, never mutate; re-entrant
/// registration or stepping is unrepresentable.
pub type StepListener = Box<dyn FnMut(&Lattice)>;

/// A fixed-size three-dimensional cellular-automaton lattice with
/// toroidal topology.
///
/// Cells are `u8` states stored flat in x-fastest order:
/// `index = x + y * width + z * width * height`. Coordinates wrap on
/// every axis, so every cell has exactly 26 Moore neighbours regardless
/// of position.
///
/// # Stepping
///
/// [`step`](Lattice::step) advances one generation under a caller-supplied
/// [`Rule`]. Before counting, a dirty pass marks the 26 neighbours of
/// every cell currently in the rule's alive state; cells left unmarked
/// reuse a neighbour count of exactly 0 without being counted at all.
/// That shortcut is sound only under the rule contract that
/// `is_neighbour` holds exactly for the alive state — see
/// [`voxca_core::verify_alive_contract`]. The benefit is proportional to
/// the sparsity of alive cells; a fully alive lattice degenerates to the
/// cost of a plain full pass.
///
/// The new generation is written to a staging buffer and the two buffer
/// roles are exchanged with an O(1) swap; no step allocates.
///
/// # Observers
///
/// Listeners registered via [`listen`](Lattice::listen) are invoked
/// synchronously, once each, after every [`step`](Lattice::step),
/// [`clear`](Lattice::clear) and [`randomise`](Lattice::randomise).
/// Registration and removal happen between steps only (both need
/// `&mut self`). No ordering is guaranteed between listeners.
pub struct Lattice {
    width: u32,
    height: u32,
    depth: u32,
    cell_count: usize,
    /// Current generation, read during a step.
    cells: Vec<u8>,
    /// Write buffer for the generation being computed.
    staging: Vec<u8>,
    /// Per-step recompute mask; all-false outside `step()`.
    dirty: Vec<bool>,
    listeners: IndexMap<ListenerId, StepListener>,
}

impl Lattice {
    /// Maximum extent per axis: coordinates use `i32`.
    pub const MAX_EXTENT: u32 = i32::MAX as u32;

    /// Create a lattice of `width * height * depth` cells, all dead.
    ///
    /// Dimensions are fixed for the lattice's lifetime; changing
    /// simulation size means constructing a new lattice. Returns
    /// `Err(LatticeError)` for a zero extent, an extent above
    /// [`MAX_EXTENT`](Self::MAX_EXTENT), or a total cell count that
    /// overflows `usize`. Never partially constructs.
    pub fn new(width: u32, height: u32, depth: u32) -> Result<Self, LatticeError> {
        for (axis, extent) in [("width", width), ("height", height), ("depth", depth)] {
            if extent == 0 {
                return Err(LatticeError::ZeroExtent { axis });
            }
            if extent > Self::MAX_EXTENT {
                return Err(LatticeError::ExtentTooLarge {
                    axis,
                    extent,
                    max: Self::MAX_EXTENT,
                });
            }
        }
        let cell_count = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(depth as usize))
            .ok_or(LatticeError::CellCountOverflow {
                width,
                height,
                depth,
            })?;
        Ok(Self {
            width,
            height,
            depth,
            cell_count,
            cells: vec![0; cell_count],
            staging: vec![0; cell_count],
            dirty: vec![false; cell_count],
            listeners: IndexMap::new(),
        })
    }

    /// Width (x extent).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height (y extent).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Depth (z extent).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Total number of cells, `width * height * depth`.
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// The current generation as a flat slice in x-fastest order.
    ///
    /// This is the renderer-facing view of the lattice.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Flat index for a coordinate, wrapping toroidally on every axis.
    ///
    /// Accepts any `i32` coordinates, including negative ones:
    /// `wrap(c, extent) = ((c mod extent) + extent) mod extent` is a true
    /// modulo, so `(-1, 0, 0)` addresses the cell at `(width - 1, 0, 0)`.
    pub fn index(&self, x: i32, y: i32, z: i32) -> usize {
        let x = wrap(x, self.width);
        let y = wrap(y, self.height);
        let z = wrap(z, self.depth);
        x + y * self.width as usize + z * self.width as usize * self.height as usize
    }

    /// State of the cell at a (wrapped) coordinate.
    pub fn get(&self, x: i32, y: i32, z: i32) -> u8 {
        self.cells[self.index(x, y, z)]
    }

    /// Set the cell at a (wrapped) coordinate in the current generation.
    ///
    /// Intended for seeding and editing between steps; does not notify
    /// listeners.
    pub fn set(&mut self, x: i32, y: i32, z: i32, state: u8) {
        let i = self.index(x, y, z);
        self.cells[i] = state;
    }

    /// Number of cells currently in `state`.
    ///
    /// Allocation-free scan; drives statistics observers.
    pub fn count_state(&self, state: u8) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// Advance the lattice by exactly one generation under `rule`.
    ///
    /// On return the current buffer holds the new generation, the old
    /// generation has become the staging buffer for the following step,
    /// the dirty mask is fully cleared, and every listener has been
    /// invoked exactly once. The rule is not retained.
    pub fn step(&mut self, rule: &dyn Rule) {
        // The dirty pass must complete before any count is read; it is
        // not interleavable with the transition loop below.
        self.refresh_dirty(rule.alive_state());

        let mut i = 0;
        for z in 0..self.depth as i32 {
            for y in 0..self.height as i32 {
                for x in 0..self.width as i32 {
                    let neighbours = if self.dirty[i] {
                        self.count_neighbours(x, y, z, rule)
                    } else {
                        0
                    };
                    self.staging[i] = rule.next_state(self.cells[i], neighbours);
                    self.dirty[i] = false;
                    i += 1;
                }
            }
        }

        mem::swap(&mut self.cells, &mut self.staging);
        self.notify();
    }

    /// Reset every cell in both buffers to state 0.
    ///
    /// Clears the dirty mask, keeps dimensions and listeners, performs
    /// no reallocation, and notifies listeners once. Idempotent.
    pub fn clear(&mut self) {
        self.cells.fill(0);
        self.staging.fill(0);
        self.dirty.fill(false);
        self.notify();
    }

    /// Fill the current generation with a random soup.
    ///
    /// Each cell independently becomes `alive_state` with probability
    /// `density` (values outside `[0, 1]` behave as the nearest bound),
    /// otherwise 0. The fill is drawn from a ChaCha8 stream seeded with
    /// `seed`, so identical arguments reproduce identical soups across
    /// runs and platforms. Resets the staging buffer and dirty mask,
    /// then notifies listeners once.
    pub fn randomise(&mut self, alive_state: u8, density: f64, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for cell in &mut self.cells {
            *cell = if rng.random::<f64>() < density {
                alive_state
            } else {
                0
            };
        }
        self.staging.fill(0);
        self.dirty.fill(false);
        self.notify();
    }

    /// Register a listener; returns the handle for [`unlisten`](Self::unlisten).
    pub fn listen(&mut self, listener: impl FnMut(&Lattice) + 'static) -> ListenerId {
        let id = ListenerId::next();
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Remove a listener by handle.
    ///
    /// Returns `true` if the handle was registered on this lattice.
    /// Other listeners are unaffected.
    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        self.listeners.swap_remove(&id).is_some()
    }

    /// Mark the 26 neighbours of every alive cell as needing a fresh
    /// neighbour count.
    ///
    /// The centre cell is not marked by its own aliveness; if it needs a
    /// recount, an alive neighbour marks it (in an extent of 1 or 2 a
    /// cell can be its own wraparound neighbour, which is accepted).
    /// Worst case (all cells alive) is O(26 * cell_count), the same
    /// order as a full counting pass.
    fn refresh_dirty(&mut self, alive_state: u8) {
        let mut i = 0;
        for z in 0..self.depth as i32 {
            for y in 0..self.height as i32 {
                for x in 0..self.width as i32 {
                    if self.cells[i] == alive_state {
                        self.mark_neighbours(x, y, z);
                    }
                    i += 1;
                }
            }
        }
    }

    fn mark_neighbours(&mut self, x: i32, y: i32, z: i32) {
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    let i = self.index(x + dx, y + dy, z + dz);
                    self.dirty[i] = true;
                }
            }
        }
    }

    /// Count the countable neighbours of one cell over the full Moore
    /// block.
    ///
    /// All 26 offsets are visited unconditionally; a rule wanting a
    /// narrower neighbourhood can only suppress counting through
    /// `is_neighbour`, not traversal.
    fn count_neighbours(&self, x: i32, y: i32, z: i32, rule: &dyn Rule) -> u8 {
        let mut total = 0;
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    let state = self.cells[self.index(x + dx, y + dy, z + dz)];
                    if rule.is_neighbour(state) {
                        total += 1;
                    }
                }
            }
        }
        total
    }

    /// Invoke every listener with a shared reference to this lattice.
    ///
    /// The registry is taken out of `self` for the duration of the pass,
    /// so each callback sees the lattice immutably and completely.
    fn notify(&mut self) {
        let mut listeners = mem::take(&mut self.listeners);
        for listener in listeners.values_mut() {
            listener(self);
        }
        self.listeners = listeners;
    }
}

/// True modulo: wraps any `i32` into `[0, extent)`.
fn wrap(v: i32, extent: u32) -> usize {
    let m = i64::from(extent);
    ((i64::from(v) % m + m) % m) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Two-state rule: born with exactly `birth` neighbours, survives
    /// with any.
    struct Sticky {
        birth: u8,
    }

    impl Rule for Sticky {
        fn alive_state(&self) -> u8 {
            1
        }

        fn is_neighbour(&self, state: u8) -> bool {
            state == 1
        }

        fn next_state(&self, state: u8, neighbours: u8) -> u8 {
            if state == 1 || neighbours == self.birth {
                1
            } else {
                0
            }
        }
    }

    /// Rule that never changes anything.
    struct Identity;

    impl Rule for Identity {
        fn alive_state(&self) -> u8 {
            1
        }

        fn is_neighbour(&self, state: u8) -> bool {
            state == 1
        }

        fn next_state(&self, state: u8, _neighbours: u8) -> u8 {
            state
        }
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn new_rejects_zero_extents() {
        assert!(matches!(
            Lattice::new(0, 4, 4),
            Err(LatticeError::ZeroExtent { axis: "width" })
        ));
        assert!(matches!(
            Lattice::new(4, 0, 4),
            Err(LatticeError::ZeroExtent { axis: "height" })
        ));
        assert!(matches!(
            Lattice::new(4, 4, 0),
            Err(LatticeError::ZeroExtent { axis: "depth" })
        ));
    }

    #[test]
    fn new_rejects_oversized_extents() {
        let too_big = Lattice::MAX_EXTENT + 1;
        assert!(matches!(
            Lattice::new(too_big, 1, 1),
            Err(LatticeError::ExtentTooLarge { axis: "width", .. })
        ));
    }

    #[test]
    fn buffers_match_cell_count() {
        let lattice = Lattice::new(3, 4, 5).unwrap();
        assert_eq!(lattice.cell_count(), 60);
        assert_eq!(lattice.cells().len(), 60);
    }

    // ── Indexing ────────────────────────────────────────────────

    #[test]
    fn index_is_x_fastest() {
        let lattice = Lattice::new(4, 3, 2).unwrap();
        assert_eq!(lattice.index(0, 0, 0), 0);
        assert_eq!(lattice.index(1, 0, 0), 1);
        assert_eq!(lattice.index(0, 1, 0), 4);
        assert_eq!(lattice.index(0, 0, 1), 12);
        assert_eq!(lattice.index(3, 2, 1), 23);
    }

    #[test]
    fn index_wraps_negative_coordinates() {
        let lattice = Lattice::new(4, 3, 2).unwrap();
        assert_eq!(lattice.index(-1, 0, 0), lattice.index(3, 0, 0));
        assert_eq!(lattice.index(0, -1, 0), lattice.index(0, 2, 0));
        assert_eq!(lattice.index(0, 0, -1), lattice.index(0, 0, 1));
        assert_eq!(lattice.index(4, 3, 2), lattice.index(0, 0, 0));
        assert_eq!(lattice.index(-5, -4, -3), lattice.index(3, 2, 1));
    }

    #[test]
    fn get_set_round_trip_through_wrapping() {
        let mut lattice = Lattice::new(3, 3, 3).unwrap();
        lattice.set(-1, -1, -1, 7);
        assert_eq!(lattice.get(2, 2, 2), 7);
    }

    // ── Clear ───────────────────────────────────────────────────

    #[test]
    fn clear_zeroes_everything_and_is_idempotent() {
        let mut lattice = Lattice::new(3, 3, 3).unwrap();
        lattice.set(1, 1, 1, 1);
        lattice.step(&Sticky { birth: 2 });
        lattice.clear();
        let first: Vec<u8> = lattice.cells().to_vec();
        lattice.clear();
        assert_eq!(lattice.cells(), first.as_slice());
        assert!(lattice.cells().iter().all(|&s| s == 0));
        // A step after clear on an empty lattice stays empty.
        lattice.step(&Sticky { birth: 2 });
        assert_eq!(lattice.count_state(1), 0);
    }

    // ── Stepping ────────────────────────────────────────────────

    #[test]
    fn identity_rule_is_stable() {
        let mut lattice = Lattice::new(4, 4, 4).unwrap();
        lattice.randomise(1, 0.4, 9);
        let before: Vec<u8> = lattice.cells().to_vec();
        for _ in 0..5 {
            lattice.step(&Identity);
        }
        assert_eq!(lattice.cells(), before.as_slice());
    }

    #[test]
    fn lone_cell_births_all_26_neighbours() {
        // Every cell adjacent to (1,1,1) has exactly one alive
        // neighbour; with birth = 1 the whole Moore shell fills in.
        let mut lattice = Lattice::new(5, 5, 5).unwrap();
        lattice.set(1, 1, 1, 1);
        lattice.step(&Sticky { birth: 1 });
        assert_eq!(lattice.count_state(1), 27);
        assert_eq!(lattice.get(0, 0, 0), 1);
        assert_eq!(lattice.get(2, 2, 2), 1);
        assert_eq!(lattice.get(3, 1, 1), 0);
    }

    #[test]
    fn wraparound_reaches_the_opposite_corner() {
        // On a 3x3x3 torus, (2,2,2) is a diagonal wraparound neighbour
        // of (0,0,0), just as (1,0,0) is a direct one.
        let mut lattice = Lattice::new(3, 3, 3).unwrap();
        lattice.set(0, 0, 0, 1);
        lattice.step(&Sticky { birth: 1 });
        assert_eq!(lattice.get(2, 2, 2), 1);
        assert_eq!(lattice.get(1, 0, 0), 1);
    }

    // ── Observers ───────────────────────────────────────────────

    #[test]
    fn listeners_fire_once_per_mutation() {
        let mut lattice = Lattice::new(2, 2, 2).unwrap();
        let hits = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&hits);
        lattice.listen(move |l| {
            assert_eq!(l.cell_count(), 8);
            seen.set(seen.get() + 1);
        });
        lattice.step(&Identity);
        lattice.clear();
        lattice.randomise(1, 0.5, 3);
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn unlisten_removes_only_its_target() {
        let mut lattice = Lattice::new(2, 2, 2).unwrap();
        let a_hits = Rc::new(Cell::new(0u32));
        let b_hits = Rc::new(Cell::new(0u32));
        let a_seen = Rc::clone(&a_hits);
        let b_seen = Rc::clone(&b_hits);
        let a = lattice.listen(move |_| a_seen.set(a_seen.get() + 1));
        let b = lattice.listen(move |_| b_seen.set(b_seen.get() + 1));
        assert!(lattice.unlisten(a));
        assert!(!lattice.unlisten(a));
        lattice.clear();
        assert_eq!(a_hits.get(), 0);
        assert_eq!(b_hits.get(), 1);
        assert!(lattice.unlisten(b));
    }

    // ── Randomise / census ──────────────────────────────────────

    #[test]
    fn randomise_is_deterministic_per_seed() {
        let mut a = Lattice::new(6, 6, 6).unwrap();
        let mut b = Lattice::new(6, 6, 6).unwrap();
        a.randomise(3, 0.3, 1234);
        b.randomise(3, 0.3, 1234);
        assert_eq!(a.cells(), b.cells());
        b.randomise(3, 0.3, 1235);
        assert_ne!(a.cells(), b.cells());
    }

    #[test]
    fn randomise_density_bounds() {
        let mut lattice = Lattice::new(4, 4, 4).unwrap();
        lattice.randomise(1, 0.0, 7);
        assert_eq!(lattice.count_state(1), 0);
        lattice.randomise(1, 1.0, 7);
        assert_eq!(lattice.count_state(1), 64);
        assert_eq!(lattice.count_state(0), 0);
    }

    // ── Properties ──────────────────────────────────────────────

    proptest! {
        #[test]
        fn wrap_lands_in_range(v in i32::MIN..=i32::MAX, extent in 1u32..100) {
            let w = wrap(v, extent);
            prop_assert!(w < extent as usize);
        }

        #[test]
        fn wrap_is_identity_in_range(extent in 1u32..100, v in 0i32..99) {
            prop_assume!((v as u32) < extent);
            prop_assert_eq!(wrap(v, extent), v as usize);
        }

        #[test]
        fn buffers_keep_their_length(
            w in 1u32..6, h in 1u32..6, d in 1u32..6,
            steps in 0usize..8, seed in 0u64..1000,
        ) {
            let mut lattice = Lattice::new(w, h, d).unwrap();
            lattice.randomise(1, 0.4, seed);
            for _ in 0..steps {
                lattice.step(&Sticky { birth: 2 });
            }
            prop_assert_eq!(lattice.cells().len(), lattice.cell_count());
            lattice.clear();
            prop_assert_eq!(lattice.cells().len(), lattice.cell_count());
        }
    }
}
