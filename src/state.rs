use crate::fingerprint;
use crate::graph::WalkGraph;

/// Immutable snapshot of a configuration. Stays valid however the live
/// state mutates afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    pub player: u16,
    pub boxes: Vec<u16>,
    pub move_depth: i32,
    pub fingerprint: u64,
}

impl State {
    /// `boxes` must already be in ascending order - snapshots are only
    /// taken from canonical configurations.
    pub fn new(player: u16, boxes: Vec<u16>, move_depth: i32) -> State {
        debug_assert!(boxes.windows(2).all(|w| w[0] < w[1]));
        let fingerprint = fingerprint::compute(player, &boxes);
        State {
            player,
            boxes,
            move_depth,
            fingerprint,
        }
    }
}

/// Live game configuration: player cell, box cells in ascending order and
/// the reverse cell-to-box lookup, plus the scratch buffers reused by the
/// pull search.
///
/// The scratch buffers alias across searches on the same instance, so one
/// instance must never be shared between concurrent search branches -
/// `clone()` one per branch instead. Clones deep-copy all mutable arrays
/// and share only the graph.
#[derive(Debug, Clone)]
pub struct BoardState<'g> {
    pub graph: &'g WalkGraph,
    pub(crate) player: u16,
    pub(crate) box_count: u16,
    /// Strictly ascending at all times.
    pub(crate) boxes: Vec<u16>,
    /// Exact inverse of `boxes`; `box_count` marks an empty cell.
    pub(crate) cell_to_box: Vec<u16>,
    pub(crate) move_depth: i32,
    /// One flag per cell plus a trailing always-true slot for the
    /// sentinel, so off-graph neighbors need no special casing.
    pub(crate) visited: Vec<bool>,
    pub(crate) frontier_cells: Vec<u16>,
    pub(crate) frontier_depths: Vec<i32>,
}

impl<'g> BoardState<'g> {
    pub fn new(graph: &'g WalkGraph, player: u16, boxes: &[u16]) -> BoardState<'g> {
        let size = usize::from(graph.cell_count());
        let box_count = boxes.len() as u16;

        let mut visited = vec![false; size + 1];
        visited[size] = true;

        let mut state = BoardState {
            graph,
            player,
            box_count,
            boxes: vec![0; boxes.len()],
            cell_to_box: vec![box_count; size],
            move_depth: 0,
            visited,
            frontier_cells: vec![0; size],
            frontier_depths: vec![0; size],
        };
        state.place_boxes(boxes);
        debug_assert!(!state.occupied(player));
        state
    }

    pub fn player(&self) -> u16 {
        self.player
    }

    pub fn boxes(&self) -> &[u16] {
        &self.boxes
    }

    pub fn box_count(&self) -> u16 {
        self.box_count
    }

    pub fn move_depth(&self) -> i32 {
        self.move_depth
    }

    pub fn set_move_depth(&mut self, depth: i32) {
        self.move_depth = depth;
    }

    pub fn set_player(&mut self, cell: u16) {
        debug_assert!(!self.occupied(cell));
        self.player = cell;
    }

    pub fn occupied(&self, cell: u16) -> bool {
        self.cell_to_box[usize::from(cell)] < self.box_count
    }

    /// Replaces the whole box layout. `cells` must already be ascending -
    /// this only seeds known-canonical placements, it never sorts.
    pub fn place_boxes(&mut self, cells: &[u16]) {
        assert_eq!(cells.len(), usize::from(self.box_count));
        assert!(
            cells.windows(2).all(|w| w[0] < w[1]),
            "box cells not in ascending order"
        );

        for &cell in &self.boxes {
            self.cell_to_box[usize::from(cell)] = self.box_count;
        }
        for (i, &cell) in cells.iter().enumerate() {
            self.boxes[i] = cell;
            self.cell_to_box[usize::from(cell)] = i as u16;
        }
    }

    /// Restores a previously captured configuration.
    pub fn set_state(&mut self, state: &State) {
        self.place_boxes(&state.boxes);
        self.player = state.player;
        self.move_depth = state.move_depth;
        debug_assert!(!self.occupied(self.player));
    }

    /// Captures the current configuration as an independent value.
    pub fn snapshot(&self) -> State {
        State::new(self.player, self.boxes.clone(), self.move_depth)
    }

    /// Moves the box on `from` one graph step to `to`. Horizontal steps
    /// keep `boxes` ascending because index order follows left/right
    /// adjacency; a vertical step can break the order against at most one
    /// neighboring entry, which a single bubble pass repairs. Stepping
    /// the box back bubbles in the inverse direction and restores the
    /// exact prior order.
    pub fn relocate_box(&mut self, from: u16, to: u16) {
        debug_assert!(self.occupied(from));
        debug_assert!(!self.occupied(to));

        let b = usize::from(self.cell_to_box[usize::from(from)]);
        self.cell_to_box[usize::from(from)] = self.box_count;
        self.cell_to_box[usize::from(to)] = b as u16;
        self.boxes[b] = to;
        if to < from {
            self.bubble_up(b);
        } else {
            self.bubble_down(b);
        }
    }

    fn bubble_up(&mut self, mut b: usize) {
        while b > 0 && self.boxes[b - 1] > self.boxes[b] {
            self.boxes.swap(b - 1, b);
            self.cell_to_box[usize::from(self.boxes[b])] = b as u16;
            self.cell_to_box[usize::from(self.boxes[b - 1])] = (b - 1) as u16;
            b -= 1;
        }
    }

    fn bubble_down(&mut self, mut b: usize) {
        let last = self.boxes.len() - 1;
        while b < last && self.boxes[b] > self.boxes[b + 1] {
            self.boxes.swap(b, b + 1);
            self.cell_to_box[usize::from(self.boxes[b])] = b as u16;
            self.cell_to_box[usize::from(self.boxes[b + 1])] = (b + 1) as u16;
            b += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::level::Level;

    use super::*;

    // boxes sit on walk cells 3, 4 and 6; walk cells 0..=8 cover the
    // interior in row-major order
    fn level() -> Level {
        let level = r"
#####
#@ .#
#$$.#
#$ .#
#####
";
        level.parse().unwrap()
    }

    fn assert_consistent(state: &BoardState<'_>) {
        assert!(state.boxes.windows(2).all(|w| w[0] < w[1]));
        for (i, &cell) in state.boxes.iter().enumerate() {
            assert_eq!(state.cell_to_box[usize::from(cell)], i as u16);
        }
        for cell in 0..state.graph.cell_count() {
            if !state.boxes.contains(&cell) {
                assert_eq!(state.cell_to_box[usize::from(cell)], state.box_count);
            }
        }
    }

    #[test]
    fn construction_is_canonical() {
        let level = level();
        let state = level.state();

        assert_eq!(state.boxes(), &[3, 4, 6]);
        assert_eq!(state.player(), 0);
        assert!(state.occupied(4));
        assert!(!state.occupied(1));
        assert_consistent(&state);
    }

    #[test]
    fn vertical_step_bubbles_once_and_back() {
        let level = level();
        let mut state = level.state();

        // middle box steps down past the third box's rank
        state.relocate_box(4, 7);
        assert_eq!(state.boxes(), &[3, 6, 7]);
        assert_consistent(&state);

        // stepping back up restores the original order
        state.relocate_box(7, 4);
        assert_eq!(state.boxes(), &[3, 4, 6]);
        assert_consistent(&state);
    }

    #[test]
    fn horizontal_step_keeps_order() {
        let level = level();
        let mut state = level.state();

        state.relocate_box(4, 5);
        assert_eq!(state.boxes(), &[3, 5, 6]);
        assert_consistent(&state);

        state.relocate_box(5, 4);
        assert_eq!(state.boxes(), &[3, 4, 6]);
        assert_consistent(&state);
    }

    #[test]
    fn clones_are_independent() {
        let level = level();
        let mut state = level.state();
        let clone = state.clone();

        let before = state.snapshot();
        assert_eq!(before, clone.snapshot());
        assert_eq!(before.fingerprint, clone.snapshot().fingerprint);

        state.relocate_box(4, 7);
        assert_ne!(state.snapshot(), clone.snapshot());
        assert_eq!(clone.snapshot(), before);
    }

    #[test]
    fn snapshots_survive_mutation() {
        let level = level();
        let mut state = level.state();

        let before = state.snapshot();
        state.relocate_box(4, 7);
        state.set_player(1);
        state.set_move_depth(7);
        assert_eq!(before.boxes, vec![3, 4, 6]);
        assert_eq!(before.player, 0);
        assert_eq!(before.move_depth, 0);

        state.set_state(&before);
        assert_eq!(state.snapshot(), before);
        assert_consistent(&state);
    }

    #[test]
    #[should_panic(expected = "ascending")]
    fn unsorted_placement_aborts() {
        let level = level();
        let mut state = level.state();
        state.place_boxes(&[4, 3, 6]);
    }
}
