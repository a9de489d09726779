use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use log::debug;
use separator::Separatable;

use crate::data::DIRECTIONS;
use crate::level::Level;
use crate::state::{BoardState, State};
use crate::Search;

/// Default seed depth for goal-state search. It counts down as the
/// search walks backward and only ranks configurations relative to each
/// other, so any value far above realistic forward depths works.
pub const INITIAL_PULL_DEPTH: i32 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErr {
    /// Fewer boxes than goals - choosing which goals stay occupied would
    /// take a permutation search that doesn't exist yet.
    GoalPermutations { boxes: usize, goals: usize },
}

impl Display for SearchErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SearchErr::GoalPermutations { boxes, goals } => write!(
                f,
                "{} boxes for {} goals - goal permutation search is not supported",
                boxes, goals
            ),
        }
    }
}

impl Error for SearchErr {}

pub struct SearchOk {
    pub states: Vec<State>,
    pub stats: Stats,
}

impl Debug for SearchOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "boundary states: {}", self.states.len())?;
        write!(f, "{}", self.stats)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub hypotheses_tested: i32,
    pub admissible_pulls: i32,
    pub boundary_states: i32,
    pub predecessor_states: i32,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Pull hypotheses tested: {}",
            self.hypotheses_tested.separated_string()
        )?;
        writeln!(
            f,
            "Admissible pulls: {}",
            self.admissible_pulls.separated_string()
        )?;
        writeln!(
            f,
            "Boundary states found: {}",
            self.boundary_states.separated_string()
        )?;
        writeln!(
            f,
            "Predecessor states emitted: {}",
            self.predecessor_states.separated_string()
        )
    }
}

impl<'g> BoardState<'g> {
    /// Collects every configuration reachable one pull earlier than this
    /// one: walks the box-free region around the player breadth-first
    /// and reports each spot where a neighboring box could have been
    /// dragged away from.
    ///
    /// Each reported snapshot keeps the boxes as they currently stand,
    /// places the player on the cell the pull would start from and
    /// carries a depth decremented once per breadth level below the
    /// seeded `move_depth`. Box layout, player and depth of the live
    /// state are left untouched; results are appended to `out`.
    pub fn pull_variants(&mut self, out: &mut Vec<State>) {
        let size = usize::from(self.graph.cell_count());
        for flag in &mut self.visited[..size] {
            *flag = false;
        }
        // the trailing sentinel slot stays true, off-graph neighbors get
        // skipped like any visited cell

        let mut head = 0;
        let mut tail = 0;
        self.visited[usize::from(self.player)] = true;
        self.frontier_cells[tail] = self.player;
        self.frontier_depths[tail] = self.move_depth;
        tail += 1;

        while head < tail {
            let cell = self.frontier_cells[head];
            let depth = self.frontier_depths[head] - 1;
            head += 1;

            for &dir in &DIRECTIONS {
                let next = self.graph.neighbor(cell, dir);
                if self.visited[usize::from(next)] {
                    continue;
                }
                if self.occupied(next) {
                    // pulling this box into `cell` needs a free cell on
                    // the far side for the player to step back into
                    let back = self.graph.neighbor(cell, dir.opposite());
                    if back != self.graph.sentinel() && !self.occupied(back) {
                        out.push(State::new(cell, self.boxes.clone(), depth));
                    }
                } else {
                    self.visited[usize::from(next)] = true;
                    self.frontier_cells[tail] = next;
                    self.frontier_depths[tail] = depth;
                    tail += 1;
                }
            }
        }
    }
}

impl Search for Level {
    fn goal_states(&self, initial_depth: i32) -> Result<SearchOk, SearchErr> {
        goal_states(self, initial_depth)
    }
}

/// Seeds all boxes onto the goal cells and enumerates the configurations
/// sitting one pull away from that solved placement.
///
/// For every box and direction the last push is hypothesized: the box is
/// stepped back to the cell it would have come from and the player put on
/// the opposite side, then the pull search checks the hypothesis can be
/// continued backward. Each mutation is undone before the next hypothesis
/// on every path.
fn goal_states(level: &Level, initial_depth: i32) -> Result<SearchOk, SearchErr> {
    let mut board = level.state();
    let goals = level.goals();
    if board.boxes().len() < goals.len() {
        return Err(SearchErr::GoalPermutations {
            boxes: board.boxes().len(),
            goals: goals.len(),
        });
    }

    let mut seeded = goals.to_vec();
    seeded.sort_unstable();
    board.place_boxes(&seeded);
    debug!("seeded {} boxes onto the goal cells", seeded.len());

    let mut stats = Stats::new();
    let mut states = Vec::new();
    let mut buf: Vec<State> = Vec::with_capacity(seeded.len() * 4);
    let sentinel = board.graph.sentinel();

    for &cell in &seeded {
        for &dir in &DIRECTIONS {
            stats.hypotheses_tested += 1;

            // the cell the box would have been pushed over and the cell
            // the player pulling it back ends up on
            let src = board.graph.neighbor(cell, dir);
            let dst = board.graph.neighbor(cell, dir.opposite());
            if src == sentinel || board.occupied(src) {
                continue;
            }
            if dst == sentinel || board.occupied(dst) {
                continue;
            }
            stats.admissible_pulls += 1;

            let prev_player = board.player();
            board.relocate_box(cell, src);
            board.set_player(dst);
            board.set_move_depth(initial_depth);

            buf.clear();
            board.pull_variants(&mut buf);
            stats.predecessor_states += buf.len() as i32;

            if !buf.is_empty() {
                // one pull before the seeded placement
                board.set_move_depth(initial_depth - 1);
                let found = board.snapshot();
                debug!(
                    "boundary state {:016x} at depth {}:\n{}",
                    found.fingerprint,
                    found.move_depth,
                    level.format_state(&found)
                );
                states.push(found);
                stats.boundary_states += 1;
            }

            board.relocate_box(src, cell);
            board.player = prev_player;
        }
    }

    Ok(SearchOk { states, stats })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(level: &str) -> Level {
        level.parse().unwrap()
    }

    #[test]
    fn corridor_discovers_both_pulls() {
        // cells: 0 1 2, box on the middle goal
        let level = parse(r"
#####
#@* #
#####
");
        let found = level.goal_states(INITIAL_PULL_DEPTH).unwrap();

        assert_eq!(found.states.len(), 2);
        for state in &found.states {
            assert_eq!(state.move_depth, 59_999);
        }
        // one configuration per pull direction, box and player mirrored
        assert_eq!(found.states[0].boxes, vec![0]);
        assert_eq!(found.states[0].player, 2);
        assert_eq!(found.states[1].boxes, vec![2]);
        assert_eq!(found.states[1].player, 0);

        assert_eq!(found.stats.hypotheses_tested, 4);
        assert_eq!(found.stats.admissible_pulls, 2);
        assert_eq!(found.stats.boundary_states, 2);
        assert_eq!(found.stats.predecessor_states, 2);
    }

    #[test]
    fn wall_blocks_the_whole_axis() {
        // box on a goal flush against the left wall - only vertical
        // pulls remain, cells 0/4 above and below it
        let level = parse(r"
####
#  #
#* #
#@ #
####
");
        let found = level.goal_states(INITIAL_PULL_DEPTH).unwrap();

        assert_eq!(found.states.len(), 2);
        assert!(found.states.iter().all(|s| s.boxes == [0] || s.boxes == [4]));
        assert_eq!(found.stats.hypotheses_tested, 4);
        assert_eq!(found.stats.admissible_pulls, 2);
    }

    #[test]
    fn boxed_in_goal_has_no_predecessors() {
        let level = parse(r"
#####
#@*##
#####
");
        let found = level.goal_states(INITIAL_PULL_DEPTH).unwrap();

        assert!(found.states.is_empty());
        assert_eq!(found.stats.admissible_pulls, 0);
    }

    #[test]
    fn two_boxes_on_goals() {
        // goals side by side block each other horizontally, both boxes
        // can only have been pushed vertically
        let level = parse(r"
######
#@   #
# $$ #
# .. #
#    #
######
");
        let found = level.goal_states(INITIAL_PULL_DEPTH).unwrap();

        assert_eq!(found.states.len(), 4);
        for state in &found.states {
            assert_eq!(state.move_depth, 59_999);
            assert_eq!(state.boxes.len(), 2);
            assert!(state.boxes.windows(2).all(|w| w[0] < w[1]));
        }
        // every hypothesis leaves one box on its goal
        let goals = level.goals();
        for state in &found.states {
            let on_goal = state.boxes.iter().filter(|&b| goals.contains(b)).count();
            assert_eq!(on_goal, 1);
        }
    }

    #[test]
    fn hypothesis_cycle_restores_exactly() {
        let level = parse(r"
######
#@   #
# $$ #
# .. #
#    #
######
");
        let mut board = level.state();
        board.place_boxes(&[9, 10]);
        let before = board.snapshot();

        // one full hypothesis cycle by hand: the box on cell 9 stepped up
        // to 5, player below on 13, search, then undo
        board.relocate_box(9, 5);
        board.set_player(13);
        board.set_move_depth(INITIAL_PULL_DEPTH);
        let mut buf = Vec::new();
        board.pull_variants(&mut buf);
        assert!(!buf.is_empty());

        board.relocate_box(5, 9);
        board.set_player(before.player);
        board.set_move_depth(before.move_depth);
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn initial_depth_is_a_parameter() {
        let level = parse(r"
#####
#@* #
#####
");
        let found = level.goal_states(100).unwrap();
        assert!(found.states.iter().all(|s| s.move_depth == 99));
    }

    #[test]
    fn fewer_boxes_than_goals_fails_loudly() {
        // the loader never produces such a level, so build one by hand
        let parsed = parse(r"
#####
#@* #
#####
");
        let level = Level::new(
            parsed.map.clone(),
            parsed.graph.clone(),
            parsed.start_player(),
            vec![],
            parsed.goals().to_vec(),
        );

        let err = level.goal_states(INITIAL_PULL_DEPTH).unwrap_err();
        assert_eq!(err, SearchErr::GoalPermutations { boxes: 0, goals: 1 });
        assert_eq!(
            err.to_string(),
            "0 boxes for 1 goals - goal permutation search is not supported"
        );
    }

    #[test]
    fn pull_depth_decrements_with_distance() {
        let level = parse(r"
#######
#@  $.#
#######
");
        let mut board = level.state();
        board.set_move_depth(10);

        let mut out = Vec::new();
        board.pull_variants(&mut out);

        // box on cell 3 is reached after two steps from the player
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].player, 2);
        assert_eq!(out[0].boxes, vec![3]);
        assert_eq!(out[0].move_depth, 7);

        // the live state is untouched
        assert_eq!(board.player(), 0);
        assert_eq!(board.move_depth(), 10);
        assert_eq!(board.boxes(), &[3]);
    }

    #[test]
    fn pull_needs_room_to_step_back() {
        // player against the wall, box right next to them - no cell to
        // retreat into, so no pull exists
        let level = parse(r"
#####
#@$.#
#####
");
        let mut board = level.state();
        let mut out = Vec::new();
        board.pull_variants(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn one_cell_can_emit_two_identical_pulls() {
        // boxes above and left of the player, both pullable - the two
        // snapshots describe the same configuration and share a
        // fingerprint, deduplication is the consumer's job
        let level = parse(r"
#####
# $ #
#$@.#
# . #
#####
");
        let mut board = level.state();
        let mut out = Vec::new();
        board.pull_variants(&mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].player, out[1].player);
        assert_eq!(out[0].boxes, out[1].boxes);
        assert_eq!(out[0].fingerprint, out[1].fingerprint);
    }

    #[test]
    fn scratch_buffers_are_reusable() {
        let level = parse(r"
#######
#@  $.#
#######
");
        let mut board = level.state();
        let mut out = Vec::new();
        board.pull_variants(&mut out);
        let first = out.clone();

        out.clear();
        board.pull_variants(&mut out);
        assert_eq!(out, first);
    }
}
