use std::fmt::{self, Debug, Display, Formatter};

use crate::graph::WalkGraph;
use crate::map::{GoalMap, MapFormatter};
use crate::state::{BoardState, State};

/// A parsed puzzle: the static board, its walk graph and the starting
/// placement, all positions already translated to walk-cell indices.
#[derive(Clone)]
pub struct Level {
    pub map: GoalMap,
    pub graph: WalkGraph,
    player: u16,
    boxes: Vec<u16>,
    goals: Vec<u16>,
}

impl Level {
    pub(crate) fn new(
        map: GoalMap,
        graph: WalkGraph,
        player: u16,
        boxes: Vec<u16>,
        goals: Vec<u16>,
    ) -> Self {
        Level {
            map,
            graph,
            player,
            boxes,
            goals,
        }
    }

    pub fn start_player(&self) -> u16 {
        self.player
    }

    pub fn start_boxes(&self) -> &[u16] {
        &self.boxes
    }

    pub fn goals(&self) -> &[u16] {
        &self.goals
    }

    /// A fresh live state at the starting placement, borrowing this
    /// level's graph.
    pub fn state(&self) -> BoardState<'_> {
        BoardState::new(&self.graph, self.player, &self.boxes)
    }

    /// The starting placement as a snapshot (depth 0).
    pub fn snapshot(&self) -> State {
        State::new(self.player, self.boxes.clone(), 0)
    }

    pub fn format_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(&self.map, &self.graph, state)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        write!(f, "{}", self.format_state(&snapshot))
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
