use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Contents, MapCell, Pos};
use crate::graph::WalkGraph;
use crate::state::State;
use crate::vec2d::Vec2d;

/// Renders a configuration on top of the static board.
#[derive(Clone, Copy)]
pub struct MapFormatter<'a> {
    map: &'a GoalMap,
    graph: &'a WalkGraph,
    state: &'a State,
}

impl<'a> MapFormatter<'a> {
    pub fn new(map: &'a GoalMap, graph: &'a WalkGraph, state: &'a State) -> Self {
        Self { map, graph, state }
    }
}

impl<'a> Display for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.map.write_with_state(self.graph, self.state, f)
    }
}

impl<'a> Debug for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Static board data. The grid only ever holds walls, floor and goals -
/// player and box markers live in the state and are overlaid when
/// rendering.
#[derive(Debug, Clone)]
pub struct GoalMap {
    pub grid: Vec2d<MapCell>,
    pub goals: Vec<Pos>,
}

impl GoalMap {
    pub fn new(grid: Vec2d<MapCell>, goals: Vec<Pos>) -> Self {
        GoalMap { grid, goals }
    }

    fn write_with_state(
        &self,
        graph: &WalkGraph,
        state: &State,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        let mut contents = self.grid.create_scratchpad(Contents::Empty);
        for &cell in state.boxes.iter() {
            contents[graph.pos(cell)] = Contents::Box;
        }
        contents[graph.pos(state.player)] = Contents::Player;
        self.write(&contents, f)
    }

    fn write(&self, contents: &Vec2d<Contents>, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.grid.rows() {
            // don't print trailing empty cells to match the input level strings
            let mut last_non_empty = 0;
            for c in 0..self.grid.cols() {
                let pos = Pos::new(usize::from(r), usize::from(c));
                if self.grid[pos] != MapCell::Empty || contents[pos] != Contents::Empty {
                    last_non_empty = c;
                }
            }

            for c in 0..=last_non_empty {
                let pos = Pos::new(usize::from(r), usize::from(c));
                write!(f, "{}", Self::cell_char(self.grid[pos], contents[pos]))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn cell_char(cell: MapCell, contents: Contents) -> char {
        match (cell, contents) {
            (MapCell::Wall, Contents::Empty) => '#',
            (MapCell::Wall, _) => unreachable!("box or player inside a wall"),
            (MapCell::Empty, Contents::Empty) => ' ',
            (MapCell::Empty, Contents::Box) => '$',
            (MapCell::Empty, Contents::Player) => '@',
            (MapCell::Goal, Contents::Empty) => '.',
            (MapCell::Goal, Contents::Box) => '*',
            (MapCell::Goal, Contents::Player) => '+',
        }
    }
}

impl Display for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let contents = self.grid.create_scratchpad(Contents::Empty);
        self.write(&contents, f)
    }
}
