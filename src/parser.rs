use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use log::debug;

use crate::data::{MapCell, Pos, MAX_SIZE};
use crate::graph::WalkGraph;
use crate::level::Level;
use crate::map::GoalMap;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Pos(usize, usize),
    TooLarge,
    NoPlayer,
    MultiplePlayers,
    NoBoxes,
    NoGoals,
    BoxesGoals(usize, usize),
    UnreachableBox,
    UnreachableGoal,
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::TooLarge => write!(f, "Map larger than {} rows/columns", MAX_SIZE),
            ParserErr::NoPlayer => write!(f, "No player"),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
            ParserErr::NoBoxes => write!(f, "No boxes"),
            ParserErr::NoGoals => write!(f, "No goals"),
            ParserErr::BoxesGoals(boxes, goals) => {
                write!(f, "Different number of boxes ({}) and goals ({})", boxes, goals)
            }
            ParserErr::UnreachableBox => write!(f, "Box the player can't reach"),
            ParserErr::UnreachableGoal => write!(f, "Goal the player can't reach"),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses (a subset of) the format described
/// [here](http://www.sokobano.de/wiki/index.php?title=Level_format).
pub fn parse(level: &str) -> Result<Level, ParserErr> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches('\n').trim_end();

    let (grid, player_pos, box_posis, goal_posis) = scan(level)?;
    let player_pos = player_pos.ok_or(ParserErr::NoPlayer)?;
    if box_posis.is_empty() {
        return Err(ParserErr::NoBoxes);
    }
    if goal_posis.is_empty() {
        return Err(ParserErr::NoGoals);
    }
    if box_posis.len() != goal_posis.len() {
        return Err(ParserErr::BoxesGoals(box_posis.len(), goal_posis.len()));
    }

    let grid = Vec2d::new(&grid);
    let walkable = flood_fill(&grid, player_pos);
    let graph = WalkGraph::new(&walkable);
    debug!(
        "{} of {} cells walkable",
        graph.cell_count(),
        u32::from(grid.rows()) * u32::from(grid.cols())
    );

    // box and goal positions collected in raster order translate to
    // ascending walk-cell indices
    let mut boxes = Vec::with_capacity(box_posis.len());
    for &pos in &box_posis {
        let cell = graph.index(pos);
        if cell == graph.sentinel() {
            return Err(ParserErr::UnreachableBox);
        }
        boxes.push(cell);
    }
    let mut goals = Vec::with_capacity(goal_posis.len());
    for &pos in &goal_posis {
        let cell = graph.index(pos);
        if cell == graph.sentinel() {
            return Err(ParserErr::UnreachableGoal);
        }
        goals.push(cell);
    }
    let player = graph.index(player_pos);

    Ok(Level::new(
        GoalMap::new(grid, goal_posis),
        graph,
        player,
        boxes,
        goals,
    ))
}

type Scanned = (Vec<Vec<MapCell>>, Option<Pos>, Vec<Pos>, Vec<Pos>);

fn scan(level: &str) -> Result<Scanned, ParserErr> {
    let mut grid = Vec::new();
    let mut player_pos = None;
    let mut boxes = Vec::new();
    let mut goals = Vec::new();

    for (r, line) in level.lines().enumerate() {
        if r >= MAX_SIZE {
            return Err(ParserErr::TooLarge);
        }
        let mut line_cells = Vec::new();
        for (c, cur_char) in line.chars().enumerate() {
            if c >= MAX_SIZE {
                return Err(ParserErr::TooLarge);
            }
            let pos = Pos::new(r, c);

            let cell = match cur_char {
                '#' => MapCell::Wall,
                '@' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    MapCell::Empty
                }
                '+' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                '$' => {
                    boxes.push(pos);
                    MapCell::Empty
                }
                '*' => {
                    boxes.push(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                '.' => {
                    goals.push(pos);
                    MapCell::Goal
                }
                ' ' | '-' | '_' => MapCell::Empty,
                _ => return Err(ParserErr::Pos(r, c)),
            };
            line_cells.push(cell);
        }
        grid.push(line_cells);
    }

    Ok((grid, player_pos, boxes, goals))
}

fn flood_fill(grid: &Vec2d<MapCell>, start: Pos) -> Vec2d<bool> {
    let mut visited = grid.create_scratchpad(false);
    let mut to_visit = vec![start];

    while let Some(cur) = to_visit.pop() {
        if visited[cur] {
            continue;
        }
        visited[cur] = true;

        let (r, c) = (i32::from(cur.r), i32::from(cur.c));
        let neighbors = [(r - 1, c), (r + 1, c), (r, c - 1), (r, c + 1)];
        for &(nr, nc) in &neighbors {
            // the level doesn't have to be closed off by walls, so bounds
            // need checking here
            if nr < 0 || nc < 0 || nr >= i32::from(grid.rows()) || nc >= i32::from(grid.cols()) {
                continue;
            }
            let pos = Pos::new(nr as usize, nc as usize);
            if !visited[pos] && grid[pos] != MapCell::Wall {
                to_visit.push(pos);
            }
        }
    }

    visited
}
