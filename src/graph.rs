use crate::data::{Dir, Pos};
use crate::vec2d::Vec2d;

/// Four-neighbor adjacency over the walkable cells of a board.
///
/// Walkable cells get dense indices in row-major order. Every neighbor
/// table entry is either another cell index or `cell_count()`, the
/// sentinel for "no walkable cell in that direction". Built once by the
/// parser and never mutated, so search states can share it freely.
#[derive(Debug, Clone)]
pub struct WalkGraph {
    left: Vec<u16>,
    right: Vec<u16>,
    up: Vec<u16>,
    down: Vec<u16>,
    index_to_pos: Vec<Pos>,
    pos_to_index: Vec2d<u16>,
}

impl WalkGraph {
    pub fn new(walkable: &Vec2d<bool>) -> WalkGraph {
        let mut index_to_pos = Vec::new();
        for r in 0..walkable.rows() {
            for c in 0..walkable.cols() {
                let pos = Pos::new(usize::from(r), usize::from(c));
                if walkable[pos] {
                    index_to_pos.push(pos);
                }
            }
        }

        let size = index_to_pos.len() as u16;
        let mut pos_to_index = walkable.create_scratchpad(size);
        for (i, &pos) in index_to_pos.iter().enumerate() {
            pos_to_index[pos] = i as u16;
        }

        let mut left = vec![size; index_to_pos.len()];
        let mut right = vec![size; index_to_pos.len()];
        let mut up = vec![size; index_to_pos.len()];
        let mut down = vec![size; index_to_pos.len()];
        for (i, &pos) in index_to_pos.iter().enumerate() {
            if pos.c > 0 {
                let n = Pos { r: pos.r, c: pos.c - 1 };
                if walkable[n] {
                    left[i] = pos_to_index[n];
                }
            }
            if pos.c + 1 < walkable.cols() {
                let n = Pos { r: pos.r, c: pos.c + 1 };
                if walkable[n] {
                    right[i] = pos_to_index[n];
                }
            }
            if pos.r > 0 {
                let n = Pos { r: pos.r - 1, c: pos.c };
                if walkable[n] {
                    up[i] = pos_to_index[n];
                }
            }
            if pos.r + 1 < walkable.rows() {
                let n = Pos { r: pos.r + 1, c: pos.c };
                if walkable[n] {
                    down[i] = pos_to_index[n];
                }
            }
        }

        WalkGraph {
            left,
            right,
            up,
            down,
            index_to_pos,
            pos_to_index,
        }
    }

    /// Number of walkable cells.
    pub fn cell_count(&self) -> u16 {
        self.index_to_pos.len() as u16
    }

    /// The reserved index meaning "no such cell". No valid index ever
    /// equals it.
    pub fn sentinel(&self) -> u16 {
        self.cell_count()
    }

    pub fn neighbor(&self, cell: u16, dir: Dir) -> u16 {
        let cell = usize::from(cell);
        match dir {
            Dir::Left => self.left[cell],
            Dir::Right => self.right[cell],
            Dir::Up => self.up[cell],
            Dir::Down => self.down[cell],
        }
    }

    /// Board coordinates of a cell - only rendering and debugging need
    /// these.
    pub fn pos(&self, cell: u16) -> Pos {
        self.index_to_pos[usize::from(cell)]
    }

    /// Cell index at `pos`, or the sentinel for walls and unreachable
    /// cells.
    pub fn index(&self, pos: Pos) -> u16 {
        self.pos_to_index[pos]
    }
}
