use std::borrow::Cow;
use std::io;

use dot::{Edges, GraphWalk, Id, LabelText, Labeller, Nodes};

use crate::data::Dir;
use crate::graph::WalkGraph;

type Nd = usize;
type Ed = (usize, usize);

/// Graphviz view of the walkable-cell adjacency, one node per cell,
/// labeled with board coordinates.
#[derive(Debug, Clone, Copy)]
pub struct WalkGraphDot<'a> {
    graph: &'a WalkGraph,
}

impl<'a> WalkGraphDot<'a> {
    pub fn new(graph: &'a WalkGraph) -> Self {
        Self { graph }
    }

    pub fn render<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        dot::render(self, out)
    }
}

impl<'a> GraphWalk<'a, Nd, Ed> for WalkGraphDot<'a> {
    fn nodes(&'a self) -> Nodes<'a, Nd> {
        (0..usize::from(self.graph.cell_count())).collect()
    }

    fn edges(&'a self) -> Edges<'a, Ed> {
        let mut edges = Vec::new();
        for cell in 0..self.graph.cell_count() {
            // right and down cover each adjacency exactly once
            for &dir in &[Dir::Right, Dir::Down] {
                let n = self.graph.neighbor(cell, dir);
                if n != self.graph.sentinel() {
                    edges.push((usize::from(cell), usize::from(n)));
                }
            }
        }
        Cow::Owned(edges)
    }

    fn source(&'a self, e: &Ed) -> Nd {
        e.0
    }

    fn target(&'a self, e: &Ed) -> Nd {
        e.1
    }
}

impl<'a> Labeller<'a, Nd, Ed> for WalkGraphDot<'a> {
    fn graph_id(&'a self) -> Id<'a> {
        Id::new("walk").unwrap()
    }

    fn node_id(&'a self, n: &Nd) -> Id<'a> {
        Id::new(format!("N{}", n)).unwrap()
    }

    fn node_label(&'a self, n: &Nd) -> LabelText<'a> {
        let pos = self.graph.pos(*n as u16);
        LabelText::LabelStr(format!("{},{}", pos.r, pos.c).into())
    }
}

#[cfg(test)]
mod tests {
    use crate::level::Level;

    use super::*;

    #[test]
    fn renders_the_walk_graph() {
        let level: Level = r"
#####
#@$.#
#####
"
        .parse()
        .unwrap();

        let mut out = Vec::new();
        WalkGraphDot::new(&level.graph).render(&mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();

        assert!(rendered.starts_with("digraph walk"));
        assert!(rendered.contains("N0 -> N1"));
        assert!(rendered.contains("N1 -> N2"));
    }
}
