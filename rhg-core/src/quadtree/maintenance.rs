//! Compaction, renumbering and extraction.

use rayon::prelude::*;
use tracing::debug;

use super::{
    Quadtree,
    node::{Arena, LeafEntry, NodeId, NodeKind, QuadNode, ROOT},
};
use crate::{PointId, coordinates::Coordinates};

impl Quadtree {
    /// Collapses every subtree holding at most `capacity` points into a single
    /// leaf and compacts the arena. Query results are unchanged.
    pub fn trim(&mut self) {
        let before = self.arena.nodes.len();
        let mut nodes = Vec::with_capacity(before);
        compact(&self.arena, ROOT, self.params.capacity(), &mut nodes);
        self.arena.nodes = nodes;
        debug!(before, after = self.arena.nodes.len(), "quadtree trimmed");
    }

    /// Orders the points of every leaf by identity.
    pub fn sort_points_in_leaves(&mut self) {
        self.arena.nodes.par_iter_mut().for_each(|node| {
            if let NodeKind::Leaf(entries) = &mut node.kind {
                entries.sort_unstable_by_key(|entry| entry.id);
            }
        });
    }

    /// Trims the tree, then renumbers the points `0..len` in leaf order.
    ///
    /// Returns the previous identity of each new identity. Calling it again
    /// immediately is a no-op and returns the identity permutation.
    ///
    /// # Examples
    /// ```
    /// use rhg_core::{Quadtree, QuadtreeParams};
    ///
    /// let mut tree = Quadtree::new(QuadtreeParams::new(0.9)?);
    /// tree.insert(4, 1.0, 0.5)?;
    /// tree.insert(9, 2.0, 0.5)?;
    /// let previous = tree.reindex();
    /// assert_eq!(previous.len(), 2);
    /// assert_eq!(tree.reindex(), vec![0, 1]);
    /// # Ok::<(), rhg_core::GeneratorError>(())
    /// ```
    pub fn reindex(&mut self) -> Vec<PointId> {
        self.trim();
        let mut previous = Vec::with_capacity(self.len);
        let mut points = Vec::with_capacity(self.len);
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            match &mut self.arena.nodes[id].kind {
                NodeKind::Leaf(entries) => {
                    for entry in entries.iter_mut() {
                        previous.push(entry.id);
                        points.push(Some(entry.point));
                        entry.id = previous.len() - 1;
                    }
                }
                NodeKind::Internal(children) => stack.extend(children.iter().rev()),
            }
        }
        self.points = points;
        previous
    }

    /// Identities in leaf order.
    #[must_use]
    pub fn elements(&self) -> Vec<PointId> {
        self.arena.leaf_entries().map(|entry| entry.id).collect()
    }

    /// Coordinates of the indexed points in increasing identity order. After
    /// [`Quadtree::reindex`] identities are dense, so positions equal ids.
    #[must_use]
    pub fn extract_coordinates(&self) -> Coordinates {
        self.points.iter().flatten().copied().collect()
    }
}

fn compact(arena: &Arena, id: NodeId, capacity: usize, out: &mut Vec<QuadNode>) -> NodeId {
    let node = arena.node(id);
    let slot = out.len();
    let children = match &node.kind {
        NodeKind::Internal(children) if node.size > capacity => *children,
        _ => {
            let entries: Vec<LeafEntry> = arena.subtree_entries(id).copied().collect();
            out.push(QuadNode::leaf(node.region, entries));
            return slot;
        }
    };
    out.push(QuadNode {
        region: node.region,
        kind: NodeKind::Internal([ROOT; 4]),
        size: node.size,
    });
    let mut linked = [ROOT; 4];
    for (link, child) in linked.iter_mut().zip(children) {
        *link = compact(arena, child, capacity, out);
    }
    out[slot].kind = NodeKind::Internal(linked);
    slot
}
