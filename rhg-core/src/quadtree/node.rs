//! Arena-allocated quadtree nodes and the insertion, removal and split paths.

use std::mem;

use super::region::Region;
use crate::{PointId, coordinates::PolarPoint};

/// Index of a node inside an [`Arena`].
pub(crate) type NodeId = usize;

pub(crate) const ROOT: NodeId = 0;

/// A point stored in a leaf, with its coordinates inlined for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LeafEntry {
    pub(crate) id: PointId,
    pub(crate) point: PolarPoint,
}

#[derive(Clone, Debug)]
pub(crate) enum NodeKind {
    Leaf(Vec<LeafEntry>),
    /// Children ordered as produced by [`Region::quadrants`] or
    /// [`Region::sectors`].
    Internal([NodeId; 4]),
}

#[derive(Clone, Debug)]
pub(crate) struct QuadNode {
    pub(crate) region: Region,
    pub(crate) kind: NodeKind,
    /// Number of points stored in the subtree.
    pub(crate) size: usize,
}

impl QuadNode {
    pub(crate) fn leaf(region: Region, entries: Vec<LeafEntry>) -> Self {
        Self {
            region,
            size: entries.len(),
            kind: NodeKind::Leaf(entries),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }
}

/// Flat node storage. Child links are indices into `nodes`, and every child is
/// stored after its parent.
#[derive(Clone, Debug)]
pub(crate) struct Arena {
    pub(crate) nodes: Vec<QuadNode>,
}

impl Arena {
    pub(crate) fn new(region: Region) -> Self {
        Self {
            nodes: vec![QuadNode::leaf(region, Vec::new())],
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &QuadNode {
        &self.nodes[id]
    }

    pub(crate) fn root(&self) -> &QuadNode {
        self.node(ROOT)
    }

    /// Nodes from the root down to the leaf whose region holds `point`.
    pub(crate) fn path_to_leaf(&self, point: PolarPoint) -> Vec<NodeId> {
        let mut path = vec![ROOT];
        let mut current = ROOT;
        while let NodeKind::Internal(children) = &self.nodes[current].kind {
            current = self.child_containing(children, point);
            path.push(current);
        }
        path
    }

    fn child_containing(&self, children: &[NodeId; 4], point: PolarPoint) -> NodeId {
        // Children partition their parent exactly, so the fallback is only
        // taken for points outside the parent.
        children
            .iter()
            .copied()
            .find(|&child| self.nodes[child].region.contains(point))
            .unwrap_or(children[3])
    }

    pub(crate) fn insert(&mut self, entry: LeafEntry, capacity: usize, dispersion: f64) {
        let path = self.path_to_leaf(entry.point);
        for &node in &path {
            self.nodes[node].size += 1;
        }
        let leaf = path[path.len() - 1];
        if let NodeKind::Leaf(entries) = &mut self.nodes[leaf].kind {
            entries.push(entry);
        }
        self.split(leaf, capacity, dispersion);
    }

    /// Removes `id`, stored at `point`. Emptied regions are left in place.
    pub(crate) fn remove(&mut self, id: PointId, point: PolarPoint) -> bool {
        let path = self.path_to_leaf(point);
        let leaf = path[path.len() - 1];
        let removed = match &mut self.nodes[leaf].kind {
            NodeKind::Leaf(entries) => entries
                .iter()
                .position(|entry| entry.id == id)
                .map(|slot| entries.swap_remove(slot))
                .is_some(),
            NodeKind::Internal(_) => false,
        };
        if removed {
            for &node in &path {
                self.nodes[node].size -= 1;
            }
        }
        removed
    }

    /// Splits `leaf` while it holds more than `capacity` entries, descending
    /// into overfull children.
    pub(crate) fn split(&mut self, leaf: NodeId, capacity: usize, dispersion: f64) {
        let mut pending = vec![leaf];
        while let Some(node) = pending.pop() {
            if !self.should_split(node, capacity, dispersion) {
                continue;
            }
            let Some(quadrants) = self.nodes[node].region.quadrants(dispersion) else {
                continue;
            };
            let NodeKind::Leaf(entries) =
                mem::replace(&mut self.nodes[node].kind, NodeKind::Internal([ROOT; 4]))
            else {
                continue;
            };
            let mut buckets: [Vec<LeafEntry>; 4] = Default::default();
            for entry in entries {
                let slot = quadrants
                    .iter()
                    .position(|quadrant| quadrant.contains(entry.point))
                    .unwrap_or(3);
                buckets[slot].push(entry);
            }
            let first = self.nodes.len();
            for (quadrant, bucket) in quadrants.into_iter().zip(buckets) {
                if bucket.len() > capacity {
                    pending.push(self.nodes.len());
                }
                self.nodes.push(QuadNode::leaf(quadrant, bucket));
            }
            self.nodes[node].kind = NodeKind::Internal([first, first + 1, first + 2, first + 3]);
        }
    }

    fn should_split(&self, node: NodeId, capacity: usize, dispersion: f64) -> bool {
        match &self.nodes[node].kind {
            NodeKind::Leaf(entries) => {
                entries.len() > capacity && !is_degenerate(&self.nodes[node].region, entries, dispersion)
            }
            NodeKind::Internal(_) => false,
        }
    }

    /// Replaces node `slot` with the root of `subtree` and appends the rest of
    /// `subtree`, shifting its child links.
    pub(crate) fn graft(&mut self, slot: NodeId, subtree: Self) {
        let base = self.nodes.len();
        let remap = |id: NodeId| if id == ROOT { slot } else { base + id - 1 };
        let mut nodes = subtree.nodes.into_iter().map(|mut node| {
            if let NodeKind::Internal(children) = &mut node.kind {
                for child in children.iter_mut() {
                    *child = remap(*child);
                }
            }
            node
        });
        if let Some(root) = nodes.next() {
            self.nodes[slot] = root;
        }
        self.nodes.extend(nodes);
    }

    /// Recomputes subtree sizes bottom-up.
    pub(crate) fn refresh_sizes(&mut self) {
        for id in (0..self.nodes.len()).rev() {
            let size = match &self.nodes[id].kind {
                NodeKind::Leaf(entries) => entries.len(),
                NodeKind::Internal(children) => {
                    children.iter().map(|&child| self.nodes[child].size).sum()
                }
            };
            self.nodes[id].size = size;
        }
    }

    /// Leaf entries in depth-first order, children visited in stored order.
    pub(crate) fn leaf_entries(&self) -> impl Iterator<Item = &LeafEntry> + '_ {
        self.subtree_entries(ROOT)
    }

    /// Entries of the leaves below `top`, in depth-first order.
    pub(crate) fn subtree_entries(&self, top: NodeId) -> impl Iterator<Item = &LeafEntry> + '_ {
        self.leaves_below(top).flat_map(|leaf| match &leaf.kind {
            NodeKind::Leaf(entries) => entries.as_slice(),
            NodeKind::Internal(_) => &[],
        })
    }

    /// Leaves in depth-first order.
    pub(crate) fn leaves(&self) -> impl Iterator<Item = &QuadNode> + '_ {
        self.leaves_below(ROOT)
    }

    fn leaves_below(&self, top: NodeId) -> impl Iterator<Item = &QuadNode> + '_ {
        let mut stack = vec![top];
        std::iter::from_fn(move || {
            while let Some(id) = stack.pop() {
                let node = &self.nodes[id];
                match &node.kind {
                    NodeKind::Leaf(_) => return Some(node),
                    NodeKind::Internal(children) => stack.extend(children.iter().rev()),
                }
            }
            None
        })
    }

    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(ROOT, 1)];
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            if let NodeKind::Internal(children) = &self.nodes[id].kind {
                stack.extend(children.iter().map(|&child| (child, depth + 1)));
            }
        }
        height
    }
}

/// Whether an overfull leaf must stay a leaf: its region is too thin to cut or
/// all of its points coincide.
pub(crate) fn is_degenerate(region: &Region, entries: &[LeafEntry], dispersion: f64) -> bool {
    coincident(entries) || region.quadrants(dispersion).is_none()
}

#[expect(clippy::float_cmp, reason = "only exact coincidence blocks a split")]
fn coincident(entries: &[LeafEntry]) -> bool {
    let Some(first) = entries.first() else {
        return true;
    };
    entries.iter().all(|entry| {
        entry.point.radius == first.point.radius
            && (first.point.radius == 0.0 || entry.point.angle == first.point.angle)
    })
}
