//! Group resolution
//!
//! Partitions the run graph into connected groups with a disjoint-set
//! forest over node indices (union by size, path halving). No recursion is
//! involved, so tall objects do not grow the stack.
//!
//! After resolution every node carries [`RunFlags::GROUPED`] and a dense
//! group id in `0..n_groups`. Nodes are visited from last to first; a
//! visit marks the node and everything reachable from it through
//! predecessor links as grouped. The visited node itself is
//! [`RunFlags::BOTTOM`] when nothing in that upward closure was grouped
//! before, i.e. it is the lowest run of a branch seen for the first time.
//! An object that splits and merges again can therefore have several
//! bottom runs. Nodes without predecessors are marked [`RunFlags::TOP`].

use crate::graph::RunGraph;
use crate::run::RunFlags;

struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Returns `true` if two distinct sets were merged.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }
}

/// Assign every node of `graph` to its connected group and set run flags.
///
/// Returns the number of groups. Any flags from a previous resolution are
/// replaced.
pub fn resolve_groups(graph: &mut RunGraph) -> usize {
    let n = graph.len();
    let mut sets = DisjointSet::new(n);
    let mut merges = 0usize;
    for (i, node) in graph.nodes().iter().enumerate() {
        for &adj in &node.adjacent {
            if sets.union(i, adj) {
                merges += 1;
            } else {
                log::trace!("run {} closes a loop through run {}", i, adj);
            }
        }
    }

    for node in graph.nodes_mut() {
        node.flags = RunFlags::NONE;
    }

    let mut group_of_root: Vec<Option<usize>> = vec![None; n];
    let mut next_group = 0usize;
    let mut stack = Vec::new();
    // Visit that grouped each node; usize::MAX while ungrouped.
    let mut visit = vec![usize::MAX; n];
    for i in (0..n).rev() {
        let root = sets.find(i);
        let group = *group_of_root[root].get_or_insert_with(|| {
            next_group += 1;
            next_group - 1
        });
        if graph.nodes()[i].flags.contains(RunFlags::GROUPED) {
            continue;
        }

        let mut fresh = true;
        stack.push(i);
        while let Some(j) = stack.pop() {
            if visit[j] == i {
                continue;
            }
            let node = &mut graph.nodes_mut()[j];
            if node.flags.contains(RunFlags::GROUPED) {
                fresh = false;
                continue;
            }
            visit[j] = i;
            node.flags |= RunFlags::GROUPED;
            node.group = group;
            if node.adjacent.is_empty() {
                node.flags |= RunFlags::TOP;
            }
            stack.extend_from_slice(&node.adjacent);
        }
        if fresh {
            graph.nodes_mut()[i].flags |= RunFlags::BOTTOM;
        }
    }

    log::debug!("resolved {} runs into {} groups ({} merges)", n, next_group, merges);
    next_group
}
