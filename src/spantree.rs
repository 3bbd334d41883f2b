use crate::span::CellRange;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug)]
struct SpanNode<T> {
    /// Median record chosen when this node's sub-range was partitioned.
    pivot: CellRange<T>,
    left: u32, // u32::MAX if leaf
    right: u32,
}

/// A 2D k-d tree over per-cell (min, max) records.
///
/// The tree partitions records by an alternating key: min value on odd
/// depths, max value on even depths, splitting at the median of each
/// sub-range. Nodes live in a flat arena with `u32` child indices; once
/// built the tree is read-only, so any number of threads may query it
/// concurrently.
pub struct SpanTree<T> {
    nodes: Vec<SpanNode<T>>,
    root: u32,
}

impl<T: Copy + PartialOrd> SpanTree<T> {
    /// Builds the tree over `records`, partitioning the slice in place.
    pub fn build(records: &mut [CellRange<T>]) -> SpanTree<T> {
        let mut tree = SpanTree {
            nodes: Vec::new(),
            root: u32::MAX,
        };

        if records.is_empty() {
            return tree;
        }

        // Reserve memory to avoid reallocations.
        // A tree over n records has exactly 2n - 1 nodes.
        tree.nodes.reserve(records.len() * 2);
        tree.root = tree.build_recursive(records, 0, 0, records.len());
        tree
    }

    /// Whether the tree holds no records.
    pub fn is_empty(&self) -> bool {
        self.root == u32::MAX
    }

    fn build_recursive(
        &mut self,
        records: &mut [CellRange<T>],
        depth: usize,
        first: usize,
        last: usize,
    ) -> u32 {
        let size = last - first;
        let median = first + size / 2;

        // Leaf: a single record. Callers never recurse into an empty range.
        if size <= 1 {
            let node_idx = self.nodes.len() as u32;
            self.nodes.push(SpanNode {
                pivot: records[median],
                left: u32::MAX,
                right: u32::MAX,
            });
            return node_idx;
        }

        // Median split under this depth's key: min value on odd depths,
        // max value on even depths.
        if depth % 2 == 1 {
            let (_, _, _) = records[first..last].select_nth_unstable_by(size / 2, |a, b| {
                a.min.partial_cmp(&b.min).unwrap_or(Ordering::Equal)
            });
        } else {
            let (_, _, _) = records[first..last].select_nth_unstable_by(size / 2, |a, b| {
                a.max.partial_cmp(&b.max).unwrap_or(Ordering::Equal)
            });
        }

        let pivot = records[median];

        // The right range keeps the median slot, so the pivot record also
        // surfaces at a leaf further down. Leaf-only emission during the
        // search depends on this.
        let left = self.build_recursive(records, depth + 1, first, median);
        let right = self.build_recursive(records, depth + 1, median, last);

        let node_idx = self.nodes.len() as u32;
        self.nodes.push(SpanNode { pivot, left, right });
        node_idx
    }

    /// Appends the coordinates of all cells whose range strictly contains
    /// `isovalue` (`min < isovalue < max`) to `out`.
    ///
    /// The search runs two full passes from the root, one starting in each
    /// phase. Each phase's pruning is only valid on every other level of
    /// the alternating-key partition; together the passes reach every
    /// matching leaf. The same coordinate can be appended twice, so callers
    /// collapse `out` to a set.
    pub fn query_into(&self, isovalue: T, out: &mut Vec<[u32; 3]>) {
        if self.root == u32::MAX {
            return;
        }
        self.search_min_ascending(self.root, isovalue, out);
        self.search_max_descending(self.root, isovalue, out);
    }

    fn search_min_ascending(&self, node_idx: u32, isovalue: T, out: &mut Vec<[u32; 3]>) {
        let node = &self.nodes[node_idx as usize];

        // Skips the right subtree when pivot.min >= isovalue. Sound on
        // levels that partitioned by min; the other pass covers the rest.
        if node.pivot.min < isovalue {
            if node.left == u32::MAX {
                if isovalue < node.pivot.max {
                    out.push(node.pivot.coord);
                }
            } else {
                self.search_max_descending(node.right, isovalue, out);
            }
        }
        if node.left != u32::MAX {
            self.search_max_descending(node.left, isovalue, out);
        }
    }

    fn search_max_descending(&self, node_idx: u32, isovalue: T, out: &mut Vec<[u32; 3]>) {
        let node = &self.nodes[node_idx as usize];

        // Skips the left subtree when pivot.max <= isovalue. Sound on
        // levels that partitioned by max; the other pass covers the rest.
        if isovalue < node.pivot.max {
            if node.left == u32::MAX {
                if node.pivot.min < isovalue {
                    out.push(node.pivot.coord);
                }
            } else {
                self.search_min_ascending(node.left, isovalue, out);
            }
        }
        if node.right != u32::MAX {
            self.search_min_ascending(node.right, isovalue, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand::rngs::StdRng;

    fn random_records(n: usize, seed: u64) -> Vec<CellRange<f64>> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|i| {
                // Quantized endpoints so ties occur.
                let a = rng.gen_range(0..20) as f64;
                let b = rng.gen_range(0..20) as f64;
                CellRange {
                    min: a.min(b),
                    max: a.max(b),
                    coord: [i as u32, 0, 0],
                }
            })
            .collect()
    }

    fn collect_subtree(tree: &SpanTree<f64>, node_idx: u32, out: &mut Vec<CellRange<f64>>) {
        let node = &tree.nodes[node_idx as usize];
        out.push(node.pivot);
        if node.left != u32::MAX {
            collect_subtree(tree, node.left, out);
        }
        if node.right != u32::MAX {
            collect_subtree(tree, node.right, out);
        }
    }

    fn assert_ordering(tree: &SpanTree<f64>, node_idx: u32, depth: usize) {
        let node = &tree.nodes[node_idx as usize];
        if node.left == u32::MAX {
            return;
        }

        let key = |r: &CellRange<f64>| if depth % 2 == 1 { r.min } else { r.max };
        let pivot_key = key(&node.pivot);

        let mut left = Vec::new();
        collect_subtree(tree, node.left, &mut left);
        for r in &left {
            assert!(
                key(r) <= pivot_key,
                "left record {:?} violates key ordering at depth {}",
                r,
                depth
            );
        }

        let mut right = Vec::new();
        collect_subtree(tree, node.right, &mut right);
        for r in &right {
            assert!(
                key(r) >= pivot_key,
                "right record {:?} violates key ordering at depth {}",
                r,
                depth
            );
        }

        assert_ordering(tree, node.left, depth + 1);
        assert_ordering(tree, node.right, depth + 1);
    }

    #[test]
    fn test_alternating_key_ordering_invariant() {
        for seed in 0..4 {
            let mut records = random_records(257, seed);
            let tree = SpanTree::build(&mut records);
            assert_ordering(&tree, tree.root, 0);
        }
    }

    #[test]
    fn test_node_count() {
        // n leaves, n - 1 internal nodes.
        for n in [1, 2, 3, 17, 64, 100] {
            let mut records = random_records(n, 7);
            let tree = SpanTree::build(&mut records);
            assert_eq!(tree.nodes.len(), 2 * n - 1, "node count for n = {}", n);
        }
    }

    #[test]
    fn test_every_record_reaches_a_leaf() {
        let mut records = random_records(100, 11);
        let tree = SpanTree::build(&mut records);

        let mut leaf_coords: Vec<[u32; 3]> = tree
            .nodes
            .iter()
            .filter(|n| n.left == u32::MAX)
            .map(|n| n.pivot.coord)
            .collect();
        leaf_coords.sort_unstable();
        leaf_coords.dedup();
        assert_eq!(leaf_coords.len(), 100);
    }

    #[test]
    fn test_empty_tree() {
        let mut records: Vec<CellRange<f64>> = Vec::new();
        let tree = SpanTree::build(&mut records);
        assert!(tree.is_empty());

        let mut out = Vec::new();
        tree.query_into(0.5, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_query_matches_linear_scan() {
        for seed in 0..8 {
            let mut records = random_records(300, seed);
            let reference = records.clone();
            let tree = SpanTree::build(&mut records);

            for &isovalue in &[0.5, 4.5, 9.5, 10.0, 14.5, 19.0, 25.0] {
                let mut found = Vec::new();
                tree.query_into(isovalue, &mut found);
                found.sort_unstable();
                found.dedup();

                let mut expected: Vec<[u32; 3]> = reference
                    .iter()
                    .filter(|r| r.min < isovalue && isovalue < r.max)
                    .map(|r| r.coord)
                    .collect();
                expected.sort_unstable();

                assert_eq!(
                    found, expected,
                    "mismatch for seed {} isovalue {}",
                    seed, isovalue
                );
            }
        }
    }
}
