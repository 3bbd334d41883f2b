use crate::grid::ScalarGrid;
use crate::span::extract_ranges;
use crate::spantree::SpanTree;
use rayon::prelude::*;

/// The main container for span-space isosurface cell search.
///
/// Built once from a [`ScalarGrid`], the index answers repeated isovalue
/// queries: which cells does an isosurface at a given threshold pass
/// through? A cell matches when its corner-value range strictly contains
/// the isovalue (`min < isovalue < max`); a cell whose minimum or maximum
/// equals the isovalue exactly is not reported, so degenerate
/// zero-thickness intersections stay out of the result.
///
/// Construction is single-threaded and is the dominant cost. The finished
/// index is immutable and safe to query from any number of threads.
pub struct SpanSpaceIndex<T> {
    n_cells: [usize; 3],
    tree: SpanTree<T>,
}

impl<T: Copy + PartialOrd> SpanSpaceIndex<T> {
    /// Builds the index over the given grid.
    pub fn build(grid: &ScalarGrid<T>) -> SpanSpaceIndex<T> {
        SpanSpaceIndex::build_with_progress(grid, |_, _| {})
    }

    /// Builds the index, reporting `(steps_done, steps_total)` to `progress`
    /// after each scanned z-slab of cells and once more when the tree is
    /// finished. The callback is fire-and-forget; it is never consulted.
    pub fn build_with_progress<F>(grid: &ScalarGrid<T>, mut progress: F) -> SpanSpaceIndex<T>
    where
        F: FnMut(usize, usize),
    {
        let n_cells = grid.n_cells();
        // One step per z-slab of the scan, one for tree construction.
        let total = n_cells[2] + 1;

        let mut records = extract_ranges(grid, |done, _| progress(done, total));
        let tree = SpanTree::build(&mut records);
        progress(total, total);

        SpanSpaceIndex { n_cells, tree }
    }

    /// Coordinates of all cells whose value range strictly contains
    /// `isovalue`, sorted and free of duplicates.
    ///
    /// An isovalue outside the data range yields an empty result, as does an
    /// index over a grid too small to have cells.
    pub fn query(&self, isovalue: T) -> Vec<[u32; 3]> {
        let mut out = Vec::new();
        self.tree.query_into(isovalue, &mut out);
        // The dual-pass search can report a cell twice; collapse to a set.
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Answers a batch of isovalue queries in parallel.
    ///
    /// Queries are read-only against the immutable tree, so the batch is
    /// split across the rayon thread pool without synchronization.
    pub fn query_many(&self, isovalues: &[T]) -> Vec<Vec<[u32; 3]>>
    where
        T: Sync,
    {
        isovalues.par_iter().map(|&v| self.query(v)).collect()
    }

    /// Total number of cells the index was built over.
    pub fn count_cells(&self) -> usize {
        let [cx, cy, cz] = self.n_cells;
        cx * cy * cz
    }

    /// Cell counts per axis.
    pub fn n_cells(&self) -> [usize; 3] {
        self.n_cells
    }

    /// Whether the index holds no cells.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}
