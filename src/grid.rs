/// A rectilinear 3D grid of scalar samples.
///
/// Values are stored in a flat array in row-major order: x fastest, then y,
/// then z. The sample at vertex `(x, y, z)` lives at index
/// `x + y * nx + z * nx * ny`.
///
/// The grid is the sole input of the span-space index; it is passed in
/// explicitly, never fetched from ambient state.
#[derive(Clone, Debug)]
pub struct ScalarGrid<T> {
    /// Number of sample vertices along the X axis.
    pub nx: usize,
    /// Number of sample vertices along the Y axis.
    pub ny: usize,
    /// Number of sample vertices along the Z axis.
    pub nz: usize,
    /// Flat per-vertex sample values, `nx * ny * nz` entries.
    pub values: Vec<T>,
}

impl<T: Copy> ScalarGrid<T> {
    /// Creates a grid from a flat row-major value array and vertex counts.
    ///
    /// Panics when `values.len()` does not match `nx * ny * nz`; a mismatch
    /// is a caller contract violation, not a recoverable condition.
    pub fn new(values: Vec<T>, nx: usize, ny: usize, nz: usize) -> ScalarGrid<T> {
        assert_eq!(
            values.len(),
            nx * ny * nz,
            "value array length {} does not match grid dimensions {}x{}x{}",
            values.len(),
            nx,
            ny,
            nz
        );
        ScalarGrid { nx, ny, nz, values }
    }

    /// Calculates the flat index of the vertex at `(x, y, z)`.
    pub fn vertex_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.nx + z * self.nx * self.ny
    }

    /// The sample value at vertex `(x, y, z)`.
    pub fn value(&self, x: usize, y: usize, z: usize) -> T {
        debug_assert!(x < self.nx && y < self.ny && z < self.nz);
        self.values[self.vertex_index(x, y, z)]
    }

    /// Cell counts per axis. An axis with fewer than 2 vertices has zero
    /// cells; `saturating_sub` keeps the unsigned arithmetic from wrapping.
    pub fn n_cells(&self) -> [usize; 3] {
        [
            self.nx.saturating_sub(1),
            self.ny.saturating_sub(1),
            self.nz.saturating_sub(1),
        ]
    }

    /// Total number of cells in the grid.
    pub fn count_cells(&self) -> usize {
        let [cx, cy, cz] = self.n_cells();
        cx * cy * cz
    }

    /// The 8 corner samples of the cell at `(x, y, z)`.
    ///
    /// `x`, `y`, `z` are cell coordinates, so all `+ 1` vertex accesses are
    /// in range whenever the cell coordinate is.
    pub fn cell_corners(&self, x: usize, y: usize, z: usize) -> [T; 8] {
        [
            self.value(x, y, z),         // 0
            self.value(x + 1, y, z),     // 1
            self.value(x + 1, y + 1, z), // 2
            self.value(x, y + 1, z),     // 3
            self.value(x, y, z + 1),     // 4
            self.value(x + 1, y, z + 1), // 5
            self.value(x + 1, y + 1, z + 1), // 6
            self.value(x, y + 1, z + 1), // 7
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_indices() {
        let grid = ScalarGrid::new((0..60).collect(), 3, 4, 5);

        // Index = x + y*nx + z*nx*ny
        assert_eq!(grid.vertex_index(0, 0, 0), 0);
        assert_eq!(grid.vertex_index(2, 0, 0), 2);
        assert_eq!(grid.vertex_index(0, 1, 0), 3);
        assert_eq!(grid.vertex_index(0, 0, 1), 12);
        assert_eq!(grid.vertex_index(2, 3, 4), 59);

        assert_eq!(grid.value(2, 3, 4), 59);
    }

    #[test]
    fn test_cell_counts() {
        let grid = ScalarGrid::new(vec![0.0; 3 * 4 * 5], 3, 4, 5);
        assert_eq!(grid.n_cells(), [2, 3, 4]);
        assert_eq!(grid.count_cells(), 24);
    }

    #[test]
    fn test_degenerate_axes_have_zero_cells() {
        // A single vertex plane along z: no cells, and no unsigned wraparound.
        let grid = ScalarGrid::new(vec![0.0; 4 * 4], 4, 4, 1);
        assert_eq!(grid.n_cells(), [3, 3, 0]);
        assert_eq!(grid.count_cells(), 0);

        let empty: ScalarGrid<f64> = ScalarGrid::new(Vec::new(), 0, 0, 0);
        assert_eq!(empty.count_cells(), 0);
    }

    #[test]
    fn test_cell_corners_cover_all_eight_vertices() {
        // 2x2x2 grid: the single cell's corners are all 8 vertices,
        // including (1,1,1).
        let grid = ScalarGrid::new((0..8).collect::<Vec<i32>>(), 2, 2, 2);
        let mut corners = grid.cell_corners(0, 0, 0);
        corners.sort_unstable();
        assert_eq!(corners, [0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    #[should_panic(expected = "does not match grid dimensions")]
    fn test_length_mismatch_panics() {
        let _ = ScalarGrid::new(vec![0.0; 7], 2, 2, 2);
    }
}
