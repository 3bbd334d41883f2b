use crate::grid::ScalarGrid;
use crate::index::SpanSpaceIndex;
use wasm_bindgen::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

/// JS-facing span-space index over an `f64` scalar grid.
///
/// The constructor takes the flat row-major vertex array (x fastest, then
/// y, then z) and the three vertex counts, and builds the index
/// immediately. Queries return cell coordinates as a flat
/// `[x, y, z, x, y, z, ...]` array for cheap transfer to JS.
#[wasm_bindgen]
pub struct SpanIndex {
    inner: SpanSpaceIndex<f64>,
}

#[wasm_bindgen]
impl SpanIndex {
    /// Builds the index over a grid of `nx * ny * nz` vertex samples.
    #[wasm_bindgen(constructor)]
    pub fn new(values: &[f64], nx: usize, ny: usize, nz: usize) -> SpanIndex {
        let grid = ScalarGrid::new(values.to_vec(), nx, ny, nz);
        SpanIndex {
            inner: SpanSpaceIndex::build(&grid),
        }
    }

    /// Builds an index over a uniform random field, for demos and stress
    /// tests.
    pub fn random_field(nx: usize, ny: usize, nz: usize) -> SpanIndex {
        let mut rng = StdRng::seed_from_u64(get_seed());
        let values: Vec<f64> = (0..nx * ny * nz).map(|_| rng.r#gen::<f64>()).collect();
        SpanIndex::new(&values, nx, ny, nz)
    }

    /// Coordinates of all cells whose value range strictly contains
    /// `isovalue`, flattened to `[x, y, z, x, y, z, ...]`.
    pub fn query(&self, isovalue: f64) -> Vec<u32> {
        let matches = self.inner.query(isovalue);
        let mut flat = Vec::with_capacity(matches.len() * 3);
        for coord in matches {
            flat.extend_from_slice(&coord);
        }
        flat
    }

    /// Number of cells the isosurface at `isovalue` passes through.
    pub fn count_matching(&self, isovalue: f64) -> usize {
        self.inner.query(isovalue).len()
    }

    #[wasm_bindgen(getter)]
    pub fn count_cells(&self) -> usize {
        self.inner.count_cells()
    }

    #[wasm_bindgen(getter)]
    pub fn n_cells_x(&self) -> usize {
        self.inner.n_cells()[0]
    }

    #[wasm_bindgen(getter)]
    pub fn n_cells_y(&self) -> usize {
        self.inner.n_cells()[1]
    }

    #[wasm_bindgen(getter)]
    pub fn n_cells_z(&self) -> usize {
        self.inner.n_cells()[2]
    }
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789 // Fixed seed for tests
    }
}
