//! # isospan
//!
//! `isospan` is a Rust library for span-space isosurface cell search over rectilinear
//! volumetric grids, designed to be used in Rust as well as compiled to WebAssembly
//! (WASM). It indexes the (min, max) corner-value range of every grid cell so the
//! cells crossed by an isosurface can be found without scanning the whole volume.
//!
//! ## Features
//!
//! - **WASM-first**: Built with `wasm-bindgen` for seamless integration with JavaScript and TypeScript.
//! - **Span-Space Indexing**: A 2D k-d tree over per-cell (min, max) ranges with alternating
//!   partition keys, built once and queried many times.
//! - **Batch Queries**: The built index is immutable, so batches of isovalues are answered
//!   in parallel via `rayon`.
//! - **Progress Reporting**: The one-time build accepts an optional fire-and-forget callback.
//!
//! ## Example
//!
//! ```
//! use isospan::{ScalarGrid, SpanSpaceIndex};
//!
//! // A 2x2x2 vertex grid: one cell with corner values 0..=7.
//! let grid = ScalarGrid::new((0..8).map(|v| v as f64).collect(), 2, 2, 2);
//! let index = SpanSpaceIndex::build(&grid);
//!
//! // The isosurface at 3.5 passes through the cell; 10 is out of range.
//! assert_eq!(index.query(3.5), vec![[0, 0, 0]]);
//! assert!(index.query(10.0).is_empty());
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is the [`SpanSpaceIndex`] struct, generic over the scalar
//! sample type; [`SpanIndex`] is its `f64` WASM wrapper.

mod grid;
mod span;
mod spantree;
mod index;
mod wasm;

pub use grid::ScalarGrid;
pub use span::CellRange;
pub use span::extract_ranges;
pub use spantree::SpanTree;
pub use index::SpanSpaceIndex;
pub use wasm::SpanIndex;
