//! # floodprep-table
//!
//! The AutoRoute stream info table: one row per rasterized stream cell,
//! keyed by raster row/column and carrying the reach (`StreamID`) the cell
//! belongs to. Every preparation step reads the whole table, transforms it
//! and atomically replaces the file.
//!
//! ```text
//! DEM_1D_Index Row Col StreamID StreamDirection [Slope [Flow]]
//! ```
//!
//! The column set is tracked explicitly by [`Schema`], parsed from the
//! header by name.

mod error;
mod index;
mod read;
mod replace;
mod schema;
mod table;
mod write;

pub use error::TableError;
pub use index::StreamIdIndex;
pub use replace::{replace_with, temp_path_for};
pub use schema::{Delimiter, Schema};
pub use table::{StreamCell, StreamInfoTable};
