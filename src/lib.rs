//! In-memory tables of numeric values keyed by hierarchical string labels.
//!
//! ```
//! use datatable::DataTable;
//!
//! let mut table = DataTable::new();
//! table.inc(2.0, ["x", "p"]);
//! table.inc(3.0, ["x", "q"]);
//! table.inc(4.0, ["y"]);
//!
//! let by_first = table.sum_distinct(&[0]);
//! assert_eq!(by_first.get(["x"]).unwrap(), 5.0);
//! assert_eq!(table.filter(["x"]).sum(), 5.0);
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod labels;
pub mod line;
pub mod table;

pub use error::{DataTableError, Result};
pub use labels::IntoLabel;
pub use line::Line;
pub use table::DataTable;
