pub mod grid;
pub mod report;

pub use grid::{Grid, Row, SortDirection, cell_text};
pub use report::ReportSource;
