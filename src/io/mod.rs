//! Input/output helpers.
//!
//! - flat CSV export of a view's chart data (`export`)
//! - view JSON read/write (`view_file`)

pub mod export;
pub mod view_file;

pub use export::*;
pub use view_file::*;
