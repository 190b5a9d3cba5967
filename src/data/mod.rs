//! Dataset loading.
//!
//! - one-shot remote fetch of the sales CSV (`remote`)
//! - CSV parsing + schema checks (`table`)
//!
//! The dataset is loaded exactly once at process start and never refreshed;
//! every later recomputation works off the in-memory `SalesTable`.

use std::path::Path;

use crate::domain::SalesTable;
use crate::error::AppError;

pub mod remote;
pub mod table;

pub use remote::*;
pub use table::*;

/// Resolve the data-source flags to a loaded table.
///
/// A local file wins over a URL override, which wins over the environment /
/// built-in default.
pub fn load_table(data_file: Option<&Path>, data_url: Option<&str>) -> Result<SalesTable, AppError> {
    if let Some(path) = data_file {
        return table::load_sales_file(path);
    }
    let client = match data_url {
        Some(url) => DatasetClient::with_url(url.to_string()),
        None => DatasetClient::from_env(),
    };
    client.fetch()
}
