//! Input parsing, data sources and table storage.

mod fetch;
mod parquet;
mod parser;
mod source;
mod table;

use std::path::Path;

use crate::error::Result;

pub use fetch::fetch;
pub use parquet::{read_parquet, write_parquet};
pub use parser::{Parser, ParserConfig};
pub use source::SourceMetadata;
pub use table::DataTable;

/// Load a table from disk, choosing the reader by file extension.
///
/// `.parquet` and `.pq` files go through the Parquet reader, anything else is
/// parsed as delimited text.
pub fn load_table(path: impl AsRef<Path>) -> Result<DataTable> {
    let path = path.as_ref();
    let is_parquet = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"))
        .unwrap_or(false);

    if is_parquet {
        read_parquet(path)
    } else {
        Parser::new().parse_file(path).map(|(table, _)| table)
    }
}
