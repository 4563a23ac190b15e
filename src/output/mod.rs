//! Output records, the consolidated CSV writer and the cleanup pass.

mod process;
mod record;
mod writer;

pub use process::{METADATA_COLUMNS, ProcessSummary, process_financial_data, process_reader};
pub use record::{
    NO_FINANCIAL_DATA, NO_MATCH_FOUND, Outcome, OutputRecord, ResolvedCompany, Row, columns,
};
pub use writer::{union_columns, write_consolidated, write_records, write_rows};
