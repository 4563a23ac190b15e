//! Financial statements for a resolved symbol.

mod fetch;
mod model;

pub use fetch::{fetch_financials, fetch_statement, retain_recent};
pub use model::{
    BalanceSheetLine, CashFlowLine, FilingMeta, IncomeStatementLine, StatementKind, StatementLine,
};
