use std::collections::BTreeMap;

use serde_json::Value;

use crate::core::FmpError;
use crate::fundamentals::StatementLine;
use crate::search::CandidateMatch;

/// One output row, projected to column name -> rendered cell.
pub type Row = BTreeMap<String, String>;

/// Column names written by the envelope and error fields.
pub mod columns {
    pub const COMPANY_NAME: &str = "company_name";
    pub const MATCHED_NAME: &str = "matched_name";
    pub const SYMBOL: &str = "symbol";
    pub const EXCHANGE: &str = "exchange";
    pub const CURRENCY: &str = "currency";
    pub const DATE: &str = "date";
    pub const STATEMENT: &str = "statement";
    pub const ERROR: &str = "error";
}

pub const NO_MATCH_FOUND: &str = "No match found";
pub const NO_FINANCIAL_DATA: &str = "No financial data";

/// The company a name resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCompany {
    /// The name as read from the input.
    pub company_name: String,
    pub matched_name: String,
    pub symbol: String,
    pub exchange: String,
    pub currency: String,
}

impl ResolvedCompany {
    pub fn from_match(company_name: impl Into<String>, best: &CandidateMatch) -> Self {
        Self {
            company_name: company_name.into(),
            matched_name: best.name.clone(),
            symbol: best.symbol.clone(),
            exchange: best.exchange.clone(),
            currency: best.currency.clone(),
        }
    }

    fn write_into(&self, row: &mut Row) {
        row.insert(columns::COMPANY_NAME.into(), self.company_name.clone());
        row.insert(columns::MATCHED_NAME.into(), self.matched_name.clone());
        row.insert(columns::SYMBOL.into(), self.symbol.clone());
        row.insert(columns::EXCHANGE.into(), self.exchange.clone());
        row.insert(columns::CURRENCY.into(), self.currency.clone());
    }
}

/// How a single company ended up in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Financial,
    NoFinancialData,
    NoMatchFound,
    TaskFailed,
}

/// One row of the consolidated dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputRecord {
    /// A statement line annotated with the resolved company.
    Financial {
        company: ResolvedCompany,
        line: StatementLine,
    },
    /// The name resolved but no statement period survived.
    NoFinancialData { company: ResolvedCompany },
    /// The search returned nothing usable.
    NoMatchFound { company_name: String },
    /// The company's task aborted before producing records.
    TaskFailed {
        company_name: String,
        reason: String,
    },
}

impl OutputRecord {
    #[must_use]
    pub fn company_name(&self) -> &str {
        match self {
            Self::Financial { company, .. } | Self::NoFinancialData { company } => {
                &company.company_name
            }
            Self::NoMatchFound { company_name } | Self::TaskFailed { company_name, .. } => {
                company_name
            }
        }
    }

    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        match self {
            Self::Financial { .. } => Outcome::Financial,
            Self::NoFinancialData { .. } => Outcome::NoFinancialData,
            Self::NoMatchFound { .. } => Outcome::NoMatchFound,
            Self::TaskFailed { .. } => Outcome::TaskFailed,
        }
    }

    /// Text of the `error` column, if this is an error placeholder.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        match self {
            Self::Financial { .. } => None,
            Self::NoFinancialData { .. } => Some(NO_FINANCIAL_DATA.to_owned()),
            Self::NoMatchFound { .. } => Some(NO_MATCH_FOUND.to_owned()),
            Self::TaskFailed { reason, .. } => Some(format!("Task failed: {reason}")),
        }
    }

    /// Projects the record to columns. Missing values are simply absent.
    ///
    /// Envelope columns are written last, so they replace any same-named field the
    /// statement line itself carried.
    ///
    /// # Errors
    ///
    /// Returns `FmpError::Json` if a statement line cannot be serialized.
    pub fn to_row(&self) -> Result<Row, FmpError> {
        let mut row = Row::new();
        match self {
            Self::Financial { company, line } => {
                if let Value::Object(fields) = line.to_json()? {
                    for (k, v) in fields {
                        if let Some(cell) = render(&v) {
                            row.insert(k, cell);
                        }
                    }
                }
                row.insert(columns::STATEMENT.into(), line.kind().as_str().into());
                company.write_into(&mut row);
            }
            Self::NoFinancialData { company } => company.write_into(&mut row),
            Self::NoMatchFound { company_name } | Self::TaskFailed { company_name, .. } => {
                row.insert(columns::COMPANY_NAME.into(), company_name.clone());
            }
        }
        if let Some(err) = self.error() {
            row.insert(columns::ERROR.into(), err);
        }
        Ok(row)
    }
}

fn render(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) => f.to_string(),
            (None, None) => n.to_string(),
        }),
        other => Some(other.to_string()),
    }
}
