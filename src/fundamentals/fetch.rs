use tracing::{debug, warn};

use super::model::{BalanceSheetLine, CashFlowLine, IncomeStatementLine, StatementKind, StatementLine};
use crate::core::client::RetryConfig;
use crate::core::net::{ensure_success, get_text};
use crate::core::{FmpClient, FmpError};

/// Fetches one statement list for `symbol`, unfiltered.
///
/// # Errors
///
/// Returns `FmpError::Status`/`RateLimited` for non-2xx responses, or a decoding error
/// if the body is not a list of statement records.
pub async fn fetch_statement(
    client: &FmpClient,
    kind: StatementKind,
    symbol: &str,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<StatementLine>, FmpError> {
    let mut url = client.symbol_url(kind.path(), symbol)?;
    client.authorize(&mut url);

    debug!(%kind, symbol, "fetching statement");
    let resp = client
        .send_with_retry(
            client.http().get(url).header("accept", "application/json"),
            retry_override,
        )
        .await?;
    let resp = ensure_success(resp)?;
    let body = get_text(resp, kind.path(), symbol, "json")
        .await
        .map_err(|e| FmpError::Http(e.without_url()))?;

    decode_lines(kind, &body)
}

fn decode_lines(kind: StatementKind, body: &str) -> Result<Vec<StatementLine>, FmpError> {
    Ok(match kind {
        StatementKind::Income => serde_json::from_str::<Vec<IncomeStatementLine>>(body)?
            .into_iter()
            .map(StatementLine::Income)
            .collect(),
        StatementKind::BalanceSheet => serde_json::from_str::<Vec<BalanceSheetLine>>(body)?
            .into_iter()
            .map(StatementLine::BalanceSheet)
            .collect(),
        StatementKind::CashFlow => serde_json::from_str::<Vec<CashFlowLine>>(body)?
            .into_iter()
            .map(StatementLine::CashFlow)
            .collect(),
    })
}

/// Keeps lines whose period-end year is at least `min_year`.
///
/// Lines with an unparseable date are dropped.
pub fn retain_recent(lines: Vec<StatementLine>, min_year: i32) -> Vec<StatementLine> {
    lines
        .into_iter()
        .filter(|line| match line.year() {
            Some(year) => year >= min_year,
            None => {
                warn!(kind = %line.kind(), date = line.date(), "dropping statement line with unparseable date");
                false
            }
        })
        .collect()
}

/// Fetches income, balance-sheet and cash-flow statements for `symbol`, in that order,
/// keeping only periods from `min_year` onwards.
///
/// A failing endpoint is logged and contributes nothing; the other two are still tried.
pub async fn fetch_financials(
    client: &FmpClient,
    symbol: &str,
    min_year: i32,
    retry_override: Option<&RetryConfig>,
) -> Vec<StatementLine> {
    let mut out = Vec::new();
    for kind in StatementKind::ALL {
        match fetch_statement(client, kind, symbol, retry_override).await {
            Ok(lines) => out.extend(retain_recent(lines, min_year)),
            Err(e) => warn!(%kind, symbol, error = %e, "error fetching statement"),
        }
    }
    out
}
