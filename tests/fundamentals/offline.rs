use company_financials::fundamentals::{IncomeStatementLine, fetch_statement, retain_recent};
use company_financials::{StatementKind, StatementLine, fetch_financials};

use crate::common::{client, mock_all_statements, mock_statement, setup_server};

#[tokio::test]
async fn fetch_statement_returns_every_period() {
    let server = setup_server();
    let mock = mock_statement(&server, "income-statement", "ACME");
    let client = client(&server);

    let lines = fetch_statement(&client, StatementKind::Income, "ACME", None)
        .await
        .unwrap();

    mock.assert();
    let dates: Vec<&str> = lines.iter().map(StatementLine::date).collect();
    assert_eq!(dates, ["2023-12-31", "2022-12-31", "2021-01-01", "2020-12-31"]);

    let StatementLine::Income(latest) = &lines[0] else {
        panic!("expected an income line, got {:?}", lines[0]);
    };
    assert_eq!(latest.revenue, Some(1_250_000_000.0));
    assert_eq!(latest.eps_diluted, Some(1.94));
    assert_eq!(latest.filing.symbol.as_deref(), Some("ACME.TO"));
    assert_eq!(latest.filing.calendar_year.as_deref(), Some("2023"));

    // calendarYear arrives as a bare number for this period
    let StatementLine::Income(prior) = &lines[1] else {
        panic!("expected an income line");
    };
    assert_eq!(prior.filing.calendar_year.as_deref(), Some("2022"));
    assert_eq!(prior.filing.link, None);
}

#[tokio::test]
async fn financials_respect_lookback_and_endpoint_order() {
    let server = setup_server();
    let mocks = mock_all_statements(&server, "ACME");
    let client = client(&server);

    let lines = fetch_financials(&client, "ACME", 2021, None).await;

    for m in &mocks {
        m.assert();
    }
    let got: Vec<(StatementKind, &str)> = lines.iter().map(|l| (l.kind(), l.date())).collect();
    assert_eq!(
        got,
        [
            (StatementKind::Income, "2023-12-31"),
            (StatementKind::Income, "2022-12-31"),
            (StatementKind::Income, "2021-01-01"),
            (StatementKind::BalanceSheet, "2023-12-31"),
            (StatementKind::CashFlow, "2023-12-31"),
            (StatementKind::CashFlow, "2022-12-31"),
        ]
    );
}

#[tokio::test]
async fn lenient_numbers_in_cash_flow() {
    let server = setup_server();
    let _mock = mock_statement(&server, "cash-flow-statement", "ACME");
    let client = client(&server);

    let lines = fetch_statement(&client, StatementKind::CashFlow, "ACME", None)
        .await
        .unwrap();

    let StatementLine::CashFlow(older) = &lines[1] else {
        panic!("expected a cash-flow line");
    };
    assert_eq!(older.operating_cash_flow, Some(150_000_000.0));
    assert_eq!(older.free_cash_flow, None);
}

#[test]
fn unparseable_dates_are_dropped() {
    let line = |date: Option<&str>| {
        StatementLine::Income(IncomeStatementLine {
            date: date.map(str::to_owned),
            ..IncomeStatementLine::default()
        })
    };
    let kept = retain_recent(
        vec![
            line(Some("2021-06-30")),
            line(Some("n/a")),
            line(Some("")),
            line(None),
            line(Some("2020-12-31")),
        ],
        2021,
    );
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].date(), "2021-06-30");
}

#[tokio::test]
async fn bad_dates_drop_only_their_own_lines() {
    let server = setup_server();
    let mock = mock_statement(&server, "income-statement", "PARTIAL");
    let client = client(&server);

    let all = fetch_statement(&client, StatementKind::Income, "PARTIAL", None)
        .await
        .unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[1].date(), "");
    assert_eq!(all[2].date(), "20220630");
    let StatementLine::Income(q2) = &all[2] else {
        panic!("expected an income line");
    };
    assert_eq!(q2.net_income, None);

    let kept = retain_recent(all, 2021);
    mock.assert();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].date(), "2023-12-31");
}
