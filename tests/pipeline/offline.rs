use std::time::Duration;

use company_financials::output::{NO_FINANCIAL_DATA, NO_MATCH_FOUND, Outcome};
use company_financials::{Backoff, CompanyProcessor, OutputRecord, RetryConfig};
use httpmock::Method::GET;

use crate::common::{client, config, fixture, mock_all_statements, mock_search, mock_statement_status, setup_server};

#[tokio::test]
async fn resolved_company_yields_one_record_per_line() {
    let server = setup_server();
    let search = mock_search(&server, "Acme Corp", fixture("search", "Acme_Corp", "json"));
    let statements = mock_all_statements(&server, "ACME");
    let processor = CompanyProcessor::new(client(&server), &config(&server));

    let records = processor.process("Acme Corp").await;

    search.assert();
    for m in &statements {
        m.assert();
    }
    assert_eq!(records.len(), 6);
    for rec in &records {
        let OutputRecord::Financial { company, .. } = rec else {
            panic!("expected financial record, got {rec:?}");
        };
        assert_eq!(company.company_name, "Acme Corp");
        assert_eq!(company.symbol, "ACME");
        assert_eq!(company.exchange, "TSX");
        assert_eq!(company.currency, "CAD");
        assert_eq!(company.matched_name, "Acme Corp");
    }
}

#[tokio::test]
async fn resolved_symbol_replaces_provider_symbol() {
    let server = setup_server();
    let _search = mock_search(&server, "Acme Corp", fixture("search", "Acme_Corp", "json"));
    let _statements = mock_all_statements(&server, "ACME");
    let processor = CompanyProcessor::new(client(&server), &config(&server));

    let records = processor.process("Acme Corp").await;
    let row = records[0].to_row().unwrap();

    assert_eq!(row["symbol"], "ACME");
    assert_eq!(row["statement"], "income");
    assert_eq!(row["revenue"], "1250000000");
    assert!(!row.contains_key("error"));
}

#[tokio::test]
async fn empty_search_yields_no_match_found() {
    let server = setup_server();
    let search = mock_search(&server, "Nobody Ltd", "[]".to_string());
    let processor = CompanyProcessor::new(client(&server), &config(&server));

    let records = processor.process("Nobody Ltd").await;

    search.assert();
    assert_eq!(
        records,
        vec![OutputRecord::NoMatchFound {
            company_name: "Nobody Ltd".into()
        }]
    );
    let row = records[0].to_row().unwrap();
    assert_eq!(row.len(), 2);
    assert_eq!(row["company_name"], "Nobody Ltd");
    assert_eq!(row["error"], NO_MATCH_FOUND);
}

#[tokio::test]
async fn no_statements_yields_no_financial_data_with_match_fields() {
    let server = setup_server();
    let _search = mock_search(&server, "Acme Corp", fixture("search", "Acme_Corp", "json"));
    for endpoint in ["income-statement", "balance-sheet-statement", "cash-flow-statement"] {
        mock_statement_status(&server, endpoint, "ACME", 500);
    }
    let processor = CompanyProcessor::new(client(&server), &config(&server));

    let records = processor.process("Acme Corp").await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].outcome(), Outcome::NoFinancialData);
    let row = records[0].to_row().unwrap();
    assert_eq!(row["company_name"], "Acme Corp");
    assert_eq!(row["matched_name"], "Acme Corp");
    assert_eq!(row["symbol"], "ACME");
    assert_eq!(row["exchange"], "TSX");
    assert_eq!(row["currency"], "CAD");
    assert_eq!(row["error"], NO_FINANCIAL_DATA);
}

#[tokio::test]
async fn custom_ranking_changes_the_pick() {
    let server = setup_server();
    let _search = mock_search(&server, "Acme Corp", fixture("search", "Acme_Corp", "json"));
    for endpoint in ["income-statement", "balance-sheet-statement", "cash-flow-statement"] {
        mock_statement_status(&server, endpoint, "ACME.L", 404);
    }
    let mut cfg = config(&server);
    cfg.preferred_exchanges = vec!["LSE".into()];
    let processor = CompanyProcessor::new(client(&server), &cfg);

    let records = processor.process("Acme Corp").await;

    let OutputRecord::NoFinancialData { company } = &records[0] else {
        panic!("expected no financial data, got {:?}", records[0]);
    };
    assert_eq!(company.symbol, "ACME.L");
}

#[tokio::test]
async fn processor_retry_policy_covers_search() {
    let server = setup_server();
    let search = server.mock(|when, then| {
        when.method(GET).path("/api/v3/search");
        then.status(503);
    });
    let retry = RetryConfig {
        max_retries: 2,
        backoff: Backoff::Fixed(Duration::from_millis(1)),
        ..RetryConfig::default()
    };
    let processor = CompanyProcessor::new(client(&server), &config(&server)).retry_policy(Some(retry));

    let records = processor.process("Flaky Co").await;

    search.assert_calls(3);
    assert_eq!(records[0].outcome(), Outcome::NoMatchFound);
}
