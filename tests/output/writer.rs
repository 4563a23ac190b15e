use company_financials::fundamentals::{BalanceSheetLine, FilingMeta};
use company_financials::output::{Row, union_columns, write_records, write_rows};
use company_financials::{CandidateMatch, OutputRecord, ResolvedCompany, StatementLine, write_consolidated};

fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

fn resolved() -> ResolvedCompany {
    ResolvedCompany::from_match(
        "Maple Foods",
        &CandidateMatch::new("MFI", "Maple Leaf Foods Inc.", "TSX", "CAD"),
    )
}

#[test]
fn header_is_sorted_union_with_blank_gaps() {
    let rows = vec![row(&[("a", "1"), ("b", "2")]), row(&[("a", "3"), ("c", "4")])];
    let mut out = Vec::new();
    write_rows(&rows, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "a,b,c\n1,2,\n3,,4\n");
}

#[test]
fn union_columns_sorts_lexicographically() {
    let rows = vec![row(&[("zeta", "")]), row(&[("Alpha", ""), ("beta", "")])];
    assert_eq!(union_columns(&rows), ["Alpha", "beta", "zeta"]);
}

#[test]
fn empty_input_writes_nothing() {
    let mut out = Vec::new();
    assert_eq!(write_records(&[], &mut out).unwrap(), 0);
    assert!(out.is_empty());
}

#[test]
fn financial_record_projection() {
    let line = StatementLine::BalanceSheet(BalanceSheetLine {
        date: Some("2023-12-31".into()),
        filing: FilingMeta {
            symbol: Some("MFI.TO".into()),
            reported_currency: Some("CAD".into()),
            period: Some("FY".into()),
            ..FilingMeta::default()
        },
        total_assets: Some(7_123_456.0),
        total_debt: Some(12.5),
        ..BalanceSheetLine::default()
    });
    let rec = OutputRecord::Financial {
        company: resolved(),
        line,
    };

    let row = rec.to_row().unwrap();

    assert_eq!(row["company_name"], "Maple Foods");
    assert_eq!(row["matched_name"], "Maple Leaf Foods Inc.");
    assert_eq!(row["symbol"], "MFI");
    assert_eq!(row["exchange"], "TSX");
    assert_eq!(row["currency"], "CAD");
    assert_eq!(row["reportedCurrency"], "CAD");
    assert_eq!(row["date"], "2023-12-31");
    assert_eq!(row["statement"], "balance_sheet");
    assert_eq!(row["totalAssets"], "7123456");
    assert_eq!(row["totalDebt"], "12.5");
    assert!(!row.contains_key("inventory"), "missing figures stay absent");
    assert!(!row.contains_key("error"));
}

#[test]
fn task_failure_projection() {
    let rec = OutputRecord::TaskFailed {
        company_name: "Broken Co".into(),
        reason: "task 7 panicked".into(),
    };
    let row = rec.to_row().unwrap();
    assert_eq!(row.len(), 2);
    assert_eq!(row["error"], "Task failed: task 7 panicked");
}

#[test]
fn consolidated_file_mixes_outcomes() {
    let records = vec![
        OutputRecord::NoFinancialData { company: resolved() },
        OutputRecord::NoMatchFound {
            company_name: "Ghost LLC".into(),
        },
    ];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let n = write_consolidated(&records, &path).unwrap();

    assert_eq!(n, 2);
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "company_name,currency,error,exchange,matched_name,symbol\n\
         Maple Foods,CAD,No financial data,TSX,Maple Leaf Foods Inc.,MFI\n\
         Ghost LLC,,No match found,,,\n"
    );
}
