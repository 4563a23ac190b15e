use std::path::{Path, PathBuf};

use company_financials::FmpError;
use company_financials::input::{read_company_names, read_company_names_from, read_company_names_from_workbook};

fn workbook_fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/companies.xlsx")
}

#[test]
fn names_are_trimmed_and_blanks_skipped() {
    let csv = "State,Company Name,Employees\nON,  Maple Foods ,120\nTX,,4\nNY,Acme Corp,9\nCA,   ,1\nNY,Acme Corp,9\n";
    let names = read_company_names_from(csv.as_bytes(), "Company Name").unwrap();
    assert_eq!(names, ["Maple Foods", "Acme Corp", "Acme Corp"]);
}

#[test]
fn short_rows_are_tolerated() {
    let csv = "Company Name,State\nAcme Corp\nZeta Corp,WA\n";
    let names = read_company_names_from(csv.as_bytes(), "Company Name").unwrap();
    assert_eq!(names, ["Acme Corp", "Zeta Corp"]);
}

#[test]
fn custom_column_name() {
    let csv = "issuer\nAcme Corp\n";
    let names = read_company_names_from(csv.as_bytes(), "issuer").unwrap();
    assert_eq!(names, ["Acme Corp"]);
}

#[test]
fn missing_column_is_an_error() {
    let err = read_company_names_from("Name\nAcme\n".as_bytes(), "Company Name").unwrap_err();
    assert!(err.to_string().contains("Company Name"), "got {err}");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_company_names(&dir.path().join("absent.csv"), "Company Name").unwrap_err();
    assert!(matches!(err, FmpError::Io(_)));
}

#[test]
fn non_utf8_cells_do_not_abort() {
    // Latin-1 export
    let csv: &[u8] = b"Company Name\nSoci\xe9t\xe9 G\xe9n\xe9rale\nAcme Corp\nZeta Corp\n";
    let names = read_company_names_from(csv, "Company Name").unwrap();
    assert_eq!(names.len(), 3);
    assert!(names[0].starts_with("Soci"));
    assert_eq!(names[1..], ["Acme Corp", "Zeta Corp"]);
}

#[test]
fn workbook_first_sheet_is_read() {
    let names = read_company_names_from_workbook(&workbook_fixture(), "Company Name").unwrap();
    assert_eq!(names, ["Maple Foods", "Acme Corp", "Acme Corp"]);
}

#[test]
fn workbook_is_picked_by_extension() {
    let names = read_company_names(&workbook_fixture(), "Company Name").unwrap();
    assert_eq!(names, ["Maple Foods", "Acme Corp", "Acme Corp"]);
}

#[test]
fn workbook_without_column_is_an_error() {
    let err = read_company_names(&workbook_fixture(), "Issuer").unwrap_err();
    assert!(matches!(err, FmpError::Data(_)), "got {err:?}");
}

#[test]
fn unknown_extension_falls_back_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("companies.txt");
    std::fs::write(&path, "Company Name\nAcme Corp\n").unwrap();
    assert_eq!(read_company_names(&path, "Company Name").unwrap(), ["Acme Corp"]);
}

#[test]
fn corrupt_workbook_is_a_spreadsheet_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, "Company Name\nAcme Corp\n").unwrap();
    let err = read_company_names(&path, "Company Name").unwrap_err();
    assert!(matches!(err, FmpError::Spreadsheet(_)), "got {err:?}");
}
