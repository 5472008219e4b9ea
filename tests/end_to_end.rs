//! Full runs against real workbooks on disk.

use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDate;
use expired_orders::{ReportConfig, ReportError, RunRequest, run};
use pretty_assertions::assert_eq;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

const HEADINGS: [&str; 8] = [
    "Practice",
    "Patient",
    "DOB",
    "Order #",
    "Test",
    "Expiration",
    "Physician",
    "Status",
];

/// Writes a source report: title row, heading row, then `rows` from row 2.
/// Empty strings are left as unwritten cells.
fn write_source(path: &Path, rows: &[[&str; 8]]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Expired Orders Report").unwrap();
    for (col, heading) in HEADINGS.iter().enumerate() {
        sheet.write_string(1, col as u16, *heading).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(r as u32 + 2, col as u16, *value).unwrap();
            }
        }
    }
    workbook.save(path).unwrap();
}

fn read_output(path: &Path) -> Vec<Vec<String>> {
    let mut workbook = open_workbook_auto(path).unwrap();
    let range = workbook.worksheet_range("Expired Orders").unwrap();
    let (last_row, _) = range.end().unwrap();
    (0..=last_row)
        .map(|r| {
            (0..8)
                .map(|c| match range.get_value((r, c)) {
                    Some(Data::String(s)) => s.clone(),
                    _ => String::new(),
                })
                .collect()
        })
        .collect()
}

fn request(run_date: (i32, u32, u32), report_path: PathBuf, target_dir: PathBuf) -> RunRequest {
    RunRequest {
        run_date: NaiveDate::from_ymd_opt(run_date.0, run_date.1, run_date.2).unwrap(),
        report_path,
        target_dir,
    }
}

fn owned(row: [&str; 8]) -> Vec<String> {
    row.iter().map(|s| s.to_string()).collect()
}

#[test]
fn keeps_next_month_and_drops_empty_practices() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("report.xlsx");
    write_source(
        &source,
        &[
            ["PracticeA", "", "", "", "", "", "", ""],
            ["", "Doe, Jane", "05-03-1980", "1001", "CBC", "Dec 15 2018 10:30AM", "Dr. Lee", "Open"],
            ["", "Roe, Rick", "06-04-1975", "1002", "BMP", "Nov 15 2018 10:30AM", "Dr. Lee", "Open"],
            ["PracticeC", "", "", "", "", "", "", ""],
            ["", "Poe, Pam", "07-08-1990", "1003", "TSH", "Jan 1 2019 12:00AM", "Dr. Kim", "Open"],
        ],
    );

    let outcome = run(
        &request((2018, 11, 18), source, dir.path().to_path_buf()),
        &ReportConfig::default(),
    )
    .unwrap();

    assert_eq!(
        outcome.output_path,
        dir.path().join("ExpiredOrders_DECEMBER_2018.xlsx")
    );
    assert_eq!(outcome.layout.rows_written, 3);

    let rows = read_output(&outcome.output_path);
    assert_eq!(
        rows,
        vec![
            owned(HEADINGS),
            owned(["PracticeA", "", "", "", "", "", "", ""]),
            owned([
                "",
                "Doe, Jane",
                "Mar 05, 1980",
                "1001",
                "CBC",
                "Dec 15 2018 10:30AM",
                "Dr. Lee",
                "Open"
            ]),
        ]
    );
}

#[test]
fn lenient_rows_survive_and_year_rolls_over() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("report.xlsx");
    write_source(
        &source,
        &[
            ["North", "", "", "", "", "", "", ""],
            ["", "No Expiry", "bad-dob", "1", "CBC", "", "", ""],
            ["", "Garbled", "", "2", "CBC", "sometime soon", "", ""],
            ["", "Padded", "01-02-2000", "3", "CBC", "Jan  9 2019  4:45PM", "", ""],
            ["", "Too Late", "01-02-2000", "4", "CBC", "Feb 1 2019 12:00AM", "", ""],
            ["South", "", "", "", "", "", "", ""],
            ["", "Also Padded", "", "5", "CBC", "Jan 31 2019 11:59PM", "", ""],
        ],
    );

    let outcome = run(
        &request((2018, 12, 3), source, dir.path().to_path_buf()),
        &ReportConfig::default(),
    )
    .unwrap();

    assert!(outcome.output_path.ends_with("ExpiredOrders_JANUARY_2019.xlsx"));
    let rows = read_output(&outcome.output_path);
    let names: Vec<&str> = rows.iter().map(|r| r[1].as_str()).collect();
    assert_eq!(
        names,
        vec!["Patient", "", "No Expiry", "Garbled", "Padded", "", "Also Padded"]
    );
    assert_eq!(rows[1][0], "North");
    assert_eq!(rows[2][2], "");
    assert_eq!(rows[4][2], "Feb 01, 2000");
    assert_eq!(rows[5][0], "South");
}

#[test]
fn missing_report_is_an_error_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let err = run(
        &request((2018, 11, 18), dir.path().join("absent.xlsx"), dir.path().to_path_buf()),
        &ReportConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ReportError::OpenReport { .. }));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn missing_target_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("report.xlsx");
    write_source(&source, &[]);

    let err = run(
        &request((2018, 11, 18), source, dir.path().join("nowhere")),
        &ReportConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ReportError::TargetDirectory(_)));
}

#[test]
fn named_source_sheet_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("report.xlsx");
    write_source(&source, &[]);

    let config = ReportConfig {
        source_sheet: Some("Nope".to_string()),
        ..ReportConfig::default()
    };
    let err = run(
        &request((2018, 11, 18), source, dir.path().to_path_buf()),
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, ReportError::SheetNotFound { .. }));
}

#[test]
fn date_typed_expirations_are_filtered_at_midnight_too() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("report.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let datetime_fmt = Format::new().set_num_format("yyyy-mm-dd hh:mm");
    for (col, heading) in HEADINGS.iter().enumerate() {
        sheet.write_string(1, col as u16, *heading).unwrap();
    }
    sheet.write_string(2, 0, "PracticeA").unwrap();
    let expirations = [
        ("January midnight", (2019, 1, 15, 0, 0)),
        ("January morning", (2019, 1, 15, 0, 1)),
        ("December midnight", (2018, 12, 20, 0, 0)),
    ];
    for (i, (patient, (y, m, d, hh, mm))) in expirations.iter().enumerate() {
        let row = 3 + i as u32;
        let expires = ExcelDateTime::from_ymd(*y, *m, *d)
            .unwrap()
            .and_hms(*hh, *mm, 0)
            .unwrap();
        sheet.write_string(row, 1, *patient).unwrap();
        sheet
            .write_datetime_with_format(row, 5, &expires, &datetime_fmt)
            .unwrap();
    }
    workbook.save(&source).unwrap();

    let outcome = run(
        &request((2018, 11, 18), source, dir.path().to_path_buf()),
        &ReportConfig::default(),
    )
    .unwrap();

    let rows = read_output(&outcome.output_path);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][0], "PracticeA");
    assert_eq!(rows[2][1], "December midnight");
    assert_eq!(rows[2][5], "Dec 20 2018 12:00AM");
}
