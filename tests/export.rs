mod common;

use common::{TestWorkspace, write_standard_fixtures};

use feedback_rollup::{
    cli::{ExportArgs, ExportFormat},
    export::{self, Sheet},
    report,
};

#[test]
fn sheet_round_trips_through_csv() {
    let workspace = TestWorkspace::new();
    let mut sheet = Sheet::new("Delivery of Lecture", ["Source File", "Average Rating"]);
    sheet.push_row(vec!["distance_bed.csv".to_string(), "4.00".to_string()]);
    sheet.push_row(vec!["online_mca.csv".to_string(), "".to_string()]);
    sheet.push_row(vec!["with, comma.csv".to_string(), "1.50".to_string()]);

    let path = export::write_sheet(workspace.path(), &sheet).expect("write sheet");
    assert_eq!(path.file_name().unwrap(), "delivery_of_lecture.csv");

    let reread = export::read_sheet(&path).expect("read sheet");
    assert_eq!(reread.headers, sheet.headers);
    assert_eq!(reread.rows, sheet.rows);
}

#[test]
fn long_section_names_truncate_to_sheet_limit() {
    let sheet = Sheet::new(
        "Subject-wise Detailed Comparison (Delivery of Lecture)",
        ["Subject", "Average Rating"],
    );
    assert_eq!(sheet.name.chars().count(), 31);
}

#[test]
fn csv_export_writes_one_file_per_successful_section() {
    let workspace = TestWorkspace::new();
    let inputs = write_standard_fixtures(&workspace);
    let out_dir = workspace.path().join("sheets");

    let args = ExportArgs {
        inputs,
        output: out_dir.clone(),
        format: ExportFormat::Csv,
        modes: Vec::new(),
        origins: Vec::new(),
        config: None,
        delimiter: None,
        input_encoding: None,
    };
    report::execute_export(&args).expect("export");

    for expected in [
        "overview.csv",
        "delivery_of_lecture.csv",
        "learner_support_centre.csv",
        "master_dashboard.csv",
        "subject_wise_comparison.csv",
    ] {
        assert!(out_dir.join(expected).exists(), "missing {expected}");
    }

    let delivery = export::read_sheet(&out_dir.join("delivery_of_lecture.csv")).expect("sheet");
    assert_eq!(delivery.rows[0], ["distance_bed.csv", "4.00"]);
}

#[test]
fn json_export_reports_sections_and_load_failures() {
    let workspace = TestWorkspace::new();
    let mut inputs = write_standard_fixtures(&workspace);
    inputs.push(workspace.path().join("dtl_missing.csv"));
    let out_dir = workspace.path().join("json");

    let args = ExportArgs {
        inputs,
        output: out_dir.clone(),
        format: ExportFormat::Json,
        modes: Vec::new(),
        origins: Vec::new(),
        config: None,
        delimiter: None,
        input_encoding: None,
    };
    report::execute_export(&args).expect("export");

    let raw = std::fs::read_to_string(out_dir.join("report.json")).expect("read json");
    let document: serde_json::Value = serde_json::from_str(&raw).expect("parse json");

    let sections = document["sections"].as_array().expect("sections");
    assert_eq!(sections.len(), 5);
    assert_eq!(sections[0]["title"], "Overview");
    assert_eq!(sections[0]["sheet"]["rows"][0][1], "5");

    let failures = document["load_failures"].as_array().expect("failures");
    assert_eq!(failures.len(), 1);
    assert!(failures[0].as_str().unwrap().contains("dtl_missing.csv"));
}
