//! Report orchestration: load, filter, aggregate, render, export.
//!
//! One invocation is atomic from the caller's perspective: it consumes the
//! full unified table and produces a complete set of section results, each
//! independently either a sheet or a section-scoped error. No failure in
//! one section affects another.

use std::{collections::BTreeSet, fs};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;

use crate::{
    aggregate::{self, AggregateRow},
    cli::{ExportArgs, ExportFormat, ReportArgs},
    config::ReportConfig,
    dataset::{RowFilter, UnifiedTable},
    error::SectionError,
    export::{self, Sheet},
    ingest, io_utils, numeric,
    roles::RoleRules,
    subjects, table,
};

pub const OVERVIEW_TITLE: &str = "Overview";
pub const DELIVERY_TITLE: &str = "Delivery of Lecture";
pub const SUPPORT_TITLE: &str = "Learner Support Centre";
pub const MASTER_TITLE: &str = "Master Dashboard";
pub const SUBJECTS_TITLE: &str = "Subject-wise Comparison";

/// One report section: a display title plus either its sheet or the error
/// that section-scoped computation surfaced.
#[derive(Debug)]
pub struct Section {
    pub title: &'static str,
    pub outcome: Result<Sheet, SectionError>,
}

#[derive(Debug)]
pub struct Report {
    pub sections: Vec<Section>,
}

/// Runs every aggregator over an already-filtered table.
pub fn build(filtered: &UnifiedTable, rules: &RoleRules) -> Report {
    let sections = vec![
        Section {
            title: OVERVIEW_TITLE,
            outcome: Ok(overview_sheet(filtered, rules)),
        },
        Section {
            title: DELIVERY_TITLE,
            outcome: aggregate::per_origin_average(filtered, rules)
                .map(|rows| average_sheet(DELIVERY_TITLE, "Source File", &rows)),
        },
        Section {
            title: SUPPORT_TITLE,
            outcome: aggregate::value_frequencies(filtered, rules)
                .map(|rows| frequency_sheet(SUPPORT_TITLE, "Learner Support Centre", &rows)),
        },
        Section {
            title: MASTER_TITLE,
            outcome: Ok(average_sheet(
                MASTER_TITLE,
                "Parameter",
                &aggregate::parameter_averages(filtered, rules),
            )),
        },
        Section {
            title: SUBJECTS_TITLE,
            outcome: subjects::detect(filtered, rules).map(|block| {
                let mut sheet = Sheet::new(SUBJECTS_TITLE, ["Subject", "Average Rating"]);
                for subject in block {
                    sheet.push_row(vec![subject.name, numeric::format_average(subject.average)]);
                }
                sheet
            }),
        },
    ];
    Report { sections }
}

fn overview_sheet(filtered: &UnifiedTable, rules: &RoleRules) -> Sheet {
    let overview = aggregate::overview(filtered, rules);
    let mut sheet = Sheet::new(OVERVIEW_TITLE, ["Metric", "Value"]);
    sheet.push_row(vec![
        "Total Responses".to_string(),
        overview.responses.to_string(),
    ]);
    sheet.push_row(vec![
        "Overall Average Rating".to_string(),
        numeric::format_average(overview.average),
    ]);
    sheet
}

fn average_sheet(title: &str, grouping_label: &'static str, rows: &[AggregateRow]) -> Sheet {
    let mut sheet = Sheet::new(title, [grouping_label, "Average Rating"]);
    for row in rows {
        sheet.push_row(vec![row.key.clone(), numeric::format_average(row.average)]);
    }
    sheet
}

fn frequency_sheet(title: &str, grouping_label: &'static str, rows: &[AggregateRow]) -> Sheet {
    let mut sheet = Sheet::new(title, [grouping_label, "Responses"]);
    for row in rows {
        sheet.push_row(vec![
            row.key.clone(),
            row.responses.unwrap_or_default().to_string(),
        ]);
    }
    sheet
}

fn row_filter(args_modes: &[crate::mode::Mode], args_origins: &[String]) -> RowFilter {
    RowFilter {
        modes: (!args_modes.is_empty()).then(|| args_modes.iter().copied().collect::<BTreeSet<_>>()),
        origins: (!args_origins.is_empty())
            .then(|| args_origins.iter().cloned().collect::<BTreeSet<_>>()),
    }
}

struct Prepared {
    report: Report,
    failures: Vec<ingest::LoadFailure>,
}

fn prepare(
    inputs: &[std::path::PathBuf],
    delimiter: Option<u8>,
    input_encoding: Option<&str>,
    config_path: Option<&std::path::Path>,
    modes: &[crate::mode::Mode],
    origins: &[String],
) -> Result<Prepared> {
    let config = ReportConfig::load_or_default(config_path)?;
    let encoding = io_utils::resolve_encoding(input_encoding)?;
    let outcome = ingest::load_sources(inputs, delimiter, encoding);
    let filtered = outcome.table.filtered(&row_filter(modes, origins));
    info!(
        "Selected {} of {} row(s) across {} column(s)",
        filtered.len(),
        outcome.table.len(),
        filtered.columns().len()
    );
    Ok(Prepared {
        report: build(&filtered, &config.rules),
        failures: outcome.failures,
    })
}

pub fn execute_report(args: &ReportArgs) -> Result<()> {
    let prepared = prepare(
        &args.inputs,
        args.delimiter,
        args.input_encoding.as_deref(),
        args.config.as_deref(),
        &args.modes,
        &args.origins,
    )?;

    for failure in &prepared.failures {
        println!("! {}: {:#}", failure.origin, failure.error);
    }
    for section in &prepared.report.sections {
        println!("\n{}", section.title);
        match &section.outcome {
            Ok(sheet) => table::print_table(&sheet.headers, &sheet.rows),
            Err(err) => println!("  {err}"),
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonSection<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sheet: Option<&'a Sheet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    sections: Vec<JsonSection<'a>>,
    load_failures: Vec<String>,
}

pub fn execute_export(args: &ExportArgs) -> Result<()> {
    let prepared = prepare(
        &args.inputs,
        args.delimiter,
        args.input_encoding.as_deref(),
        args.config.as_deref(),
        &args.modes,
        &args.origins,
    )?;

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Creating output directory {:?}", args.output))?;

    match args.format {
        ExportFormat::Csv => {
            for section in &prepared.report.sections {
                match &section.outcome {
                    Ok(sheet) => {
                        let path = export::write_sheet(&args.output, sheet)?;
                        info!("Wrote sheet '{}' to {path:?}", sheet.name);
                    }
                    Err(err) => warn!("Skipping sheet '{}': {err}", section.title),
                }
            }
        }
        ExportFormat::Json => {
            let document = JsonReport {
                sections: prepared
                    .report
                    .sections
                    .iter()
                    .map(|section| match &section.outcome {
                        Ok(sheet) => JsonSection {
                            title: section.title,
                            sheet: Some(sheet),
                            error: None,
                        },
                        Err(err) => JsonSection {
                            title: section.title,
                            sheet: None,
                            error: Some(err.to_string()),
                        },
                    })
                    .collect(),
                load_failures: prepared
                    .failures
                    .iter()
                    .map(|f| format!("{}: {:#}", f.origin, f.error))
                    .collect(),
            };
            let path = args.output.join("report.json");
            let file = fs::File::create(&path)
                .with_context(|| format!("Creating JSON report {path:?}"))?;
            serde_json::to_writer_pretty(file, &document)
                .with_context(|| format!("Writing JSON report {path:?}"))?;
            info!("Wrote JSON report to {path:?}");
        }
    }

    for failure in &prepared.failures {
        warn!("Source '{}' was not included: {:#}", failure.origin, failure.error);
    }
    Ok(())
}
