use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info_span};

use fmea_cli::render::{
    classification_table, ratings_table, records_table, summary_fields, templates_table, to_json,
    warnings_table,
};
use fmea_ingest::{
    ParseOptions, SheetSelector, TemplateRegistry, WorkbookSource, parse_failure_effects,
    try_parse_with_options,
};
use fmea_model::{DocumentKind, ParseOutcome, Rating};
use fmea_priority::PriorityTable;

use crate::cli::{ClassifyArgs, EffectsArgs, OutputFormatArg, ParseArgs, TemplatesArgs};

/// A parse outcome with the kind of document it was read as.
pub struct ParseReport {
    pub outcome: ParseOutcome,
    pub document: DocumentKind,
}

fn load_registry(extra: Option<&Path>) -> Result<TemplateRegistry> {
    let mut registry = TemplateRegistry::builtin().context("load built-in templates")?;
    if let Some(path) = extra {
        let user = TemplateRegistry::load_file(path)
            .with_context(|| format!("load templates from {}", path.display()))?;
        registry.extend(user).context("register templates")?;
    }
    Ok(registry)
}

fn load_priority_table(path: Option<&Path>) -> Result<Option<PriorityTable>> {
    path.map(|path| {
        PriorityTable::load_file(path)
            .with_context(|| format!("load priority table from {}", path.display()))
    })
    .transpose()
}

pub fn build_parse_options(args: &ParseArgs) -> Result<ParseOptions> {
    let mut options = ParseOptions::new()
        .registry(load_registry(args.templates.as_deref())?)
        .derive_priority(!args.no_derive_ap);
    if let Some(name) = &args.sheet {
        options = options.sheet(SheetSelector::name(name.clone()));
    } else if let Some(index) = args.sheet_index {
        options = options.sheet(index);
    }
    if let Some(rows) = &args.header_rows {
        options = options.header_rows(rows.clone());
    }
    if let Some(id) = &args.template {
        options = options.template(id.clone());
    }
    if let Some(table) = load_priority_table(args.ap_table.as_deref())? {
        options = options.priority_table(table);
    }
    Ok(options)
}

/// Runs a parse. Worksheet problems land in the outcome; only bad CLI
/// inputs (template or table files) are errors.
pub fn parse_report(args: &ParseArgs) -> Result<ParseReport> {
    let options = build_parse_options(args)?;
    let report = match try_parse_with_options(WorkbookSource::Path(&args.file), &options) {
        Ok(extraction) => {
            let document = options
                .registry
                .as_ref()
                .and_then(|registry| registry.get(&extraction.template))
                .map_or(DocumentKind::Fmea, |template| template.document);
            ParseReport {
                outcome: extraction.into(),
                document,
            }
        }
        Err(err) => {
            error!(error = %err, file = %args.file.display(), "parse failed");
            ParseReport {
                outcome: ParseOutcome::error(err.to_string()),
                document: DocumentKind::Fmea,
            }
        }
    };
    Ok(report)
}

pub fn run_parse(args: &ParseArgs) -> Result<bool> {
    let span = info_span!("parse_command", file = %args.file.display());
    let _guard = span.enter();
    let report = parse_report(args)?;
    match args.format {
        OutputFormatArg::Json => {
            println!("{}", to_json(&report.outcome, args.compact)?);
        }
        OutputFormatArg::Table => match &report.outcome {
            ParseOutcome::Success {
                template,
                records,
                warnings,
            } => {
                println!("Template: {template}");
                println!("Records: {}", records.len());
                println!("{}", records_table(records, summary_fields(report.document)));
                if !warnings.is_empty() {
                    println!();
                    println!("Warnings:");
                    println!("{}", warnings_table(warnings));
                }
            }
            ParseOutcome::Error { message } => eprintln!("error: {message}"),
        },
    }
    Ok(report.outcome.is_success())
}

pub fn run_classify(args: &ClassifyArgs) -> Result<bool> {
    let custom = load_priority_table(args.ap_table.as_deref())?;
    let table = custom.as_ref().unwrap_or_else(|| PriorityTable::standard());
    let severity = Rating::new(args.severity)?;
    let occurrence = Rating::new(args.occurrence)?;
    let detection = Rating::new(args.detection)?;
    let classification = table.classify(severity, occurrence, detection);

    println!(
        "{}",
        classification_table(severity, occurrence, detection, &classification)
    );
    println!(
        "Action Priority: {} ({})",
        classification.priority.code(),
        classification.priority.name()
    );
    if classification.fallback {
        println!(
            "Bands {} are not in the table; defaulted to {}.",
            classification.bands, classification.priority
        );
    }
    Ok(true)
}

pub fn run_templates(args: &TemplatesArgs) -> Result<bool> {
    let registry = load_registry(args.templates.as_deref())?;
    println!("{}", templates_table(&registry));
    Ok(true)
}

pub fn run_ratings() -> Result<bool> {
    println!("{}", ratings_table());
    Ok(true)
}

pub fn run_effects(args: &EffectsArgs) -> Result<bool> {
    let sheet = args.sheet.clone().map(SheetSelector::Name);
    let outcome = parse_failure_effects(WorkbookSource::Path(&args.file), sheet.as_ref());
    println!("{}", to_json(&outcome, args.compact)?);
    Ok(matches!(outcome, fmea_ingest::EffectsOutcome::Success { .. }))
}
