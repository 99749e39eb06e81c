//! The parse boundary: worksheet bytes in, records or one error out.
//!
//! `parse*` functions never fail or panic past this point. Structural
//! problems become a single [`ParseOutcome::Error`]; everything recoverable
//! is carried as warnings on the success outcome.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use fmea_model::{ParseOutcome, ParseWarning, Record, TemplateSpec};
use fmea_priority::PriorityTable;

use crate::error::{IngestError, Result};
use crate::extract::extract_records;
use crate::header::{FlattenedHeader, flatten_header};
use crate::mapping::map_columns;
use crate::options::{ParseOptions, TemplateChoice};
use crate::sheet::RawSheet;
use crate::template::{Detection, TemplateRegistry, best_match, signature_score};
use crate::workbook::{SheetSelector, Workbook, WorkbookSource};

/// Records extracted by one successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Id of the template used.
    pub template: String,
    /// Name of the sheet read.
    pub sheet: String,
    /// Flattened header labels, one per physical column.
    pub labels: Vec<String>,
    pub records: Vec<Record>,
    pub warnings: Vec<ParseWarning>,
}

impl From<Extraction> for ParseOutcome {
    fn from(extraction: Extraction) -> Self {
        ParseOutcome::Success {
            template: extraction.template,
            records: extraction.records,
            warnings: extraction.warnings,
        }
    }
}

/// A template paired with the sheet and header it was resolved against.
struct Layout<'t> {
    template: &'t TemplateSpec,
    sheet: String,
    header_rows: Vec<usize>,
    header: FlattenedHeader,
}

type SheetCache = HashMap<String, RawSheet>;

fn cached_sheet<'c>(
    workbook: &mut Workbook<'_>,
    cache: &'c mut SheetCache,
    selector: &SheetSelector,
) -> Result<&'c RawSheet> {
    let name = workbook.resolve(selector)?;
    match cache.entry(name) {
        Entry::Occupied(entry) => Ok(entry.into_mut()),
        Entry::Vacant(entry) => Ok(entry.insert(workbook.read_sheet(selector)?)),
    }
}

fn resolve_layout<'t>(
    workbook: &mut Workbook<'_>,
    cache: &mut SheetCache,
    template: &'t TemplateSpec,
    options: &ParseOptions,
) -> Result<Layout<'t>> {
    let selector = options
        .sheet
        .clone()
        .unwrap_or_else(|| SheetSelector::Name(template.sheet.clone()));
    let header_rows = options
        .header_rows
        .clone()
        .unwrap_or_else(|| template.header_rows.clone());
    let sheet = cached_sheet(workbook, cache, &selector)?;
    let levels = sheet.header_region(&header_rows)?;
    let header = flatten_header(&levels, sheet.width(), &template.header);
    Ok(Layout {
        template,
        sheet: sheet.name().to_string(),
        header_rows,
        header,
    })
}

/// Tries every registered template and keeps the best signature match.
///
/// Templates whose default sheet or header rows are absent are skipped
/// unless the caller pinned them, in which case the failure is structural.
fn detect_layout<'t>(
    workbook: &mut Workbook<'_>,
    cache: &mut SheetCache,
    registry: &'t TemplateRegistry,
    options: &ParseOptions,
) -> Result<Layout<'t>> {
    let mut layouts = Vec::new();
    let mut scores = Vec::new();
    for template in registry.templates() {
        if options.sheet.is_none()
            && !workbook.has_sheet(&SheetSelector::Name(template.sheet.clone()))
        {
            tracing::trace!(template = %template.id, sheet = %template.sheet, "sheet absent");
            continue;
        }
        let layout = match resolve_layout(workbook, cache, template, options) {
            Ok(layout) => layout,
            Err(IngestError::HeaderRowOutOfRange { .. }) if options.header_rows.is_none() => {
                tracing::trace!(template = %template.id, "header rows absent");
                continue;
            }
            Err(err) => return Err(err),
        };
        if let Some(score) = signature_score(template, &layout.header.labels) {
            tracing::debug!(template = %template.id, score, "template signature matched");
            scores.push(score);
            layouts.push(layout);
        }
    }

    let best = best_match(layouts.iter().zip(&scores).map(|(layout, &score)| Detection {
        template: layout.template,
        score,
    }))
    .map(|detection| detection.template.id.clone());
    if let Some(id) = best
        && let Some(position) = layouts.iter().position(|layout| layout.template.id == id)
    {
        return Ok(layouts.swap_remove(position));
    }

    match (&options.sheet, registry.default_fmea()) {
        (Some(sheet), Some(fallback)) => {
            tracing::warn!(
                sheet = %sheet,
                template = %fallback.id,
                "no template signature matched, using default layout"
            );
            resolve_layout(workbook, cache, fallback, options)
        }
        _ => Err(IngestError::NoTemplateMatched),
    }
}

/// Parses with explicit options, returning typed errors.
pub fn try_parse_with_options(
    source: WorkbookSource<'_>,
    options: &ParseOptions,
) -> Result<Extraction> {
    let _span = tracing::info_span!("parse", source = %source).entered();

    if options.header_rows.as_ref().is_some_and(Vec::is_empty) {
        return Err(IngestError::EmptyHeaderSpec);
    }
    let builtin;
    let registry = match &options.registry {
        Some(registry) => registry,
        None => {
            builtin = TemplateRegistry::builtin()?;
            &builtin
        }
    };
    let table = options
        .priority_table
        .as_ref()
        .unwrap_or_else(|| PriorityTable::standard());

    let mut workbook = Workbook::open(source)?;
    let mut cache = SheetCache::new();
    let layout = match &options.template {
        TemplateChoice::Id(id) => {
            let template = registry.require(id)?;
            resolve_layout(&mut workbook, &mut cache, template, options)?
        }
        TemplateChoice::Auto => detect_layout(&mut workbook, &mut cache, registry, options)?,
    };
    let Layout {
        template,
        sheet,
        header_rows,
        header,
    } = layout;
    let raw = cache
        .get(&sheet)
        .ok_or_else(|| IngestError::SheetNotFound {
            sheet: sheet.clone(),
            available: workbook.sheet_names().to_vec(),
        })?;

    let bindings = map_columns(&template.fields, &header.labels);
    let mut warnings: Vec<ParseWarning> = header.drift.into_iter().collect();
    let unresolved = bindings.warnings();
    if !unresolved.is_empty() {
        tracing::warn!(
            template = %template.id,
            unresolved = unresolved.len(),
            "some fields have no source column"
        );
    }
    warnings.extend(unresolved);

    let data_start = header_rows.iter().max().map_or(0, |row| row + 1);
    let (records, row_warnings) = extract_records(
        raw,
        data_start,
        template,
        &bindings,
        options.derive_priority.then_some(table),
    );
    warnings.extend(row_warnings);

    tracing::info!(
        template = %template.id,
        sheet = %sheet,
        records = records.len(),
        warnings = warnings.len(),
        "parsed worksheet"
    );
    Ok(Extraction {
        template: template.id.clone(),
        sheet,
        labels: header.labels,
        records,
        warnings,
    })
}

/// Parses with explicit options into a tagged outcome.
pub fn parse_with_options(source: WorkbookSource<'_>, options: &ParseOptions) -> ParseOutcome {
    match try_parse_with_options(source, options) {
        Ok(extraction) => extraction.into(),
        Err(err) => {
            tracing::error!(error = %err, "parse failed");
            ParseOutcome::error(err.to_string())
        }
    }
}

/// Parses `sheet` with the given 0-based header rows, detecting the
/// template from the header.
pub fn parse(
    source: WorkbookSource<'_>,
    sheet: &SheetSelector,
    header_rows: &[usize],
) -> ParseOutcome {
    let options = ParseOptions::new()
        .sheet(sheet.clone())
        .header_rows(header_rows);
    parse_with_options(source, &options)
}
