//! Multi-row header flattening.
//!
//! Each column's label is the space-joined sequence of its non-empty header
//! levels, top to bottom, with internal whitespace collapsed. The result
//! always has one label per physical column.

use fmea_model::{HeaderOptions, ParseWarning};

/// Flattened labels plus the drift warning raised while aligning them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedHeader {
    pub labels: Vec<String>,
    pub drift: Option<ParseWarning>,
}

/// Collapses runs of whitespace (including newlines) to single spaces.
pub fn normalize_label(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comparison key for labels: normalized and lowercased.
pub fn label_key(raw: &str) -> String {
    normalize_label(raw).to_lowercase()
}

/// Name given to a column without any usable header level.
pub fn synthetic_label(column: usize) -> String {
    format!("column_{column}")
}

fn clean_level(raw: Option<&String>, options: &HeaderOptions) -> String {
    let level = raw.map(|value| normalize_label(value)).unwrap_or_default();
    if options.is_placeholder(&level) {
        String::new()
    } else {
        level
    }
}

/// Carries upper-level labels rightwards over blank cells, as a merged
/// group heading spans its sub-columns. A group never extends past a
/// column where a higher-level group starts, nor into columns with no
/// lower-level label.
fn fill_merged_levels(grid: &mut [Vec<String>]) {
    let depth = grid.len();
    let Some(width) = grid.first().map(Vec::len) else {
        return;
    };
    let mut boundaries = vec![false; width];
    for level in 0..depth.saturating_sub(1) {
        let mut carried: Option<String> = None;
        for column in 0..width {
            if !grid[level][column].is_empty() {
                carried = Some(grid[level][column].clone());
                boundaries[column] = true;
                continue;
            }
            if boundaries[column] {
                carried = None;
            }
            let has_lower = grid[level + 1..]
                .iter()
                .any(|row| !row[column].is_empty());
            if has_lower && let Some(label) = carried.clone() {
                grid[level][column] = label;
            } else {
                carried = None;
            }
        }
    }
}

/// Flattens `levels` (header rows, top first) into exactly `width` labels.
///
/// Header rows wider or narrower than `width` are truncated or padded with
/// synthetic `column_<index>` labels, and a schema drift warning is
/// returned.
pub fn flatten_header(
    levels: &[&[String]],
    width: usize,
    options: &HeaderOptions,
) -> FlattenedHeader {
    let header_width = levels.iter().map(|row| row.len()).max().unwrap_or(0);
    let mut grid: Vec<Vec<String>> = levels
        .iter()
        .map(|row| {
            (0..header_width)
                .map(|column| clean_level(row.get(column), options))
                .collect()
        })
        .collect();
    if options.fill_merged_levels {
        fill_merged_levels(&mut grid);
    }

    let mut labels: Vec<String> = (0..header_width)
        .map(|column| {
            let parts: Vec<&str> = grid
                .iter()
                .map(|row| row[column].as_str())
                .filter(|level| !level.is_empty())
                .collect();
            if parts.is_empty() {
                synthetic_label(column)
            } else {
                parts.join(" ")
            }
        })
        .collect();

    let drift = (header_width != width).then(|| {
        tracing::warn!(
            expected = width,
            found = header_width,
            "header width differs from sheet width"
        );
        ParseWarning::SchemaDrift {
            expected: width,
            found: header_width,
        }
    });
    labels.truncate(width);
    let start = labels.len();
    labels.extend((start..width).map(synthetic_label));

    FlattenedHeader { labels, drift }
}
