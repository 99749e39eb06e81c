//! Conversion of spreadsheet cells to text.

use calamine::{Data, DataType};

/// Renders a cell the way it reads in the worksheet.
///
/// Integral numbers drop their decimals, dates use ISO form and error cells
/// read as empty.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(value) => value.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => format_number(*value),
        Data::Bool(value) => (if *value { "TRUE" } else { "FALSE" }).to_string(),
        other => match other.as_datetime() {
            Some(datetime) if datetime.time() == chrono::NaiveTime::MIN => {
                datetime.format("%Y-%m-%d").to_string()
            }
            Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => other.to_string(),
        },
    }
}

/// Formats a float without a trailing `.0` for integral values.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
