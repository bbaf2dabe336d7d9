use super::{Dataset, DatasetError};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;

pub const FEATURE_COLUMN: &str = "experience";
pub const TARGET_COLUMN: &str = "salary";

/// Header spellings found in published salary datasets, with their canonical names
const COLUMN_ALIASES: [(&str, &str); 2] = [
    ("YearsExperience", FEATURE_COLUMN),
    ("Salary", TARGET_COLUMN),
];

/// Map a header to its canonical column name. Unknown headers pass through
pub fn normalize_column(name: &str) -> &str {
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, canonical)| *canonical)
}

/// Position of the first header that normalizes to `column`
fn column_index(headers: &StringRecord, column: &'static str) -> Result<usize, DatasetError> {
    headers
        .iter()
        .position(|header| normalize_column(header) == column)
        .ok_or(DatasetError::MissingColumn(column))
}

fn parse_cell(
    record: &StringRecord,
    idx: usize,
    column: &'static str,
    line: u64,
) -> Result<f64, DatasetError> {
    let raw = record.get(idx).unwrap_or_default();

    match raw.parse::<f64>() {
        Ok(val) if val.is_finite() => Ok(val),
        _ => Err(DatasetError::InvalidValue {
            line,
            column,
            value: raw.to_string(),
        }),
    }
}

/// Parse a CSV file with a header row into a dataset.
/// The file must contain an experience and a salary column (canonical names or aliases);
/// any other column is ignored
pub fn parse_dataset(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    let headers = reader.headers()?.clone();
    let experience_idx = column_index(&headers, FEATURE_COLUMN)?;
    let salary_idx = column_index(&headers, TARGET_COLUMN)?;

    let mut experience = vec![];
    let mut salary = vec![];

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        // Header is line 1
        let line = record
            .position()
            .map_or(row as u64 + 2, |pos| pos.line());

        experience.push(parse_cell(&record, experience_idx, FEATURE_COLUMN, line)?);
        salary.push(parse_cell(&record, salary_idx, TARGET_COLUMN, line)?);
    }

    if experience.is_empty() {
        return Err(DatasetError::Empty);
    }

    Ok(Dataset::new(experience, salary))
}
