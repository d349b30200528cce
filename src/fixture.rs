use crate::error::{ProbeError, ProbeResult};
use crate::types::{CellValue, Grid};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Load a grid fixture, picking the format from the file extension.
///
/// # Formats
/// - `.csv`: the first record holds the headers; empty fields become null,
///   everything else is text (no type inference, like a plain CSV import)
/// - `.yaml` / `.yml` / `.json`: `{ headers: [...], rows: [[...], ...] }`;
///   null stays null, strings are text, numbers and booleans are non-string
///
/// # Example
/// ```no_run
/// use gridprobe::fixture;
/// use std::path::Path;
///
/// let grid = fixture::load(Path::new("people.csv"))?;
/// println!("{} columns, {} rows", grid.column_count(), grid.row_count());
/// # Ok::<(), gridprobe::ProbeError>(())
/// ```
pub fn load(path: &Path) -> ProbeResult<Grid> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let grid = match extension.as_str() {
        "csv" => from_csv_reader(std::fs::File::open(path)?)?,
        "yaml" | "yml" => from_yaml_str(&std::fs::read_to_string(path)?)?,
        "json" => from_json_str(&std::fs::read_to_string(path)?)?,
        other => {
            return Err(ProbeError::Parse(format!(
                "Unsupported fixture format '{}' for {} (expected csv, yaml or json)",
                other,
                path.display()
            )))
        }
    };

    debug!(
        path = %path.display(),
        columns = grid.column_count(),
        rows = grid.row_count(),
        "loaded fixture"
    );
    Ok(grid)
}

pub fn from_csv_reader<R: Read>(reader: R) -> ProbeResult<Grid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut grid = Grid::new(headers);

    for record in reader.records() {
        let record = record?;
        grid.add_row(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        CellValue::Null
                    } else {
                        CellValue::text(field)
                    }
                })
                .collect(),
        );
    }

    checked(grid)
}

pub fn from_yaml_str(content: &str) -> ProbeResult<Grid> {
    checked(serde_yaml::from_str(content)?)
}

pub fn from_json_str(content: &str) -> ProbeResult<Grid> {
    checked(serde_json::from_str(content)?)
}

fn checked(grid: Grid) -> ProbeResult<Grid> {
    grid.validate().map_err(ProbeError::Validation)?;
    Ok(grid)
}
