use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

//==============================================================================
// Cell Values
//==============================================================================

/// Text the data table shows for a null cell
pub const NULL_DISPLAY_TEXT: &str = "null";

/// A single cell of a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Plain string value
    Text(String),
    /// Number, boolean or date: rendered with the non-string marker
    NonString(String),
    /// Null value
    Null,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn non_string(value: impl Into<String>) -> Self {
        CellValue::NonString(value.into())
    }

    /// Text shown in the rendered cell.
    ///
    /// A null cell renders as the literal `"null"`, not as an empty string.
    pub fn display_text(&self) -> &str {
        match self {
            CellValue::Text(s) | CellValue::NonString(s) => s,
            CellValue::Null => NULL_DISPLAY_TEXT,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn is_non_string(&self) -> bool {
        matches!(self, CellValue::NonString(_))
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Text(s) | CellValue::NonString(s) => serializer.serialize_str(s),
            CellValue::Null => serializer.serialize_unit(),
        }
    }
}

struct CellValueVisitor;

impl<'de> Visitor<'de> for CellValueVisitor {
    type Value = CellValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_unit<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<CellValue, D::Error> {
        d.deserialize_any(CellValueVisitor)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<CellValue, E> {
        Ok(CellValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<CellValue, E> {
        Ok(CellValue::Text(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<CellValue, E> {
        Ok(CellValue::NonString(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<CellValue, E> {
        Ok(CellValue::NonString(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<CellValue, E> {
        Ok(CellValue::NonString(v.to_string()))
    }

    /// Floats keep a decimal point: `30.0` reads `"30.0"`, not `"30"`.
    /// Trailing zeros beyond the first (`30.50`) do not survive parsing.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<CellValue, E> {
        Ok(CellValue::NonString(format!("{v:?}")))
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CellValueVisitor)
    }
}

//==============================================================================
// Grid
//==============================================================================

/// Header titles plus rows of cells, as the application shows them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

impl Grid {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn with_row(mut self, row: Vec<CellValue>) -> Self {
        self.rows.push(row);
        self
    }

    pub fn add_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Rows may be shorter than the header list, never longer
    pub fn validate(&self) -> Result<(), String> {
        for (index, row) in self.rows.iter().enumerate() {
            if row.len() > self.headers.len() {
                return Err(format!(
                    "Row {} has {} cells, but only {} headers are defined",
                    index,
                    row.len(),
                    self.headers.len()
                ));
            }
        }
        Ok(())
    }
}

//==============================================================================
// Coordinates
//==============================================================================

/// Number of structural columns (row controls, star/flag, row number)
/// rendered before the first data column
pub const DEFAULT_LEADING_COLUMN_COUNT: usize = 3;

/// Rendering layout of the data table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub leading_column_count: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            leading_column_count: DEFAULT_LEADING_COLUMN_COUNT,
        }
    }
}

impl Layout {
    #[must_use]
    pub const fn with_leading_columns(leading_column_count: usize) -> Self {
        Self {
            leading_column_count,
        }
    }
}

/// A cell addressed by row index and column name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalCoordinate<'a> {
    pub row_index: usize,
    pub column_name: &'a str,
}

impl<'a> LogicalCoordinate<'a> {
    pub fn new(row_index: usize, column_name: &'a str) -> Self {
        Self {
            row_index,
            column_name,
        }
    }
}

impl fmt::Display for LogicalCoordinate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "row {} of column '{}'", self.row_index, self.column_name)
    }
}

/// A cell addressed by its position in the rendered table.
///
/// Row 0 is the header row; columns `0..leading_column_count` are structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysicalCoordinate {
    pub row: usize,
    pub column: usize,
}

impl PhysicalCoordinate {
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for PhysicalCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
