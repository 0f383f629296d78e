use super::patch::Patch;
use crate::error::AppError;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const DATE_COLUMN: &str = "Date";

/// A patch-indexed numeric table as exported from the aggregation notebooks.
///
/// Rows keep file order. The `Date` column, when present, is parsed into
/// calendar dates and kept apart from the numeric columns.
#[derive(Debug, Clone)]
pub struct PatchTable {
    path: PathBuf,
    patches: Vec<Patch>,
    columns: Vec<String>,
    cells: Vec<Vec<Option<f64>>>,
    dates: Option<Vec<NaiveDate>>,
    row_index: HashMap<Patch, usize>,
}

impl PatchTable {
    pub fn load(path: &Path, key_column: &str) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(path, file, key_column)
    }

    pub fn from_reader<R: Read>(path: &Path, reader: R, key_column: &str) -> Result<Self, AppError> {
        let csv_err = |source| AppError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers().map_err(csv_err)?.clone();
        let key_pos = headers
            .iter()
            .position(|h| h == key_column)
            .ok_or_else(|| AppError::MissingColumn {
                path: path.to_path_buf(),
                column: key_column.to_string(),
            })?;
        let date_pos = headers.iter().position(|h| h == DATE_COLUMN);

        let value_positions: Vec<usize> = (0..headers.len())
            .filter(|&i| i != key_pos && Some(i) != date_pos)
            .collect();
        let columns: Vec<String> = value_positions
            .iter()
            .map(|&i| headers[i].to_string())
            .collect();

        let mut patches = Vec::new();
        let mut cells = Vec::new();
        let mut dates = date_pos.map(|_| Vec::new());
        let mut row_index = HashMap::new();

        for (i, record) in rdr.records().enumerate() {
            let record = record.map_err(csv_err)?;
            let row = i + 1;
            let bad = |column: &str, value: &str| AppError::Parse {
                path: path.to_path_buf(),
                row,
                column: column.to_string(),
                value: value.to_string(),
            };

            let raw_patch = record.get(key_pos).unwrap_or("");
            if raw_patch.is_empty() {
                return Err(bad(key_column, raw_patch));
            }
            let patch = Patch::new(raw_patch);
            if row_index.insert(patch.clone(), patches.len()).is_some() {
                return Err(bad(key_column, raw_patch));
            }

            let mut values = Vec::with_capacity(value_positions.len());
            for (&pos, column) in value_positions.iter().zip(&columns) {
                let raw = record.get(pos).unwrap_or("");
                values.push(parse_cell(raw).ok_or_else(|| bad(column.as_str(), raw))?);
            }

            if let (Some(pos), Some(dates)) = (date_pos, dates.as_mut()) {
                let raw = record.get(pos).unwrap_or("");
                dates.push(parse_date(raw).ok_or_else(|| bad(DATE_COLUMN, raw))?);
            }

            patches.push(patch);
            cells.push(values);
        }

        Ok(PatchTable {
            path: path.to_path_buf(),
            patches,
            columns,
            cells,
            dates,
            row_index,
        })
    }

    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("table")
            .to_string()
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Numeric columns in file order, without the key and `Date` columns.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn require_column(&self, column: &str) -> Result<usize, AppError> {
        self.column_position(column)
            .ok_or_else(|| AppError::MissingColumn {
                path: self.path.clone(),
                column: column.to_string(),
            })
    }

    pub fn require_dates(&self) -> Result<&[NaiveDate], AppError> {
        self.dates.as_deref().ok_or_else(|| AppError::MissingColumn {
            path: self.path.clone(),
            column: DATE_COLUMN.to_string(),
        })
    }

    pub fn row_of(&self, patch: &Patch) -> Option<usize> {
        self.row_index.get(patch).copied()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(column)).copied().flatten()
    }

    /// Value at `patch` for `column`; `None` if the row, column or cell is absent.
    pub fn value(&self, patch: &Patch, column: &str) -> Option<f64> {
        let row = self.row_of(patch)?;
        let col = self.column_position(column)?;
        self.cell(row, col)
    }
}

fn parse_cell(raw: &str) -> Option<Option<f64>> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Some(None);
    }
    raw.parse::<f64>().ok().map(Some)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv: &str) -> Result<PatchTable, AppError> {
        PatchTable::from_reader(Path::new("t.csv"), csv.as_bytes(), "patch")
    }

    #[test]
    fn test_rows_keep_file_order() {
        let table = parse("patch,Ahri,Date\n13.10,5,2023-05-17\n13.2,,2023-01-25\n").unwrap();
        let order: Vec<&str> = table.patches().iter().map(|p| p.as_str()).collect();
        assert_eq!(order, vec!["13.10", "13.2"]);
        assert_eq!(table.columns(), &["Ahri".to_string()]);
        assert_eq!(table.value(&Patch::new("13.10"), "Ahri"), Some(5.0));
        assert_eq!(table.value(&Patch::new("13.2"), "Ahri"), None);
        assert_eq!(table.require_dates().unwrap()[1], NaiveDate::from_ymd_opt(2023, 1, 25).unwrap());
    }

    #[test]
    fn test_missing_key_column() {
        let err = parse("version,Ahri\n13.1,5\n").unwrap_err();
        assert!(matches!(err, AppError::MissingColumn { ref column, .. } if column == "patch"));
    }

    #[test]
    fn test_malformed_number_names_row_and_column() {
        let err = parse("patch,Ahri\n13.1,5\n13.2,five\n").unwrap_err();
        match err {
            AppError::Parse { row, column, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "Ahri");
                assert_eq!(value, "five");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_date() {
        let err = parse("patch,Ahri,Date\n13.1,5,soon\n").unwrap_err();
        assert!(matches!(err, AppError::Parse { ref column, .. } if column == "Date"));
    }

    #[test]
    fn test_duplicate_patch_rejected() {
        assert!(parse("patch,Ahri\n13.1,5\n13.1,6\n").is_err());
    }

    #[test]
    fn test_datetime_and_nan_cells() {
        let table = parse("patch,Ahri,Date\n13.1,NaN,2023-01-10 00:00:00\n").unwrap();
        assert_eq!(table.cell(0, 0), None);
        assert_eq!(table.require_dates().unwrap()[0], NaiveDate::from_ymd_opt(2023, 1, 10).unwrap());
    }

    #[test]
    fn test_require_dates_without_date_column() {
        let table = parse("patch,Ahri\n13.1,5\n").unwrap();
        assert!(table.require_dates().is_err());
        assert!(table.require_column("Ahri").is_ok());
        assert!(table.require_column("Zed").is_err());
    }
}
