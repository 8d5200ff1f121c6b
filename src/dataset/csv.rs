//! CSV file source
//!
//! Every cell comes back as a JSON string, exactly as stored in the file.

use super::{DatasetSource, Grid, Row, SourceError};
use serde_json::Value;

const UTF8_BOM: char = '\u{feff}';

pub struct CsvSource {
    path: String,
    delimiter: u8,
}

impl CsvSource {
    pub const fn new(path: String, delimiter: u8) -> Self {
        Self { path, delimiter }
    }

    fn csv_error(&self, source: csv::Error) -> SourceError {
        SourceError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

impl DatasetSource for CsvSource {
    fn describe(&self) -> String {
        format!("csv:{}", self.path)
    }

    fn fetch(&self) -> Result<Grid, SourceError> {
        // Rows are allowed to differ in length from the header row
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_path(&self.path)
            .map_err(|e| self.csv_error(e))?;

        let mut grid = Grid::new();
        for record in reader.records() {
            let record = record.map_err(|e| self.csv_error(e))?;
            let row: Row = record
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    if grid.is_empty() && col == 0 {
                        Value::from(cell.trim_start_matches(UTF8_BOM))
                    } else {
                        Value::from(cell)
                    }
                })
                .collect();
            grid.push(row);
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn source_for(file: &tempfile::NamedTempFile, delimiter: u8) -> CsvSource {
        CsvSource::new(file.path().to_string_lossy().into_owned(), delimiter)
    }

    #[test]
    fn test_reads_header_and_rows_as_strings() {
        let file = write_csv("Timestamp,Full Name,Email\n2024-01-01,123456,a@example.com\n");
        let grid = source_for(&file, b',').fetch().unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0][1], Value::from("Full Name"));
        assert_eq!(grid[1][1], Value::from("123456"));
    }

    #[test]
    fn test_short_rows_are_kept() {
        let file = write_csv("a,b,c\n1,2\n");
        let grid = source_for(&file, b',').fetch().unwrap();
        assert_eq!(grid[1].len(), 2);
    }

    #[test]
    fn test_bom_is_stripped_from_first_header() {
        let file = write_csv("\u{feff}Timestamp,Id\nx,1\n");
        let grid = source_for(&file, b',').fetch().unwrap();
        assert_eq!(grid[0][0], Value::from("Timestamp"));
    }

    #[test]
    fn test_custom_delimiter() {
        let file = write_csv("Name;Id\nAna;7\n");
        let grid = source_for(&file, b';').fetch().unwrap();
        assert_eq!(grid[1], vec![Value::from("Ana"), Value::from("7")]);
    }

    #[test]
    fn test_missing_file_is_reported_with_path() {
        let source = CsvSource::new("/nonexistent/sheet.csv".to_string(), b',');
        let err = source.fetch().unwrap_err();
        assert!(matches!(err, SourceError::Csv { .. }));
        assert!(err.to_string().contains("/nonexistent/sheet.csv"));
    }
}
