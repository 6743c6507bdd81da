// Delimited row reader
//
// Reads comma-separated input with no header row. A leading UTF-8 byte-order
// mark (common in spreadsheet exports) is stripped before parsing. Rows may
// have differing widths; width checks belong to the schema.

use std::fs;
use std::path::Path;

use crate::error::{CoreError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read every row of a CSV file into memory.
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse_rows(&bytes)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "Read delimited input");
    Ok(rows)
}

/// Parse in-memory CSV bytes into rows.
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn strips_byte_order_mark() {
        let rows = parse_rows(b"\xEF\xBB\xBF1,AAA,NHS test board\n").unwrap();
        assert_eq!(rows, vec![vec!["1", "AAA", "NHS test board"]]);
    }

    #[test]
    fn first_row_is_data_not_header() {
        let rows = parse_rows(b"Id,IcbCode,Board\n1,AAA,Board\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "Id");
    }

    #[test]
    fn ragged_rows_are_kept() {
        let rows = parse_rows(b"1,2,3\n4\n5,6\n").unwrap();
        let widths: Vec<_> = rows.iter().map(Vec::len).collect();
        assert_eq!(widths, vec![3, 1, 2]);
    }

    #[test]
    fn quoted_fields_keep_embedded_commas() {
        let rows = parse_rows(b"1,\"Road, Gondor\",x\n").unwrap();
        assert_eq!(rows[0][1], "Road, Gondor");
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xEF\xBB\xBF1,AAA,Board\r\n2,BBB,Board 1\r\n")
            .unwrap();
        let rows = read_rows(file.path()).unwrap();
        assert_eq!(rows[1], vec!["2", "BBB", "Board 1"]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_rows("/nonexistent/galleri/input.csv").unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/galleri/input.csv"));
    }
}
