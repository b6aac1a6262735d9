//! CSV input and output tables.
//!
//! The input table has a header row followed by one row per station; only
//! the first field of each row is used. The output table has no header and
//! one single-column row per input row. It is written with a UTF-8 BOM and
//! CRLF line endings so spreadsheet applications open it correctly.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Errors reading or writing a table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The file could not be opened or created
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid CSV, or writing failed
    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Read the data rows of a CSV table, skipping the header row.
///
/// Rows may have different numbers of fields.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect()
}

/// Read the data rows of the CSV file at `path`.
pub fn read_batch(path: &Path) -> Result<Vec<Vec<String>>, TableError> {
    let file = File::open(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    read_records(file).map_err(|source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Write one single-field row per value, preceded by a BOM.
pub fn write_column<W, S>(mut writer: W, values: &[S]) -> Result<(), csv::Error>
where
    W: Write,
    S: AsRef<str>,
{
    writer.write_all(UTF8_BOM)?;

    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    for value in values {
        csv.write_record([value.as_ref()])?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the output column to `path`, creating parent directories.
pub fn write_batch<S: AsRef<str>>(path: &Path, values: &[S]) -> Result<(), TableError> {
    let io_error = |source: io::Error| TableError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let file = File::create(path).map_err(io_error)?;

    write_column(BufWriter::new(file), values).map_err(|source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_skips_header() {
        let input = "station\n渋谷 (JR山手線)\n新宿\n";
        let records = read_records(input.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![vec!["渋谷 (JR山手線)".to_string()], vec!["新宿".to_string()]]
        );
    }

    #[test]
    fn read_flexible_rows() {
        let input = "station,note\n渋谷,a\n新宿\n\"品川, 港区\",b,c\n";
        let records = read_records(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], vec!["新宿".to_string()]);
        assert_eq!(records[2][0], "品川, 港区");
    }

    #[test]
    fn read_header_only_and_empty() {
        assert!(read_records("station\n".as_bytes()).unwrap().is_empty());
        assert!(read_records("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn read_with_bom() {
        let input = "\u{feff}station\n渋谷\n";
        let records = read_records(input.as_bytes()).unwrap();
        assert_eq!(records, vec![vec!["渋谷".to_string()]]);
    }

    #[test]
    fn write_bom_and_crlf() {
        let mut out = Vec::new();
        write_column(&mut out, &["東京都渋谷区道玄坂", "ERROR"]).unwrap();

        assert!(out.starts_with(UTF8_BOM));
        let text = String::from_utf8(out[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text, "東京都渋谷区道玄坂\r\nERROR\r\n");
    }

    #[test]
    fn written_empty_cells_read_back_empty() {
        let mut out = Vec::new();
        write_column(&mut out, &["a", "", "b"]).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(&out[UTF8_BOM.len()..]);
        let cells: Vec<String> = reader
            .records()
            .map(|r| r.unwrap().get(0).unwrap_or_default().to_string())
            .collect();
        assert_eq!(cells, vec!["a", "", "b"]);
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.csv");
        fs::write(&input, "駅名\n渋谷\n新宿 (JR中央線)\n").unwrap();

        let records = read_batch(&input).unwrap();
        assert_eq!(records.len(), 2);

        let output = dir.path().join("nested").join("output.csv");
        write_batch(&output, &["x", "y"]).unwrap();
        let bytes = fs::read(&output).unwrap();
        assert_eq!(&bytes[UTF8_BOM.len()..], b"x\r\ny\r\n");
    }

    #[test]
    fn missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_batch(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }
}
