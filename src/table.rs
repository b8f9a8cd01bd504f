use crate::error::PlotError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// A numeric table read from a headerless csv file,
/// one row per sample and one column per channel, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    source: PathBuf,
    first_line: u64,
    ncols: usize,
    values: Vec<f64>,
}

impl Table {
    /// Load a table from a csv file on disk.
    pub fn from_csv(fin: &Path) -> Result<Table, PlotError> {
        let file = File::open(fin).map_err(|e| PlotError::io(fin, e))?;
        let table = Table::from_reader(BufReader::new(file), fin)?;
        tracing::info!(
            path = %fin.display(),
            rows = table.nrows(),
            columns = table.ncols(),
            "loaded table"
        );
        Ok(table)
    }

    /// Parse comma separated rows of numbers.
    /// Everything from a `#` to the end of its line is a comment,
    /// lines left blank are skipped and every other line must have
    /// as many fields as the first one.
    /// `source` is only used to label errors.
    pub fn from_reader<R: Read>(mut reader: R, source: &Path) -> Result<Table, PlotError> {
        let mut raw: Vec<u8> = Vec::new();
        reader
            .read_to_end(&mut raw)
            .map_err(|e| PlotError::io(source, e))?;
        let stripped = strip_comments(&raw);
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(&stripped[..]);

        let mut ncols = 0;
        let mut first_line = 0;
        let mut values: Vec<f64> = Vec::with_capacity(10000);
        for record in rdr.records() {
            let record = record.map_err(|e| csv_error(source, e))?;
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            let line = record.position().map_or(0, |p| p.line());
            if ncols == 0 {
                ncols = record.len();
                first_line = line;
            } else if record.len() != ncols {
                return Err(PlotError::format(
                    source,
                    line,
                    format!("expected {} fields, found {}", ncols, record.len()),
                ));
            }
            for (col, field) in record.iter().enumerate() {
                let v: f64 = field.parse().map_err(|_| {
                    PlotError::format(
                        source,
                        line,
                        format!("field {} is not a number: {:?}", col + 1, field),
                    )
                })?;
                values.push(v);
            }
        }

        if ncols == 0 {
            return Err(PlotError::format(source, 0, "no data rows"));
        }
        tracing::debug!(path = %source.display(), first_line, "parsed csv rows");
        Ok(Table {
            source: source.to_path_buf(),
            first_line,
            ncols,
            values,
        })
    }

    /// The path the table was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn nrows(&self) -> usize {
        self.values.len() / self.ncols
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if col >= self.ncols {
            return None;
        }
        let idx = row.checked_mul(self.ncols)?.checked_add(col)?;
        self.values.get(idx).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        let start = row.checked_mul(self.ncols)?;
        self.values.get(start..start.checked_add(self.ncols)?)
    }

    /// Iterates over one column, top to bottom; empty if `col` is out of range.
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        let n = if col < self.ncols { self.nrows() } else { 0 };
        (0..n).map(move |row| self.values[row * self.ncols + col])
    }

    /// Fails with a format error if the table is narrower than `min` columns.
    pub fn require_columns(&self, min: usize) -> Result<(), PlotError> {
        if self.ncols < min {
            return Err(PlotError::format(
                &self.source,
                self.first_line,
                format!("found {} columns, at least {} are needed", self.ncols, min),
            ));
        }
        Ok(())
    }
}

/// Cuts every line at its first `#`, keeping the line breaks so csv positions still match the file.
fn strip_comments(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    for line in raw.split_inclusive(|&b| b == b'\n') {
        match line.iter().position(|&b| b == b'#') {
            Some(i) => {
                out.extend_from_slice(&line[..i]);
                if line.ends_with(b"\n") {
                    out.push(b'\n');
                }
            }
            None => out.extend_from_slice(line),
        }
    }
    out
}

fn csv_error(source: &Path, e: csv::Error) -> PlotError {
    let line = e.position().map_or(0, |p| p.line());
    match e.into_kind() {
        csv::ErrorKind::Io(io) => PlotError::io(source, io),
        csv::ErrorKind::Utf8 { err, .. } => PlotError::format(source, line, err.to_string()),
        other => PlotError::format(source, line, format!("{:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(text: &str) -> Result<Table, PlotError> {
        Table::from_reader(text.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn loads_rows_and_columns() {
        let t = parse("0,1,2,3,4,5,6\n1,7,8,9,10,11,12\n").unwrap();
        assert_eq!(t.nrows(), 2);
        assert_eq!(t.ncols(), 7);
        assert_eq!(t.row(1).unwrap(), &[1., 7., 8., 9., 10., 11., 12.]);
        assert_eq!(t.get(0, 6), Some(6.));
        assert_eq!(t.get(0, 7), None);
        assert_eq!(t.get(2, 0), None);
        assert_eq!(t.column(3).collect::<Vec<_>>(), vec![3., 9.]);
        assert_eq!(t.column(9).count(), 0);
    }

    #[test]
    fn keeps_values_exactly() {
        let t = parse("1403715273262142976,-0.0994,0.1411,0.0244,8.1,-1.9e-3,-3.25\n").unwrap();
        assert_eq!(t.get(0, 0), Some(1403715273262142976.));
        assert_eq!(t.get(0, 1), Some(-0.0994));
        assert_eq!(t.get(0, 5), Some(-0.0019));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "#timestamp [ns],w_x,w_y,w_z,a_x,a_y,a_z\n\n0, 1, 2, 3, 4, 5, 6\n   \n1,2,3,4,5,6,7\n";
        let t = parse(text).unwrap();
        assert_eq!(t.nrows(), 2);
        assert_eq!(t.row(0).unwrap(), &[0., 1., 2., 3., 4., 5., 6.]);
        t.require_columns(7).unwrap();
    }

    #[test]
    fn inline_and_indented_comments_are_dropped() {
        let t = parse("  # hdr\n0,1,2,3,4,5,6 # note\n1,2,3,4,5,6,7#\n").unwrap();
        assert_eq!(t.nrows(), 2);
        assert_eq!(t.row(0).unwrap(), &[0., 1., 2., 3., 4., 5., 6.]);
        assert_eq!(t.get(1, 6), Some(7.));
    }

    #[test]
    fn comments_keep_line_numbers() {
        match parse("  # hdr\n0,1,2 # a\n1,x,3\n") {
            Err(PlotError::Format { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn huge_indices_are_out_of_range() {
        let t = parse("0,1,2,3,4,5,6\n").unwrap();
        assert_eq!(t.get(usize::MAX, 0), None);
        assert_eq!(t.get(usize::MAX / 7, 6), None);
        assert_eq!(t.row(usize::MAX), None);
        assert_eq!(t.row(usize::MAX / 7), None);
    }

    #[test]
    fn extra_columns_are_kept() {
        let t = parse("0,1,2,3,4,5,6,7,8\n").unwrap();
        assert_eq!(t.ncols(), 9);
        t.require_columns(7).unwrap();
    }

    #[test]
    fn ragged_rows_fail_with_line_number() {
        match parse("0,1,2,3,4,5,6\n1,2,3\n") {
            Err(PlotError::Format { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("expected 7 fields, found 3"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn non_numeric_field_fails() {
        match parse("# header\n0,1,2\n1,x,3\n") {
            Err(PlotError::Format { line, reason, .. }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("field 2"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(parse("# only a header\n"), Err(PlotError::Format { .. })));
        assert!(matches!(parse(""), Err(PlotError::Format { .. })));
    }

    #[test]
    fn narrow_table_is_rejected() {
        let t = parse("0,1,2,3\n1,2,3,4\n").unwrap();
        let e = t.require_columns(7).unwrap_err();
        assert_eq!(e.exit_code(), 3);
        assert!(e.to_string().contains("found 4 columns, at least 7 are needed"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let e = Table::from_csv(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(e, PlotError::Io { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        for i in 0..50 {
            let row: Vec<String> = (i..i + 7).map(|v| v.to_string()).collect();
            writeln!(f, "{}", row.join(",")).unwrap();
        }
        let t = Table::from_csv(f.path()).unwrap();
        assert_eq!(t.nrows(), 50);
        assert_eq!(t.source(), f.path());
        assert_eq!(t.get(49, 6), Some(55.));
    }
}
