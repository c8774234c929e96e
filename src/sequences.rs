//! Plain-text sequence files: one sequence per line.
//!
//! Entries are non-negative integers separated by commas and/or whitespace.
//! Blank lines and lines starting with `#` are ignored. Output is written
//! comma-separated.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Parses sequence text into rows of state indices.
pub fn parse_sequences(text: &str) -> Result<Vec<Vec<usize>>> {
    let mut rows = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .map(|tok| {
                tok.parse::<usize>()
                    .with_context(|| format!("line {}: invalid state {tok:?}", idx + 1))
            })
            .collect::<Result<Vec<_>>>()?;
        if row.is_empty() {
            bail!("line {}: no states", idx + 1);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Reads and parses a sequence file.
pub fn read_sequences(path: &Path) -> Result<Vec<Vec<usize>>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read sequences: {}", path.display()))?;
    parse_sequences(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Writes rows comma-separated, one per line.
pub fn write_sequences<W: Write, S: AsRef<[usize]>>(mut w: W, rows: &[S]) -> io::Result<()> {
    for row in rows {
        let mut first = true;
        for state in row.as_ref() {
            if !first {
                w.write_all(b",")?;
            }
            write!(w, "{state}")?;
            first = false;
        }
        w.write_all(b"\n")?;
    }
    w.flush()
}

/// Writes rows to `path`, or to stdout when `path` is `None`.
pub fn write_output<S: AsRef<[usize]>>(path: Option<&Path>, rows: &[S]) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output: {}", path.display()))?;
            write_sequences(BufWriter::new(file), rows)
                .with_context(|| format!("failed to write output: {}", path.display()))
        }
        None => write_sequences(io::stdout().lock(), rows).context("failed to write to stdout"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_and_comments() {
        let text = "# header\n0,1,2\n\n  2 1 0  \n1, 1,\t0\n# trailing\n";
        let rows = parse_sequences(text).unwrap();
        assert_eq!(rows, vec![vec![0, 1, 2], vec![2, 1, 0], vec![1, 1, 0]]);
    }

    #[test]
    fn trailing_comma_ignored() {
        assert_eq!(parse_sequences("0,1,\n").unwrap(), vec![vec![0, 1]]);
    }

    #[test]
    fn invalid_entry_names_line() {
        let err = parse_sequences("0,1\n0,-1\n").unwrap_err();
        assert!(err.to_string().starts_with("line 2: invalid state \"-1\""), "{err}");

        let err = parse_sequences("0 x 1").unwrap_err();
        assert!(err.to_string().starts_with("line 1"), "{err}");
    }

    #[test]
    fn separator_only_line_rejected() {
        let err = parse_sequences("0,1\n, ,\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2: no states");
    }

    #[test]
    fn empty_input() {
        assert!(parse_sequences("").unwrap().is_empty());
        assert!(parse_sequences("# nothing\n\n").unwrap().is_empty());
    }

    #[test]
    fn write_format() {
        let mut buf: Vec<u8> = Vec::new();
        write_sequences(&mut buf, &[vec![0usize, 1, 2], vec![3]]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "0,1,2\n3\n");
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("knockoffs.txt");
        let rows: Vec<Vec<usize>> = vec![vec![0, 0, 1], vec![2, 1, 0]];

        write_output(Some(path.as_path()), &rows).expect("write succeeds");
        assert_eq!(read_sequences(&path).unwrap(), rows);
    }

    #[test]
    fn missing_file_has_context() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = read_sequences(&dir.path().join("absent.txt")).unwrap_err();
        assert!(format!("{err:#}").starts_with("failed to read sequences"));
    }
}
