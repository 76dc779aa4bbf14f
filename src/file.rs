// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{PipelineError, Result};

/// Write `rows` as CSV with a header taken from the row type's field names.
/// Quoting follows the cell text: anything that reads as a number is bare,
/// including number-like strings such as jersey "02". Readers that
/// deserialize those columns as strings get the text back unchanged.
///
/// An empty table writes nothing and returns `None`.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T], what: &str) -> Result<Option<PathBuf>> {
    if rows.is_empty() {
        logf!("No {what} to save");
        return Ok(None);
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let csv_err = |source| PipelineError::Csv { path: path.to_path_buf(), source };
    let mut w = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_path(path)
        .map_err(csv_err)?;
    for row in rows {
        w.serialize(row).map_err(csv_err)?;
    }
    w.flush()
        .map_err(|source| PipelineError::Io { path: path.to_path_buf(), source })?;

    logf!("Saved {} {what} to {}", rows.len(), path.display());
    Ok(Some(path.to_path_buf()))
}

/// Write a finished text report, creating parent directories.
pub fn write_text(path: &Path, contents: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(path, contents)
        .map_err(|source| PipelineError::Io { path: path.to_path_buf(), source })?;
    logf!("Report saved to {}", path.display());
    Ok(path.to_path_buf())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    let io_err = |source| PipelineError::Io { path: dir.to_path_buf(), source };
    if dir.exists() && !dir.is_dir() {
        return Err(io_err(std::io::Error::other("path exists but is not a directory")));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: String,
        count: u32,
        rate: f64,
    }

    #[test]
    fn quotes_text_not_numbers() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("t.csv");
        let rows = vec![
            Row { name: s!("Smith, Jo"), count: 3, rate: 2.33 },
            Row { name: s!("Say \"hi\""), count: 1, rate: 0.0 },
        ];
        let written = write_table(&path, &rows, "rows").unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], r#""name","count","rate""#);
        assert_eq!(lines[1], r#""Smith, Jo",3,2.33"#);
        assert_eq!(lines[2], r#""Say ""hi""",1,0.0"#);
    }

    #[test]
    fn number_like_text_reads_back_unchanged() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("t.csv");
        let rows = vec![Row { name: s!("02"), count: 1, rate: 0.5 }, Row { name: s!("18730"), count: 2, rate: 1.0 }];
        write_table(&path, &rows, "rows").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().nth(1), Some("02,1,0.5"));

        #[derive(serde::Deserialize)]
        struct Back {
            name: String,
            count: u32,
        }
        let back: Vec<Back> = csv::Reader::from_path(&path)
            .unwrap()
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(back[0].name, "02");
        assert_eq!(back[1].name, "18730");
        assert_eq!(back[1].count, 2);
    }

    #[test]
    fn empty_table_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("t.csv");
        assert_eq!(write_table::<Row>(&path, &[], "rows").unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn ensure_directory_rejects_files() {
        let tmp = tempfile::tempdir().unwrap();
        let f = tmp.path().join("x");
        fs::write(&f, "").unwrap();
        assert!(ensure_directory(&f).is_err());
        assert!(ensure_directory(&tmp.path().join("a/b")).is_ok());
    }
}
