//! CSV preview loader.
//!
//! Only the first few lines are split for display. No type inference, numeric
//! validation, encoding or scaling happens here or anywhere else in the demo.

use crate::error::{DemoError, DemoResult};

/// Maximum number of data rows kept after the header.
pub const PREVIEW_ROWS: usize = 5;

/// Sample dataset offered for download from the upload screen.
pub const SAMPLE_CSV: &str = "duration,protocol_type,service,flag,src_bytes,dst_bytes,class\n\
0,tcp,http,SF,181,5450,normal\n\
0,tcp,http,SF,239,486,normal\n\
0,udp,domain_u,SF,105,146,anomaly";

pub const SAMPLE_CSV_FILENAME: &str = "sample.csv";
pub const SAMPLE_CSV_MIME: &str = "text/csv";

/// Step names listed on the preprocessing screen. Descriptive copy only.
pub const PREPROCESS_STEPS: [&str; 6] = [
    "Duplicate header removal",
    "Numeric column conversion",
    "NaN value handling",
    "One-hot encoding (categorical)",
    "MinMax scaling (0-1 normalization)",
    "Data validation checks",
];

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreviewTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl PreviewTable {
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, at most [`PREVIEW_ROWS`].
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Header cell count minus the trailing label column.
    pub fn feature_count(&self) -> usize {
        self.header.len().saturating_sub(1)
    }
}

/// A successfully previewed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadedDataset {
    pub file_name: Option<String>,
    pub preview: PreviewTable,
    pub feature_count: usize,
}

impl LoadedDataset {
    pub fn from_text(file_name: Option<String>, text: &str) -> DemoResult<Self> {
        let preview = load_preview(text)?;
        let feature_count = preview.feature_count();
        Ok(Self {
            file_name,
            preview,
            feature_count,
        })
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',').map(|c| c.trim().to_string()).collect()
}

/// Build the preview table from raw file text.
///
/// Lines break on `\n` or `\r\n`; lines that are blank after trimming are
/// dropped before the header is chosen.
pub fn load_preview(text: &str) -> DemoResult<PreviewTable> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header = lines.next().map(split_cells).ok_or(DemoError::MalformedInput)?;
    let rows = lines.take(PREVIEW_ROWS).map(split_cells).collect();
    Ok(PreviewTable { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_csv_previews_fully() {
        let t = load_preview(SAMPLE_CSV).unwrap();
        assert_eq!(t.header().len(), 7);
        assert_eq!(t.header()[0], "duration");
        assert_eq!(t.header()[6], "class");
        assert_eq!(t.rows().len(), 3);
        assert_eq!(t.rows()[2][2], "domain_u");
        assert_eq!(t.feature_count(), 6);
    }

    #[test]
    fn feature_count_is_header_cells_minus_one() {
        for (text, expected) in [("a", 0), ("a,b", 1), ("a, b ,c,d", 3), ("a,b,", 2)] {
            let t = load_preview(text).unwrap();
            assert_eq!(t.feature_count(), expected, "{text:?}");
        }
    }

    #[test]
    fn cells_are_trimmed_and_crlf_is_handled() {
        let t = load_preview("  x , y \r\n 1 ,2\r\n").unwrap();
        assert_eq!(t.header(), &["x".to_string(), "y".to_string()]);
        assert_eq!(t.rows(), &[vec!["1".to_string(), "2".to_string()]]);
    }

    #[test]
    fn blank_lines_are_dropped_before_the_header() {
        let t = load_preview("\n   \n\nh1,h2\n\n1,2\n \n3,4").unwrap();
        assert_eq!(t.header()[0], "h1");
        assert_eq!(t.rows().len(), 2);
        assert_eq!(t.rows()[1][0], "3");
    }

    #[test]
    fn single_line_yields_header_only() {
        let t = load_preview("a,b,c\n\n").unwrap();
        assert!(t.rows().is_empty());
    }

    #[test]
    fn at_most_five_data_rows() {
        let mut text = String::from("a,b\n");
        for i in 0..50 {
            text.push_str(&format!("{i},{i}\n"));
        }
        let t = load_preview(&text).unwrap();
        assert_eq!(t.rows().len(), PREVIEW_ROWS);
        assert_eq!(t.rows()[4][0], "4");
    }

    #[test]
    fn no_content_is_malformed() {
        assert_eq!(load_preview(""), Err(DemoError::MalformedInput));
        assert_eq!(load_preview(" \n\t\r\n  "), Err(DemoError::MalformedInput));
    }

    #[test]
    fn dataset_keeps_file_name() {
        let d = LoadedDataset::from_text(Some("kdd.csv".to_string()), "a,b\n1,2").unwrap();
        assert_eq!(d.file_name.as_deref(), Some("kdd.csv"));
        assert_eq!(d.feature_count, 1);
    }
}
