use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use glyco_helpers::{FEATURES, Outcome};

mod dataset;
mod history;

pub use dataset::{ClassAverages, Cohort};
pub use history::HistoryLog;

/// Errors that can occur when reading the cohort or writing history.
#[derive(Debug)]
pub enum CohortError {
    /// The file could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file holds no rows at all.
    EmptyFile(PathBuf),
    /// The header row does not name the expected columns.
    HeaderMismatch { expected: String, found: String },
    /// A data row has the wrong number of columns.
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A cell could not be parsed as a number.
    BadCell {
        row: usize,
        column: &'static str,
        value: String,
    },
    /// An outcome cell is not 0 or 1.
    BadOutcome { row: usize, value: String },
    /// The cohort holds no rows of the requested class.
    EmptyClass(Outcome),
}

impl Display for CohortError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CohortError::Io { path, source } => {
                write!(f, "could not access {}: {}", path.display(), source)
            }
            CohortError::EmptyFile(path) => write!(f, "{} holds no rows", path.display()),
            CohortError::HeaderMismatch { expected, found } => write!(
                f,
                "unexpected header: expected '{}', found '{}'",
                expected, found
            ),
            CohortError::RowWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} columns but expected {}",
                row, found, expected
            ),
            CohortError::BadCell { row, column, value } => write!(
                f,
                "row {} column {} is not a valid number: '{}'",
                row, column, value
            ),
            CohortError::BadOutcome { row, value } => {
                write!(f, "row {} has a non-binary outcome: '{}'", row, value)
            }
            CohortError::EmptyClass(outcome) => {
                write!(f, "the cohort holds no {} records", outcome)
            }
        }
    }
}

impl Error for CohortError {}

/// Comma-joined column names: the eight features plus the given label column.
fn header_line(label_column: &str) -> String {
    FEATURES
        .iter()
        .map(|field| field.name)
        .chain(std::iter::once(label_column))
        .collect::<Vec<_>>()
        .join(",")
}
