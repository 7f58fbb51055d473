use std::fs;
use std::path::Path;

use glyco_helpers::{FEATURE_COUNT, FEATURES, Outcome};
use ndarray::{Array1, Array2};

use crate::{CohortError, header_line};

/// The historical screening cohort: past records with known outcomes.
///
/// Read once at startup and never mutated; its only job is to supply the
/// per-class column means for the comparison chart.
#[derive(Debug, Clone)]
pub struct Cohort {
    features: Array2<f64>,
    outcomes: Vec<Outcome>,
}

/// Per-class column means, ready for the comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassAverages {
    pub diabetic: Array1<f64>,
    pub normal: Array1<f64>,
    pub diabetic_rows: usize,
    pub normal_rows: usize,
}

impl Cohort {
    /// Parses the cohort CSV: a header naming the eight features plus
    /// `Outcome`, then one record per line.
    ///
    /// # Errors
    ///
    /// Rejects a missing file, a renamed or reordered header, rows with the
    /// wrong column count, non-numeric cells and non-binary outcomes. Data
    /// rows are numbered from 1 in error messages.
    pub fn from_path(path: &Path) -> Result<Self, CohortError> {
        let raw = fs::read_to_string(path).map_err(|source| CohortError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let lines: Vec<&str> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let Some((header, rows)) = lines.split_first() else {
            return Err(CohortError::EmptyFile(path.to_path_buf()));
        };

        let expected_header = header_line("Outcome");
        if !header_matches(header, &expected_header) {
            return Err(CohortError::HeaderMismatch {
                expected: expected_header,
                found: (*header).to_string(),
            });
        }

        let mut values = Vec::with_capacity(rows.len() * FEATURE_COUNT);
        let mut outcomes = Vec::with_capacity(rows.len());

        for (index, line) in rows.iter().enumerate() {
            let row = index + 1;
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            if cells.len() != FEATURE_COUNT + 1 {
                return Err(CohortError::RowWidth {
                    row,
                    expected: FEATURE_COUNT + 1,
                    found: cells.len(),
                });
            }

            for (cell, field) in cells[..FEATURE_COUNT].iter().zip(FEATURES.iter()) {
                let value = cell.parse::<f64>().map_err(|_| CohortError::BadCell {
                    row,
                    column: field.name,
                    value: (*cell).to_string(),
                })?;
                values.push(value);
            }

            let outcome_cell = cells[FEATURE_COUNT];
            let outcome = outcome_cell
                .parse::<f64>()
                .ok()
                .and_then(Outcome::from_f64)
                .ok_or_else(|| CohortError::BadOutcome {
                    row,
                    value: outcome_cell.to_string(),
                })?;
            outcomes.push(outcome);
        }

        let features = Array2::from_shape_vec((outcomes.len(), FEATURE_COUNT), values)
            .expect("rows are validated to hold FEATURE_COUNT cells");

        Ok(Cohort { features, outcomes })
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of records with the given outcome.
    pub fn class_count(&self, outcome: Outcome) -> usize {
        self.outcomes.iter().filter(|&&o| o == outcome).count()
    }

    /// Column-wise arithmetic mean of the rows with the given outcome, label
    /// column excluded.
    ///
    /// # Errors
    ///
    /// Returns `CohortError::EmptyClass` if no record carries the outcome.
    pub fn class_mean(&self, outcome: Outcome) -> Result<Array1<f64>, CohortError> {
        let mut sum = Array1::<f64>::zeros(FEATURE_COUNT);
        let mut count = 0usize;
        for (row, row_outcome) in self.features.rows().into_iter().zip(&self.outcomes) {
            if *row_outcome == outcome {
                sum += &row;
                count += 1;
            }
        }
        if count == 0 {
            return Err(CohortError::EmptyClass(outcome));
        }
        sum /= count as f64;
        Ok(sum)
    }

    /// Both class means plus the row counts behind them.
    pub fn class_averages(&self) -> Result<ClassAverages, CohortError> {
        Ok(ClassAverages {
            diabetic: self.class_mean(Outcome::Diabetic)?,
            normal: self.class_mean(Outcome::Normal)?,
            diabetic_rows: self.class_count(Outcome::Diabetic),
            normal_rows: self.class_count(Outcome::Normal),
        })
    }
}

fn header_matches(found: &str, expected: &str) -> bool {
    let found_cells = found.split(',').map(str::trim);
    let expected_cells = expected.split(',');
    found_cells.eq(expected_cells)
}
