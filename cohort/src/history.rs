use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use glyco_helpers::{Measurements, Outcome};

use crate::{CohortError, header_line};

/// Append-only log of completed screenings.
///
/// The file is created with a header row on first use; every later append
/// adds exactly one data row and never repeats the header. No record is ever
/// updated or deleted.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one screening: the eight measurements plus the predicted
    /// label as a ninth `Prediction` column.
    pub fn append(
        &self,
        measurements: &Measurements,
        outcome: Outcome,
    ) -> Result<(), CohortError> {
        let io_err = |source| CohortError::Io {
            path: self.path.clone(),
            source,
        };

        let new_file = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;

        if new_file {
            writeln!(file, "{}", header_line("Prediction")).map_err(io_err)?;
        }
        writeln!(file, "{}", data_row(measurements, outcome)).map_err(io_err)?;
        Ok(())
    }
}

/// One CSV row in column order. Whole-number fields render bare; floats keep
/// their decimal point, so rows read back the same way the cohort file does.
fn data_row(m: &Measurements, outcome: Outcome) -> String {
    format!(
        "{},{:?},{:?},{:?},{:?},{:?},{:?},{},{}",
        m.pregnancies,
        m.glucose,
        m.blood_pressure,
        m.skin_thickness,
        m.insulin,
        m.bmi,
        m.pedigree,
        m.age,
        outcome.as_bit()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample() -> Measurements {
        Measurements {
            pregnancies: 2,
            glucose: 120.0,
            blood_pressure: 70.0,
            skin_thickness: 30.0,
            insulin: 80.0,
            bmi: 25.0,
            pedigree: 0.5,
            age: 33,
        }
    }

    #[test]
    fn first_append_writes_header_and_one_row() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let log = HistoryLog::new(dir.path().join("history.csv"));

        log.append(&sample(), Outcome::Normal).expect("append");

        let contents = fs::read_to_string(log.path()).expect("read back");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction,Age,Prediction",
                "2,120.0,70.0,30.0,80.0,25.0,0.5,33,0",
            ]
        );
    }

    #[test]
    fn later_appends_add_one_row_and_no_header() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let log = HistoryLog::new(dir.path().join("history.csv"));

        log.append(&sample(), Outcome::Normal).expect("first");
        let mut second = sample();
        second.glucose = 180.0;
        second.age = 47;
        log.append(&second, Outcome::Diabetic).expect("second");

        let contents = fs::read_to_string(log.path()).expect("read back");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        let headers = lines
            .iter()
            .filter(|line| line.starts_with("Pregnancies"))
            .count();
        assert_eq!(headers, 1);
        // Submission order is preserved.
        assert_eq!(lines[1], "2,120.0,70.0,30.0,80.0,25.0,0.5,33,0");
        assert_eq!(lines[2], "2,180.0,70.0,30.0,80.0,25.0,0.5,47,1");
    }

    #[test]
    fn append_to_existing_file_preserves_prior_rows() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let path = dir.path().join("history.csv");
        fs::write(&path, "Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction,Age,Prediction\n9,99.0,9.0,9.0,9.0,9.0,0.9,99,1\n")
            .expect("seed file");

        let log = HistoryLog::new(&path);
        log.append(&sample(), Outcome::Normal).expect("append");

        let contents = fs::read_to_string(&path).expect("read back");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "9,99.0,9.0,9.0,9.0,9.0,0.9,99,1");
        assert_eq!(lines[2], "2,120.0,70.0,30.0,80.0,25.0,0.5,33,0");
    }

    #[test]
    fn fractional_values_keep_their_digits() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let log = HistoryLog::new(dir.path().join("history.csv"));
        let mut m = sample();
        m.bmi = 33.6;
        m.pedigree = 0.627;
        log.append(&m, Outcome::Diabetic).expect("append");

        let contents = fs::read_to_string(log.path()).expect("read back");
        assert_eq!(
            contents.lines().nth(1),
            Some("2,120.0,70.0,30.0,80.0,33.6,0.627,33,1")
        );
    }

    #[test]
    fn unwritable_path_surfaces_an_io_error() {
        let dir = tempfile::tempdir().expect("tmpdir");
        // The parent directory does not exist, so the create must fail.
        let log = HistoryLog::new(dir.path().join("missing").join("history.csv"));
        let result = log.append(&sample(), Outcome::Normal);
        assert!(matches!(result, Err(CohortError::Io { .. })));
    }
}
