// Headless one-shot screening: the same pipeline the form app runs, without
// a display. Positional arguments override the default file locations:
//
//   glyco [model.json] [cohort.csv] [history.csv]

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use cohort::{Cohort, HistoryLog};
use glyco::Measurements;
use logistic::LogisticModel;
use ndarray::Array1;

const MODEL_PATH: &str = "assets/model.json";
const DATASET_PATH: &str = "assets/diabetes.csv";
const HISTORY_PATH: &str = "screenings.csv";

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let model_path = PathBuf::from(args.next().unwrap_or_else(|| MODEL_PATH.to_string()));
    let dataset_path = PathBuf::from(args.next().unwrap_or_else(|| DATASET_PATH.to_string()));
    let history_path = PathBuf::from(args.next().unwrap_or_else(|| HISTORY_PATH.to_string()));

    // Nothing is meaningful without a loaded model.
    let model = match LogisticModel::from_path(&model_path) {
        Ok(model) => model,
        Err(err) => {
            eprintln!("failed to load model from {}: {}", model_path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let sample = Measurements {
        pregnancies: 2,
        glucose: 120.0,
        blood_pressure: 70.0,
        skin_thickness: 30.0,
        insulin: 80.0,
        bmi: 25.0,
        pedigree: 0.5,
        age: 33,
    };

    let features = sample.to_features();
    let outcome = match model.predict(features.view()) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("screening failed: {}", err);
            return ExitCode::FAILURE;
        }
    };

    println!("measurements: {:?}", sample);
    println!("result: {}", outcome.verdict());

    match Cohort::from_path(&dataset_path).and_then(|cohort| cohort.class_averages()) {
        Ok(averages) => {
            println!(
                "diabetic average ({} records): {}",
                averages.diabetic_rows,
                format_series(&averages.diabetic)
            );
            println!(
                "normal average   ({} records): {}",
                averages.normal_rows,
                format_series(&averages.normal)
            );
        }
        Err(err) => eprintln!("cohort unavailable: {}", err),
    }

    let history = HistoryLog::new(history_path);
    if let Err(err) = history.append(&sample, outcome) {
        eprintln!("history not saved: {}", err);
        return ExitCode::FAILURE;
    }
    println!("appended to {}", history.path().display());

    ExitCode::SUCCESS
}

fn format_series(values: &Array1<f64>) -> String {
    values
        .iter()
        .map(|v| format!("{v:.1}"))
        .collect::<Vec<_>>()
        .join(", ")
}
