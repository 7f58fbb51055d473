mod app;
mod classifier;
mod ui;

use std::env;
use std::path::PathBuf;

use app::ScreenerApp;
use classifier::LogisticAdapter;
use cohort::{Cohort, HistoryLog};
use logistic::LogisticModel;

const MODEL_PATH: &str = "assets/model.json";
const DATASET_PATH: &str = "assets/diabetes.csv";
const HISTORY_PATH: &str = "screenings.csv";

fn main() -> eframe::Result<()> {
    // Positional overrides: model, cohort, history.
    let mut args = env::args().skip(1);
    let model_path = PathBuf::from(args.next().unwrap_or_else(|| MODEL_PATH.to_string()));
    let dataset_path = PathBuf::from(args.next().unwrap_or_else(|| DATASET_PATH.to_string()));
    let history_path = PathBuf::from(args.next().unwrap_or_else(|| HISTORY_PATH.to_string()));

    // No model, no screening: bail out before any UI comes up.
    let model = match LogisticModel::from_path(&model_path) {
        Ok(model) => model,
        Err(err) => {
            eprintln!("failed to load model from {}: {}", model_path.display(), err);
            std::process::exit(1);
        }
    };

    // The cohort only feeds the comparison chart; a failure is carried into
    // the app and shown there instead of aborting.
    let averages = Cohort::from_path(&dataset_path).and_then(|cohort| cohort.class_averages());

    let app = ScreenerApp::new(
        Box::new(LogisticAdapter::new(model)),
        averages,
        HistoryLog::new(history_path),
    );

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Diabetes Screening",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
