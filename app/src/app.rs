use crate::classifier::Classifier;
use crate::ui;

use cohort::{ClassAverages, CohortError, HistoryLog};
use eframe::egui;
use eframe::{App, Frame};
use glyco::{Measurements, Outcome};

/// One completed screening, kept for the output panel.
#[derive(Debug, Clone)]
pub struct Screening {
    pub input: Measurements,
    pub outcome: Outcome,
}

/// The main application struct.
/// It holds the form state and delegates all drawing to the `ui` module.
pub struct ScreenerApp {
    /// The injected classifier; immutable for the process lifetime.
    pub classifier: Box<dyn Classifier>,
    /// Current form values, edited in place until the user runs a screening.
    pub form: Measurements,
    /// Per-class cohort averages, or the load error shown in the chart area.
    pub averages: Result<ClassAverages, CohortError>,
    /// Append-only log of completed screenings.
    pub history: HistoryLog,
    /// The most recent screening, if any.
    pub last: Option<Screening>,
    /// Classifier failure from the last attempt, if any.
    pub screen_error: Option<String>,
    /// History-append failure from the last screening, if any.
    pub history_error: Option<String>,
}

impl ScreenerApp {
    pub fn new(
        classifier: Box<dyn Classifier>,
        averages: Result<ClassAverages, CohortError>,
        history: HistoryLog,
    ) -> Self {
        Self {
            classifier,
            form: Measurements::default(),
            averages,
            history,
            last: None,
            screen_error: None,
            history_error: None,
        }
    }

    /// Runs one screening from the current form values: predict, remember
    /// the result for the output panel, append it to the history log.
    pub fn run_screening(&mut self) {
        let features = self.form.to_features();
        match self.classifier.predict(features.view()) {
            Ok(outcome) => {
                self.screen_error = None;
                self.history_error = self
                    .history
                    .append(&self.form, outcome)
                    .err()
                    .map(|err| err.to_string());
                self.last = Some(Screening {
                    input: self.form.clone(),
                    outcome,
                });
            }
            Err(err) => {
                self.screen_error = Some(err.to_string());
            }
        }
    }
}

impl App for ScreenerApp {
    /// The main update loop, called by eframe on every frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ui::draw_side_panel(self, ctx);
        ui::draw_central_panel(self, ctx);
    }
}
