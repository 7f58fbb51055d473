use crate::app::ScreenerApp;

use cohort::ClassAverages;
use ecolor::Hsva;
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Stroke, Ui};
use glyco::{FEATURE_COUNT, FEATURES, FeatureField, Measurements, Outcome};

/// Abbreviated column names for the chart's x axis.
const SHORT_LABELS: [&str; FEATURE_COUNT] =
    ["Preg", "Gluc", "BP", "Skin", "Insulin", "BMI", "DPF", "Age"];

// Series hues, rendered through the same HSV ramp everywhere.
const INPUT_HUE: f32 = 0.58;
const DIABETIC_HUE: f32 = 0.02;
const NORMAL_HUE: f32 = 0.33;

/// Draws the entire left-side panel: blurb, intake form and trigger button.
pub fn draw_side_panel(app: &mut ScreenerApp, ctx: &egui::Context) {
    egui::SidePanel::left("intake_panel").show(ctx, |ui| {
        ui.heading("Diabetes Screening");
        ui.label(
            "Predicts from the entered measurements whether diabetes is \
             indicated, using a pre-trained logistic regression model.",
        );
        ui.separator();

        ui.heading("Patient intake form");
        draw_intake_form(&mut app.form, ui);
        ui.separator();

        if ui.button("Run screening").clicked() {
            app.run_screening();
        }
        ui.label(format!("Model: {}", app.classifier.name()));
    });
}

/// The eight bounded inputs. The slider ranges are the only range
/// enforcement; out-of-range values cannot be entered.
fn draw_intake_form(form: &mut Measurements, ui: &mut Ui) {
    ui.add(bounded_slider(&mut form.pregnancies, &FEATURES[0]));
    ui.add(bounded_slider(&mut form.glucose, &FEATURES[1]));
    ui.add(bounded_slider(&mut form.blood_pressure, &FEATURES[2]));
    ui.add(bounded_slider(&mut form.skin_thickness, &FEATURES[3]));
    ui.add(bounded_slider(&mut form.insulin, &FEATURES[4]));
    ui.add(bounded_slider(&mut form.bmi, &FEATURES[5]));
    ui.add(bounded_slider(&mut form.pedigree, &FEATURES[6]));
    ui.add(bounded_slider(&mut form.age, &FEATURES[7]));
}

fn bounded_slider<'a, Num: egui::emath::Numeric>(
    value: &'a mut Num,
    field: &FeatureField,
) -> egui::Slider<'a> {
    egui::Slider::new(value, Num::from_f64(field.min)..=Num::from_f64(field.max)).text(field.name)
}

/// Draws the central panel: input echo, verdict and the comparison chart.
pub fn draw_central_panel(app: &mut ScreenerApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            if let Some(err) = &app.screen_error {
                ui.colored_label(series_color(DIABETIC_HUE), format!("Screening failed: {err}"));
                ui.separator();
            }

            let Some(screening) = &app.last else {
                ui.label("Fill in the form and press \u{201c}Run screening\u{201d}.");
                return;
            };

            ui.heading("Submitted measurements");
            draw_input_echo(ui, &screening.input);
            ui.separator();

            ui.heading("Result");
            let color = match screening.outcome {
                Outcome::Diabetic => series_color(DIABETIC_HUE),
                Outcome::Normal => series_color(NORMAL_HUE),
            };
            ui.colored_label(color, screening.outcome.verdict());
            if let Some(err) = &app.history_error {
                ui.colored_label(
                    Color32::YELLOW,
                    format!("Screening history not saved: {err}"),
                );
            }
            ui.separator();

            ui.heading("Comparison with cohort averages");
            match &app.averages {
                Ok(averages) => draw_comparison_chart(ui, &screening.input, averages),
                Err(err) => {
                    ui.colored_label(
                        series_color(DIABETIC_HUE),
                        format!("Cohort unavailable: {err}"),
                    );
                }
            }
        });
    });
}

/// Echo of the submitted values, one labeled row per measurement.
fn draw_input_echo(ui: &mut Ui, input: &Measurements) {
    egui::Grid::new("input_echo").striped(true).show(ui, |ui| {
        ui.label("Measurement");
        ui.label("Value");
        ui.end_row();
        for (field, value) in FEATURES.iter().zip(input.values()) {
            ui.label(field.name);
            if field.integral {
                ui.label(format!("{}", value as i64));
            } else {
                ui.label(format!("{value}"));
            }
            ui.end_row();
        }
    });
}

/// The three-series comparison: user input against both class averages,
/// one x position per measurement, raw values on a shared linear y axis.
fn draw_comparison_chart(ui: &mut Ui, input: &Measurements, averages: &ClassAverages) {
    ui.label(format!(
        "Cohort averages from {} diabetic and {} normal records.",
        averages.diabetic_rows, averages.normal_rows
    ));
    ui.horizontal(|ui| {
        ui.colored_label(series_color(INPUT_HUE), "— Your input");
        ui.colored_label(series_color(DIABETIC_HUE), "— Diabetic average");
        ui.colored_label(series_color(NORMAL_HUE), "— Normal average");
    });

    let input_values = input.values();
    let diabetic = averages.diabetic.to_vec();
    let normal = averages.normal.to_vec();
    let series: [(&[f64], f32); 3] = [
        (input_values.as_slice(), INPUT_HUE),
        (diabetic.as_slice(), DIABETIC_HUE),
        (normal.as_slice(), NORMAL_HUE),
    ];
    let ceiling = chart_ceiling(&[
        input_values.as_slice(),
        diabetic.as_slice(),
        normal.as_slice(),
    ]);

    let desired = egui::vec2(ui.available_width().min(680.0), 260.0);
    let (response, painter) = ui.allocate_painter(desired, Sense::hover());
    let rect = response.rect;

    // Plot area, inset to leave room for the axis labels.
    let left = rect.left() + 56.0;
    let right = rect.right() - 12.0;
    let top = rect.top() + 8.0;
    let bottom = rect.bottom() - 24.0;

    let x_at =
        |index: usize| egui::remap(index as f32, 0.0..=(FEATURE_COUNT - 1) as f32, left..=right);
    let y_at = |value: f64| egui::remap(value as f32, 0.0..=ceiling as f32, bottom..=top);

    let axis_color = ui.visuals().weak_text_color();
    painter.line_segment(
        [Pos2::new(left, top), Pos2::new(left, bottom)],
        Stroke::new(1.0, axis_color),
    );
    painter.line_segment(
        [Pos2::new(left, bottom), Pos2::new(right, bottom)],
        Stroke::new(1.0, axis_color),
    );

    // Ticks at zero, half and full scale.
    for fraction in [0.0_f64, 0.5, 1.0] {
        let value = fraction * ceiling;
        let y = y_at(value);
        painter.line_segment(
            [Pos2::new(left - 4.0, y), Pos2::new(left, y)],
            Stroke::new(1.0, axis_color),
        );
        painter.text(
            Pos2::new(left - 6.0, y),
            Align2::RIGHT_CENTER,
            format!("{value:.0}"),
            FontId::proportional(10.0),
            axis_color,
        );
    }

    for (index, label) in SHORT_LABELS.iter().enumerate() {
        painter.text(
            Pos2::new(x_at(index), bottom + 4.0),
            Align2::CENTER_TOP,
            *label,
            FontId::proportional(10.0),
            axis_color,
        );
    }

    for (values, hue) in series {
        let color = series_color(hue);
        let points: Vec<Pos2> = values
            .iter()
            .enumerate()
            .map(|(index, value)| Pos2::new(x_at(index), y_at(*value)))
            .collect();
        for pair in points.windows(2) {
            painter.line_segment([pair[0], pair[1]], Stroke::new(2.0, color));
        }
        for point in &points {
            painter.circle_filled(*point, 3.0, color);
        }
    }
}

/// Top of the shared y axis: the largest value across all series, never zero.
fn chart_ceiling(series: &[&[f64]]) -> f64 {
    let max = series
        .iter()
        .flat_map(|values| values.iter())
        .fold(0.0_f64, |acc, value| acc.max(*value));
    if max > 0.0 { max } else { 1.0 }
}

fn series_color(hue: f32) -> Color32 {
    let hsva = Hsva {
        h: hue,
        s: 0.85,
        v: 0.9,
        a: 1.0,
    };
    Color32::from(hsva)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_ceiling_spans_all_series() {
        let a: &[f64] = &[1.0, 2.0, 3.0];
        let b: &[f64] = &[10.0, 0.5];
        assert_eq!(chart_ceiling(&[a, b]), 10.0);
    }

    #[test]
    fn chart_ceiling_never_collapses_to_zero() {
        let flat: &[f64] = &[0.0, 0.0];
        assert_eq!(chart_ceiling(&[flat]), 1.0);
    }

    #[test]
    fn every_feature_has_a_short_label() {
        assert_eq!(SHORT_LABELS.len(), FEATURES.len());
    }
}
