use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::HourRange;
use crate::data::variable::{NumericalVariable, Variable};
use crate::query::{AxisAssignment, Metric, Orientation};
use crate::state::{AppState, Tab};
use crate::theme::Theme;
use crate::ui::plot;

const INSIGHTS: [&str; 4] = [
    "Peak pickup hours might be around late afternoon and early evening.",
    "When precipitation (PRCP) is higher, trip distances or fares may vary.",
    "The average fare hovers around $14, but a majority of trips remain below $25.",
    "VendorID distribution suggests that the majority of trips come from one major provider.",
];

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu, theme toggle and tab strip.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label("Theme:");
        for theme in [Theme::Light, Theme::Dark] {
            ui.radio_value(&mut state.theme, theme, theme.label());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("NYC Taxi Trip Analysis Dashboard").size(26.0).strong());
    });

    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, RichText::new(tab.label()).size(16.0));
        }
    });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Left side panel – hour filter
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    ui.label(format!("{} trips loaded", dataset.len()));
    if let Some((first, last)) = dataset.date_span() {
        ui.label(format!("{first} → {last}"));
    }
    if let Some(source) = &state.source {
        ui.label(RichText::new(source.display().to_string()).small().weak());
    }
    ui.separator();

    ui.strong("Filter by Pickup Hour:");
    let params = &mut state.params;
    ui.add(egui::Slider::new(&mut params.hour_lower, 0..=HourRange::MAX_HOUR).text("from"));
    ui.add(egui::Slider::new(&mut params.hour_upper, 0..=HourRange::MAX_HOUR).text("to"));
    // Keep the pair ordered while either handle is dragged.
    if params.hour_lower > params.hour_upper {
        params.hour_upper = params.hour_lower;
    }
    ui.label(format!("{:02}:00 – {:02}:59", params.hour_lower, params.hour_upper));
    ui.small("Applies to the Overview and Relationship tabs.");
}

// ---------------------------------------------------------------------------
// Overview tab
// ---------------------------------------------------------------------------

fn metric_card(ui: &mut Ui, state: &AppState, title: &str, value: String) {
    egui::Frame::group(ui.style())
        .fill(state.theme.colors().card)
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(title).size(15.0));
                ui.label(RichText::new(value).size(28.0).strong());
            });
        });
}

pub fn overview_tab(ui: &mut Ui, state: &mut AppState) {
    let summary = state.summary;
    ui.columns(3, |cols| {
        metric_card(&mut cols[0], state, "Total Trips", summary.count.to_string());
        metric_card(&mut cols[1], state, "Average Fare", summary.fare_label());
        metric_card(&mut cols[2], state, "Average Trip Distance", summary.distance_label());
    });
    ui.add_space(12.0);

    ui.horizontal_top(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.set_width(220.0);
            ui.strong("Select Variable for Analysis:");
            let current = state.params.selected_variable;
            egui::ComboBox::from_id_salt("variable_selector")
                .selected_text(current.map(Variable::name).unwrap_or("—"))
                .show_ui(ui, |ui: &mut Ui| {
                    for var in Variable::all() {
                        ui.selectable_value(&mut state.params.selected_variable, Some(var), var.name());
                    }
                });
            ui.add_space(12.0);
            ui.strong("Chart Orientation:");
            ui.horizontal(|ui: &mut Ui| {
                ui.radio_value(&mut state.params.orientation, Orientation::Vertical, "Vertical");
                ui.radio_value(&mut state.params.orientation, Orientation::Horizontal, "Horizontal");
            });
        });

        ui.vertical(|ui: &mut Ui| {
            if let Some(view) = &state.distribution {
                plot::distribution_chart(ui, view);
                ui.label(RichText::new(&view.description).size(15.0));
            }
        });
    });

    ui.add_space(12.0);
    ui.heading("Key Insights");
    for insight in INSIGHTS {
        ui.label(format!("• {insight}"));
    }
}

// ---------------------------------------------------------------------------
// Relationship tab
// ---------------------------------------------------------------------------

fn numerical_selector(ui: &mut Ui, id: &str, value: &mut Option<NumericalVariable>) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(value.map(NumericalVariable::name).unwrap_or("—"))
        .show_ui(ui, |ui: &mut Ui| {
            for var in NumericalVariable::ALL {
                ui.selectable_value(value, Some(var), var.name());
            }
        });
}

pub fn relationship_tab(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Relationship Analysis");
    });
    ui.columns(3, |cols| {
        cols[0].strong("Select Variable A:");
        numerical_selector(&mut cols[0], "var_a_selector", &mut state.params.variable_a);
        cols[1].strong("Select Variable B:");
        numerical_selector(&mut cols[1], "var_b_selector", &mut state.params.variable_b);
        cols[2].strong("Assign Variable A to:");
        cols[2].radio_value(&mut state.params.axis_assignment, AxisAssignment::X, "X-Axis");
        cols[2].radio_value(&mut state.params.axis_assignment, AxisAssignment::Y, "Y-Axis");
    });
    ui.separator();

    if let Some(view) = &state.scatter {
        plot::scatter_plot(ui, view);
    }
    ui.label(
        "This scatter plot shows the relationship between the selected variables. \
         Hover over the points to see detailed information, and note the color coding that \
         indicates precipitation (PRCP) levels, which may impact trip characteristics.",
    );
}

// ---------------------------------------------------------------------------
// Time series tab
// ---------------------------------------------------------------------------

pub fn time_series_tab(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Time Series Analysis");
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Select Metric:");
        egui::ComboBox::from_id_salt("timeseries_metric")
            .selected_text(state.params.metric.label())
            .show_ui(ui, |ui: &mut Ui| {
                for metric in Metric::ALL {
                    ui.selectable_value(&mut state.params.metric, metric, metric.label());
                }
            });
    });

    if let Some(series) = &state.time_series {
        plot::time_series_chart(ui, series);
    }
    ui.label(
        "The time series analysis above shows how the selected metric changes over days. \
         This helps identify trends, peak days, or anomalies in the data.",
    );
    ui.separator();

    ui.push_id("daily_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(240.0)
            .column(Column::auto().at_least(100.0))
            .columns(Column::auto().at_least(120.0), 3)
            .header(20.0, |mut header| {
                for title in ["Date", "Total Trips", "Average Fare", "Average Distance"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for day in &state.daily {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(day.date.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(day.trip_count.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("${:.2}", day.avg_fare));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("{:.2} mi", day.avg_distance));
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open taxi trip data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
