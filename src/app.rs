use eframe::egui;

use crate::state::{AppState, Tab};
use crate::theme::Theme;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TaxiDashboardApp {
    pub state: AppState,
    /// Theme whose visuals are currently installed in the context.
    applied_theme: Option<Theme>,
}

impl TaxiDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            applied_theme: None,
        }
    }
}

impl eframe::App for TaxiDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.applied_theme != Some(self.state.theme) {
            self.state.theme.apply(ctx);
            self.applied_theme = Some(self.state.theme);
        }

        // Recompute whichever views last frame's input changed.
        self.state.refresh();

        // ---- Top panel: menu bar, theme toggle, tabs ----
        egui::TopBottomPanel::top("top_bar")
            .frame(self.state.theme.header_frame(&ctx.style()))
            .show(ctx, |ui| {
                panels::top_bar(ui, &mut self.state);
            });

        // ---- Left side panel: hour filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a file to explore taxi trips  (File → Open…)");
                });
                return;
            }
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.state.tab {
                    Tab::Overview => panels::overview_tab(ui, &mut self.state),
                    Tab::Relationship => panels::relationship_tab(ui, &mut self.state),
                    Tab::TimeSeries => panels::time_series_tab(ui, &mut self.state),
                });
        });
    }
}
