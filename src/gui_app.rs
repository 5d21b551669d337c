//! Desktop window: menu bar, data controls, plot, prediction controls.

use eframe::egui;
use egui::{Align2, Color32, RichText};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use regression_calculator::engine::Figure;
use regression_calculator::session::{Notification, Session};

const WINDOW_TITLE: &str = "Regression Calculator";
const PREVIEW_ROWS: usize = 200;

// Accent for the Calculate button
const CALCULATE_FILL: Color32 = Color32::from_rgb(46, 125, 50);
const FIT_LINE_COLOR: Color32 = Color32::RED;
const FIT_LINE_WIDTH: f32 = 4.0;

struct RegressionApp {
    session: Session,
    x_label: String,
    y_label: String,
    prediction_input: String,
    // At most one dialog at a time, like a modal message box
    notification: Option<Notification>,
}

impl RegressionApp {
    fn new(cc: &eframe::CreationContext<'_>, session: Session, notification: Option<Notification>) -> Self {
        egui::Context::set_visuals(&cc.egui_ctx, egui::Visuals::dark());
        Self {
            session,
            x_label: String::new(),
            y_label: String::new(),
            prediction_input: String::new(),
            notification,
        }
    }

    // --- Event handlers ---

    fn open_file_name_dialog(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_title("Open a CSV")
            .pick_file();
        self.notification = Some(self.session.select_file(picked));
    }

    fn label_handler(&mut self) {
        self.notification = self.session.calculate(&self.x_label, &self.y_label);
    }

    fn prediction_event(&mut self) {
        self.notification = Some(self.session.predict(&self.prediction_input));
    }

    // --- Panels ---

    fn menu_bar(ui: &mut egui::Ui) {
        // Placeholders only; none of these entries do anything yet.
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New").clicked() {
                    ui.close_menu();
                }
            });
            ui.menu_button("Edit", |ui| {
                if ui.button("Undo").clicked() {
                    ui.close_menu();
                }
                if ui.button("Redo").clicked() {
                    ui.close_menu();
                }
            });
            ui.menu_button("help", |ui| {
                if ui.button("Help on GitHub").clicked() {
                    ui.close_menu();
                }
                if ui.button("Email Me").clicked() {
                    ui.close_menu();
                }
            });
        });
    }

    fn data_processor_gui(&mut self, ui: &mut egui::Ui) {
        let open_clicked = ui
            .add_sized([ui.available_width(), 24.0], egui::Button::new("Open a CSV"))
            .clicked();
        if open_clicked {
            self.open_file_name_dialog();
        }

        ui.horizontal(|ui| {
            ui.label("X Label");
            ui.add(egui::TextEdit::singleline(&mut self.x_label).desired_width(160.0));
            ui.label("Y Label");
            ui.add(egui::TextEdit::singleline(&mut self.y_label).desired_width(160.0));
            let calculate = egui::Button::new(RichText::new("Calculate").color(Color32::WHITE))
                .fill(CALCULATE_FILL);
            if ui.add(calculate).clicked() {
                self.label_handler();
            }
        });
    }

    fn prediction_gui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Get Prediction of a value: ");
            let response = ui.add(egui::TextEdit::singleline(&mut self.prediction_input).desired_width(160.0));
            let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Predict").clicked() || enter {
                self.prediction_event();
            }
        });
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(format!("State: {}", self.session.state()));
            if let Some(path) = self.session.file_path() {
                ui.separator();
                ui.label(path.display().to_string());
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let (Some(fit), Some(at)) = (self.session.last_fit(), self.session.last_fit_at()) {
                    ui.label(format!(
                        "{}  (n = {}, r² = {:.4}, fitted {})",
                        fit.equation(),
                        fit.n,
                        fit.r_squared,
                        at.format("%H:%M:%S")
                    ));
                }
            });
        });
    }

    fn data_preview(&self, ui: &mut egui::Ui) {
        let Some(dataset) = self.session.engine().dataset() else {
            ui.label("No data loaded.");
            return;
        };
        let headers = dataset.headers();
        if headers.is_empty() {
            ui.label("No columns.");
            return;
        }
        let rows = dataset.row_count().min(PREVIEW_ROWS);
        ui.label(format!("{} rows × {} columns", dataset.row_count(), headers.len()));

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(80.0), headers.len())
            .max_scroll_height(160.0)
            .header(20.0, |mut header| {
                for name in headers {
                    header.col(|ui| {
                        ui.strong(name.as_str());
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows, |mut row| {
                    let r = row.index();
                    for c in 0..headers.len() {
                        row.col(|ui| {
                            ui.label(dataset.cell(r, c).unwrap_or(""));
                        });
                    }
                });
            });
    }

    fn regression_plot(&self, ui: &mut egui::Ui) {
        let figure = self.session.figure();
        let mut plot = Plot::new("regression_plot").legend(Legend::default());
        if let Figure::Fitted { x_label, y_label, .. } = figure {
            plot = plot.x_axis_label(x_label.clone()).y_axis_label(y_label.clone());
        }

        plot.show(ui, |plot_ui| {
            let points = Points::new(PlotPoints::from(figure.points().to_vec()))
                .radius(4.0)
                .name("data");
            plot_ui.points(points);

            if let Some(line) = figure.line() {
                let fit_line = Line::new(PlotPoints::from(line.to_vec()))
                    .color(FIT_LINE_COLOR)
                    .width(FIT_LINE_WIDTH)
                    .name("fit");
                plot_ui.line(fit_line);
            }
        });
    }

    fn notification_window(&mut self, ctx: &egui::Context) {
        let Some(notification) = &self.notification else {
            return;
        };
        let mut dismissed = false;
        let text = if notification.is_error() {
            RichText::new(&notification.message).color(Color32::LIGHT_RED)
        } else {
            RichText::new(&notification.message)
        };

        egui::Window::new(notification.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(text);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.notification = None;
        }
    }
}

impl eframe::App for RegressionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let modal_open = self.notification.is_some();

        egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, Self::menu_bar);
        });

        egui::TopBottomPanel::top("data_panel").show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| self.data_processor_gui(ui));
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            self.status_bar(ui);
        });

        egui::TopBottomPanel::bottom("prediction_panel").show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| self.prediction_gui(ui));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::CollapsingHeader::new("Data preview")
                .default_open(false)
                .show(ui, |ui| self.data_preview(ui));
            self.regression_plot(ui);
        });

        self.notification_window(ctx);
    }
}

/// Open the window. `notification` is shown on the first frame.
pub fn main(session: Session, notification: Option<Notification>) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Box::new(RegressionApp::new(cc, session, notification))),
    )
}
