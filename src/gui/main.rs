#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::{Path, PathBuf};

use eframe::egui;

use img_inspect::probe::{is_image, IMAGE_EXTENSIONS};
use img_inspect::report::build_report;
use img_inspect::scan::scan_folder;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([980.0, 640.0])
        .with_min_inner_size([720.0, 480.0])
        .with_drag_and_drop(true);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Image Inspector",
        options,
        Box::new(|cc| Ok(Box::new(App::new(cc)))),
    )
}

// ── Main application state ──────────────────────────────────────────

struct App {
    /// Images found by the last folder scan.
    images: Vec<PathBuf>,
    selected: Option<usize>,
    /// Rendered report (or scan summary) shown in the central panel.
    report_text: String,
    /// Image shown above the report text.
    preview: Option<PathBuf>,
    status: String,
}

impl App {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        Self {
            images: Vec::new(),
            selected: None,
            report_text: String::new(),
            preview: None,
            status: "Ready — open an image or scan a folder".into(),
        }
    }

    fn open_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.inspect_file(path);
        }
    }

    fn open_folder(&mut self) {
        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
            self.scan_dir(&dir);
        }
    }

    /// Probe a single file and analyze it if it is a readable image.
    fn inspect_file(&mut self, path: PathBuf) {
        if !is_image(&path) {
            log::warn!("Rejected by probe: {}", path.display());
            self.status = format!("Not a valid image: {}", file_name(&path));
            let _ = rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("Open Image")
                .set_description("Selected file is not a valid image.")
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
            return;
        }
        self.analyze(path);
    }

    fn scan_dir(&mut self, dir: &Path) {
        let images = scan_folder(dir);
        self.selected = None;
        self.preview = None;

        if images.is_empty() {
            self.images.clear();
            self.report_text.clear();
            self.status = "No images found".into();
            let _ = rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Info)
                .set_title("Scan Folder")
                .set_description("No image files found in the selected folder.")
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
            return;
        }

        self.status = format!("{} image(s) found", images.len());
        self.report_text = format!(
            "Found {} image(s) in the folder.\nSelect an image from the list to analyze.\n",
            images.len()
        );
        self.images = images;
    }

    /// Build the two-stage report for `path` and show it with a preview.
    fn analyze(&mut self, path: PathBuf) {
        self.report_text = build_report(&path).render();
        self.status = format!("Analyzed: {}", file_name(&path));
        self.preview = Some(path);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle dropped files
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw.dropped_files.iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        for path in dropped {
            if path.is_dir() {
                self.scan_dir(&path);
            } else {
                self.inspect_file(path);
            }
        }

        // ── Top bar ─────────────────────────────────────────────────
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Image Inspector");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(&self.status);
                });
            });
        });

        // ── Bottom toolbar ──────────────────────────────────────────
        egui::TopBottomPanel::bottom("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("📂 Open Image").clicked() {
                    self.open_file();
                }
                if ui.button("📁 Scan Folder").clicked() {
                    self.open_folder();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let has_content = !self.images.is_empty() || !self.report_text.is_empty();
                    if ui.add_enabled(has_content, egui::Button::new("🗑 Clear")).clicked() {
                        self.images.clear();
                        self.selected = None;
                        self.report_text.clear();
                        self.preview = None;
                        self.status = "Ready — open an image or scan a folder".into();
                    }
                });
            });
            ui.add_space(4.0);
        });

        // ── Left panel: scan results ────────────────────────────────
        if !self.images.is_empty() {
            egui::SidePanel::left("image_list")
                .default_width(260.0)
                .min_width(180.0)
                .show(ctx, |ui| {
                    ui.heading("Images");
                    ui.separator();

                    egui::ScrollArea::vertical().show(ui, |ui| {
                        let mut new_selected = self.selected;
                        for (i, path) in self.images.iter().enumerate() {
                            let is_selected = self.selected == Some(i);
                            if ui.selectable_label(is_selected, file_name(path)).clicked() {
                                new_selected = Some(i);
                            }
                        }
                        if new_selected != self.selected {
                            self.selected = new_selected;
                            if let Some(i) = new_selected {
                                let path = self.images[i].clone();
                                self.analyze(path);
                            }
                        }
                    });
                });
        }

        // ── Central panel: preview + report ─────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.report_text.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Open an image or scan a folder to begin")
                            .size(16.0)
                            .color(egui::Color32::GRAY),
                    );
                });
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if let Some(ref path) = self.preview {
                        ui.add(
                            egui::Image::new(format!("file://{}", path.display()))
                                .max_height(280.0),
                        );
                        ui.add_space(8.0);
                        ui.separator();
                        ui.add_space(8.0);
                    }

                    ui.label(egui::RichText::new(&self.report_text).monospace());
                });
        });
    }
}
